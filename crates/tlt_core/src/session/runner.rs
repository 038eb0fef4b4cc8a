//! Session runner: countdown, beat scheduling, cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;

use crate::analysis::{Reading, TapAnalyzer, TimestampMs};
use crate::clock::Clock;
use crate::config::Settings;
use crate::models::SessionState;

use super::emitter::BeatEmitter;
use super::errors::{SessionError, SessionResult};

/// A measurement session.
///
/// Owns the analyzer and drives the metronome from a background task.
/// All mutation of the logs happens on discrete events: the beat task
/// stamps each emission, `record_tap` stamps each input. The analyzer
/// sits behind a mutex only because those two arrive on different
/// tasks; each critical section is a push into a ten-entry deque, so
/// the tap path never meaningfully blocks.
pub struct Session {
    analyzer: Arc<Mutex<TapAnalyzer>>,
    clock: Arc<dyn Clock>,
    emitter: Arc<dyn BeatEmitter>,
    countdown_secs: u32,
    state_tx: watch::Sender<SessionState>,
    cancelled: Arc<AtomicBool>,
    wake: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl Session {
    /// Create an idle session from settings.
    pub fn new(
        settings: &Settings,
        clock: Arc<dyn Clock>,
        emitter: Arc<dyn BeatEmitter>,
    ) -> Self {
        let (state_tx, _state_rx) = watch::channel(SessionState::Idle);
        Self {
            analyzer: Arc::new(Mutex::new(TapAnalyzer::from_settings(settings))),
            clock,
            emitter,
            countdown_secs: settings.metronome.countdown_secs,
            state_tx,
            cancelled: Arc::new(AtomicBool::new(false)),
            wake: Arc::new(Notify::new()),
            task: None,
        }
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    /// Subscribe to state changes (countdown ticks, running, idle).
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Snapshot the current readings.
    pub fn reading(&self) -> Reading {
        self.analyzer.lock().reading()
    }

    /// Change the metronome tempo.
    ///
    /// Rejected while a session is live: the beat period and the
    /// folded-latency modulus must stay consistent across one window.
    pub fn set_tempo(&self, bpm: f64) -> SessionResult<()> {
        if !self.state().is_idle() {
            return Err(SessionError::SessionActive);
        }
        self.analyzer.lock().set_tempo(bpm)?;
        Ok(())
    }

    /// Record a user tap at the current clock instant.
    ///
    /// Ignored unless the session is running (countdown taps would
    /// pair with beats that never happened). Returns the timestamp
    /// that was recorded, if any.
    pub fn record_tap(&self) -> Option<TimestampMs> {
        if !self.state().is_running() {
            return None;
        }
        let t = self.clock.now_ms();
        self.analyzer.lock().record_tap(t);
        Some(t)
    }

    /// Start a new measurement run.
    ///
    /// Prepares the emitter first; if that fails the analyzer is left
    /// untouched and the session stays idle. Otherwise both logs are
    /// cleared and the countdown/beat task is spawned. Must be called
    /// from within a tokio runtime.
    pub fn start(&mut self) -> SessionResult<()> {
        if !self.state().is_idle() {
            return Err(SessionError::AlreadyRunning);
        }

        self.emitter.prepare()?;

        self.analyzer.lock().reset();
        // Cancellation state is per run. stop() does not reap the old
        // task; were the flag shared, clearing it here could revive a
        // stale task that had not yet observed its cancellation. A
        // fresh flag and notifier leave the old task holding its own,
        // already-set flag.
        self.cancelled = Arc::new(AtomicBool::new(false));
        self.wake = Arc::new(Notify::new());

        let analyzer = Arc::clone(&self.analyzer);
        let clock = Arc::clone(&self.clock);
        let emitter = Arc::clone(&self.emitter);
        let cancelled = Arc::clone(&self.cancelled);
        let wake = Arc::clone(&self.wake);
        let state_tx = self.state_tx.clone();
        let countdown = self.countdown_secs;
        let period = Duration::from_secs_f64(self.analyzer.lock().beat_period_ms() / 1000.0);

        tracing::info!(
            "starting session: {} BPM, {}s countdown",
            self.analyzer.lock().tempo_bpm(),
            countdown
        );

        // Broadcast the initial state synchronously so a second
        // start() in the same tick is already rejected.
        let initial = if countdown > 0 {
            SessionState::CountingDown(countdown)
        } else {
            SessionState::Running
        };
        self.state_tx.send_replace(initial);

        self.task = Some(tokio::spawn(async move {
            // Lead-in: one tick per second, broadcast for the UI.
            let mut remaining = countdown;
            while remaining > 0 {
                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_secs(1)) => {}
                    _ = wake.notified() => {}
                }
                if cancelled.load(Ordering::SeqCst) {
                    return;
                }
                remaining -= 1;
                let next = if remaining > 0 {
                    SessionState::CountingDown(remaining)
                } else {
                    SessionState::Running
                };
                state_tx.send_replace(next);
            }

            // Beat loop: emit, stamp, suspend one period. The select
            // lets stop() interrupt the pending sleep, and the loop
            // condition keeps any further beat from being recorded.
            while !cancelled.load(Ordering::SeqCst) {
                emitter.emit();
                analyzer.lock().record_beat(clock.now_ms());

                tokio::select! {
                    _ = tokio::time::sleep(period) => {}
                    _ = wake.notified() => {}
                }
            }
        }));

        Ok(())
    }

    /// Stop the current run, interrupting any pending beat wait.
    ///
    /// Safe to call when already idle. The collected logs survive
    /// until the next `start()`, so readings remain inspectable.
    pub fn stop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.wake.notify_waiters();
        // Subscribers only hear about an actual transition.
        self.state_tx.send_if_modified(|state| {
            let was_idle = state.is_idle();
            *state = SessionState::Idle;
            !was_idle
        });
    }

    /// Wait for the background beat task to finish after `stop()`.
    pub async fn join(&mut self) {
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.wake.notify_waiters();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
