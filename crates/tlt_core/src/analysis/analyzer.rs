//! The tap-tempo analyzer.
//!
//! Maintains two bounded timestamp logs - metronome beats and user
//! taps - and derives the tapped tempo and the averaged beat-to-tap
//! latency from them. The two logs are evicted in lockstep so that
//! index i of one always pairs with index i of the other; the pairwise
//! latency mean is meaningless otherwise.

use std::collections::VecDeque;

use crate::config::Settings;

use super::stats;
use super::types::{Reading, TempoError, TimestampMs};
use super::MS_PER_MINUTE;

/// Default number of samples kept in each log.
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Default taps required before readings are reported.
pub const DEFAULT_MIN_SAMPLES: usize = 10;

/// Default metronome tempo.
pub const DEFAULT_BPM: f64 = 120.0;

/// Tap-tempo and latency analyzer.
///
/// Owned exclusively by one session; all mutation happens through
/// `record_beat` / `record_tap` / `reset`, one discrete event at a
/// time. Read operations return `None` until enough samples exist.
#[derive(Debug, Clone)]
pub struct TapAnalyzer {
    /// Timestamps at which the metronome emitted a beat.
    beat_log: VecDeque<TimestampMs>,
    /// Timestamps at which the user tapped.
    tap_log: VecDeque<TimestampMs>,
    /// Window size W: both logs are bounded to this many entries.
    window_size: usize,
    /// Minimum taps M before a reading is considered valid.
    min_samples: usize,
    /// Configured metronome tempo in BPM.
    tempo_bpm: f64,
}

impl TapAnalyzer {
    /// Create an analyzer with default window, threshold, and tempo.
    pub fn new() -> Self {
        Self {
            beat_log: VecDeque::with_capacity(DEFAULT_WINDOW_SIZE + 1),
            tap_log: VecDeque::with_capacity(DEFAULT_WINDOW_SIZE + 1),
            window_size: DEFAULT_WINDOW_SIZE,
            min_samples: DEFAULT_MIN_SAMPLES,
            tempo_bpm: DEFAULT_BPM,
        }
    }

    /// Create an analyzer from settings.
    ///
    /// Settings are assumed validated (see `Settings::validate`); an
    /// out-of-range tempo here falls back to the default rather than
    /// poisoning the beat period.
    pub fn from_settings(settings: &Settings) -> Self {
        let mut analyzer = Self::new()
            .with_window_size(settings.analysis.window_size)
            .with_min_samples(settings.analysis.min_samples);
        if analyzer.set_tempo(settings.metronome.bpm).is_err() {
            tracing::warn!(
                "ignoring invalid configured tempo {} BPM, keeping {}",
                settings.metronome.bpm,
                analyzer.tempo_bpm
            );
        }
        analyzer
    }

    /// Set the log window size (clamped to at least 1).
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size.max(1);
        self
    }

    /// Set the minimum sample threshold.
    pub fn with_min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Configure the metronome tempo.
    ///
    /// Non-positive or non-finite values are rejected and the prior
    /// tempo stays in effect.
    pub fn set_tempo(&mut self, bpm: f64) -> Result<(), TempoError> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(TempoError::InvalidBpm(bpm));
        }
        self.tempo_bpm = bpm;
        Ok(())
    }

    /// The configured tempo in BPM.
    pub fn tempo_bpm(&self) -> f64 {
        self.tempo_bpm
    }

    /// One beat at the configured tempo, in milliseconds.
    pub fn beat_period_ms(&self) -> f64 {
        MS_PER_MINUTE / self.tempo_bpm
    }

    /// Record the instant a metronome beat was emitted.
    ///
    /// Called once per beat, in emission order. On overflow the oldest
    /// entry is evicted from *both* logs: trimming only one would shift
    /// the pairing by one the moment the metronome outruns the window,
    /// and every latency reading after that would be off by a period.
    pub fn record_beat(&mut self, t: TimestampMs) {
        self.beat_log.push_back(t);
        while self.beat_log.len() > self.window_size {
            self.beat_log.pop_front();
            self.tap_log.pop_front();
        }
    }

    /// Record the instant the user tapped.
    ///
    /// Called once per input event, in arrival order; no ordering
    /// relative to `record_beat` is assumed. Lockstep eviction, same as
    /// `record_beat`.
    pub fn record_tap(&mut self, t: TimestampMs) {
        self.tap_log.push_back(t);
        while self.tap_log.len() > self.window_size {
            self.tap_log.pop_front();
            self.beat_log.pop_front();
        }
    }

    /// Number of taps currently in the window.
    pub fn sample_count(&self) -> usize {
        self.tap_log.len()
    }

    /// Whether enough taps exist for readings to be trustworthy.
    pub fn is_ready(&self) -> bool {
        self.tap_log.len() >= self.min_samples
    }

    /// The tempo the user is tapping at, in BPM.
    ///
    /// `None` until the minimum sample threshold is met. Derived from
    /// the mean of consecutive tap intervals over the window.
    pub fn current_tempo(&self) -> Option<f64> {
        if self.tap_log.len() < self.min_samples {
            return None;
        }
        let taps: Vec<TimestampMs> = self.tap_log.iter().copied().collect();
        let mean_interval = stats::mean_of(&stats::intervals_of(&taps))?;
        if mean_interval <= 0.0 {
            // Coincident timestamps; no meaningful tempo.
            return None;
        }
        Some(MS_PER_MINUTE / mean_interval)
    }

    /// Averaged beat-to-tap offset in milliseconds.
    ///
    /// `None` until at least two taps exist. Pairs beat i with tap i
    /// over the leading `min(len, len)` entries and averages the
    /// differences; positive means the tap followed the beat.
    pub fn current_latency(&self) -> Option<f64> {
        if self.tap_log.len() < 2 {
            return None;
        }
        let paired = self.tap_log.len().min(self.beat_log.len());
        if paired == 0 {
            return None;
        }
        let diffs: Vec<f64> = self
            .tap_log
            .iter()
            .zip(self.beat_log.iter())
            .take(paired)
            .map(|(tap, beat)| tap - beat)
            .collect();
        stats::mean_of(&diffs)
    }

    /// Latency folded into a single beat period.
    ///
    /// A tap that is exactly one beat behind reads as near-zero rather
    /// than a full period. Always in `[0, beat_period_ms)`.
    pub fn latency_in_beat(&self) -> Option<f64> {
        let latency = self.current_latency()?;
        Some(stats::fold_into_beat(latency, self.beat_period_ms()))
    }

    /// Clear both logs for a new measurement session.
    ///
    /// The configured tempo is retained.
    pub fn reset(&mut self) {
        self.beat_log.clear();
        self.tap_log.clear();
    }

    /// Snapshot all derived values at once.
    pub fn reading(&self) -> Reading {
        Reading {
            configured_bpm: self.tempo_bpm,
            detected_bpm: self.current_tempo(),
            latency_ms: self.current_latency(),
            latency_in_beat_ms: self.latency_in_beat(),
            sample_count: self.sample_count(),
            min_samples: self.min_samples,
            ready: self.is_ready(),
        }
    }
}

impl Default for TapAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
