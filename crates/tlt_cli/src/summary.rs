//! Whole-session tempo summary.
//!
//! The live reading only ever sees the bounded window; at the end of a
//! run we can do better by looking at every tap, minus the warm-up
//! ramp where the user was still finding the beat.

use tlt_core::analysis::{stats, TimestampMs, MS_PER_MINUTE};

/// Tempo over the entire tap history, discarding the first
/// `warmup_skip` intervals.
///
/// `None` when the history is too short to outlast the warm-up.
pub fn session_tempo(taps: &[TimestampMs], warmup_skip: usize) -> Option<f64> {
    let intervals = stats::intervals_of(taps);
    let mean_interval = stats::windowed_mean(&intervals, warmup_skip)?;
    if mean_interval <= 0.0 {
        return None;
    }
    Some(MS_PER_MINUTE / mean_interval)
}
