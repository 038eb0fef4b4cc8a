//! Statistics over timestamp sequences.
//!
//! All functions are pure - no I/O, no side effects. Insufficient data
//! is signalled with `None` rather than NaN so callers cannot forget
//! the guard.

use super::types::TimestampMs;

/// Consecutive differences of an ordered timestamp sequence.
///
/// Returns N-1 intervals for N timestamps; empty for fewer than two.
pub fn intervals_of(timestamps: &[TimestampMs]) -> Vec<f64> {
    timestamps.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Arithmetic mean of a sequence, `None` when empty.
pub fn mean_of(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of the sequence after dropping the first `skip` elements.
///
/// Used to discard an unstable ramp-up period before trusting a
/// reading. A sequence shorter than `skip` yields `None`.
pub fn windowed_mean(values: &[f64], skip: usize) -> Option<f64> {
    mean_of(values.get(skip..).unwrap_or(&[]))
}

/// Fold a latency into a single beat period.
///
/// Mathematical mod, not truncating remainder: the result is in
/// `[0, beat_period_ms)` for any real input, so a tap a full beat
/// behind reads as near-zero rather than a whole period, and negative
/// latencies fold correctly.
pub fn fold_into_beat(latency_ms: f64, beat_period_ms: f64) -> f64 {
    debug_assert!(beat_period_ms > 0.0);
    let folded = latency_ms.rem_euclid(beat_period_ms);
    // rem_euclid can round up to exactly the modulus for tiny negative
    // inputs; keep the half-open interval.
    if folded >= beat_period_ms {
        0.0
    } else {
        folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_of_consecutive_differences() {
        let intervals = intervals_of(&[0.0, 500.0, 1100.0, 1500.0]);
        assert_eq!(intervals, vec![500.0, 600.0, 400.0]);
    }

    #[test]
    fn intervals_of_short_sequences_are_empty() {
        assert!(intervals_of(&[]).is_empty());
        assert!(intervals_of(&[42.0]).is_empty());
    }

    #[test]
    fn mean_of_averages() {
        assert_eq!(mean_of(&[4.0, 6.0, 8.0]), Some(6.0));
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean_of(&[]), None);
    }

    #[test]
    fn windowed_mean_drops_leading_elements() {
        // First two dropped, mean of [10, 20, 30].
        let values = [1000.0, 1000.0, 10.0, 20.0, 30.0];
        assert_eq!(windowed_mean(&values, 2), Some(20.0));
    }

    #[test]
    fn windowed_mean_shorter_than_skip_is_none() {
        assert_eq!(windowed_mean(&[1.0, 2.0], 10), None);
        assert_eq!(windowed_mean(&[1.0, 2.0], 2), None);
    }

    #[test]
    fn fold_into_beat_stays_in_period() {
        let period = 500.0; // 120 BPM
        for &latency in &[-1250.0, -500.0, -0.1, 0.0, 49.9, 500.0, 1337.0] {
            let folded = fold_into_beat(latency, period);
            assert!(
                (0.0..period).contains(&folded),
                "latency {latency} folded to {folded}"
            );
        }
    }

    #[test]
    fn fold_into_beat_wraps_negative_latency() {
        // 50ms early at 120 BPM reads as 450ms into the beat.
        assert!((fold_into_beat(-50.0, 500.0) - 450.0).abs() < 1e-9);
    }

    #[test]
    fn fold_into_beat_full_beat_behind_is_zero() {
        assert!(fold_into_beat(500.0, 500.0).abs() < 1e-9);
    }
}
