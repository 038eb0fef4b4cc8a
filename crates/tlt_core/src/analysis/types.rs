//! Core types for tap analysis.

use serde::Serialize;
use thiserror::Error;

/// A monotonic instant in milliseconds from an arbitrary origin.
///
/// Produced by a [`Clock`](crate::clock::Clock); only differences
/// between timestamps are ever meaningful.
pub type TimestampMs = f64;

/// Error raised when an invalid tempo is configured.
///
/// The previous valid tempo is always retained on rejection.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TempoError {
    /// Tempo must be a positive, finite BPM value.
    #[error("invalid tempo: {0} BPM (must be positive and finite)")]
    InvalidBpm(f64),
}

/// A point-in-time snapshot of everything the analyzer can report.
///
/// `None` fields mean "not yet available" - fewer samples than the
/// minimum have been collected, never NaN or garbage.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    /// Tempo the metronome is configured to click at.
    pub configured_bpm: f64,
    /// Tempo the user is actually tapping at, from tap intervals.
    pub detected_bpm: Option<f64>,
    /// Averaged beat-to-tap offset in ms (positive = tap after beat).
    pub latency_ms: Option<f64>,
    /// Latency folded into a single beat period, in `[0, 60000/bpm)`.
    pub latency_in_beat_ms: Option<f64>,
    /// Number of taps currently in the window.
    pub sample_count: usize,
    /// Taps required before readings are considered trustworthy.
    pub min_samples: usize,
    /// Whether `sample_count >= min_samples`.
    pub ready: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tempo_error_displays_offending_value() {
        let err = TempoError::InvalidBpm(-10.0);
        assert!(err.to_string().contains("-10"));
    }

    #[test]
    fn reading_serializes_unavailable_as_null() {
        let reading = Reading {
            configured_bpm: 120.0,
            detected_bpm: None,
            latency_ms: None,
            latency_in_beat_ms: None,
            sample_count: 3,
            min_samples: 10,
            ready: false,
        };
        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"detected_bpm\":null"));
        assert!(json.contains("\"ready\":false"));
    }
}
