//! Tap-tempo and latency analysis.
//!
//! Two timestamp streams feed this module: the instants the metronome
//! emitted a click, and the instants the user tapped in response. The
//! analyzer keeps a bounded, index-paired window of both and derives a
//! tapped tempo and an averaged beat-to-tap latency from it. Raw
//! deltas are never reported directly - human tap timing is far too
//! jittery for a single sample to mean anything.

mod analyzer;
pub mod stats;
mod types;

pub use analyzer::TapAnalyzer;
pub use types::{Reading, TempoError, TimestampMs};

/// Milliseconds in a minute; the BPM <-> beat-period conversion factor.
///
/// `60_000 / bpm` is one beat in ms, and `60_000 / interval_ms` is BPM.
pub const MS_PER_MINUTE: f64 = 60_000.0;
