//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML
//! tables. Every field has a serde default so a partial file (or an
//! empty one) deserializes cleanly.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Metronome configuration.
    #[serde(default)]
    pub metronome: MetronomeSettings,

    /// Analyzer windowing configuration.
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Replace out-of-range values with defaults.
    ///
    /// Returns true if anything had to be fixed up, so the caller can
    /// persist the cleaned file. Invalid configuration is never fatal;
    /// the prior (default) value is retained instead.
    pub fn validate(&mut self) -> bool {
        let mut modified = false;

        if !self.metronome.bpm.is_finite() || self.metronome.bpm <= 0.0 {
            tracing::warn!(
                "config: invalid metronome.bpm {}, using {}",
                self.metronome.bpm,
                default_bpm()
            );
            self.metronome.bpm = default_bpm();
            modified = true;
        }

        if self.analysis.window_size == 0 {
            tracing::warn!(
                "config: analysis.window_size must be at least 1, using {}",
                default_window_size()
            );
            self.analysis.window_size = default_window_size();
            modified = true;
        }

        if self.analysis.min_samples == 0 {
            tracing::warn!(
                "config: analysis.min_samples must be at least 1, using {}",
                default_min_samples()
            );
            self.analysis.min_samples = default_min_samples();
            modified = true;
        }

        modified
    }
}

/// Metronome configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetronomeSettings {
    /// Click tempo in beats per minute.
    #[serde(default = "default_bpm")]
    pub bpm: f64,

    /// Lead-in countdown before the first beat, in seconds.
    #[serde(default = "default_countdown_secs")]
    pub countdown_secs: u32,
}

fn default_bpm() -> f64 {
    120.0
}

fn default_countdown_secs() -> u32 {
    3
}

impl Default for MetronomeSettings {
    fn default() -> Self {
        Self {
            bpm: default_bpm(),
            countdown_secs: default_countdown_secs(),
        }
    }
}

/// Analyzer windowing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Samples kept in the beat/tap logs (window W).
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Taps required before readings are reported (threshold M).
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,

    /// Leading intervals discarded from the whole-session summary.
    #[serde(default = "default_warmup_skip")]
    pub warmup_skip: usize,
}

fn default_window_size() -> usize {
    10
}

fn default_min_samples() -> usize {
    10
}

fn default_warmup_skip() -> usize {
    10
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            min_samples: default_min_samples(),
            warmup_skip: default_warmup_skip(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default log level when RUST_LOG is not set.
    #[serde(default)]
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let settings = Settings::default();
        assert_eq!(settings.metronome.bpm, 120.0);
        assert_eq!(settings.metronome.countdown_secs, 3);
        assert_eq!(settings.analysis.window_size, 10);
        assert_eq!(settings.analysis.min_samples, 10);
    }

    #[test]
    fn empty_toml_deserializes_to_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.metronome.bpm, 120.0);
        assert_eq!(settings.analysis.window_size, 10);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let settings: Settings = toml::from_str("[metronome]\nbpm = 90.0\n").unwrap();
        assert_eq!(settings.metronome.bpm, 90.0);
        assert_eq!(settings.metronome.countdown_secs, 3);
        assert_eq!(settings.analysis.min_samples, 10);
    }

    #[test]
    fn validate_fixes_invalid_values() {
        let mut settings: Settings =
            toml::from_str("[metronome]\nbpm = -10.0\n\n[analysis]\nwindow_size = 0\n").unwrap();
        let modified = settings.validate();
        assert!(modified);
        assert_eq!(settings.metronome.bpm, 120.0);
        assert_eq!(settings.analysis.window_size, 10);
    }

    #[test]
    fn validate_leaves_good_config_alone() {
        let mut settings = Settings::default();
        assert!(!settings.validate());
    }
}
