//! Configuration management.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use tlt_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new(".config/tap-latency-tester.toml");
//! config.load_or_create().unwrap();
//!
//! println!("Metronome at {} BPM", config.settings().metronome.bpm);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{AnalysisSettings, LoggingSettings, MetronomeSettings, Settings};
