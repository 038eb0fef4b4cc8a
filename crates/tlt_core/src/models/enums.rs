//! Core enums used throughout the application.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a measurement session.
///
/// One cancellable timer drives the whole machine:
/// Idle -> CountingDown(n) -> ... -> CountingDown(1) -> Running -> Idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    /// No session active; taps are ignored.
    #[default]
    Idle,
    /// Lead-in before the first beat; the value counts down to 1.
    CountingDown(u32),
    /// Metronome clicking, taps being recorded.
    Running,
}

impl SessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionState::Idle)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, SessionState::Running)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "idle"),
            SessionState::CountingDown(n) => write!(f, "counting down ({n})"),
            SessionState::Running => write!(f, "running"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_states() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::CountingDown(3).to_string(), "counting down (3)");
        assert_eq!(SessionState::Running.to_string(), "running");
    }

    #[test]
    fn default_is_idle() {
        assert!(SessionState::default().is_idle());
        assert!(!SessionState::Running.is_idle());
        assert!(SessionState::Running.is_running());
    }
}
