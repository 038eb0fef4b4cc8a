//! Error types for session control.

use thiserror::Error;

use crate::analysis::TempoError;

/// Errors surfaced by session start/configuration.
///
/// None of these are retried internally; all are reported
/// synchronously to the immediate caller, and none leave the analyzer
/// in a partially mutated state.
#[derive(Error, Debug)]
pub enum SessionError {
    /// `start()` was called while a session is already live.
    #[error("a session is already running")]
    AlreadyRunning,

    /// Tempo changes are rejected while a session is live.
    #[error("cannot change tempo while a session is active")]
    SessionActive,

    /// A collaborator (audio output, terminal) failed to come up.
    #[error("{resource} unavailable: {message}")]
    ResourceUnavailable { resource: String, message: String },

    /// Invalid tempo configuration.
    #[error(transparent)]
    InvalidTempo(#[from] TempoError),
}

impl SessionError {
    /// Create a resource unavailable error.
    pub fn resource_unavailable(
        resource: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ResourceUnavailable {
            resource: resource.into(),
            message: message.into(),
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_unavailable_displays_context() {
        let err = SessionError::resource_unavailable("audio output", "device busy");
        let msg = err.to_string();
        assert!(msg.contains("audio output"));
        assert!(msg.contains("device busy"));
    }

    #[test]
    fn tempo_error_converts() {
        let err: SessionError = TempoError::InvalidBpm(0.0).into();
        assert!(matches!(err, SessionError::InvalidTempo(_)));
    }
}
