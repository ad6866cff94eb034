//! # Host Errors
//!
//! Errors raised by the session host itself, as opposed to errors a session produces.
//! A session's own error is carried through in [`HostError::Session`].

/// Errors that can occur between a [`HostClient`](crate::HostClient) and its host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Session host closed")]
    HostClosed,
    #[error("Session host dropped response channel")]
    HostDropped,
    #[error("No session ids left")]
    IdsExhausted,
    #[error("Session not found: {0}")]
    SessionNotFound(String),
    #[error("Session error: {0}")]
    Session(Box<dyn std::error::Error + Send + Sync>),
}
