//! Error types for the session actor.

use crate::model::Price;
use crate::workflow::CallError;
use session_host::HostError;
use thiserror::Error;

/// Errors from session operations.
///
/// Customer-facing refusals are not errors; they travel in [`Reply`](crate::workflow::Reply).
#[derive(Debug, Error)]
pub enum SessionError {
    /// The requested session was not found.
    #[error("Session not found: {0}")]
    NotFound(String),

    /// A restored snapshot carries a checkout total that does not match its cart.
    #[error("Inconsistent snapshot: total {found} but cart sums to {expected}")]
    InconsistentSnapshot { expected: Price, found: Price },

    /// The dialogue host sent a function call that could not be decoded.
    #[error(transparent)]
    InvalidCall(#[from] CallError),

    /// An error occurred while communicating with the session host.
    #[error("Host communication error: {0}")]
    HostCommunication(String),
}

impl From<HostError> for SessionError {
    fn from(e: HostError) -> Self {
        match e {
            HostError::SessionNotFound(id) => SessionError::NotFound(id),
            HostError::Session(inner) => match inner.downcast::<SessionError>() {
                Ok(session_error) => *session_error,
                Err(other) => SessionError::HostCommunication(other.to_string()),
            },
            other => SessionError::HostCommunication(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_errors_unwrap_session_errors() {
        let wrapped = HostError::Session(Box::new(SessionError::InconsistentSnapshot {
            expected: Price::from_cents(1399),
            found: Price::from_cents(999),
        }));
        assert!(matches!(
            SessionError::from(wrapped),
            SessionError::InconsistentSnapshot { .. }
        ));

        assert!(matches!(
            SessionError::from(HostError::SessionNotFound("session_4".into())),
            SessionError::NotFound(id) if id == "session_4"
        ));
        assert!(matches!(
            SessionError::from(HostError::HostClosed),
            SessionError::HostCommunication(msg) if msg == "Session host closed"
        ));
    }
}
