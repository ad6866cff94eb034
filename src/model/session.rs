use crate::model::{OrderState, WorkflowStage};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u32);

impl From<u32> for SessionId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session_{}", self.0)
    }
}

/// One conversation with a customer.
///
/// # Session Host
/// This struct implements the [`SessionEntity`](session_host::SessionEntity) trait,
/// allowing it to be managed by a [`SessionHost`](session_host::SessionHost).
///
/// See [`impl SessionEntity for Session`](#impl-SessionEntity-for-Session) for details on:
/// - Open parameters ([`SessionOpen`])
/// - Host-persisted state ([`SessionSnapshot`])
/// - Turns ([`Operation`](crate::workflow::Operation))
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    /// Caller identity as reported by the dialogue host, if any.
    pub caller: Option<String>,
    pub stage: WorkflowStage,
    pub order: OrderState,
}

/// Payload for opening a new session.
#[derive(Debug, Clone, Default)]
pub struct SessionOpen {
    pub caller: Option<String>,
}

/// The state a dialogue host persists between turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub stage: WorkflowStage,
    pub order: OrderState,
}

impl Session {
    /// A fresh session in the greeting stage with an empty order.
    pub fn new(id: SessionId, caller: Option<String>) -> Self {
        Self {
            id,
            caller,
            stage: WorkflowStage::default(),
            order: OrderState::default(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            stage: self.stage,
            order: self.order.clone(),
        }
    }
}
