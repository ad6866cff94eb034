//! # Host Messages
//!
//! Requests travelling from a [`HostClient`](crate::HostClient) to its
//! [`SessionHost`](crate::SessionHost), each carrying a oneshot responder.

use crate::entity::SessionEntity;
use crate::error::HostError;
use tokio::sync::oneshot;

/// One-shot response channel used by the host.
pub type Response<T> = oneshot::Sender<Result<T, HostError>>;

/// Request sent to the host.
///
/// The variants follow a session's life:
///
/// - **Open**: start a session from [`SessionEntity::Open`]; answers with the new id.
/// - **Get**: read the current session state.
/// - **Restore**: overwrite a session with a [`SessionEntity::Snapshot`].
/// - **Close**: end the session and drop its state.
/// - **Turn**: apply one [`SessionEntity::Turn`]; answers with the [`SessionEntity::Reply`].
#[derive(Debug)]
pub enum HostRequest<T: SessionEntity> {
    Open {
        params: T::Open,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Restore {
        id: T::Id,
        snapshot: T::Snapshot,
        respond_to: Response<T>,
    },
    Close {
        id: T::Id,
        respond_to: Response<()>,
    },
    Turn {
        id: T::Id,
        turn: T::Turn,
        respond_to: Response<T::Reply>,
    },
}
