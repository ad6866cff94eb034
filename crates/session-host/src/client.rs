//! # Host Client
//!
//! The sending half of a [`SessionHost`](crate::SessionHost).

use crate::entity::SessionEntity;
use crate::error::HostError;
use crate::message::HostRequest;
use tokio::sync::{mpsc, oneshot};

/// Type-safe handle for sending requests to a `SessionHost<T>`.
///
/// Holds only an mpsc sender, so cloning is cheap and clones can be handed to
/// any number of tasks. The host stops once every clone has been dropped.
#[derive(Clone)]
pub struct HostClient<T: SessionEntity> {
    sender: mpsc::Sender<HostRequest<T>>,
}

impl<T: SessionEntity> HostClient<T> {
    pub fn new(sender: mpsc::Sender<HostRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, HostError>>) -> HostRequest<T>,
    ) -> Result<R, HostError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| HostError::HostClosed)?;
        response.await.map_err(|_| HostError::HostDropped)?
    }

    pub async fn open(&self, params: T::Open) -> Result<T::Id, HostError> {
        self.request(|respond_to| HostRequest::Open { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, HostError> {
        self.request(|respond_to| HostRequest::Get { id, respond_to })
            .await
    }

    pub async fn restore(&self, id: T::Id, snapshot: T::Snapshot) -> Result<T, HostError> {
        self.request(|respond_to| HostRequest::Restore {
            id,
            snapshot,
            respond_to,
        })
        .await
    }

    pub async fn close(&self, id: T::Id) -> Result<(), HostError> {
        self.request(|respond_to| HostRequest::Close { id, respond_to })
            .await
    }

    pub async fn turn(&self, id: T::Id, turn: T::Turn) -> Result<T::Reply, HostError> {
        self.request(|respond_to| HostRequest::Turn {
            id,
            turn,
            respond_to,
        })
        .await
    }
}
