//! # Order Client
//!
//! The typed API a dialogue adapter uses to drive ordering sessions. It wraps a
//! [`HostClient<Session>`] and turns each workflow operation into a method.
use crate::model::{Session, SessionId, SessionOpen, SessionSnapshot};
use crate::session_actor::SessionError;
use crate::workflow::{Operation, Reply};
use async_trait::async_trait;
use serde_json::Value;
use session_host::{HostClient, HostError, SessionClient};
use tracing::{debug, instrument};

/// Client for interacting with ordering sessions.
#[derive(Clone)]
pub struct OrderClient {
    inner: HostClient<Session>,
}

#[async_trait]
impl SessionClient<Session> for OrderClient {
    type Error = SessionError;

    fn inner(&self) -> &HostClient<Session> {
        &self.inner
    }

    fn map_error(e: HostError) -> Self::Error {
        SessionError::from(e)
    }
}

impl OrderClient {
    pub fn new(inner: HostClient<Session>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn open_session(&self, params: SessionOpen) -> Result<SessionId, SessionError> {
        debug!("Sending request");
        self.inner.open(params).await.map_err(Self::map_error)
    }

    /// Decodes a host function call and runs it as one turn.
    #[instrument(skip(self, args))]
    pub async fn call(&self, id: SessionId, name: &str, args: &Value) -> Result<Reply, SessionError> {
        debug!(%args, "Decoding call");
        let operation = Operation::from_call(name, args)?;
        self.apply(id, operation).await
    }

    /// Runs one operation as a turn of session `id`.
    #[instrument(skip(self))]
    pub async fn apply(&self, id: SessionId, operation: Operation) -> Result<Reply, SessionError> {
        debug!("Sending request");
        self.inner.turn(id, operation).await.map_err(Self::map_error)
    }

    pub async fn get_menu(&self, id: SessionId) -> Result<Reply, SessionError> {
        self.apply(id, Operation::GetMenu).await
    }

    pub async fn start_order(&self, id: SessionId) -> Result<Reply, SessionError> {
        self.apply(id, Operation::StartOrder).await
    }

    /// Adds a pizza; without a size the catalog's default size is used.
    pub async fn add_pizza(
        &self,
        id: SessionId,
        pizza: &str,
        size: Option<&str>,
    ) -> Result<Reply, SessionError> {
        let operation = Operation::AddPizza {
            pizza: pizza.to_string(),
            size: size.map(str::to_string),
        };
        self.apply(id, operation).await
    }

    pub async fn remove_last_item(&self, id: SessionId) -> Result<Reply, SessionError> {
        self.apply(id, Operation::RemoveLastItem).await
    }

    pub async fn finish_order(&self, id: SessionId) -> Result<Reply, SessionError> {
        self.apply(id, Operation::FinishOrder).await
    }

    pub async fn confirm_order(&self, id: SessionId) -> Result<Reply, SessionError> {
        self.apply(id, Operation::ConfirmOrder).await
    }

    pub async fn cancel_order(&self, id: SessionId) -> Result<Reply, SessionError> {
        self.apply(id, Operation::CancelOrder).await
    }

    pub async fn add_more(&self, id: SessionId) -> Result<Reply, SessionError> {
        self.apply(id, Operation::AddMore).await
    }

    /// The state a dialogue host should persist for session `id`.
    #[instrument(skip(self))]
    pub async fn snapshot(&self, id: SessionId) -> Result<SessionSnapshot, SessionError> {
        debug!("Sending request");
        self.get(id)
            .await?
            .map(|session| session.snapshot())
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn restore(
        &self,
        id: SessionId,
        snapshot: SessionSnapshot,
    ) -> Result<Session, SessionError> {
        debug!("Sending request");
        self.inner
            .restore(id, snapshot)
            .await
            .map_err(Self::map_error)
    }
}
