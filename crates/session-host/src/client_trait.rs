//! # SessionClient Trait
//!
//! Common surface for domain-specific session clients: `get` and `close` come for free
//! once a client exposes its inner [`HostClient`] and says how to map [`HostError`].

use crate::{HostClient, HostError, SessionEntity};
use async_trait::async_trait;

/// Trait for domain clients built on a [`HostClient`].
///
/// # Example
///
/// ```rust
/// use session_host::{HostClient, HostError, SessionClient, SessionEntity};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Chat { id: u32 }
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct ChatError(String);
///
/// #[async_trait]
/// impl SessionEntity for Chat {
///     type Id = u32; type Open = (); type Snapshot = (); type Turn = (); type Reply = ();
///     type Context = (); type Error = ChatError;
///     fn open(id: u32, _: ()) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn restore(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_turn(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct ChatClient { inner: HostClient<Chat> }
///
/// #[async_trait]
/// impl SessionClient<Chat> for ChatClient {
///     type Error = ChatError;
///     fn inner(&self) -> &HostClient<Chat> { &self.inner }
///     fn map_error(e: HostError) -> Self::Error { ChatError(e.to_string()) }
/// }
///
/// async fn usage(client: ChatClient) {
///     // get() and close() are provided
///     let _ = client.get(1).await;
///     let _ = client.close(1).await;
/// }
/// ```
#[async_trait]
pub trait SessionClient<T: SessionEntity>: Send + Sync {
    /// Domain error type returned by the client.
    type Error: Send + Sync;

    /// The wrapped generic client.
    fn inner(&self) -> &HostClient<T>;

    /// Maps host errors into the domain error type.
    fn map_error(e: HostError) -> Self::Error;

    /// Fetch the current state of a session.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// End a session and drop its state.
    #[tracing::instrument(skip(self))]
    async fn close(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().close(id).await.map_err(Self::map_error)
    }
}
