//! # Session Host
//!
//! The `SessionHost` owns the state of every open conversation session and applies
//! requests to it one at a time.

use crate::client::HostClient;
use crate::entity::SessionEntity;
use crate::error::HostError;
use crate::message::HostRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Actor that owns a set of sessions of one kind.
///
/// The host runs as a single Tokio task and drains its channel sequentially, so two turns
/// for the same session can never interleave and no session state needs a lock. Sessions
/// never see each other's state: each lives in its own slot of `sessions`.
///
/// # Usage Pattern
///
/// 1. **Create**: `SessionHost::new()` returns the host and a [`HostClient`].
/// 2. **Wire**: pass the shared context into `host.run(context)`.
/// 3. **Run**: spawn the returned future.
///
/// ```rust
/// use session_host::{SessionEntity, SessionHost};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, turns: u32 }
/// #[derive(Debug)] struct Bump;
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl SessionEntity for Counter {
///     type Id = u32;
///     type Open = ();
///     type Snapshot = u32;
///     type Turn = Bump;
///     type Reply = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     fn open(id: u32, _: ()) -> Result<Self, Self::Error> { Ok(Self { id, turns: 0 }) }
///     async fn restore(&mut self, turns: u32, _: &()) -> Result<(), Self::Error> {
///         self.turns = turns;
///         Ok(())
///     }
///     async fn handle_turn(&mut self, _: Bump, _: &()) -> Result<u32, Self::Error> {
///         self.turns += 1;
///         Ok(self.turns)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (host, client) = SessionHost::<Counter>::new(10);
///     tokio::spawn(host.run(()));
///
///     let id = client.open(()).await.unwrap();
///     assert_eq!(client.turn(id, Bump).await.unwrap(), 1);
/// }
/// ```
///
/// # Operations
///
/// * **Open**: takes the next id from the `u32` counter, builds the session with
///   [`SessionEntity::open`], runs `on_open`, stores it.
/// * **Get**: clones the stored session, or `None`.
/// * **Restore**: runs [`SessionEntity::restore`] on the stored session and returns the result.
/// * **Close**: runs `on_close`, then removes the session.
/// * **Turn**: runs [`SessionEntity::handle_turn`] and returns its reply.
///
/// Restore, Close and Turn on an unknown id answer [`HostError::SessionNotFound`].
/// Once all `u32` ids are used, Open answers [`HostError::IdsExhausted`].
pub struct SessionHost<T: SessionEntity> {
    receiver: mpsc::Receiver<HostRequest<T>>,
    sessions: HashMap<T::Id, T>,
    /// `None` once every `u32` id has been handed out.
    next_id: Option<u32>,
}

impl<T: SessionEntity> SessionHost<T> {
    /// Creates a host and the client that talks to it.
    ///
    /// `buffer_size` is the request channel capacity; senders wait while it is full.
    pub fn new(buffer_size: usize) -> (Self, HostClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let host = Self {
            receiver,
            sessions: HashMap::new(),
            next_id: Some(1),
        };
        (host, HostClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    ///
    /// `context` is handed to every session hook.
    pub async fn run(mut self, context: T::Context) {
        // "Session" rather than "my_app::model::session::Session"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Session host started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                HostRequest::Open { params, respond_to } => {
                    debug!(entity_type, ?params, "Open");
                    let Some(raw_id) = self.next_id else {
                        warn!(entity_type, "Session ids exhausted");
                        let _ = respond_to.send(Err(HostError::IdsExhausted));
                        continue;
                    };
                    self.next_id = raw_id.checked_add(1);
                    let id = T::Id::from(raw_id);

                    match T::open(id.clone(), params) {
                        Ok(mut session) => {
                            if let Err(e) = session.on_open(&context).await {
                                warn!(entity_type, %id, error = %e, "on_open failed");
                                let _ = respond_to.send(Err(HostError::Session(Box::new(e))));
                                continue;
                            }
                            self.sessions.insert(id.clone(), session);
                            info!(entity_type, %id, open = self.sessions.len(), "Opened");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Open failed");
                            let _ = respond_to.send(Err(HostError::Session(Box::new(e))));
                        }
                    }
                }
                HostRequest::Get { id, respond_to } => {
                    let session = self.sessions.get(&id).cloned();
                    debug!(entity_type, %id, found = session.is_some(), "Get");
                    let _ = respond_to.send(Ok(session));
                }
                HostRequest::Restore {
                    id,
                    snapshot,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?snapshot, "Restore");
                    let Some(session) = self.sessions.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(HostError::SessionNotFound(id.to_string())));
                        continue;
                    };
                    match session.restore(snapshot, &context).await {
                        Ok(()) => {
                            info!(entity_type, %id, "Restored");
                            let _ = respond_to.send(Ok(session.clone()));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Restore failed");
                            let _ = respond_to.send(Err(HostError::Session(Box::new(e))));
                        }
                    }
                }
                HostRequest::Close { id, respond_to } => {
                    debug!(entity_type, %id, "Close");
                    let Some(session) = self.sessions.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(HostError::SessionNotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = session.on_close(&context).await {
                        warn!(entity_type, %id, error = %e, "on_close failed");
                        let _ = respond_to.send(Err(HostError::Session(Box::new(e))));
                        continue;
                    }
                    self.sessions.remove(&id);
                    info!(entity_type, %id, open = self.sessions.len(), "Closed");
                    let _ = respond_to.send(Ok(()));
                }
                HostRequest::Turn {
                    id,
                    turn,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?turn, "Turn");
                    let Some(session) = self.sessions.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(HostError::SessionNotFound(id.to_string())));
                        continue;
                    };
                    let result = session
                        .handle_turn(turn, &context)
                        .await
                        .map_err(|e| HostError::Session(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Turn ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Turn failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, open = self.sessions.len(), "Shutdown");
    }
}
