//! # Session Actor
//!
//! Runs the ordering workflow inside a [`SessionHost`]: one [`Session`] per conversation,
//! one [`Operation`](crate::workflow::Operation) per turn.
//!
//! ## Structure
//!
//! - [`entity`] - [`SessionEntity`](session_host::SessionEntity) implementation for [`Session`]
//! - [`error`] - [`SessionError`]
//! - [`new()`] - Factory function that creates the host and its [`OrderClient`]
//!
//! ## Usage
//!
//! ```rust
//! use pizza_palace::session_actor;
//! use pizza_palace::model::SessionOpen;
//! use pizza_palace::workflow::Workflow;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (host, client) = session_actor::new(32);
//!
//!     // The workflow is the context every session shares
//!     tokio::spawn(host.run(Arc::new(Workflow::default())));
//!
//!     let id = client.open_session(SessionOpen::default()).await?;
//!     let reply = client.start_order(id).await?;
//!     assert_eq!(reply.message, "Great! What pizza would you like?");
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Session;
use session_host::SessionHost;

/// Creates a session host and the client that talks to it.
pub fn new(buffer_size: usize) -> (SessionHost<Session>, OrderClient) {
    let (host, generic_client) = SessionHost::new(buffer_size);
    (host, OrderClient::new(generic_client))
}
