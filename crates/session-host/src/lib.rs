//! # Session Host
//!
//! An in-process host for conversation sessions, built on the actor pattern.
//!
//! A dialogue layer (speech or chat front end, LLM function calling) talks to the host
//! through a [`HostClient`]. The [`SessionHost`] owns the state of every open session and
//! applies requests strictly one at a time, so each session sees its turns in order and
//! no session state is ever shared or locked.
//!
//! ## Layers
//!
//! 1. **Session** ([`SessionEntity`]) - the per-conversation state and the logic of a turn.
//! 2. **Host** ([`SessionHost`]) - the request loop and the session store.
//! 3. **Client** ([`HostClient`], [`SessionClient`]) - the typed request API.
//!
//! ## Session Lifecycle
//!
//! `open` → any number of `turn` / `restore` / `get` → `close`.
//!
//! `restore` exists for dialogue layers that persist session state themselves between
//! turns: they hand the last snapshot back and the session resumes from it.
//!
//! ## Context Injection
//!
//! Dependencies shared by all sessions (configuration, catalogs, other clients) are passed to
//! [`SessionHost::run`] rather than to the constructor, and reach every hook as `&Context`.
//!
//! ## Testing
//!
//! The [`mock`] module provides [`mock::MockHost`] and receiver helpers for exercising
//! client code without a running host.

pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod host;
pub mod message;
pub mod mock;

pub use client::HostClient;
pub use client_trait::SessionClient;
pub use entity::SessionEntity;
pub use error::HostError;
pub use host::SessionHost;
pub use message::{HostRequest, Response};
