//! # SessionEntity Trait
//!
//! The `SessionEntity` trait is the contract between the generic [`SessionHost`](crate::SessionHost)
//! and a conversation domain. One value of the implementing type holds the complete state of
//! one conversation session. The host opens it, feeds it turns one at a time, lets the dialogue
//! layer restore a persisted snapshot into it, and finally closes it.
//!
//! # Associated Types
//! - `Open` is the payload that starts a session (e.g. caller metadata).
//! - `Snapshot` is the host-persisted form of the session state.
//! - `Turn` is one inbound request from the dialogue layer; `Reply` is what the turn produced.
//! - `Context` is injected at `run()` time and shared by every session the host owns.
//!
//! # Provided Methods (Hooks)
//! [`SessionEntity::on_open`] and [`SessionEntity::on_close`] default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// State of one conversation session, managed by a [`SessionHost`](crate::SessionHost).
///
/// # Context
/// The trait is `#[async_trait]` so hooks may await other services. The `Context` type is handed
/// to every hook; it is supplied when the host starts running, not when it is constructed.
#[async_trait]
pub trait SessionEntity: Clone + Send + Sync + 'static {
    /// Session identifier. Built from the host's `u32` counter.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Data required to open a new session.
    type Open: Send + Sync + Debug;

    /// Persisted session state supplied by the dialogue layer.
    type Snapshot: Send + Sync + Debug;

    /// One inbound turn (a function call from the dialogue layer).
    type Turn: Send + Sync + Debug;

    /// What a turn hands back to the dialogue layer.
    type Reply: Send + Sync + Debug;

    /// Shared dependencies injected into the host. Use `()` if none are needed.
    type Context: Send + Sync;

    /// Error type for this session kind.
    ///
    /// One error enum covers every hook; refusals a user is meant to hear belong in `Reply`,
    /// not here.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build a fresh session from its id and open payload.
    /// Called synchronously before `on_open`.
    fn open(id: Self::Id, params: Self::Open) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the session is built, before it is stored.
    async fn on_open(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Replace the session state with a snapshot persisted by the dialogue layer.
    async fn restore(
        &mut self,
        snapshot: Self::Snapshot,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called right before the session is dropped from the host.
    async fn on_close(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Turn Handler (Async) ---

    /// Apply one turn to the session.
    async fn handle_turn(
        &mut self,
        turn: Self::Turn,
        _ctx: &Self::Context,
    ) -> Result<Self::Reply, Self::Error>;
}
