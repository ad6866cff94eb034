//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing` subscriber filtered by `RUST_LOG`.
//!
//! ```bash
//! # Session lifecycle and stage changes
//! RUST_LOG=info cargo run
//!
//! # Every request with its payload, refusals included
//! RUST_LOG=debug cargo run
//! ```
//!
//! Log lines carry structured fields rather than module paths. With `RUST_LOG=info` one
//! conversation reads:
//!
//! ```text
//! INFO Session host started entity_type="Session"
//! INFO Conversation started session_id=session_1 caller=Some("+15550100")
//! INFO Opened entity_type="Session" id=session_1 open=1
//! INFO Stage change session_id=session_1 from=greeting to=ordering operation=start_order
//! INFO Turn ok entity_type="Session" id=session_1
//! ```
//!
//! At `debug` the client spans (`apply{id=SessionId(1) operation=StartOrder}`) and every `Turn` payload
//! show up as well.

/// Initializes the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type and session_id say where a line comes from
        .compact()
        .init();
}
