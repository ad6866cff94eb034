//! # Pizza Palace
//!
//! > **A scripted pizza-ordering agent, run as session actors.**
//!
//! A dialogue host (speech or chat front end, LLM function calling) owns the conversation.
//! This crate owns what the conversation is *about*: a three-stage ordering workflow
//! (greeting → ordering → checkout), the cart, the menu, and the per-session state that
//! ties them together.
//!
//! ## 🏗️ How It Fits Together
//!
//! ```text
//! dialogue host ──call("add_pizza", {...})──▶ OrderClient ──Turn──▶ SessionHost<Session>
//!                                                                        │
//!                                              Workflow::apply(stage, &order, op)
//!                                                                        │
//! dialogue host ◀── Reply { message, switch_to, global_data } ◀──────────┘
//! ```
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Rules ([`workflow`], [`model`])
//! Pure code. [`Workflow::apply`](workflow::Workflow::apply) takes a stage, an order and an
//! [`Operation`](workflow::Operation) and returns the next order plus a
//! [`Reply`](workflow::Reply). The stage table in [`model::stage`] decides which operations
//! each stage accepts.
//!
//! ### 2. The Sessions ([`session_actor`])
//! [`Session`](model::Session) implements [`SessionEntity`](session_host::SessionEntity), so the
//! generic [`SessionHost`](session_host::SessionHost) can own one per conversation and apply
//! turns one at a time.
//!
//! ### 3. The Interface ([`clients`], [`agent`])
//! [`OrderClient`](clients::OrderClient) is the typed API over the host.
//! [`AgentProfile`](agent::AgentProfile) is what the dialogue host is told: prompt, voice,
//! stages and the function manifest.
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! [`PizzaSystem`](lifecycle::PizzaSystem) builds the workflow from a
//! [`Config`](config::Config), spawns the host and shuts it down.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo conversation with info logs
//! RUST_LOG=info cargo run
//! ```

pub mod agent;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod session_actor;
pub mod workflow;
