//! # System Lifecycle
//!
//! [`PizzaSystem`] starts the session host with its shared workflow and shuts it down again;
//! [`tracing`] sets up logging for the binary.

pub mod pizza_system;
pub mod tracing;

pub use pizza_system::*;
