//! Type-safe wrappers around [`HostClient`](session_host::HostClient).

pub mod order_client;

pub use order_client::*;
