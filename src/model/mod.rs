//! Pure data types: catalog, order state, stages, sessions.

pub mod catalog;
pub mod order;
pub mod session;
pub mod stage;

pub use catalog::*;
pub use order::*;
pub use session::*;
pub use stage::*;
