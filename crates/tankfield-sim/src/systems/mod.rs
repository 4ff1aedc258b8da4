//! Per-tick systems run by the engine in a fixed order.
//!
//! Systems are plain functions over the engine's collections. They do not own
//! state; notifications go into the caller's event buffer.

pub mod bullets;
pub mod opponents;
pub mod players;
pub mod snapshot;
