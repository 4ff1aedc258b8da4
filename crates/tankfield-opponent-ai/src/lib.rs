//! Opponent AI for TANKFIELD.
//!
//! Per-tick movement and firing decisions for computer-controlled tanks,
//! driven through an injectable random source.

pub mod fsm;
pub mod rolls;

pub use tankfield_core as core;

pub use fsm::{decide, OpponentContext, OpponentDecision};
pub use rolls::DecisionSource;

#[cfg(test)]
mod tests;
