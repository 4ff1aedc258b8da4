//! Simulation engine for TANKFIELD.
//!
//! Owns the board, every live tank and bullet, the human players and the
//! opponent pool. Runs systems in a fixed order once per tick and produces a
//! `TickReport` for adapters.

pub mod engine;
pub mod entities;
pub mod observer;
pub mod opponents;
pub mod players;
pub mod systems;

pub use tankfield_core as core;
pub use engine::{SimConfig, SimulationEngine};
