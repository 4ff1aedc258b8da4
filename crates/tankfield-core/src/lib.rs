//! Core types and definitions for the TANKFIELD simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! grid geometry, block and tank classifications, stat profiles,
//! commands, events, snapshot views, errors and constants.
//! It has no dependency on any rendering or runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod profiles;
pub mod state;
pub mod types;
