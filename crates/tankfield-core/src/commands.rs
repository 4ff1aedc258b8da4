//! Player commands sent from input adapters to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::Direction;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Tank control ---
    /// Start (or keep) moving in a direction.
    Move { player: usize, direction: Direction },
    /// Release a direction; the most recent still-held one resumes.
    StopMove { player: usize, direction: Direction },
    /// Hold the trigger.
    Fire { player: usize },
    /// Release the trigger.
    StopFire { player: usize },

    // --- Round control ---
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Stop the round and clear every live collection.
    Reset,
}
