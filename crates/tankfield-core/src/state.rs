//! Tick report: the complete visible state handed to adapters after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{EntityId, Rect, SimTime, Direction};

/// Everything an adapter needs to present one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickReport {
    pub time: SimTime,
    pub phase: GamePhase,
    /// Board extent in cells.
    pub board_width: i32,
    pub board_height: i32,
    pub tanks: Vec<TankView>,
    pub bullets: Vec<BulletView>,
    pub objective: ObjectiveView,
    pub stats: StatsView,
    /// Events emitted during this tick, in emission order.
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankView {
    pub entity: EntityId,
    pub variant: TankVariant,
    pub rect: Rect,
    pub direction: Direction,
    pub armor: u8,
    /// Owning player index for player tanks, controller slot for opponents.
    pub controller: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub entity: EntityId,
    pub affinity: Affinity,
    pub power: PowerLevel,
    pub rect: Rect,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub rect: Rect,
    pub destroyed: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsView {
    /// Lives left per player, by player index.
    pub player_lives: Vec<u8>,
    /// Pending plus active opponents.
    pub opponent_lives: usize,
    pub opponents_active: usize,
    pub opponents_destroyed: u32,
}
