//! Notifications emitted by the simulation for rendering, UI and audio adapters.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, Rect};

/// Fire-and-forget notification. Observers never answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A tank or bullet advanced one cell.
    Moved { entity: EntityId, rect: Rect },
    /// A tank's armor reached zero.
    TankDestroyed { entity: EntityId },
    /// A tank survived a hit.
    ArmorChanged { entity: EntityId, armor: u8 },
    /// A tank produced a bullet.
    Fired { entity: EntityId, bullet: EntityId },
    /// A bullet ended.
    BulletDetonated {
        entity: EntityId,
        explosion: Explosion,
        rect: Rect,
    },
    /// One terrain cell was destroyed.
    BlockRemoved { rect: Rect },
    /// The objective was burned or restored.
    ObjectiveChanged { destroyed: bool },
    /// The objective was burned by a bullet.
    ObjectiveLost,
    /// Lives or roster counts changed.
    StatsChanged,
    /// A tank entered play.
    NewTankAvailable {
        entity: EntityId,
        variant: TankVariant,
        rect: Rect,
    },
    /// An opponent controller slot was created.
    OpponentCreated { slot: usize },
    /// A map finished loading.
    MapLoaded { width: i32, height: i32 },
    /// The round ended.
    RoundOver { outcome: RoundOutcome },
}
