//! Variant-specific tank stats.
//!
//! Consolidates the per-variant overrides applied when a tank is created.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{EnemyVariant, FriendlyVariant, PowerLevel, TankVariant};

/// Stats a tank is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankProfile {
    /// Ticks between moves.
    pub move_countdown: u8,
    /// Hits survived plus one.
    pub armor: u8,
    /// Ticks between shots.
    pub fire_cadence: u8,
    /// Bullet passes between bullet moves.
    pub bullet_countdown: u8,
    pub bullet_power: PowerLevel,
}

impl Default for TankProfile {
    fn default() -> Self {
        Self {
            move_countdown: TANK_MOVE_COUNTDOWN,
            armor: DEFAULT_ARMOR,
            fire_cadence: FIRE_CADENCE,
            bullet_countdown: BULLET_MOVE_COUNTDOWN,
            bullet_power: PowerLevel::Regular,
        }
    }
}

/// Get the stat profile for a given variant.
pub fn tank_profile(variant: TankVariant) -> TankProfile {
    let base = TankProfile::default();
    match variant {
        TankVariant::Friendly(FriendlyVariant::Small | FriendlyVariant::SpeedFire) => base,
        TankVariant::Friendly(FriendlyVariant::BurstFire) => TankProfile {
            fire_cadence: BURST_FIRE_CADENCE,
            ..base
        },
        TankVariant::Friendly(FriendlyVariant::ArmorPiercing) => TankProfile {
            bullet_power: PowerLevel::ArmorPiercing,
            ..base
        },
        TankVariant::Alien(EnemyVariant::Regular) => base,
        TankVariant::Alien(EnemyVariant::Speedy) => TankProfile {
            move_countdown: SPEEDY_TANK_MOVE_COUNTDOWN,
            ..base
        },
        TankVariant::Alien(EnemyVariant::FastBullet) => TankProfile {
            bullet_countdown: FAST_BULLET_MOVE_COUNTDOWN,
            ..base
        },
        TankVariant::Alien(EnemyVariant::Armored) => TankProfile {
            armor: ARMORED_TANK_ARMOR,
            ..base
        },
    }
}
