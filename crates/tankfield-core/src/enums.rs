//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side an entity fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Affinity {
    /// Human-aligned.
    Friendly,
    /// Opponent-aligned.
    Alien,
}

impl Affinity {
    pub fn opposite(self) -> Affinity {
        match self {
            Affinity::Friendly => Affinity::Alien,
            Affinity::Alien => Affinity::Friendly,
        }
    }
}

/// Terrain classification of one board cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    #[default]
    Nothing,
    Brick,
    Concrete,
    Water,
    Ice,
    Bush,
}

impl BlockType {
    pub const ALL: [BlockType; 6] = [
        BlockType::Nothing,
        BlockType::Brick,
        BlockType::Concrete,
        BlockType::Water,
        BlockType::Ice,
        BlockType::Bush,
    ];

    /// Static property set for this terrain type.
    pub fn properties(self) -> BlockProps {
        match self {
            BlockType::Concrete => {
                BlockProps::TANK_OBSTACLE
                    | BlockProps::BULLET_OBSTACLE
                    | BlockProps::BREAKABLE
                    | BlockProps::STURDY
            }
            BlockType::Brick => {
                BlockProps::TANK_OBSTACLE | BlockProps::BULLET_OBSTACLE | BlockProps::BREAKABLE
            }
            BlockType::Water => BlockProps::TANK_OBSTACLE,
            BlockType::Ice => BlockProps::BAD_MANOEUVRE,
            BlockType::Nothing | BlockType::Bush => BlockProps::NONE,
        }
    }

    /// Lowercase name used in map files.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::Nothing => "nothing",
            BlockType::Brick => "brick",
            BlockType::Concrete => "concrete",
            BlockType::Water => "water",
            BlockType::Ice => "ice",
            BlockType::Bush => "bush",
        }
    }

    pub fn from_name(name: &str) -> Option<BlockType> {
        BlockType::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Single character used by ASCII board dumps.
    pub fn glyph(self) -> char {
        match self {
            BlockType::Nothing => '.',
            BlockType::Brick => '#',
            BlockType::Concrete => '@',
            BlockType::Water => '~',
            BlockType::Ice => '_',
            BlockType::Bush => '%',
        }
    }
}

/// Terrain property bitset. Area queries OR these together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BlockProps(pub u8);

impl BlockProps {
    pub const NONE: Self = Self(0);

    /// Stops tank movement.
    pub const TANK_OBSTACLE: Self = Self(1 << 0);

    /// Stops bullet travel.
    pub const BULLET_OBSTACLE: Self = Self(1 << 1);

    /// Can be destroyed by bullets.
    pub const BREAKABLE: Self = Self(1 << 2);

    /// Reinforced: only armor-piercing bullets destroy it.
    pub const STURDY: Self = Self(1 << 3);

    /// Impairs maneuvering.
    pub const BAD_MANOEUVRE: Self = Self(1 << 4);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Breakable without armor-piercing rounds.
    pub fn is_soft_breakable(self) -> bool {
        self.contains(Self::BREAKABLE) && !self.contains(Self::STURDY)
    }
}

impl std::ops::BitOr for BlockProps {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for BlockProps {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for BlockProps {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Projectile power level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerLevel {
    #[default]
    Regular,
    /// Also destroys sturdy terrain.
    ArmorPiercing,
}

/// How a bullet ended, set at detonation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Explosion {
    /// Hit a tank.
    Plain,
    /// Hit the objective.
    Large,
    /// Removed terrain, or clashed with an opposing bullet.
    BrickDestroyed,
    /// Stopped without effect.
    NoDamage,
}

/// Player tank variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FriendlyVariant {
    #[default]
    Small,
    SpeedFire,
    BurstFire,
    ArmorPiercing,
}

/// Opponent tank variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    #[default]
    Regular,
    Speedy,
    FastBullet,
    Armored,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 4] = [
        EnemyVariant::Regular,
        EnemyVariant::Speedy,
        EnemyVariant::FastBullet,
        EnemyVariant::Armored,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EnemyVariant::Regular => "regular",
            EnemyVariant::Speedy => "speedy",
            EnemyVariant::FastBullet => "fast-bullet",
            EnemyVariant::Armored => "armored",
        }
    }

    pub fn from_name(name: &str) -> Option<EnemyVariant> {
        EnemyVariant::ALL.into_iter().find(|v| v.name() == name)
    }
}

/// A tank's variant, which also fixes its affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankVariant {
    Friendly(FriendlyVariant),
    Alien(EnemyVariant),
}

impl TankVariant {
    pub fn affinity(self) -> Affinity {
        match self {
            TankVariant::Friendly(_) => Affinity::Friendly,
            TankVariant::Alien(_) => Affinity::Alien,
        }
    }
}

/// What happens when a mover's step would leave the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutOfBoardPolicy {
    /// Movement is refused; the entity stays.
    StopMove,
    /// The entity is removed.
    Disappear,
}

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Every opponent was destroyed.
    Victory,
    /// The objective burned or every player ran out of lives.
    Defeat,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Idle,
    Active,
    Paused,
    RoundOver(RoundOutcome),
}
