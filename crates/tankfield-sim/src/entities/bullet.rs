use glam::IVec2;

use tankfield_core::constants::BULLET_SIZE;
use tankfield_core::enums::{Affinity, Explosion, OutOfBoardPolicy, PowerLevel};
use tankfield_core::events::GameEvent;
use tankfield_core::state::BulletView;
use tankfield_core::types::{Direction, EntityId, Rect};

use super::mover::Mover;

/// A projectile in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bullet {
    mover: Mover,
    affinity: Affinity,
    power: PowerLevel,
    explosion: Option<Explosion>,
}

impl Bullet {
    /// Bullets leaving the board are gone.
    pub const OUT_OF_BOARD: OutOfBoardPolicy = OutOfBoardPolicy::Disappear;

    pub fn new(
        entity: EntityId,
        origin: IVec2,
        direction: Direction,
        affinity: Affinity,
        power: PowerLevel,
        speed: u8,
    ) -> Self {
        let rect = Rect::from_origin_size(origin, IVec2::splat(BULLET_SIZE));
        Self {
            mover: Mover::new(entity, rect, direction, speed),
            affinity,
            power,
            explosion: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.mover.entity()
    }

    pub fn rect(&self) -> Rect {
        self.mover.rect()
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut Mover {
        &mut self.mover
    }

    pub fn affinity(&self) -> Affinity {
        self.affinity
    }

    pub fn power(&self) -> PowerLevel {
        self.power
    }

    /// Set at detonation; `None` while in flight.
    pub fn explosion(&self) -> Option<Explosion> {
        self.explosion
    }

    /// Record how the bullet ended. Removal is up to the owner.
    pub fn detonate(&mut self, explosion: Explosion, events: &mut Vec<GameEvent>) {
        self.explosion = Some(explosion);
        events.push(GameEvent::BulletDetonated {
            entity: self.id(),
            explosion,
            rect: self.rect(),
        });
    }

    pub fn view(&self) -> BulletView {
        BulletView {
            entity: self.id(),
            affinity: self.affinity,
            power: self.power,
            rect: self.rect(),
            direction: self.mover.direction(),
        }
    }
}
