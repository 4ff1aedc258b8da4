use glam::IVec2;

use tankfield_core::constants::{BULLET_SIZE, TANK_SIZE};
use tankfield_core::enums::{Affinity, OutOfBoardPolicy, TankVariant};
use tankfield_core::error::SimError;
use tankfield_core::events::GameEvent;
use tankfield_core::profiles::{tank_profile, TankProfile};
use tankfield_core::state::TankView;
use tankfield_core::types::{Direction, EntityId, EntityIds, Rect};

use super::bullet::Bullet;
use super::mover::Mover;

/// Result of a hit that landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Survived with this much armor left.
    Damaged { armor: u8 },
    Destroyed,
}

#[derive(Debug, Clone)]
pub struct Tank {
    mover: Mover,
    variant: TankVariant,
    profile: TankProfile,
    armor: u8,
    /// Ticks until the next shot is allowed.
    fire_countdown: u8,
    /// Fired but not yet claimed by the resolver.
    held: Option<Bullet>,
}

impl Tank {
    /// Tanks stop at the board edge.
    pub const OUT_OF_BOARD: OutOfBoardPolicy = OutOfBoardPolicy::StopMove;

    /// A fresh tank at `origin`. Player tanks face north, opponents south.
    pub fn new(entity: EntityId, variant: TankVariant, origin: IVec2) -> Self {
        let profile = tank_profile(variant);
        let direction = match variant.affinity() {
            Affinity::Friendly => Direction::North,
            Affinity::Alien => Direction::South,
        };
        let rect = Rect::from_origin_size(origin, IVec2::splat(TANK_SIZE));
        Self {
            mover: Mover::new(entity, rect, direction, profile.move_countdown),
            variant,
            profile,
            armor: profile.armor,
            fire_countdown: 0,
            held: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.mover.entity()
    }

    pub fn rect(&self) -> Rect {
        self.mover.rect()
    }

    pub fn direction(&self) -> Direction {
        self.mover.direction()
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn mover_mut(&mut self) -> &mut Mover {
        &mut self.mover
    }

    pub fn variant(&self) -> TankVariant {
        self.variant
    }

    pub fn affinity(&self) -> Affinity {
        self.variant.affinity()
    }

    pub fn armor(&self) -> u8 {
        self.armor
    }

    pub fn is_destroyed(&self) -> bool {
        self.armor == 0
    }

    /// Advance the fire and movement clocks.
    pub fn tick(&mut self) {
        self.fire_countdown = self.fire_countdown.saturating_sub(1);
        self.mover.tick();
    }

    pub fn can_move(&self) -> bool {
        self.mover.can_move()
    }

    pub fn can_fire(&self) -> bool {
        self.fire_countdown == 0
    }

    /// Load a bullet just ahead of the tank's center and restart the cadence.
    /// Returns `false` without firing while the cadence is running.
    pub fn fire(&mut self, ids: &mut EntityIds, events: &mut Vec<GameEvent>) -> bool {
        if !self.can_fire() {
            return false;
        }
        let direction = self.direction();
        let origin = Rect::centered_at(self.rect().center(), IVec2::splat(BULLET_SIZE))
            .translated(direction.offset())
            .origin;
        let bullet = Bullet::new(
            ids.allocate(),
            origin,
            direction,
            self.affinity(),
            self.profile.bullet_power,
            self.profile.bullet_countdown,
        );
        events.push(GameEvent::Fired {
            entity: self.id(),
            bullet: bullet.id(),
        });
        self.held = Some(bullet);
        self.fire_countdown = self.profile.fire_cadence;
        true
    }

    /// Hand the loaded bullet over. Yields it once per shot.
    pub fn take_bullet(&mut self) -> Option<Bullet> {
        self.held.take()
    }

    /// Apply one hit.
    pub fn catch_bullet(&mut self, events: &mut Vec<GameEvent>) -> Result<HitOutcome, SimError> {
        if self.armor == 0 {
            return Err(SimError::ArmorExhausted);
        }
        self.armor -= 1;
        if self.armor == 0 {
            events.push(GameEvent::TankDestroyed { entity: self.id() });
            Ok(HitOutcome::Destroyed)
        } else {
            events.push(GameEvent::ArmorChanged {
                entity: self.id(),
                armor: self.armor,
            });
            Ok(HitOutcome::Damaged { armor: self.armor })
        }
    }

    /// Destroy the tank in one hit whatever its armor.
    pub fn self_destroy(&mut self, events: &mut Vec<GameEvent>) -> Result<HitOutcome, SimError> {
        self.armor = 1;
        self.catch_bullet(events)
    }

    pub fn view(&self, controller: usize) -> TankView {
        TankView {
            entity: self.id(),
            variant: self.variant,
            rect: self.rect(),
            direction: self.direction(),
            armor: self.armor,
            controller,
        }
    }
}
