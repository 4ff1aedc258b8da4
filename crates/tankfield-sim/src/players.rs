//! Human-controlled players: intent state, lives and respawn.

use std::collections::VecDeque;

use glam::IVec2;
use tracing::debug;

use tankfield_core::enums::{FriendlyVariant, TankVariant};
use tankfield_core::events::GameEvent;
use tankfield_core::types::{Direction, EntityIds};

use crate::entities::tank::Tank;

/// One human seat.
#[derive(Debug, Clone)]
pub struct HumanPlayer {
    index: usize,
    lives: u8,
    variant: FriendlyVariant,
    tank: Option<Tank>,
    /// Held directions, most recent first.
    directions: VecDeque<Direction>,
    fire_held: bool,
}

impl HumanPlayer {
    pub fn new(index: usize, lives: u8, variant: FriendlyVariant) -> Self {
        Self {
            index,
            lives,
            variant,
            tank: None,
            directions: VecDeque::new(),
            fire_held: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// No lives left; the player takes no further part in the round.
    pub fn is_out(&self) -> bool {
        self.lives == 0
    }

    pub fn tank(&self) -> Option<&Tank> {
        self.tank.as_ref()
    }

    pub fn tank_mut(&mut self) -> Option<&mut Tank> {
        self.tank.as_mut()
    }

    pub fn wants_to_move(&self) -> bool {
        !self.directions.is_empty()
    }

    pub fn fire_held(&self) -> bool {
        self.fire_held
    }

    /// Put a fresh tank at `start`.
    pub fn spawn(&mut self, start: IVec2, ids: &mut EntityIds, events: &mut Vec<GameEvent>) {
        let tank = Tank::new(ids.allocate(), TankVariant::Friendly(self.variant), start);
        events.push(GameEvent::NewTankAvailable {
            entity: tank.id(),
            variant: tank.variant(),
            rect: tank.rect(),
        });
        self.tank = Some(tank);
    }

    /// Press a direction: it becomes the most recent and the tank turns to it.
    pub fn move_toward(&mut self, direction: Direction) {
        let Some(tank) = self.tank.as_mut() else {
            return;
        };
        self.directions.retain(|d| *d != direction);
        self.directions.push_front(direction);
        tank.mover_mut().set_direction(direction);
    }

    /// Release a direction; the most recent still-held one takes over.
    pub fn stop_move(&mut self, direction: Direction) {
        self.directions.retain(|d| *d != direction);
        if let Some(resumed) = self.directions.pop_front() {
            self.move_toward(resumed);
        }
    }

    pub fn fire(&mut self) {
        self.fire_held = true;
    }

    pub fn stop_fire(&mut self) {
        self.fire_held = false;
    }

    /// The current tank was destroyed: spend a life and respawn at `start`
    /// if any remain.
    pub fn lose_tank(&mut self, start: IVec2, ids: &mut EntityIds, events: &mut Vec<GameEvent>) {
        self.tank = None;
        self.lives = self.lives.saturating_sub(1);
        debug!(player = self.index, lives = self.lives, "player lost a tank");
        if self.lives > 0 {
            self.spawn(start, ids, events);
        }
        events.push(GameEvent::StatsChanged);
    }

    /// Objective lost: destroy the tank and leave no lives behind.
    pub fn kill_all(&mut self, ids: &mut EntityIds, events: &mut Vec<GameEvent>) {
        let Some(tank) = self.tank.as_mut() else {
            return;
        };
        self.lives = 1;
        let origin = tank.rect().origin;
        // self_destroy forces armor to one first, so it cannot fail.
        if tank.self_destroy(events).is_ok() {
            self.lose_tank(origin, ids, events);
        }
    }
}
