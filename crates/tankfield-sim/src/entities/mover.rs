//! Movable base shared by tanks and bullets.

use glam::IVec2;

use tankfield_core::enums::OutOfBoardPolicy;
use tankfield_core::events::GameEvent;
use tankfield_core::types::{Direction, EntityId, Rect};

/// Result of [`Mover::advance_within`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    /// The step would have left the board and the policy kept the mover in place.
    Refused,
    /// The mover stepped off the board and must be removed.
    LeftBoard,
}

/// Rectangle, facing and movement clock.
///
/// `speed` is the countdown installed after every step; the mover may step
/// again once the countdown has ticked down to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mover {
    entity: EntityId,
    rect: Rect,
    direction: Direction,
    speed: u8,
    countdown: u8,
}

impl Mover {
    pub fn new(entity: EntityId, rect: Rect, direction: Direction, speed: u8) -> Self {
        Self {
            entity,
            rect,
            direction,
            speed,
            countdown: 0,
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Override the countdown, e.g. for an idle pause.
    pub fn set_countdown(&mut self, ticks: u8) {
        self.countdown = ticks;
    }

    pub fn place_at(&mut self, origin: IVec2) {
        self.rect.origin = origin;
    }

    /// Count the movement clock down by one.
    pub fn tick(&mut self) {
        self.countdown = self.countdown.saturating_sub(1);
    }

    pub fn can_move(&self) -> bool {
        self.countdown == 0
    }

    /// The strip `distance` cells deep directly ahead.
    pub fn forward_area(&self, distance: i32) -> Rect {
        self.rect.forward_area(self.direction, distance)
    }

    /// Step one cell forward and restart the clock.
    pub fn step(&mut self, events: &mut Vec<GameEvent>) {
        self.rect = self.rect.translated(self.direction.offset());
        self.countdown = self.speed;
        events.push(GameEvent::Moved {
            entity: self.entity,
            rect: self.rect,
        });
    }

    /// Step forward, applying `policy` if the step leaves `bounds`.
    pub fn advance_within(
        &mut self,
        bounds: &Rect,
        policy: OutOfBoardPolicy,
        events: &mut Vec<GameEvent>,
    ) -> StepOutcome {
        let next = self.rect.translated(self.direction.offset());
        if bounds.contains_rect(&next) {
            self.step(events);
            return StepOutcome::Moved;
        }
        match policy {
            OutOfBoardPolicy::StopMove => StepOutcome::Refused,
            OutOfBoardPolicy::Disappear => {
                self.step(events);
                StepOutcome::LeftBoard
            }
        }
    }
}
