use glam::IVec2;

use tankfield_core::constants::OBJECTIVE_SIZE;
use tankfield_core::events::GameEvent;
use tankfield_core::state::ObjectiveView;
use tankfield_core::types::Rect;

/// The flag the players defend.
#[derive(Debug, Clone, Default)]
pub struct Objective {
    rect: Rect,
    destroyed: bool,
}

impl Objective {
    pub fn new(origin: IVec2) -> Self {
        Self {
            rect: Rect::from_origin_size(origin, IVec2::splat(OBJECTIVE_SIZE)),
            destroyed: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn place_at(&mut self, origin: IVec2) {
        self.rect = Rect::from_origin_size(origin, IVec2::splat(OBJECTIVE_SIZE));
    }

    /// Destroy the objective. Returns `true` only on the intact → destroyed
    /// transition; burning an already destroyed objective changes nothing.
    pub fn burn(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        events.push(GameEvent::ObjectiveChanged { destroyed: true });
        true
    }

    /// Back to intact for a new round.
    pub fn restore(&mut self, events: &mut Vec<GameEvent>) {
        self.destroyed = false;
        events.push(GameEvent::ObjectiveChanged { destroyed: false });
    }

    pub fn view(&self) -> ObjectiveView {
        ObjectiveView {
            rect: self.rect,
            destroyed: self.destroyed,
        }
    }
}
