//! Observer registry for adapters that react to game events.

use std::fmt;

use tankfield_core::events::GameEvent;

/// Callback receiving one event. It cannot reach back into the engine.
pub type Observer = Box<dyn FnMut(&GameEvent)>;

#[derive(Default)]
pub struct Observers {
    callbacks: Vec<Observer>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: Observer) {
        self.callbacks.push(observer);
    }

    /// Deliver `events` in order to every observer, in subscription order.
    pub fn notify(&mut self, events: &[GameEvent]) {
        for event in events {
            for callback in &mut self.callbacks {
                callback(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}
