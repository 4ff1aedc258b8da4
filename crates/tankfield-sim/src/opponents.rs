//! Opponent pool: a fixed set of controller slots promoted into play over time.

use std::collections::VecDeque;

use glam::IVec2;
use tracing::{debug, info};

use tankfield_core::enums::{EnemyVariant, TankVariant};
use tankfield_core::events::GameEvent;
use tankfield_core::types::{EntityIds, Rect};
use tankfield_opponent_ai::DecisionSource;

use crate::entities::tank::Tank;

/// One controller slot. Holds a tank only while active.
#[derive(Debug, Clone, Default)]
pub struct OpponentSlot {
    tank: Option<Tank>,
}

impl OpponentSlot {
    pub fn tank(&self) -> Option<&Tank> {
        self.tank.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct OpponentPool {
    slots: Vec<OpponentSlot>,
    /// Slot indices waiting for activation, front first.
    queued: VecDeque<usize>,
    /// Slot indices in play, in activation order.
    active: Vec<usize>,
    /// Variants not yet put into play.
    composition: VecDeque<EnemyVariant>,
    slot_count: usize,
    activation_interval: u32,
    activation_clock: u32,
    destroyed: u32,
}

impl OpponentPool {
    pub fn new(slot_count: usize, activation_interval: u32) -> Self {
        Self {
            slots: Vec::new(),
            queued: VecDeque::new(),
            active: Vec::new(),
            composition: VecDeque::new(),
            slot_count,
            activation_interval,
            activation_clock: 0,
            destroyed: 0,
        }
    }

    /// Create every slot queued and take the round's line-up.
    pub fn seed(&mut self, composition: Vec<EnemyVariant>, events: &mut Vec<GameEvent>) {
        self.reset();
        self.composition = composition.into();
        self.slots = vec![OpponentSlot::default(); self.slot_count];
        for slot in 0..self.slot_count {
            self.queued.push_back(slot);
            events.push(GameEvent::OpponentCreated { slot });
        }
        debug!(
            slots = self.slot_count,
            opponents = self.composition.len(),
            "opponent pool seeded"
        );
    }

    pub fn reset(&mut self) {
        self.slots.clear();
        self.queued.clear();
        self.active.clear();
        self.composition.clear();
        self.activation_clock = 0;
        self.destroyed = 0;
    }

    /// Count the activation clock down and promote the front queued slot when
    /// it expires, a slot is free and the line-up is not exhausted.
    /// Returns the promoted slot.
    pub fn tick_activation(
        &mut self,
        starts: &[IVec2],
        rolls: &mut dyn DecisionSource,
        ids: &mut EntityIds,
        events: &mut Vec<GameEvent>,
    ) -> Option<usize> {
        self.activation_clock = self.activation_clock.saturating_sub(1);
        if self.activation_clock > 0 || self.composition.is_empty() {
            return None;
        }
        let slot = self.queued.pop_front()?;
        let variant = self.composition.pop_front()?;

        let start = match starts.len() {
            0 => IVec2::ZERO,
            n => starts[rolls.roll(n as u32) as usize],
        };
        let tank = Tank::new(ids.allocate(), TankVariant::Alien(variant), start);
        events.push(GameEvent::NewTankAvailable {
            entity: tank.id(),
            variant: tank.variant(),
            rect: tank.rect(),
        });
        info!(slot, variant = variant.name(), x = start.x, y = start.y, "opponent activated");

        self.slots[slot].tank = Some(tank);
        self.active.push(slot);
        self.activation_clock = self.activation_interval;
        Some(slot)
    }

    /// First active slot whose tank overlaps `rect`.
    pub fn find_clash(&self, rect: &Rect) -> Option<usize> {
        self.active.iter().copied().find(|&slot| {
            self.slots[slot]
                .tank
                .as_ref()
                .is_some_and(|tank| tank.rect().intersects(rect))
        })
    }

    /// The slot's tank was destroyed: return the slot to the back of the queue.
    pub fn on_destroyed(&mut self, slot: usize, events: &mut Vec<GameEvent>) {
        let Some(position) = self.active.iter().position(|&s| s == slot) else {
            return;
        };
        self.active.remove(position);
        self.slots[slot].tank = None;
        self.queued.push_back(slot);
        self.destroyed += 1;
        info!(slot, remaining = self.lives(), "opponent destroyed");
        events.push(GameEvent::StatsChanged);
    }

    /// Opponents still to beat: pending line-up plus those in play.
    pub fn lives(&self) -> usize {
        self.composition.len() + self.active.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn queued_count(&self) -> usize {
        self.queued.len()
    }

    pub fn destroyed(&self) -> u32 {
        self.destroyed
    }

    /// Active slot indices in activation order.
    pub fn active_slots(&self) -> &[usize] {
        &self.active
    }

    pub fn slots(&self) -> &[OpponentSlot] {
        &self.slots
    }

    pub fn tank(&self, slot: usize) -> Option<&Tank> {
        self.slots.get(slot)?.tank.as_ref()
    }

    pub fn tank_mut(&mut self, slot: usize) -> Option<&mut Tank> {
        self.slots.get_mut(slot)?.tank.as_mut()
    }

    /// Active tanks with their slot index, in activation order.
    pub fn active_tanks(&self) -> impl Iterator<Item = (usize, &Tank)> + '_ {
        self.active
            .iter()
            .filter_map(|&slot| self.slots[slot].tank.as_ref().map(|tank| (slot, tank)))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    const STARTS: [IVec2; 3] = [IVec2::new(0, 0), IVec2::new(96, 0), IVec2::new(50, 0)];

    fn make_pool(opponents: usize, interval: u32) -> (OpponentPool, Vec<GameEvent>) {
        let mut pool = OpponentPool::new(8, interval);
        let mut events = Vec::new();
        pool.seed(vec![EnemyVariant::Regular; opponents], &mut events);
        (pool, events)
    }

    #[test]
    fn test_seed_announces_every_slot() {
        let (pool, events) = make_pool(20, 100);
        assert_eq!(pool.queued_count(), 8);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.lives(), 20);
        let created: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                GameEvent::OpponentCreated { slot } => Some(*slot),
                _ => None,
            })
            .collect();
        assert_eq!(created, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_activation_is_time_gated() {
        let (mut pool, mut events) = make_pool(20, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut ids = EntityIds::default();

        assert_eq!(pool.tick_activation(&STARTS, &mut rng, &mut ids, &mut events), Some(0));
        assert_eq!(pool.tick_activation(&STARTS, &mut rng, &mut ids, &mut events), None);
        assert_eq!(pool.tick_activation(&STARTS, &mut rng, &mut ids, &mut events), None);
        assert_eq!(pool.tick_activation(&STARTS, &mut rng, &mut ids, &mut events), Some(1));
        assert_eq!(pool.active_count(), 2);
        assert_eq!(pool.lives(), 20);

        let tank = pool.tank(0).unwrap();
        assert!(STARTS.contains(&tank.rect().origin));
    }

    #[test]
    fn test_at_most_eight_active_and_lives_count_down() {
        let (mut pool, mut events) = make_pool(20, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut ids = EntityIds::default();

        for _ in 0..50 {
            pool.tick_activation(&STARTS, &mut rng, &mut ids, &mut events);
            assert!(pool.active_count() <= 8);
        }
        assert_eq!(pool.active_count(), 8);
        assert_eq!(pool.lives(), 20);

        let mut expected = 20;
        while pool.lives() > 0 {
            let slot = pool.active_slots()[0];
            pool.on_destroyed(slot, &mut events);
            expected -= 1;
            assert_eq!(pool.lives(), expected);
            pool.tick_activation(&STARTS, &mut rng, &mut ids, &mut events);
            assert!(pool.active_count() <= 8);
            assert_eq!(pool.lives(), expected);
        }
        assert_eq!(pool.destroyed(), 20);
        assert_eq!(pool.queued_count(), 8);
    }

    #[test]
    fn test_destroyed_slot_goes_to_back_of_queue() {
        let (mut pool, mut events) = make_pool(20, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut ids = EntityIds::default();
        pool.tick_activation(&STARTS, &mut rng, &mut ids, &mut events);
        pool.on_destroyed(0, &mut events);
        assert!(pool.tank(0).is_none());
        // Slots 1..8 are ahead of slot 0 now.
        for expected in 1..8 {
            assert_eq!(
                pool.tick_activation(&STARTS, &mut rng, &mut ids, &mut events),
                Some(expected)
            );
        }
        assert_eq!(
            pool.tick_activation(&STARTS, &mut rng, &mut ids, &mut events),
            Some(0)
        );
    }

    #[test]
    fn test_find_clash_returns_first_overlap() {
        let (mut pool, mut events) = make_pool(2, 1);
        let mut ids = EntityIds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let only_start = [IVec2::new(10, 10)];
        pool.tick_activation(&only_start, &mut rng, &mut ids, &mut events);
        pool.tick_activation(&only_start, &mut rng, &mut ids, &mut events);

        assert_eq!(pool.find_clash(&Rect::new(12, 12, 2, 2)), Some(0));
        assert_eq!(pool.find_clash(&Rect::new(30, 30, 2, 2)), None);
        pool.on_destroyed(0, &mut events);
        assert_eq!(pool.find_clash(&Rect::new(12, 12, 2, 2)), Some(1));
    }

    #[test]
    fn test_exhausted_line_up_stops_activation() {
        let (mut pool, mut events) = make_pool(1, 1);
        let mut ids = EntityIds::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(pool
            .tick_activation(&STARTS, &mut rng, &mut ids, &mut events)
            .is_some());
        assert!(pool
            .tick_activation(&STARTS, &mut rng, &mut ids, &mut events)
            .is_none());
        assert_eq!(pool.lives(), 1);
    }
}
