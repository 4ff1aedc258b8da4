//! Seeded random map supplier.
//!
//! Shapes are queued on `open` and expanded into placements lazily, one shape
//! at a time, as the board pulls them.

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use tankfield_core::constants::{PROCEDURAL_ENEMY_COUNT, PROCEDURAL_MAP_EXTENT};
use tankfield_core::enums::{BlockType, EnemyVariant};
use tankfield_core::error::MapError;
use tankfield_core::types::Rect;
use tankfield_terrain::{MapSupplier, Placement};

use crate::shapes;

/// A shape waiting to be rolled and rasterized.
#[derive(Debug, Clone, Copy)]
struct PendingShape {
    block: BlockType,
    min_size: i32,
    max_size: i32,
}

/// Shape batches queued per map: (block, count, min size, max size).
const SHAPE_BATCHES: [(BlockType, usize, i32, i32); 5] = [
    (BlockType::Brick, 20, 4, 20),
    (BlockType::Concrete, 10, 3, 8),
    (BlockType::Water, 10, 3, 8),
    (BlockType::Ice, 10, 3, 8),
    (BlockType::Bush, 20, 3, 8),
];

/// Number of shape variants rolled; everything past the first three is an ellipse.
const SHAPE_VARIANTS: u32 = 6;

/// Range of the per-tank variant roll.
const VARIANT_ROLL: u32 = 12;

pub struct RandomMapSupplier {
    seed: u64,
    rng: ChaCha8Rng,
    size: IVec2,
    shapes: VecDeque<PendingShape>,
    placements: VecDeque<Placement>,
    composition: Vec<EnemyVariant>,
}

impl RandomMapSupplier {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            size: IVec2::splat(PROCEDURAL_MAP_EXTENT),
            shapes: VecDeque::new(),
            placements: VecDeque::new(),
            composition: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn roll_composition(&mut self) -> Vec<EnemyVariant> {
        (0..PROCEDURAL_ENEMY_COUNT)
            .map(|_| match self.rng.gen_range(0..VARIANT_ROLL) {
                11 => EnemyVariant::Armored,
                8..=10 => EnemyVariant::FastBullet,
                5..=7 => EnemyVariant::Speedy,
                _ => EnemyVariant::Regular,
            })
            .collect()
    }

    /// Roll size, position and variant for one shape and queue its placements.
    fn expand(&mut self, shape: PendingShape) {
        let width = shape.min_size.max(self.rng.gen_range(0..=shape.max_size));
        let height = shape.min_size.max(self.rng.gen_range(0..=shape.max_size));
        let left = self.rng.gen_range(0..self.size.x) - width / 2;
        let top = self.rng.gen_range(0..self.size.y) - height / 2;
        let bounds = Rect::new(left, top, width, height);
        let brick = shape.block == BlockType::Brick;

        let expanded = match self.rng.gen_range(0..SHAPE_VARIANTS) {
            0 => vec![Placement {
                rect: Rect::new(left, top, width, 2),
                block: shape.block,
            }],
            1 => vec![Placement {
                rect: Rect::new(left, top, 2, height),
                block: shape.block,
            }],
            2 if brick => shapes::hollow_rect(bounds, shape.block),
            2 => vec![Placement {
                rect: bounds,
                block: shape.block,
            }],
            _ => shapes::ellipse(bounds, shape.block, brick),
        };
        self.placements.extend(expanded);
    }
}

impl MapSupplier for RandomMapSupplier {
    fn open(&mut self) -> Result<(), MapError> {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.placements.clear();
        self.shapes = SHAPE_BATCHES
            .iter()
            .flat_map(|&(block, count, min_size, max_size)| {
                std::iter::repeat(PendingShape {
                    block,
                    min_size,
                    max_size,
                })
                .take(count)
            })
            .collect();
        self.composition = self.roll_composition();
        debug!(seed = self.seed, shapes = self.shapes.len(), "random map opened");
        Ok(())
    }

    fn dimensions(&self) -> IVec2 {
        self.size
    }

    fn has_next(&self) -> bool {
        !self.shapes.is_empty() || !self.placements.is_empty()
    }

    fn next_placement(&mut self) -> Option<Placement> {
        while self.placements.is_empty() {
            let shape = self.shapes.pop_front()?;
            self.expand(shape);
        }
        self.placements.pop_front()
    }

    fn enemy_composition(&self) -> Vec<EnemyVariant> {
        self.composition.clone()
    }

    fn enemy_start_positions(&self) -> Vec<IVec2> {
        let w = self.size.x;
        vec![IVec2::new(0, 0), IVec2::new(w - 2, 0), IVec2::new(w / 2, 0)]
    }

    fn friendly_start_positions(&self) -> Vec<IVec2> {
        let (w, h) = (self.size.x, self.size.y);
        vec![IVec2::new(w / 2 - 5, h - 2), IVec2::new(w / 2 + 1, h - 2)]
    }

    fn objective_position(&self) -> IVec2 {
        IVec2::new(self.size.x / 2 - 2, self.size.y - 2)
    }
}
