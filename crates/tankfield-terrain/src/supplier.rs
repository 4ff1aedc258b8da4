//! Map supplier capability and the in-memory map document.
//!
//! All coordinates a supplier hands out are in supplier space; the board
//! applies the sub-division scale itself.

use glam::IVec2;

use tankfield_core::enums::{BlockType, EnemyVariant};
use tankfield_core::error::MapError;
use tankfield_core::types::Rect;

/// One terrain placement: every cell of `rect` becomes `block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub rect: Rect,
    pub block: BlockType,
}

/// Source of a level. Implemented by procedural and file-backed loaders.
pub trait MapSupplier {
    /// Prepare the supplier. Nothing else may be called if this fails.
    fn open(&mut self) -> Result<(), MapError>;

    /// Map extent in supplier units.
    fn dimensions(&self) -> IVec2;

    fn has_next(&self) -> bool;

    /// Next terrain placement, lazily produced.
    fn next_placement(&mut self) -> Option<Placement>;

    /// Opponent variants in activation order.
    fn enemy_composition(&self) -> Vec<EnemyVariant>;

    fn enemy_start_positions(&self) -> Vec<IVec2>;

    fn friendly_start_positions(&self) -> Vec<IVec2>;

    fn objective_position(&self) -> IVec2;
}

/// A fully materialized map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapDocument {
    pub size: IVec2,
    pub objective: IVec2,
    pub enemy_starts: Vec<IVec2>,
    pub friendly_starts: Vec<IVec2>,
    pub enemy_tanks: Vec<EnemyVariant>,
    pub placements: Vec<Placement>,
}

impl MapDocument {
    /// Drain an opened-or-not supplier into a document.
    pub fn from_supplier(supplier: &mut dyn MapSupplier) -> Result<Self, MapError> {
        supplier.open()?;
        let mut placements = Vec::new();
        while let Some(placement) = supplier.next_placement() {
            placements.push(placement);
        }
        Ok(Self {
            size: supplier.dimensions(),
            objective: supplier.objective_position(),
            enemy_starts: supplier.enemy_start_positions(),
            friendly_starts: supplier.friendly_start_positions(),
            enemy_tanks: supplier.enemy_composition(),
            placements,
        })
    }
}

/// Supplier over a [`MapDocument`] held in memory.
#[derive(Debug, Clone)]
pub struct MemorySupplier {
    document: MapDocument,
    cursor: usize,
}

impl MemorySupplier {
    pub fn new(document: MapDocument) -> Self {
        Self {
            document,
            cursor: 0,
        }
    }

    pub fn document(&self) -> &MapDocument {
        &self.document
    }
}

impl MapSupplier for MemorySupplier {
    fn open(&mut self) -> Result<(), MapError> {
        self.cursor = 0;
        Ok(())
    }

    fn dimensions(&self) -> IVec2 {
        self.document.size
    }

    fn has_next(&self) -> bool {
        self.cursor < self.document.placements.len()
    }

    fn next_placement(&mut self) -> Option<Placement> {
        let placement = self.document.placements.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(placement)
    }

    fn enemy_composition(&self) -> Vec<EnemyVariant> {
        self.document.enemy_tanks.clone()
    }

    fn enemy_start_positions(&self) -> Vec<IVec2> {
        self.document.enemy_starts.clone()
    }

    fn friendly_start_positions(&self) -> Vec<IVec2> {
        self.document.friendly_starts.clone()
    }

    fn objective_position(&self) -> IVec2 {
        self.document.objective
    }
}
