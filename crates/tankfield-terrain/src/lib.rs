//! Terrain system for TANKFIELD.
//!
//! The scaled block grid, area property queries,
//! and the map suppliers that populate it.

pub use tankfield_core as core;

pub mod grid;
pub mod supplier;
pub mod tmap;

// Re-export key types for convenience.
pub use grid::Board;
pub use supplier::{MapDocument, MapSupplier, MemorySupplier, Placement};
pub use tmap::TmapFileSupplier;
