//! Procedural level generation for TANKFIELD.
//!
//! A seeded map supplier that scatters terrain shapes over a fixed-size
//! board and rolls the opponent line-up.

pub mod random_map;
pub mod shapes;

pub use random_map::RandomMapSupplier;
