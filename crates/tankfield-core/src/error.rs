//! Error types shared by the terrain, procgen and sim crates.

use thiserror::Error;

/// Failure to obtain a map from a supplier.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map supplier unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("map parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("invalid map dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Simulation invariant violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    /// A hit was applied to a tank that already had no armor left.
    #[error("hit applied to a tank with no armor left")]
    ArmorExhausted,
}
