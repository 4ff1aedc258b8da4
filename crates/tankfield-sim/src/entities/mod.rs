//! Things that live on the board: movers, bullets, tanks and the objective.
//!
//! Each entity owns its own state. Notifications go into the caller's event
//! buffer; nothing here reaches back into the engine.

pub mod bullet;
pub mod mover;
pub mod objective;
pub mod tank;

pub use bullet::Bullet;
pub use mover::{Mover, StepOutcome};
pub use objective::Objective;
pub use tank::{HitOutcome, Tank};
