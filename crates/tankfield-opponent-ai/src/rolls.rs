//! Random draws behind opponent decisions.

use rand::Rng;

/// Source of the random draws an opponent makes each tick.
///
/// Any [`rand::Rng`] is a source; tests script exact sequences.
pub trait DecisionSource {
    /// Uniform integer in `0..bound`.
    fn roll(&mut self, bound: u32) -> u32;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

impl<R: Rng + ?Sized> DecisionSource for R {
    fn roll(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.gen_bool(p.clamp(0.0, 1.0))
    }
}
