#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use glam::IVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use tankfield_core::constants::*;
    use tankfield_core::enums::{BlockProps, BlockType};
    use tankfield_core::types::Direction;

    use crate::fsm::{decide, OpponentContext};
    use crate::rolls::DecisionSource;

    /// Replays fixed draws. Panics if the decision asks for more than scripted.
    struct ScriptedRolls {
        rolls: VecDeque<u32>,
        chances: VecDeque<bool>,
    }

    impl ScriptedRolls {
        fn new(rolls: &[u32], chances: &[bool]) -> Self {
            Self {
                rolls: rolls.iter().copied().collect(),
                chances: chances.iter().copied().collect(),
            }
        }

        fn exhausted(&self) -> bool {
            self.rolls.is_empty() && self.chances.is_empty()
        }
    }

    impl DecisionSource for ScriptedRolls {
        fn roll(&mut self, bound: u32) -> u32 {
            let value = self.rolls.pop_front().expect("unscripted roll");
            assert!(value < bound, "scripted roll {value} out of 0..{bound}");
            value
        }

        fn chance(&mut self, _p: f64) -> bool {
            self.chances.pop_front().expect("unscripted chance")
        }
    }

    /// Tank in the top-left, objective bottom-right.
    fn make_context(direction: Direction) -> OpponentContext {
        OpponentContext {
            direction,
            can_move: true,
            can_fire: true,
            tank_center: IVec2::new(5, 5),
            objective_center: IVec2::new(50, 90),
            objective_destroyed: false,
        }
    }

    fn open(_: Direction) -> BlockProps {
        BlockProps::NONE
    }

    #[test]
    fn test_clear_path_advances() {
        let ctx = make_context(Direction::South);
        let mut rolls = ScriptedRolls::new(&[0, 0], &[false]);
        let d = decide(&ctx, open, &mut rolls);
        assert!(d.advance);
        assert_eq!(d.direction, Direction::South);
        assert_eq!(d.idle_pause, None);
        assert!(!d.fire);
        assert!(rolls.exhausted());
    }

    #[test]
    fn test_idle_roll_pauses() {
        let ctx = make_context(Direction::South);
        let mut rolls = ScriptedRolls::new(&[MOVE_ROLL_THRESHOLD, 0], &[false]);
        let d = decide(&ctx, open, &mut rolls);
        assert!(!d.advance);
        assert_eq!(d.idle_pause, Some(IDLE_PAUSE_TICKS));
    }

    #[test]
    fn test_blocked_turns_toward_objective() {
        let ctx = make_context(Direction::North);
        // Only north is blocked. Even turn roll picks the horizontal axis.
        let probe = |d: Direction| {
            if d == Direction::North {
                BlockProps::TANK_OBSTACLE
            } else {
                BlockProps::NONE
            }
        };
        let mut rolls = ScriptedRolls::new(&[0, 2], &[true, false]);
        let d = decide(&ctx, probe, &mut rolls);
        assert_eq!(d.direction, Direction::East);
        assert!(d.advance);

        // Odd turn roll picks the vertical axis.
        let mut rolls = ScriptedRolls::new(&[0, 3], &[true, false]);
        let d = decide(&ctx, probe, &mut rolls);
        assert_eq!(d.direction, Direction::South);
    }

    #[test]
    fn test_away_from_objective_on_failed_bias() {
        let ctx = make_context(Direction::North);
        let blocked = |_: Direction| BlockProps::TANK_OBSTACLE;
        let mut rolls = ScriptedRolls::new(&[0, 0], &[false, false]);
        let d = decide(&ctx, blocked, &mut rolls);
        assert_eq!(d.direction, Direction::West);
        assert!(!d.advance);

        let mut rolls = ScriptedRolls::new(&[0, 1], &[false, false]);
        let d = decide(&ctx, blocked, &mut rolls);
        assert_eq!(d.direction, Direction::North);
    }

    #[test]
    fn test_high_turn_roll_turns_even_when_clear() {
        let ctx = make_context(Direction::West);
        let mut rolls = ScriptedRolls::new(&[0, TURN_ROLL_THRESHOLD + 1], &[true, false]);
        let d = decide(&ctx, open, &mut rolls);
        // Roll 14 is even: horizontal toward the objective.
        assert_eq!(d.direction, Direction::East);
    }

    #[test]
    fn test_random_heading_once_objective_is_gone() {
        let mut ctx = make_context(Direction::North);
        ctx.objective_destroyed = true;
        let blocked_north = |d: Direction| {
            if d == Direction::North {
                BlockProps::TANK_OBSTACLE
            } else {
                BlockProps::NONE
            }
        };
        let mut rolls = ScriptedRolls::new(&[0, 0, 3], &[false]);
        let d = decide(&ctx, blocked_north, &mut rolls);
        assert_eq!(d.direction, Direction::ALL[3]);
        assert!(rolls.exhausted());
    }

    #[test]
    fn test_brick_ahead_forces_fire() {
        let ctx = make_context(Direction::South);
        let brick = |_: Direction| BlockType::Brick.properties();
        // Re-rolled heading is still brick; no spontaneous-fire chance is drawn.
        let mut rolls = ScriptedRolls::new(&[0, 0], &[true]);
        let d = decide(&ctx, brick, &mut rolls);
        assert!(!d.advance);
        assert!(d.fire);
        assert!(rolls.exhausted());
    }

    #[test]
    fn test_concrete_ahead_does_not_force_fire() {
        let ctx = make_context(Direction::South);
        let concrete = |_: Direction| BlockType::Concrete.properties();
        let mut rolls = ScriptedRolls::new(&[0, 0], &[true, false]);
        let d = decide(&ctx, concrete, &mut rolls);
        assert!(!d.fire);
    }

    #[test]
    fn test_board_edge_does_not_force_fire() {
        let ctx = make_context(Direction::South);
        let edge = |_: Direction| BlockProps::TANK_OBSTACLE;
        let mut rolls = ScriptedRolls::new(&[0, 0], &[true, false]);
        assert!(!decide(&ctx, edge, &mut rolls).fire);
    }

    #[test]
    fn test_spontaneous_fire() {
        let ctx = make_context(Direction::South);
        let mut rolls = ScriptedRolls::new(&[0, 0], &[true]);
        assert!(decide(&ctx, open, &mut rolls).fire);
    }

    #[test]
    fn test_frozen_tank_only_considers_firing() {
        let mut ctx = make_context(Direction::East);
        ctx.can_move = false;
        let mut rolls = ScriptedRolls::new(&[], &[true]);
        let d = decide(&ctx, open, &mut rolls);
        assert!(!d.advance);
        assert_eq!(d.direction, Direction::East);
        assert!(d.fire);

        ctx.can_fire = false;
        let mut rolls = ScriptedRolls::new(&[], &[]);
        assert!(!decide(&ctx, open, &mut rolls).fire);
    }

    #[test]
    fn test_seeded_rng_is_a_decision_source() {
        let ctx = make_context(Direction::South);
        let run = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..50)
                .map(|_| decide(&ctx, open, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(4), run(4));
        // Over 50 clear-path ticks most decisions advance.
        assert!(run(4).iter().filter(|d| d.advance).count() > 30);
    }
}
