//! Opponent tank decision logic.
//!
//! A pure function from what the tank can see this tick to what it does.
//! No board or engine access: terrain is read through a probe closure.

use glam::IVec2;

use tankfield_core::constants::*;
use tankfield_core::enums::BlockProps;
use tankfield_core::types::Direction;

use crate::rolls::DecisionSource;

/// Input to the decision for a single opponent tank.
#[derive(Debug, Clone, Copy)]
pub struct OpponentContext {
    pub direction: Direction,
    /// Movement countdown has expired.
    pub can_move: bool,
    /// Fire cadence has expired.
    pub can_fire: bool,
    pub tank_center: IVec2,
    pub objective_center: IVec2,
    pub objective_destroyed: bool,
}

/// What the tank does this tick, applied in field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentDecision {
    /// Facing after this tick. Differs from the context when the tank turned.
    pub direction: Direction,
    /// Step one cell forward.
    pub advance: bool,
    /// Replace the movement countdown with this many ticks.
    pub idle_pause: Option<u8>,
    pub fire: bool,
}

/// Decide one tick for an opponent tank.
///
/// `probe` reports the terrain properties of the one-cell strip ahead of the
/// tank when facing the given direction.
pub fn decide(
    ctx: &OpponentContext,
    probe: impl Fn(Direction) -> BlockProps,
    rolls: &mut dyn DecisionSource,
) -> OpponentDecision {
    let mut decision = OpponentDecision {
        direction: ctx.direction,
        advance: false,
        idle_pause: None,
        fire: false,
    };
    let mut force_fire = false;

    if ctx.can_move {
        let mut props = probe(ctx.direction);
        let mut blocked = props.contains(BlockProps::TANK_OBSTACLE);

        let move_roll = rolls.roll(DECISION_ROLL_RANGE);
        let turn_roll = rolls.roll(DECISION_ROLL_RANGE);
        let moving = move_roll < MOVE_ROLL_THRESHOLD;

        if blocked || turn_roll > TURN_ROLL_THRESHOLD {
            decision.direction = if ctx.objective_destroyed {
                Direction::ALL[rolls.roll(4) as usize]
            } else {
                choose_toward_objective(ctx, turn_roll, rolls)
            };
            props = probe(decision.direction);
            blocked = props.contains(BlockProps::TANK_OBSTACLE);
        }

        if !blocked && moving {
            decision.advance = true;
        } else if props.is_soft_breakable() {
            force_fire = true;
        }

        if !moving {
            decision.idle_pause = Some(IDLE_PAUSE_TICKS);
        }
    }

    decision.fire = ctx.can_fire && (force_fire || rolls.chance(SPONTANEOUS_FIRE_CHANCE));
    decision
}

/// New heading biased toward the objective.
///
/// Candidates are ordered: horizontal toward, vertical toward, horizontal
/// away, vertical away. The turn roll's low bit picks the axis.
fn choose_toward_objective(
    ctx: &OpponentContext,
    turn_roll: u32,
    rolls: &mut dyn DecisionSource,
) -> Direction {
    let (toward_x, away_x) = if ctx.tank_center.x < ctx.objective_center.x {
        (Direction::East, Direction::West)
    } else {
        (Direction::West, Direction::East)
    };
    let (toward_y, away_y) = if ctx.tank_center.y < ctx.objective_center.y {
        (Direction::South, Direction::North)
    } else {
        (Direction::North, Direction::South)
    };
    let candidates = [toward_x, toward_y, away_x, away_y];

    let base = if rolls.chance(TOWARD_OBJECTIVE_CHANCE) {
        0
    } else {
        2
    };
    candidates[base + (turn_roll & 1) as usize]
}
