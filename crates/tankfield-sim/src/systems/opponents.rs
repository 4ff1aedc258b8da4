//! Opponent system: activation scheduling, then one decision per active tank.

use tankfield_core::events::GameEvent;
use tankfield_core::types::EntityIds;
use tankfield_opponent_ai::{decide, DecisionSource, OpponentContext};
use tankfield_terrain::Board;

use crate::entities::bullet::Bullet;
use crate::entities::objective::Objective;
use crate::entities::tank::Tank;
use crate::opponents::OpponentPool;

pub fn run(
    pool: &mut OpponentPool,
    board: &Board,
    objective: &Objective,
    bullets: &mut Vec<Bullet>,
    rolls: &mut dyn DecisionSource,
    ids: &mut EntityIds,
    events: &mut Vec<GameEvent>,
) {
    pool.tick_activation(board.enemy_start_positions(), rolls, ids, events);

    let bounds = board.bounds();
    let active = pool.active_slots().to_vec();
    for slot in active {
        let Some(tank) = pool.tank_mut(slot) else {
            continue;
        };
        tank.tick();

        let rect = tank.rect();
        let ctx = OpponentContext {
            direction: tank.direction(),
            can_move: tank.can_move(),
            can_fire: tank.can_fire(),
            tank_center: rect.center(),
            objective_center: objective.rect().center(),
            objective_destroyed: objective.is_destroyed(),
        };
        let decision = decide(
            &ctx,
            |direction| board.area_properties(&rect.forward_area(direction, 1)),
            rolls,
        );

        let mover = tank.mover_mut();
        mover.set_direction(decision.direction);
        if decision.advance {
            mover.advance_within(&bounds, Tank::OUT_OF_BOARD, events);
        }
        if let Some(ticks) = decision.idle_pause {
            mover.set_countdown(ticks);
        }
        if decision.fire && tank.fire(ids, events) {
            bullets.extend(tank.take_bullet());
        }
    }
}
