//! Player tank system: applies held intents once per tick.

use tankfield_core::enums::BlockProps;
use tankfield_core::events::GameEvent;
use tankfield_core::types::EntityIds;
use tankfield_terrain::Board;

use crate::entities::bullet::Bullet;
use crate::entities::tank::Tank;
use crate::players::HumanPlayer;

/// Tick every live player tank, move it if a direction is held and the way
/// is clear, and fire if the trigger is held and the cadence allows.
pub fn run(
    humans: &mut [HumanPlayer],
    board: &Board,
    bullets: &mut Vec<Bullet>,
    ids: &mut EntityIds,
    events: &mut Vec<GameEvent>,
) {
    let bounds = board.bounds();
    for human in humans.iter_mut() {
        let wants_to_move = human.wants_to_move();
        let fire_held = human.fire_held();
        let Some(tank) = human.tank_mut() else {
            continue;
        };
        tank.tick();

        if wants_to_move && tank.can_move() {
            let props = board.area_properties(&tank.mover().forward_area(1));
            if !props.contains(BlockProps::TANK_OBSTACLE) {
                tank.mover_mut()
                    .advance_within(&bounds, Tank::OUT_OF_BOARD, events);
            }
        }

        if fire_held && tank.fire(ids, events) {
            bullets.extend(tank.take_bullet());
        }
    }
}
