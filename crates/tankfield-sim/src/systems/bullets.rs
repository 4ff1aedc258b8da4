//! Bullet resolver: one pass over the live bullets.
//!
//! Each bullet is tested in fixed priority and the first match wins:
//! 1. opposing tank hit
//! 2. objective hit
//! 3. clash with a later opposing bullet
//! 4. bullet-blocking terrain ahead
//! 5. free flight
//!
//! The engine runs this pass `BULLET_PASSES_PER_TICK` times per tick.

use glam::IVec2;
use tracing::{error, info, trace};

use tankfield_core::constants::DESTRUCTION_FOOTPRINT;
use tankfield_core::enums::{Affinity, BlockProps, BlockType, Explosion, PowerLevel};
use tankfield_core::events::GameEvent;
use tankfield_core::types::{EntityIds, Rect};
use tankfield_terrain::Board;

use crate::entities::bullet::Bullet;
use crate::entities::mover::StepOutcome;
use crate::entities::objective::Objective;
use crate::entities::tank::{HitOutcome, Tank};
use crate::opponents::OpponentPool;
use crate::players::HumanPlayer;

/// What the pass does with the bullet under the cursor.
enum Fate {
    Keep,
    Remove,
}

/// Run one resolver pass over `bullets`, in collection order.
#[allow(clippy::too_many_arguments)]
pub fn run_pass(
    bullets: &mut Vec<Bullet>,
    board: &mut Board,
    humans: &mut [HumanPlayer],
    pool: &mut OpponentPool,
    objective: &mut Objective,
    ids: &mut EntityIds,
    events: &mut Vec<GameEvent>,
) {
    let mut i = 0;
    while i < bullets.len() {
        let fate = resolve(i, bullets, board, humans, pool, objective, ids, events);
        match fate {
            Fate::Keep => i += 1,
            Fate::Remove => {
                bullets.remove(i);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve(
    i: usize,
    bullets: &mut Vec<Bullet>,
    board: &mut Board,
    humans: &mut [HumanPlayer],
    pool: &mut OpponentPool,
    objective: &mut Objective,
    ids: &mut EntityIds,
    events: &mut Vec<GameEvent>,
) -> Fate {
    let rect = bullets[i].rect();
    let affinity = bullets[i].affinity();

    if strike_tank(affinity, &rect, board, humans, pool, ids, events) {
        bullets[i].detonate(Explosion::Plain, events);
        return Fate::Remove;
    }

    if objective.rect().intersects(&rect) {
        if objective.burn(events) {
            info!("objective lost");
            events.push(GameEvent::ObjectiveLost);
        }
        for human in humans.iter_mut() {
            human.kill_all(ids, events);
        }
        bullets[i].detonate(Explosion::Large, events);
        return Fate::Remove;
    }

    let opposing = affinity.opposite();
    let clash = (i + 1..bullets.len())
        .find(|&j| bullets[j].affinity() == opposing && bullets[j].rect().intersects(&rect));
    if let Some(j) = clash {
        // TODO: confirm with design whether a bullet clash deserves its own
        // explosion kind instead of BrickDestroyed.
        let mut other = bullets.remove(j);
        other.detonate(Explosion::BrickDestroyed, events);
        bullets[i].detonate(Explosion::BrickDestroyed, events);
        return Fate::Remove;
    }

    let ahead = bullets[i].mover().forward_area(1);
    if board
        .area_properties(&ahead)
        .contains(BlockProps::BULLET_OBSTACLE)
    {
        let damaged = demolish(board, &destruction_footprint(ahead), bullets[i].power(), events);
        let explosion = if damaged {
            Explosion::BrickDestroyed
        } else {
            Explosion::NoDamage
        };
        bullets[i].detonate(explosion, events);
        return Fate::Remove;
    }

    let bullet = &mut bullets[i];
    if bullet.mover().can_move() {
        let bounds = board.bounds();
        if bullet
            .mover_mut()
            .advance_within(&bounds, Bullet::OUT_OF_BOARD, events)
            == StepOutcome::LeftBoard
        {
            trace!(entity = ?bullet.id(), "bullet left the board");
            bullet.detonate(Explosion::NoDamage, events);
            return Fate::Remove;
        }
    }
    bullet.mover_mut().tick();
    Fate::Keep
}

/// Hit the first opposing tank overlapping `rect`. Returns whether one was hit.
fn strike_tank(
    affinity: Affinity,
    rect: &Rect,
    board: &Board,
    humans: &mut [HumanPlayer],
    pool: &mut OpponentPool,
    ids: &mut EntityIds,
    events: &mut Vec<GameEvent>,
) -> bool {
    match affinity {
        Affinity::Alien => {
            let Some(human) = humans
                .iter_mut()
                .find(|h| h.tank().is_some_and(|t| t.rect().intersects(rect)))
            else {
                return false;
            };
            let destroyed = match human.tank_mut() {
                Some(tank) => land_hit(tank, events),
                None => false,
            };
            if destroyed {
                let start = respawn_point(board, human.index());
                human.lose_tank(start, ids, events);
            }
            true
        }
        Affinity::Friendly => {
            let Some(slot) = pool.find_clash(rect) else {
                return false;
            };
            let destroyed = match pool.tank_mut(slot) {
                Some(tank) => land_hit(tank, events),
                None => false,
            };
            if destroyed {
                pool.on_destroyed(slot, events);
            }
            true
        }
    }
}

/// Apply one hit; `true` when the tank is gone.
fn land_hit(tank: &mut Tank, events: &mut Vec<GameEvent>) -> bool {
    let outcome = tank.catch_bullet(events);
    debug_assert!(outcome.is_ok(), "hit landed on a destroyed tank");
    match outcome {
        Ok(HitOutcome::Destroyed) => true,
        Ok(HitOutcome::Damaged { .. }) => false,
        Err(err) => {
            error!(entity = ?tank.id(), %err, "resolver hit a tank that should be gone");
            true
        }
    }
}

fn respawn_point(board: &Board, player: usize) -> IVec2 {
    let starts = board.friendly_start_positions();
    if starts.is_empty() {
        return IVec2::ZERO;
    }
    starts[player % starts.len()]
}

/// Widen the one-cell strip ahead of a bullet to the destruction footprint,
/// perpendicular to travel and starting one cell before the strip.
fn destruction_footprint(ahead: Rect) -> Rect {
    if ahead.width() > ahead.height() {
        Rect::new(ahead.left() - 1, ahead.top(), DESTRUCTION_FOOTPRINT, ahead.height())
    } else {
        Rect::new(ahead.left(), ahead.top() - 1, ahead.width(), DESTRUCTION_FOOTPRINT)
    }
}

/// Clear every cell in `area` the bullet can break. Off-board cells are skipped.
fn demolish(board: &mut Board, area: &Rect, power: PowerLevel, events: &mut Vec<GameEvent>) -> bool {
    let mut damaged = false;
    for cell in area.cells() {
        let props = board.block_properties(cell);
        let breaks = match power {
            PowerLevel::ArmorPiercing => props.contains(BlockProps::BREAKABLE),
            PowerLevel::Regular => props.is_soft_breakable(),
        };
        if breaks {
            let removed = board.set_area(BlockType::Nothing, &Rect::from_origin_size(cell, IVec2::ONE));
            events.push(GameEvent::BlockRemoved { rect: removed });
            damaged = true;
        }
    }
    damaged
}
