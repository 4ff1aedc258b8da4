//! Snapshot system: builds a complete TickReport from the engine's state.
//!
//! Read-only; it never modifies anything.

use tankfield_core::enums::GamePhase;
use tankfield_core::events::GameEvent;
use tankfield_core::state::*;
use tankfield_core::types::SimTime;
use tankfield_terrain::Board;

use crate::entities::bullet::Bullet;
use crate::entities::objective::Objective;
use crate::opponents::OpponentPool;
use crate::players::HumanPlayer;

/// Build the report for the tick that just ran.
#[allow(clippy::too_many_arguments)]
pub fn build_report(
    time: &SimTime,
    phase: GamePhase,
    board: &Board,
    humans: &[HumanPlayer],
    pool: &OpponentPool,
    bullets: &[Bullet],
    objective: &Objective,
    events: Vec<GameEvent>,
) -> TickReport {
    TickReport {
        time: *time,
        phase,
        board_width: board.size().x,
        board_height: board.size().y,
        tanks: build_tanks(humans, pool),
        bullets: bullets.iter().map(Bullet::view).collect(),
        objective: objective.view(),
        stats: build_stats(humans, pool),
        events,
    }
}

/// Player tanks by player index, then opponent tanks in activation order.
fn build_tanks(humans: &[HumanPlayer], pool: &OpponentPool) -> Vec<TankView> {
    let players = humans
        .iter()
        .filter_map(|h| h.tank().map(|tank| tank.view(h.index())));
    let opponents = pool.active_tanks().map(|(slot, tank)| tank.view(slot));
    players.chain(opponents).collect()
}

fn build_stats(humans: &[HumanPlayer], pool: &OpponentPool) -> StatsView {
    StatsView {
        player_lives: humans.iter().map(HumanPlayer::lives).collect(),
        opponent_lives: pool.lives(),
        opponents_active: pool.active_count(),
        opponents_destroyed: pool.destroyed(),
    }
}
