//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the board and every live entity, processes player
//! commands, runs all systems and produces `TickReport`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use glam::IVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use tankfield_core::commands::PlayerCommand;
use tankfield_core::constants::*;
use tankfield_core::enums::{FriendlyVariant, GamePhase, RoundOutcome};
use tankfield_core::error::MapError;
use tankfield_core::events::GameEvent;
use tankfield_core::state::TickReport;
use tankfield_core::types::{EntityIds, SimTime};
use tankfield_terrain::{Board, MapSupplier};

use crate::entities::bullet::Bullet;
use crate::entities::objective::Objective;
use crate::observer::Observers;
use crate::opponents::OpponentPool;
use crate::players::HumanPlayer;
use crate::systems;

/// Configuration for a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed and map = same round.
    pub seed: u64,
    /// Human seats, clamped to `1..=MAX_PLAYERS`.
    pub players: u8,
    pub human_lives: u8,
    pub human_variant: FriendlyVariant,
    pub opponent_slots: usize,
    /// Ticks between opponent activations.
    pub activation_interval: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            players: 1,
            human_lives: DEFAULT_HUMAN_LIVES,
            human_variant: FriendlyVariant::default(),
            opponent_slots: OPPONENT_SLOTS,
            activation_interval: ACTIVATION_INTERVAL,
        }
    }
}

/// The simulation engine. Owns the board and all round state.
pub struct SimulationEngine {
    config: SimConfig,
    board: Board,
    objective: Objective,
    humans: Vec<HumanPlayer>,
    opponents: OpponentPool,
    bullets: Vec<Bullet>,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    ids: EntityIds,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
    observers: Observers,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let mut config = config;
        config.players = config.players.clamp(1, MAX_PLAYERS);
        Self {
            board: Board::new(),
            objective: Objective::default(),
            humans: Vec::new(),
            opponents: OpponentPool::new(config.opponent_slots, config.activation_interval),
            bullets: Vec::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ids: EntityIds::default(),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            observers: Observers::default(),
            config,
        }
    }

    /// Load a map and start a round.
    ///
    /// On failure the engine stays idle and the error is returned.
    pub fn start_round(&mut self, supplier: &mut dyn MapSupplier) -> Result<(), MapError> {
        self.reset();
        if let Err(err) = self.board.load(supplier) {
            warn!(%err, "map failed to load; round not started");
            return Err(err);
        }

        self.objective.place_at(self.board.objective_position());
        self.objective.restore(&mut self.events);
        let size = self.board.size();
        self.events.push(GameEvent::MapLoaded {
            width: size.x,
            height: size.y,
        });

        for index in 0..self.config.players as usize {
            let mut human =
                HumanPlayer::new(index, self.config.human_lives, self.config.human_variant);
            human.spawn(self.player_start(index), &mut self.ids, &mut self.events);
            self.humans.push(human);
        }

        self.opponents
            .seed(self.board.initial_enemy_tanks().to_vec(), &mut self.events);
        self.phase = GamePhase::Active;
        self.time = SimTime::default();
        self.events.push(GameEvent::StatsChanged);

        info!(
            width = size.x,
            height = size.y,
            players = self.humans.len(),
            opponents = self.opponents.lives(),
            "round started"
        );
        Ok(())
    }

    /// Stop the round and clear every live collection, including undelivered
    /// events and queued commands.
    pub fn reset(&mut self) {
        self.events.clear();
        self.command_queue.clear();
        self.humans.clear();
        self.bullets.clear();
        self.opponents.reset();
        self.phase = GamePhase::Idle;
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Register an observer. Events are delivered after each tick, in
    /// emission order.
    pub fn subscribe(&mut self, observer: impl FnMut(&GameEvent) + 'static) {
        self.observers.subscribe(Box::new(observer));
    }

    /// Advance the simulation by one tick and return the resulting report.
    pub fn tick(&mut self) -> TickReport {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
            self.check_round_over();
        }

        let events = std::mem::take(&mut self.events);
        self.observers.notify(&events);
        systems::snapshot::build_report(
            &self.time,
            self.phase,
            &self.board,
            &self.humans,
            &self.opponents,
            &self.bullets,
            &self.objective,
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn humans(&self) -> &[HumanPlayer] {
        &self.humans
    }

    pub fn opponents(&self) -> &OpponentPool {
        &self.opponents
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// Lives left for a player, routed modulo the player count.
    pub fn player_lives(&self, player: usize) -> u8 {
        if self.humans.is_empty() {
            return 0;
        }
        self.humans[player % self.humans.len()].lives()
    }

    /// Put a bullet straight into play (for tests).
    #[cfg(test)]
    pub fn spawn_test_bullet(
        &mut self,
        origin: IVec2,
        direction: tankfield_core::types::Direction,
        affinity: tankfield_core::enums::Affinity,
        power: tankfield_core::enums::PowerLevel,
    ) -> tankfield_core::types::EntityId {
        let bullet = Bullet::new(
            self.ids.allocate(),
            origin,
            direction,
            affinity,
            power,
            BULLET_MOVE_COUNTDOWN,
        );
        let id = bullet.id();
        self.bullets.push(bullet);
        id
    }

    fn player_start(&self, index: usize) -> IVec2 {
        let starts = self.board.friendly_start_positions();
        if starts.is_empty() {
            return IVec2::ZERO;
        }
        starts[index % starts.len()]
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Move { player, direction } => {
                if let Some(human) = self.human_mut(player) {
                    human.move_toward(direction);
                }
            }
            PlayerCommand::StopMove { player, direction } => {
                if let Some(human) = self.human_mut(player) {
                    human.stop_move(direction);
                }
            }
            PlayerCommand::Fire { player } => {
                if let Some(human) = self.human_mut(player) {
                    human.fire();
                }
            }
            PlayerCommand::StopFire { player } => {
                if let Some(human) = self.human_mut(player) {
                    human.stop_fire();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::Reset => {
                debug!("round reset");
                self.reset();
            }
        }
    }

    fn human_mut(&mut self, player: usize) -> Option<&mut HumanPlayer> {
        if self.humans.is_empty() {
            return None;
        }
        let count = self.humans.len();
        self.humans.get_mut(player % count)
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Player tanks
        systems::players::run(
            &mut self.humans,
            &self.board,
            &mut self.bullets,
            &mut self.ids,
            &mut self.events,
        );
        // 2. Opponent activation and decisions
        systems::opponents::run(
            &mut self.opponents,
            &self.board,
            &self.objective,
            &mut self.bullets,
            &mut self.rng,
            &mut self.ids,
            &mut self.events,
        );
        // 3. Bullets, at twice the tank rate
        for _ in 0..BULLET_PASSES_PER_TICK {
            systems::bullets::run_pass(
                &mut self.bullets,
                &mut self.board,
                &mut self.humans,
                &mut self.opponents,
                &mut self.objective,
                &mut self.ids,
                &mut self.events,
            );
        }
    }

    /// End the round on a burnt objective, no players left, or no opponents left.
    fn check_round_over(&mut self) {
        let outcome = if self.objective.is_destroyed() || self.humans.iter().all(HumanPlayer::is_out)
        {
            RoundOutcome::Defeat
        } else if self.opponents.lives() == 0 {
            RoundOutcome::Victory
        } else {
            return;
        };
        self.phase = GamePhase::RoundOver(outcome);
        self.events.push(GameEvent::RoundOver { outcome });
        info!(?outcome, tick = self.time.tick, "round over");
    }
}
