//! Simulation constants and tuning parameters.

/// Reference tick period in milliseconds. The timer itself is external.
pub const TICK_PERIOD_MS: u64 = 50;

/// Bullet resolution passes per global tick.
pub const BULLET_PASSES_PER_TICK: usize = 2;

// --- Board ---

/// Board cells per supplier-space map unit, along each axis.
pub const SUB_DIVISION: i32 = 2;

/// Largest board extent in cells, along each axis.
pub const MAX_BOARD_EXTENT: i32 = 1024;

/// Side of the clearing stamped at the objective and at every start position.
pub const SPAWN_CLEARING: i32 = 4;

/// Outer side of the breakable frame around the objective.
pub const OBJECTIVE_FRAME_SIZE: i32 = 8;

/// Wall thickness of the objective frame.
pub const OBJECTIVE_FRAME_THICKNESS: i32 = 2;

// --- Entity sizes (board cells) ---

pub const TANK_SIZE: i32 = 4;
pub const BULLET_SIZE: i32 = 2;
pub const OBJECTIVE_SIZE: i32 = 4;

// --- Readiness countdowns (ticks between moves) ---

/// Default tank countdown.
pub const TANK_MOVE_COUNTDOWN: u8 = 4;

/// Countdown of the speedy opponent variant.
pub const SPEEDY_TANK_MOVE_COUNTDOWN: u8 = 2;

/// Default bullet countdown, in bullet passes.
pub const BULLET_MOVE_COUNTDOWN: u8 = 2;

/// Countdown of bullets fired by the fast-bullet opponent variant.
pub const FAST_BULLET_MOVE_COUNTDOWN: u8 = 1;

// --- Armor and fire cadence ---

pub const DEFAULT_ARMOR: u8 = 1;
pub const ARMORED_TANK_ARMOR: u8 = 4;

/// Ticks between shots.
pub const FIRE_CADENCE: u8 = 10;

/// Ticks between shots for the burst-fire friendly variant.
pub const BURST_FIRE_CADENCE: u8 = 5;

/// Width of the terrain destruction footprint, perpendicular to travel.
pub const DESTRUCTION_FOOTPRINT: i32 = 4;

// --- Players ---

pub const DEFAULT_HUMAN_LIVES: u8 = 3;
pub const MAX_PLAYERS: u8 = 20;

// --- Opponent controller ---

/// Number of opponent controller slots.
pub const OPPONENT_SLOTS: usize = 8;

/// Ticks between opponent activations.
pub const ACTIVATION_INTERVAL: u32 = 100;

/// Extra readiness delay when an opponent decides to stay put.
pub const IDLE_PAUSE_TICKS: u8 = 20;

/// Range of the two per-tick decision rolls.
pub const DECISION_ROLL_RANGE: u32 = 16;

/// The move roll must be below this to move (15 in 16).
pub const MOVE_ROLL_THRESHOLD: u32 = 15;

/// The direction roll must exceed this to turn on a clear path (2 in 16).
pub const TURN_ROLL_THRESHOLD: u32 = 13;

/// Probability that a new direction is one of the two objective-seeking ones.
pub const TOWARD_OBJECTIVE_CHANCE: f64 = 0.9;

/// Per-tick chance that a ready opponent fires unprompted.
pub const SPONTANEOUS_FIRE_CHANCE: f64 = 0.01;

// --- Procedural maps ---

/// Procedural map extent in supplier-space units.
pub const PROCEDURAL_MAP_EXTENT: i32 = 50;

/// Opponents in a procedural enemy composition.
pub const PROCEDURAL_ENEMY_COUNT: usize = 20;
