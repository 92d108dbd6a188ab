//! Lane Blaster - A lane-based arcade shooter
//!
//! Core modules:
//! - `sim`: Tick-driven simulation (entities, collisions, lifecycle phases)
//! - `config`: Immutable game configuration with JSON loading
//! - `clock`: Cancelable fixed-interval tick scheduling
//! - `runner`: Host-side loop wiring input, clock, engine and renderer

pub mod clock;
pub mod config;
pub mod runner;
pub mod sim;

pub use clock::{ManualTimeSource, SimulationClock, SystemTimeSource, TimeSource};
pub use config::{ConfigError, GameConfig, ImpactPolicy, ProjectileTiming};
pub use runner::{GameLoop, InputSource, LoopStatus, Renderer};
pub use sim::{Command, Engine, GameEvent, GameObserver, GamePhase, StateSnapshot};

/// Default game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 500.0;
    pub const GAME_HEIGHT: f32 = 500.0;

    /// Sprite dimensions. Player and enemies share one horizontal grid.
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    pub const ENEMY_WIDTH: f32 = 100.0;
    pub const ENEMY_HEIGHT: f32 = 100.0;

    pub const MAX_ENEMIES: usize = 3;
    pub const INITIAL_LIVES: u32 = 3;

    /// Nominal tick interval of the host scheduler (ms)
    pub const TICK_INTERVAL_MS: f32 = 20.0;
    /// Enemy fall distance per nominal tick (scaled by real elapsed time)
    pub const ENEMY_FALL_SPEED: f32 = 5.0;
    /// Projectile rise per projectile sub-step
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Projectile sub-step interval (ms)
    pub const PROJECTILE_INTERVAL_MS: f32 = 10.0;

    pub const SCORE_PER_KILL: u64 = 1;

    /// Vertical slack subtracted from an enemy's bottom edge before testing overlap
    pub const COLLISION_BUFFER: f32 = 20.0;
    /// How far below the field an enemy can still strike the player
    pub const PLAYER_HIT_FLOOR_MARGIN: f32 = 50.0;
    /// Enemies lower than `GAME_HEIGHT - this` can no longer be shot
    pub const PROJECTILE_HIT_CEILING_MARGIN: f32 = 100.0;
    /// Horizontal offset of the projectile from its lane's left edge
    pub const PROJECTILE_LANE_OFFSET: f32 = 35.0;
    /// Projectile launch height, measured up from the bottom of the field
    pub const PROJECTILE_LAUNCH_DEPTH: f32 = 35.0;
}
