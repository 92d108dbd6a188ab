//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per call, scaled by the real elapsed time it is given
//! - Injected RNG only (seeded PCG by default)
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod engine;
pub mod events;
pub mod lanes;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{enemy_strikes_player, find_player_hit, find_projectile_hit, projectile_strikes_enemy};
pub use engine::{Command, Engine};
pub use events::{GameEvent, GameObserver, ProjectileFate};
pub use lanes::pick_free_lane;
pub use snapshot::{EnemyView, PlayerView, ProjectileView, StateSnapshot, build_snapshot};
pub use state::{Enemy, EnemyState, GamePhase, GameState, Player, Projectile};
pub use tick::tick;
