//! Events emitted by the simulation for rendering and audio feedback.
//!
//! Handling them is optional: the simulation never depends on an observer.

use serde::{Deserialize, Serialize};

use super::state::{Enemy, Projectile};

/// Why the projectile left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileFate {
    HitEnemy,
    ReachedTop,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Enemy entered the top of its lane
    EnemySpawned { enemy: Enemy },
    /// Enemy removed; its `state` tells how it died
    EnemyDestroyed { enemy: Enemy },
    ProjectileDestroyed {
        projectile: Projectile,
        fate: ProjectileFate,
    },
    LifeLost { lives_remaining: u32 },
    GameOver { final_score: u64 },
}

impl GameEvent {
    /// Forward this event to the matching observer hook
    pub fn notify<O: GameObserver + ?Sized>(&self, observer: &mut O) {
        match self {
            GameEvent::EnemySpawned { enemy } => observer.on_enemy_spawned(enemy),
            GameEvent::EnemyDestroyed { enemy } => observer.on_enemy_destroyed(enemy),
            GameEvent::ProjectileDestroyed { projectile, fate } => {
                observer.on_projectile_destroyed(projectile, *fate)
            }
            GameEvent::LifeLost { lives_remaining } => observer.on_life_lost(*lives_remaining),
            GameEvent::GameOver { final_score } => observer.on_game_over(*final_score),
        }
    }
}

/// Notification hooks for presentation-layer collaborators
pub trait GameObserver {
    fn on_enemy_spawned(&mut self, _enemy: &Enemy) {}

    fn on_enemy_destroyed(&mut self, _enemy: &Enemy) {}

    fn on_projectile_destroyed(&mut self, _projectile: &Projectile, _fate: ProjectileFate) {}

    fn on_life_lost(&mut self, _lives_remaining: u32) {}

    fn on_game_over(&mut self, _final_score: u64) {}
}

/// Null observer
impl GameObserver for () {}
