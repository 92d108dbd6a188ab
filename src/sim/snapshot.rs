//! Read-only view of the game state handed to renderers after each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub lives: u32,
    pub score: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub lane: usize,
    pub pos: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
}

/// Full observable state after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub tick: u64,
    /// Simulated time so far (ms)
    pub elapsed_ms: f64,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub projectile: Option<ProjectileView>,
    /// Events emitted by the tick that produced this snapshot
    pub events: Vec<GameEvent>,
}

impl StateSnapshot {
    /// True once the run has ended
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

/// Build a snapshot from the current state. Never modifies the state.
pub fn build_snapshot(state: &GameState, events: Vec<GameEvent>) -> StateSnapshot {
    StateSnapshot {
        tick: state.time_ticks,
        elapsed_ms: state.elapsed_ms,
        phase: state.phase,
        player: PlayerView {
            pos: state.player.pos,
            lives: state.player.lives,
            score: state.player.score,
        },
        enemies: state
            .enemies
            .iter()
            .filter(|e| !e.is_destroyed())
            .map(|e| EnemyView {
                id: e.id,
                lane: e.lane,
                pos: e.pos,
            })
            .collect(),
        projectile: state
            .player
            .projectile
            .as_ref()
            .map(|p| ProjectileView { pos: p.pos }),
        events,
    }
}
