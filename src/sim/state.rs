//! Game state and core simulation types
//!
//! The `GameState` owns every entity. Nothing outside the tick pipeline and
//! the phase-gated request methods below mutates it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::consts::{PROJECTILE_LANE_OFFSET, PROJECTILE_LAUNCH_DEPTH};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticks advance the simulation
    Running,
    /// A life was lost; ticking is suspended until continue
    LifeLostPrompt,
    /// Run ended (terminal)
    GameOver,
}

/// Enemy lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Falling,
    /// Fell out of the field, or struck the player under `ImpactPolicy::Remove`
    Impacted,
    /// Shot down by the projectile
    Hit,
}

/// A descending enemy occupying one lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub lane: usize,
    pub pos: Vec2,
    pub state: EnemyState,
    /// Already cost the player a life; never strikes again
    #[serde(default)]
    pub struck_player: bool,
}

impl Enemy {
    /// New enemy at the top of its lane
    pub fn spawn(id: u32, lane: usize, config: &GameConfig) -> Self {
        Self {
            id,
            lane,
            pos: Vec2::new(config.lane_x(lane), 0.0),
            state: EnemyState::Falling,
            struck_player: false,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.state != EnemyState::Falling
    }

    /// Fall by a time-scaled distance. Leaving the bottom of the field
    /// marks the enemy `Impacted`.
    pub fn update(&mut self, elapsed_ms: f32, config: &GameConfig) {
        if self.is_destroyed() {
            return;
        }
        self.pos.y += config.enemy_fall_speed * elapsed_ms / config.tick_interval_ms;
        if self.pos.y > config.game_height {
            self.state = EnemyState::Impacted;
        }
    }
}

/// The player's single in-flight shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub destroyed: bool,
}

impl Projectile {
    /// Launch from the player's lane near the bottom of the field
    pub fn launch(player: &Player, config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(
                player.pos.x + PROJECTILE_LANE_OFFSET,
                config.game_height - PROJECTILE_LAUNCH_DEPTH,
            ),
            destroyed: false,
        }
    }

    /// Move up by one sub-step
    pub fn advance(&mut self, distance: f32) {
        self.pos.y -= distance;
    }

    pub fn is_above_top(&self) -> bool {
        self.pos.y < 0.0
    }
}

/// The player sprite on the bottom row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub lives: u32,
    pub score: u64,
    /// At most one projectile is ever live
    pub projectile: Option<Projectile>,
}

impl Player {
    /// Start two slots in from the left, clamped to the field
    pub fn new(config: &GameConfig) -> Self {
        let x = (2.0 * config.player_width).min(config.player_max_x());
        Self {
            pos: Vec2::new(x, config.player_row()),
            lives: config.initial_lives,
            score: 0,
            projectile: None,
        }
    }

    /// Step one slot left. Returns false at the left edge.
    pub fn move_left(&mut self, config: &GameConfig) -> bool {
        if self.pos.x <= 0.0 {
            return false;
        }
        self.pos.x = (self.pos.x - config.player_width).max(0.0);
        true
    }

    /// Step one slot right. Returns false at the right edge.
    pub fn move_right(&mut self, config: &GameConfig) -> bool {
        let max_x = config.player_max_x();
        if self.pos.x >= max_x {
            return false;
        }
        self.pos.x = (self.pos.x + config.player_width).min(max_x);
        true
    }

    /// Fire unless a projectile is already in flight
    pub fn shoot(&mut self, config: &GameConfig) -> bool {
        if self.projectile.is_some() {
            return false;
        }
        self.projectile = Some(Projectile::launch(self, config));
        true
    }

    /// Remove one life; returns the lives left
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    /// Live enemies (sorted by id for deterministic iteration)
    pub enemies: Vec<Enemy>,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated time accumulated over all Running ticks (ms)
    pub elapsed_ms: f64,
    /// Unconsumed time toward the next projectile sub-step (TimeScaled only)
    pub projectile_accumulator_ms: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh run: player in place, no enemies yet, Running
    pub fn new(config: GameConfig) -> Self {
        Self {
            player: Player::new(&config),
            config,
            enemies: Vec::new(),
            phase: GamePhase::Running,
            time_ticks: 0,
            elapsed_ms: 0.0,
            projectile_accumulator_ms: 0.0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Lanes held by live enemies
    pub fn occupied_lanes(&self) -> impl Iterator<Item = usize> + '_ {
        self.enemies
            .iter()
            .filter(|e| !e.is_destroyed())
            .map(|e| e.lane)
    }

    /// Add an enemy at the top of `lane`, returning a copy for notification
    pub fn spawn_enemy(&mut self, lane: usize) -> Enemy {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, lane, &self.config);
        self.enemies.push(enemy.clone());
        enemy
    }

    pub fn request_move_left(&mut self) -> bool {
        self.phase == GamePhase::Running && self.player.move_left(&self.config)
    }

    pub fn request_move_right(&mut self) -> bool {
        self.phase == GamePhase::Running && self.player.move_right(&self.config)
    }

    pub fn request_shoot(&mut self) -> bool {
        self.phase == GamePhase::Running && self.player.shoot(&self.config)
    }

    /// Leave the life-lost prompt. Ignored in any other phase.
    pub fn request_continue(&mut self) -> bool {
        if self.phase != GamePhase::LifeLostPrompt || self.player.lives == 0 {
            return false;
        }
        self.phase = GamePhase::Running;
        log::info!("Continuing with {} lives", self.player.lives);
        true
    }

    /// Ensure enemies are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
    }
}
