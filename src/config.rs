//! Game configuration
//!
//! Fixed at startup and never mutated afterwards. Loaded from JSON; any
//! field missing from the file takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Values that cannot produce a playable field
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// How the projectile advances relative to the tick clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectileTiming {
    /// Fixed number of sub-steps per tick, ignoring real elapsed time
    #[default]
    FixedStep,
    /// One sub-step per elapsed `projectile_interval_ms`, like enemy falling
    TimeScaled,
}

/// What happens to an enemy that strikes the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImpactPolicy {
    /// Enemy stays live and keeps falling
    #[default]
    Linger,
    /// Enemy is destroyed in the same tick, freeing its lane
    Remove,
}

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    pub game_width: f32,
    pub game_height: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub enemy_width: f32,
    pub enemy_height: f32,

    // === Rules ===
    pub max_enemies: usize,
    pub initial_lives: u32,
    /// Score awarded per enemy shot down
    pub score_per_kill: u64,
    pub impact_policy: ImpactPolicy,

    // === Timing ===
    /// Nominal interval between ticks (ms)
    pub tick_interval_ms: f32,
    /// Enemy fall per nominal tick; scaled by `elapsed / tick_interval_ms`
    pub enemy_fall_speed: f32,
    /// Projectile rise per sub-step
    pub projectile_speed: f32,
    /// Duration of one projectile sub-step (ms)
    pub projectile_interval_ms: f32,
    pub projectile_timing: ProjectileTiming,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,

            max_enemies: MAX_ENEMIES,
            initial_lives: INITIAL_LIVES,
            score_per_kill: SCORE_PER_KILL,
            impact_policy: ImpactPolicy::Linger,

            tick_interval_ms: TICK_INTERVAL_MS,
            enemy_fall_speed: ENEMY_FALL_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            projectile_interval_ms: PROJECTILE_INTERVAL_MS,
            projectile_timing: ProjectileTiming::FixedStep,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; missing fields fall back to defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Number of discrete lanes across the field
    pub fn lane_count(&self) -> usize {
        if self.enemy_width <= 0.0 {
            return 0;
        }
        (self.game_width / self.enemy_width).floor() as usize
    }

    /// Left edge of a lane
    pub fn lane_x(&self, lane: usize) -> f32 {
        lane as f32 * self.enemy_width
    }

    /// Top of the player sprite (constant for a run)
    pub fn player_row(&self) -> f32 {
        self.game_height - self.player_height
    }

    /// Right-most x the player may occupy
    pub fn player_max_x(&self) -> f32 {
        self.game_width - self.player_width
    }

    /// Projectile sub-steps per tick under `ProjectileTiming::FixedStep`
    pub fn fixed_projectile_steps(&self) -> u32 {
        ((self.tick_interval_ms / self.projectile_interval_ms).floor() as u32).max(1)
    }

    /// Reject configurations that cannot produce a playable field
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("game_width", self.game_width),
            ("game_height", self.game_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("enemy_width", self.enemy_width),
            ("enemy_height", self.enemy_height),
            ("tick_interval_ms", self.tick_interval_ms),
            ("projectile_interval_ms", self.projectile_interval_ms),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.enemy_fall_speed.is_finite() && self.enemy_fall_speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "enemy_fall_speed must be non-negative, got {}",
                self.enemy_fall_speed
            )));
        }
        if !(self.projectile_speed.is_finite() && self.projectile_speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "projectile_speed must be positive, got {}",
                self.projectile_speed
            )));
        }

        let lanes = self.lane_count();
        if lanes == 0 {
            return Err(ConfigError::Invalid(
                "enemy_width is wider than the field".to_string(),
            ));
        }
        if self.max_enemies > lanes {
            return Err(ConfigError::Invalid(format!(
                "max_enemies ({}) exceeds lane count ({lanes})",
                self.max_enemies
            )));
        }
        if self.player_width > self.game_width || self.player_height > self.game_height {
            return Err(ConfigError::Invalid(
                "player does not fit inside the field".to_string(),
            ));
        }
        if self.initial_lives == 0 {
            return Err(ConfigError::Invalid(
                "initial_lives must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
