//! Collision detection between the player, enemies and the projectile
//!
//! Both tests use a vertical tolerance band on the enemy's bottom edge and
//! exact equality on the horizontal axis. Every entity moves across the same
//! discrete lane grid, so equal x means "same lane". A continuous horizontal
//! movement mode would need a range check here instead.

use super::state::{Enemy, Player, Projectile};
use crate::config::GameConfig;
use crate::consts::{
    COLLISION_BUFFER, PLAYER_HIT_FLOOR_MARGIN, PROJECTILE_HIT_CEILING_MARGIN,
    PROJECTILE_LANE_OFFSET,
};

/// Enemy's bottom edge, less the collision buffer
#[inline]
pub fn enemy_bottom(enemy: &Enemy, config: &GameConfig) -> f32 {
    enemy.pos.y + config.enemy_height - COLLISION_BUFFER
}

/// Check if an enemy has come down onto the player's slot
pub fn enemy_strikes_player(enemy: &Enemy, player: &Player, config: &GameConfig) -> bool {
    let bottom = enemy_bottom(enemy, config);
    bottom > player.pos.y
        && bottom < config.game_height + PLAYER_HIT_FLOOR_MARGIN
        && enemy.pos.x == player.pos.x
}

/// Check if the projectile is inside an enemy's hit band in the same lane
pub fn projectile_strikes_enemy(
    projectile: &Projectile,
    enemy: &Enemy,
    config: &GameConfig,
) -> bool {
    let bottom = enemy_bottom(enemy, config);
    let left = enemy.pos.x + PROJECTILE_LANE_OFFSET;
    bottom > projectile.pos.y
        && bottom < config.game_height - PROJECTILE_HIT_CEILING_MARGIN
        && left == projectile.pos.x
}

/// Index of the first live enemy striking the player. An enemy that has
/// already cost a life is skipped.
pub fn find_player_hit(player: &Player, enemies: &[Enemy], config: &GameConfig) -> Option<usize> {
    enemies.iter().position(|e| {
        !e.is_destroyed() && !e.struck_player && enemy_strikes_player(e, player, config)
    })
}

/// Index of the first live enemy the projectile strikes
pub fn find_projectile_hit(
    projectile: &Projectile,
    enemies: &[Enemy],
    config: &GameConfig,
) -> Option<usize> {
    if projectile.destroyed {
        return None;
    }
    enemies
        .iter()
        .position(|e| !e.is_destroyed() && projectile_strikes_enemy(projectile, e, config))
}
