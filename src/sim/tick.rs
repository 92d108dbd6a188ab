//! Simulation tick
//!
//! One step of the game loop, in order: enemies fall, the projectile flies
//! and checks for hits, destroyed enemies are removed, the player-hit test
//! runs, then either the life-lost transition or an enemy top-up.

use rand::Rng;

use super::collision::{find_player_hit, find_projectile_hit};
use super::events::{GameEvent, ProjectileFate};
use super::lanes::pick_free_lane;
use super::state::{EnemyState, GamePhase, GameState, Player};
use crate::config::{ImpactPolicy, ProjectileTiming};

/// Advance the game state by one tick of `elapsed_ms` real time.
///
/// Outside `GamePhase::Running` this is a no-op and returns no events.
pub fn tick<R>(state: &mut GameState, elapsed_ms: f32, rng: &mut R) -> Vec<GameEvent>
where
    R: Rng + ?Sized,
{
    let mut events = Vec::new();
    if state.phase != GamePhase::Running {
        return events;
    }

    let elapsed_ms = if elapsed_ms.is_finite() {
        elapsed_ms.max(0.0)
    } else {
        0.0
    };
    state.time_ticks += 1;
    state.elapsed_ms += f64::from(elapsed_ms);

    // Enemies fall (time-scaled); leaving the field marks them Impacted
    for enemy in &mut state.enemies {
        enemy.update(elapsed_ms, &state.config);
    }

    advance_projectile(state, elapsed_ms, &mut events);

    remove_destroyed(state, &mut events);

    if let Some(index) = find_player_hit(&state.player, &state.enemies, &state.config) {
        lose_life(state, index, &mut events);
        return events;
    }

    spawn_enemies(state, rng, &mut events);
    state.normalize_order();

    log::trace!(
        "tick {}: {} enemies, projectile {}, score {}",
        state.time_ticks,
        state.enemies.len(),
        if state.player.projectile.is_some() { "flying" } else { "none" },
        state.player.score
    );

    events
}

/// Number of projectile sub-steps to run this tick
fn projectile_steps(state: &mut GameState, elapsed_ms: f32) -> u32 {
    match state.config.projectile_timing {
        ProjectileTiming::FixedStep => state.config.fixed_projectile_steps(),
        ProjectileTiming::TimeScaled => {
            if state.player.projectile.is_none() {
                state.projectile_accumulator_ms = 0.0;
                return 0;
            }
            let interval = state.config.projectile_interval_ms;
            state.projectile_accumulator_ms += elapsed_ms;
            let steps = (state.projectile_accumulator_ms / interval).floor();
            state.projectile_accumulator_ms -= steps * interval;
            steps as u32
        }
    }
}

/// Fly the projectile sub-step by sub-step, testing for hits after each move
fn advance_projectile(state: &mut GameState, elapsed_ms: f32, events: &mut Vec<GameEvent>) {
    let steps = projectile_steps(state, elapsed_ms);
    let GameState {
        config,
        player,
        enemies,
        ..
    } = state;

    for _ in 0..steps {
        let Some(projectile) = player.projectile.as_mut() else {
            break;
        };
        projectile.advance(config.projectile_speed);

        if let Some(index) = find_projectile_hit(projectile, enemies, config) {
            let enemy = &mut enemies[index];
            enemy.state = EnemyState::Hit;
            log::debug!("Enemy {} shot down in lane {}", enemy.id, enemy.lane);
            player.award(config.score_per_kill);
            destroy_projectile(player, ProjectileFate::HitEnemy, events);
            break;
        }

        if projectile.is_above_top() {
            destroy_projectile(player, ProjectileFate::ReachedTop, events);
            break;
        }
    }

    if state.player.projectile.is_none() {
        state.projectile_accumulator_ms = 0.0;
    }
}

fn destroy_projectile(
    player: &mut Player,
    fate: ProjectileFate,
    events: &mut Vec<GameEvent>,
) {
    if let Some(mut projectile) = player.projectile.take() {
        projectile.destroyed = true;
        log::debug!("Projectile gone at {:?} ({:?})", projectile.pos, fate);
        events.push(GameEvent::ProjectileDestroyed { projectile, fate });
    }
}

/// Drop destroyed enemies, freeing their lanes for this tick's spawns
fn remove_destroyed(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.enemies.iter().any(|e| e.is_destroyed()) {
        return;
    }
    let mut live = Vec::with_capacity(state.enemies.len());
    for enemy in state.enemies.drain(..) {
        if enemy.is_destroyed() {
            events.push(GameEvent::EnemyDestroyed { enemy });
        } else {
            live.push(enemy);
        }
    }
    state.enemies = live;
}

/// Apply a player hit and enter the life-lost (or game-over) phase
fn lose_life(state: &mut GameState, index: usize, events: &mut Vec<GameEvent>) {
    let lives = state.player.lose_life();
    events.push(GameEvent::LifeLost {
        lives_remaining: lives,
    });

    match state.config.impact_policy {
        ImpactPolicy::Linger => state.enemies[index].struck_player = true,
        ImpactPolicy::Remove => {
            state.enemies[index].state = EnemyState::Impacted;
            remove_destroyed(state, events);
        }
    }

    if lives > 0 {
        state.phase = GamePhase::LifeLostPrompt;
        log::info!(
            "{} {} remaining, awaiting continue",
            lives,
            if lives == 1 { "life" } else { "lives" }
        );
    } else {
        state.phase = GamePhase::GameOver;
        let final_score = state.player.score;
        events.push(GameEvent::GameOver { final_score });
        log::info!("Game over - final score {}", final_score);
    }
}

/// Top up the live enemy set to `max_enemies`
fn spawn_enemies<R>(state: &mut GameState, rng: &mut R, events: &mut Vec<GameEvent>)
where
    R: Rng + ?Sized,
{
    let lane_count = state.config.lane_count();
    while state.enemies.len() < state.config.max_enemies {
        let Some(lane) = pick_free_lane(state.occupied_lanes(), lane_count, rng) else {
            log::warn!(
                "No free lane for enemy {} of {}, skipping spawn",
                state.enemies.len() + 1,
                state.config.max_enemies
            );
            break;
        };
        let enemy = state.spawn_enemy(lane);
        log::debug!("Enemy {} spawned in lane {}", enemy.id, lane);
        events.push(GameEvent::EnemySpawned { enemy });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::state::Enemy;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    fn place_enemy(state: &mut GameState, lane: usize, y: f32) -> u32 {
        let id = state.next_entity_id();
        let mut enemy = Enemy::spawn(id, lane, &state.config);
        enemy.pos.y = y;
        state.enemies.push(enemy);
        id
    }

    #[test]
    fn test_first_tick_fills_lanes() {
        let mut state = GameState::new(GameConfig::default());
        let events = tick(&mut state, 20.0, &mut rng());

        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.time_ticks, 1);
        assert!(state.enemies.iter().all(|e| e.pos.y == 0.0));
        let spawned = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemySpawned { .. }))
            .count();
        assert_eq!(spawned, 3);
    }

    #[test]
    fn test_enemies_fall_then_refill() {
        let mut state = GameState::new(GameConfig::default());
        let mut rng = rng();
        tick(&mut state, 20.0, &mut rng);
        tick(&mut state, 40.0, &mut rng);
        assert!(state.enemies.iter().all(|e| e.pos.y == 10.0));
        assert_eq!(state.elapsed_ms, 60.0);
    }

    #[test]
    fn test_enemy_leaving_field_frees_lane_same_tick() {
        let config = GameConfig {
            max_enemies: 5,
            ..Default::default()
        };
        let mut state = GameState::new(config);
        for lane in 0..4 {
            place_enemy(&mut state, lane, 0.0);
        }
        let low = place_enemy(&mut state, 4, 499.0);
        let events = tick(&mut state, 20.0, &mut rng());

        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyDestroyed { enemy } if enemy.id == low && enemy.state == EnemyState::Impacted
        )));
        // Lane 4 was the only free one, so the replacement lands there
        assert_eq!(state.enemies.len(), 5);
        let replacement = state.enemies.iter().find(|e| e.lane == 4).unwrap();
        assert_ne!(replacement.id, low);
        assert_eq!(replacement.pos.y, 0.0);
    }

    #[test]
    fn test_projectile_reaches_top() {
        let config = GameConfig {
            max_enemies: 0,
            ..Default::default()
        };
        let mut state = GameState::new(config);
        assert!(state.request_shoot());
        state.player.projectile.as_mut().unwrap().pos.y = 15.0;

        // Two sub-steps: 15 -> 5 -> -5
        let events = tick(&mut state, 20.0, &mut rng());
        assert!(state.player.projectile.is_none());
        match &events[..] {
            [GameEvent::ProjectileDestroyed { projectile, fate }] => {
                assert_eq!(*fate, ProjectileFate::ReachedTop);
                assert!(projectile.destroyed);
                assert_eq!(projectile.pos.y, -5.0);
            }
            other => panic!("unexpected events {other:?}"),
        }
        // Can fire again once the old shot is gone
        assert!(state.request_shoot());
    }

    #[test]
    fn test_fixed_step_ignores_elapsed() {
        let config = GameConfig {
            max_enemies: 0,
            ..Default::default()
        };
        let mut state = GameState::new(config);
        state.request_shoot();

        tick(&mut state, 100.0, &mut rng());
        let y = state.player.projectile.as_ref().unwrap().pos.y;
        assert_eq!(y, 465.0 - 20.0);
    }

    #[test]
    fn test_time_scaled_projectile_follows_elapsed() {
        let config = GameConfig {
            max_enemies: 0,
            projectile_timing: ProjectileTiming::TimeScaled,
            ..Default::default()
        };
        let mut state = GameState::new(config);
        state.request_shoot();
        let mut rng = rng();

        tick(&mut state, 35.0, &mut rng);
        assert_eq!(state.player.projectile.as_ref().unwrap().pos.y, 465.0 - 30.0);
        assert_eq!(state.projectile_accumulator_ms, 5.0);

        tick(&mut state, 5.0, &mut rng);
        assert_eq!(state.player.projectile.as_ref().unwrap().pos.y, 465.0 - 40.0);
        assert_eq!(state.projectile_accumulator_ms, 0.0);
    }

    #[test]
    fn test_shot_enemy_scores_and_frees_projectile() {
        let config = GameConfig {
            max_enemies: 1,
            score_per_kill: 5,
            ..Default::default()
        };
        let mut state = GameState::new(config);
        let target = place_enemy(&mut state, 2, 200.0);
        state.request_shoot();
        state.player.projectile.as_mut().unwrap().pos.y = 240.0;

        let events = tick(&mut state, 0.0, &mut rng());
        assert_eq!(state.player.score, 5);
        assert!(state.player.projectile.is_none());
        assert!(state.enemies.iter().all(|e| e.id != target));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::ProjectileDestroyed { fate: ProjectileFate::HitEnemy, .. }
        )));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyDestroyed { enemy } if enemy.id == target && enemy.state == EnemyState::Hit
        )));
        // Replacement spawned into the freed field
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_projectile_passes_enemy_in_other_lane() {
        let config = GameConfig {
            max_enemies: 1,
            ..Default::default()
        };
        let mut state = GameState::new(config);
        place_enemy(&mut state, 3, 150.0);
        state.request_shoot();
        state.player.projectile.as_mut().unwrap().pos.y = 240.0;

        tick(&mut state, 0.0, &mut rng());
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.projectile.as_ref().unwrap().pos.y, 220.0);
    }

    #[test]
    fn test_player_hit_enters_prompt_without_spawning() {
        let mut state = GameState::new(GameConfig::default());
        let striker = place_enemy(&mut state, 2, 400.0);

        let events = tick(&mut state, 0.0, &mut rng());
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.phase, GamePhase::LifeLostPrompt);
        assert_eq!(events, vec![GameEvent::LifeLost { lives_remaining: 2 }]);
        // Linger: the striking enemy stays, nothing is topped up
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, striker);
    }

    #[test]
    fn test_remove_policy_clears_striking_enemy() {
        let config = GameConfig {
            impact_policy: ImpactPolicy::Remove,
            ..Default::default()
        };
        let mut state = GameState::new(config);
        let striker = place_enemy(&mut state, 2, 400.0);

        let events = tick(&mut state, 0.0, &mut rng());
        assert_eq!(state.phase, GamePhase::LifeLostPrompt);
        assert!(state.enemies.is_empty());
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyDestroyed { enemy } if enemy.id == striker && enemy.state == EnemyState::Impacted
        )));
    }

    #[test]
    fn test_last_life_goes_straight_to_game_over() {
        let config = GameConfig {
            initial_lives: 1,
            ..Default::default()
        };
        let mut state = GameState::new(config);
        state.player.score = 9;
        place_enemy(&mut state, 2, 400.0);

        let events = tick(&mut state, 0.0, &mut rng());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.lives, 0);
        assert_eq!(
            events,
            vec![
                GameEvent::LifeLost { lives_remaining: 0 },
                GameEvent::GameOver { final_score: 9 },
            ]
        );
        assert!(!state.request_continue());
    }

    #[test]
    fn test_suspended_phases_do_not_tick() {
        for phase in [GamePhase::LifeLostPrompt, GamePhase::GameOver] {
            let mut state = GameState::new(GameConfig::default());
            place_enemy(&mut state, 0, 100.0);
            state.phase = phase;

            let events = tick(&mut state, 20.0, &mut rng());
            assert!(events.is_empty());
            assert_eq!(state.time_ticks, 0);
            assert_eq!(state.enemies[0].pos, Vec2::new(0.0, 100.0));
        }
    }

    #[test]
    fn test_continue_preserves_entities() {
        let mut state = GameState::new(GameConfig::default());
        place_enemy(&mut state, 2, 400.0);
        place_enemy(&mut state, 0, 50.0);
        state.request_shoot();
        tick(&mut state, 0.0, &mut rng());
        assert_eq!(state.phase, GamePhase::LifeLostPrompt);

        let enemies = state.enemies.clone();
        let projectile = state.player.projectile.clone();
        assert!(state.request_continue());
        assert_eq!(state.enemies, enemies);
        assert_eq!(state.player.projectile, projectile);
    }

    #[test]
    fn test_lingering_striker_costs_one_life() {
        let mut state = GameState::new(GameConfig::default());
        let striker = place_enemy(&mut state, 2, 400.0);
        let mut rng = rng();

        tick(&mut state, 0.0, &mut rng);
        assert!(state.enemies[0].struck_player);

        // Continue straight away: the striker is still in the band
        assert!(state.request_continue());
        let events = tick(&mut state, 20.0, &mut rng);
        assert_eq!(state.player.lives, 2);
        assert_eq!(state.phase, GamePhase::Running);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::LifeLost { .. })));
        let enemy = state.enemies.iter().find(|e| e.id == striker).unwrap();
        assert_eq!(enemy.pos.y, 405.0);
    }

    #[test]
    fn test_resumed_tick_carries_prompt_time() {
        let mut state = GameState::new(GameConfig::default());
        let striker = place_enemy(&mut state, 2, 400.0);
        let mut rng = rng();

        tick(&mut state, 0.0, &mut rng);
        state.request_continue();
        // Two seconds on the prompt: 500 units of fall takes it off the field
        let events = tick(&mut state, 2000.0, &mut rng);
        assert_eq!(state.player.lives, 2);
        assert!(state.enemies.iter().all(|e| e.id != striker));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyDestroyed { enemy } if enemy.id == striker && enemy.state == EnemyState::Impacted
        )));
    }

    #[test]
    fn test_negative_or_nan_elapsed_is_clamped() {
        let mut state = GameState::new(GameConfig::default());
        place_enemy(&mut state, 0, 100.0);
        tick(&mut state, -50.0, &mut rng());
        tick(&mut state, f32::NAN, &mut rng());
        let enemy = state.enemies.iter().find(|e| e.lane == 0).unwrap();
        assert_eq!(enemy.pos.y, 100.0);
        assert_eq!(state.elapsed_ms, 0.0);
    }
}
