//! Lane Blaster demo entry point
//!
//! Runs one game on the wall clock with an autopilot at the controls and
//! prints the final snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;
    use std::thread;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use lane_blaster::sim::{Enemy, Projectile, ProjectileFate};
    use lane_blaster::{
        Command, Engine, GameConfig, GameLoop, GameObserver, GamePhase, InputSource, LoopStatus,
        Renderer, StateSnapshot, SystemTimeSource,
    };

    /// Hard stop for runs the autopilot survives indefinitely
    const MAX_TICKS: u64 = 1500;
    /// Sleep while suspended on the prompt (no tick is scheduled)
    const PROMPT_POLL_MS: f64 = 20.0;
    /// Polls spent on the prompt before the autopilot continues
    const PROMPT_DELAY_POLLS: u32 = 25;

    /// Simple AI: dodge what is about to land on us, shoot what is above,
    /// otherwise drift toward the nearest enemy lane.
    struct Autopilot {
        slot_width: f32,
        max_x: f32,
        danger_depth: f32,
        prompt_polls: u32,
    }

    impl Autopilot {
        fn new(config: &GameConfig) -> Self {
            Self {
                slot_width: config.player_width,
                max_x: config.player_max_x(),
                danger_depth: 2.0 * config.enemy_height,
                prompt_polls: 0,
            }
        }

        fn lane_is_dangerous(&self, snapshot: &StateSnapshot, x: f32) -> bool {
            let player = &snapshot.player;
            snapshot
                .enemies
                .iter()
                .any(|e| e.pos.x == x && e.pos.y > player.pos.y - self.danger_depth)
        }

        fn steer(&self, snapshot: &StateSnapshot) -> Option<Command> {
            let x = snapshot.player.pos.x;

            if self.lane_is_dangerous(snapshot, x) {
                let left = x - self.slot_width;
                let right = x + self.slot_width;
                if left >= 0.0 && !self.lane_is_dangerous(snapshot, left) {
                    return Some(Command::MoveLeft);
                }
                if right <= self.max_x && !self.lane_is_dangerous(snapshot, right) {
                    return Some(Command::MoveRight);
                }
                // Boxed in: stay put and try to shoot it down
                return snapshot.projectile.is_none().then_some(Command::Shoot);
            }

            if snapshot.enemies.iter().any(|e| e.pos.x == x) {
                return snapshot.projectile.is_none().then_some(Command::Shoot);
            }

            let target = snapshot
                .enemies
                .iter()
                .map(|e| e.pos.x)
                .min_by(|a, b| (a - x).abs().total_cmp(&(b - x).abs()))?;
            if target < x {
                Some(Command::MoveLeft)
            } else {
                Some(Command::MoveRight)
            }
        }
    }

    impl InputSource for Autopilot {
        fn poll(&mut self, snapshot: &StateSnapshot) -> Vec<Command> {
            match snapshot.phase {
                GamePhase::LifeLostPrompt => {
                    self.prompt_polls += 1;
                    if self.prompt_polls >= PROMPT_DELAY_POLLS {
                        self.prompt_polls = 0;
                        vec![Command::Continue]
                    } else {
                        Vec::new()
                    }
                }
                GamePhase::Running => self.steer(snapshot).into_iter().collect(),
                GamePhase::GameOver => Vec::new(),
            }
        }
    }

    /// Writes gameplay events to the log
    #[derive(Default)]
    struct LogRenderer {
        kills: u32,
    }

    impl GameObserver for LogRenderer {
        fn on_enemy_spawned(&mut self, enemy: &Enemy) {
            log::debug!("Enemy {} enters lane {}", enemy.id, enemy.lane);
        }

        fn on_enemy_destroyed(&mut self, enemy: &Enemy) {
            log::debug!("Enemy {} gone ({:?})", enemy.id, enemy.state);
        }

        fn on_projectile_destroyed(&mut self, projectile: &Projectile, fate: ProjectileFate) {
            if fate == ProjectileFate::HitEnemy {
                self.kills += 1;
            }
            log::debug!("Projectile at y={} ended: {:?}", projectile.pos.y, fate);
        }

        fn on_life_lost(&mut self, lives_remaining: u32) {
            log::info!("Hit! {} lives remaining", lives_remaining);
        }

        fn on_game_over(&mut self, final_score: u64) {
            log::info!("Game over, final score {} ({} kills)", final_score, self.kills);
        }
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, snapshot: &StateSnapshot) {
            if snapshot.tick % 50 == 0 {
                log::info!(
                    "tick {}: score {}, lives {}, {} enemies",
                    snapshot.tick,
                    snapshot.player.score,
                    snapshot.player.lives,
                    snapshot.enemies.len()
                );
            }
        }
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn run() {
        env_logger::init();
        log::info!("Lane Blaster (native) starting...");

        let mut args = std::env::args().skip(1);
        let config = match args.next() {
            Some(path) => GameConfig::load(Path::new(&path)).unwrap_or_else(|e| {
                log::warn!("Failed to load {}: {}; using defaults", path, e);
                GameConfig::default()
            }),
            None => GameConfig::default(),
        };
        let seed = match args.next().map(|s| s.parse::<u64>()) {
            Some(Ok(seed)) => seed,
            Some(Err(e)) => {
                log::warn!("Bad seed argument ({}); using clock", e);
                clock_seed()
            }
            None => clock_seed(),
        };

        let mut autopilot = Autopilot::new(&config);
        let engine = match Engine::new(config, seed) {
            Ok(engine) => engine,
            Err(e) => {
                log::error!("Invalid configuration: {}", e);
                std::process::exit(1);
            }
        };

        let mut game = GameLoop::new(engine, SystemTimeSource::new());
        let mut renderer = LogRenderer::default();

        loop {
            let status = game.pump(&mut autopilot, &mut renderer);
            if status == LoopStatus::Finished {
                break;
            }
            if game.engine().state().time_ticks >= MAX_TICKS {
                log::info!("Tick cap reached, stopping");
                game.stop();
                break;
            }
            let wait_ms = game.time_until_next_tick().unwrap_or(PROMPT_POLL_MS);
            if wait_ms > 0.0 {
                thread::sleep(Duration::from_secs_f64(wait_ms / 1000.0));
            }
        }

        match serde_json::to_string_pretty(&game.engine().snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn engine_with(player_x: f32, enemy_lanes: &[usize]) -> Engine {
            let mut engine = Engine::new(GameConfig::default(), 1).unwrap();
            let state = engine.state_mut();
            state.player.pos.x = player_x;
            for &lane in enemy_lanes {
                let enemy = state.spawn_enemy(lane);
                let index = state.enemies.iter().position(|e| e.id == enemy.id).unwrap();
                state.enemies[index].pos.y = 250.0;
            }
            engine
        }

        #[test]
        fn test_dodges_into_free_neighbour() {
            let engine = engine_with(0.0, &[0]);
            let pilot = Autopilot::new(engine.config());
            assert_eq!(pilot.steer(&engine.snapshot()), Some(Command::MoveRight));
        }

        #[test]
        fn test_never_dodges_off_the_field() {
            let engine = engine_with(400.0, &[3, 4]);
            let pilot = Autopilot::new(engine.config());
            assert_eq!(pilot.steer(&engine.snapshot()), Some(Command::Shoot));
        }

        #[test]
        fn test_boxed_in_with_shot_in_flight_holds_still() {
            let mut engine = engine_with(200.0, &[1, 2, 3]);
            engine.request_shoot();
            let pilot = Autopilot::new(engine.config());
            assert_eq!(pilot.steer(&engine.snapshot()), None);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser host; the library is driven by the embedding page
}
