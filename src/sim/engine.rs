//! Engine facade: the single owner of a run's state and RNG.
//!
//! Hosts hold the engine explicitly and pass it by reference to whatever
//! needs it. There is no global instance.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::GameObserver;
use super::snapshot::{StateSnapshot, build_snapshot};
use super::state::{GamePhase, GameState};
use super::tick::tick;
use crate::config::{ConfigError, GameConfig};

/// Input-driven requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Shoot,
    Continue,
}

/// A running game
#[derive(Debug, Clone)]
pub struct Engine<R: Rng = Pcg32> {
    state: GameState,
    rng: R,
}

impl Engine<Pcg32> {
    /// New run with a seeded PCG stream (same seed, same spawn lanes)
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        log::info!("New game with seed {}", seed);
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// New run with an injected random source
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "Field {}x{}, {} lanes, {} enemies, {} lives",
            config.game_width,
            config.game_height,
            config.lane_count(),
            config.max_enemies,
            config.initial_lives
        );
        Ok(Self {
            state: GameState::new(config),
            rng,
        })
    }

    /// Advance one tick, notify the observer, and return the new snapshot
    pub fn on_tick<O>(&mut self, elapsed_ms: f32, observer: &mut O) -> StateSnapshot
    where
        O: GameObserver + ?Sized,
    {
        let events = tick(&mut self.state, elapsed_ms, &mut self.rng);
        for event in &events {
            event.notify(observer);
        }
        build_snapshot(&self.state, events)
    }

    /// Current state without advancing
    pub fn snapshot(&self) -> StateSnapshot {
        build_snapshot(&self.state, Vec::new())
    }

    pub fn request_move_left(&mut self) -> bool {
        self.state.request_move_left()
    }

    pub fn request_move_right(&mut self) -> bool {
        self.state.request_move_right()
    }

    pub fn request_shoot(&mut self) -> bool {
        self.state.request_shoot()
    }

    pub fn request_continue(&mut self) -> bool {
        self.state.request_continue()
    }

    /// Route a command to its request; returns whether it was accepted
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.request_move_left(),
            Command::MoveRight => self.request_move_right(),
            Command::Shoot => self.request_shoot(),
            Command::Continue => self.request_continue(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.state.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts staging a scenario and for tests
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
