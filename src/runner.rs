//! Host-side game loop
//!
//! Wires an input source, the simulation clock, the engine and a renderer.
//! The host calls `pump` as often as it likes; the clock decides whether a
//! tick is due. Ticking suspends on the life-lost prompt and stops at game
//! over.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::clock::{SimulationClock, TimeSource};
use crate::sim::{Command, Engine, GameObserver, GamePhase, StateSnapshot};

/// Produces commands from whatever device the host reads
pub trait InputSource {
    fn poll(&mut self, snapshot: &StateSnapshot) -> Vec<Command>;
}

/// Scripted input: every queued command is delivered on the next poll
impl InputSource for Vec<Command> {
    fn poll(&mut self, _snapshot: &StateSnapshot) -> Vec<Command> {
        std::mem::take(self)
    }
}

/// Presentation collaborator: receives event hooks and the per-tick snapshot
pub trait Renderer: GameObserver {
    fn render(&mut self, snapshot: &StateSnapshot);
}

/// Outcome of one `pump`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    /// Running, next tick not yet due
    Waiting,
    /// A tick ran and the next one is scheduled
    Ticked,
    /// Suspended until a continue command arrives
    AwaitingContinue,
    /// Game over; nothing further will tick
    Finished,
    /// Running, but the host stopped the clock
    Stopped,
}

pub struct GameLoop<T: TimeSource, R: Rng = Pcg32> {
    engine: Engine<R>,
    clock: SimulationClock,
    time: T,
}

impl<T: TimeSource, R: Rng> GameLoop<T, R> {
    /// Take ownership of the engine and arm its first tick
    pub fn new(engine: Engine<R>, time: T) -> Self {
        let mut clock = SimulationClock::new(f64::from(engine.config().tick_interval_ms));
        clock.start(time.now_ms());
        Self {
            engine,
            clock,
            time,
        }
    }

    /// Apply one command. An accepted continue resumes the tick chain; the
    /// resumed tick covers the time spent on the prompt.
    pub fn dispatch(&mut self, command: Command) -> bool {
        let accepted = self.engine.apply(command);
        if accepted && command == Command::Continue {
            self.clock.resume(self.time.now_ms());
            log::info!("Tick loop resumed");
        }
        accepted
    }

    /// Drain input, then run the due tick (if any) and render it
    pub fn pump<I, V>(&mut self, input: &mut I, renderer: &mut V) -> LoopStatus
    where
        I: InputSource + ?Sized,
        V: Renderer + ?Sized,
    {
        let current = self.engine.snapshot();
        for command in input.poll(&current) {
            self.dispatch(command);
        }

        let now = self.time.now_ms();
        let Some(elapsed) = self.clock.poll(now) else {
            return self.idle_status();
        };

        let snapshot = self.engine.on_tick(elapsed as f32, renderer);
        renderer.render(&snapshot);

        match snapshot.phase {
            GamePhase::Running => {
                self.clock.schedule_next(now);
                LoopStatus::Ticked
            }
            GamePhase::LifeLostPrompt => LoopStatus::AwaitingContinue,
            GamePhase::GameOver => {
                self.clock.cancel();
                LoopStatus::Finished
            }
        }
    }

    fn idle_status(&self) -> LoopStatus {
        match self.engine.phase() {
            GamePhase::Running if self.clock.is_armed() => LoopStatus::Waiting,
            GamePhase::Running => LoopStatus::Stopped,
            GamePhase::LifeLostPrompt => LoopStatus::AwaitingContinue,
            GamePhase::GameOver => LoopStatus::Finished,
        }
    }

    /// Replace the run with a fresh engine. The old pending tick is released
    /// first so the two chains can never overlap.
    pub fn restart(&mut self, engine: Engine<R>) {
        self.clock.cancel();
        self.engine = engine;
        self.clock = SimulationClock::new(f64::from(self.engine.config().tick_interval_ms));
        self.clock.start(self.time.now_ms());
        log::info!("Game restarted");
    }

    /// Cancel the pending tick. Returns whether one was armed.
    pub fn stop(&mut self) -> bool {
        self.clock.cancel()
    }

    /// Milliseconds until the next tick, if one is scheduled
    pub fn time_until_next_tick(&self) -> Option<f64> {
        self.clock.time_until_due(self.time.now_ms())
    }

    pub fn engine(&self) -> &Engine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<R> {
        &mut self.engine
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }
}
