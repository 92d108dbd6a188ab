//! Fixed-interval tick scheduling
//!
//! The clock never calls back into the game. The host asks it whether a
//! tick is due and how much time passed since the previous one. At most one
//! tick is pending at any moment, so restarting or resuming can never stack
//! a second tick chain on top of the first. A restart begins a fresh elapsed
//! baseline; a resume measures from the last tick that fired.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Monotonic millisecond time
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    origin: Instant,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-advanced time. Clones share the same timeline.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    now: Rc<Cell<f64>>,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Single-slot tick scheduler
#[derive(Debug, Clone)]
pub struct SimulationClock {
    interval_ms: f64,
    /// Due time of the one pending tick, if armed
    pending_due_ms: Option<f64>,
    /// Time the previous tick fired; `None` right after `start`
    last_frame_ms: Option<f64>,
    ticks_fired: u64,
}

impl SimulationClock {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            pending_due_ms: None,
            last_frame_ms: None,
            ticks_fired: 0,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Begin a fresh tick chain: drop any pending tick and arm one due
    /// immediately. The first tick after a start reports zero elapsed time.
    pub fn start(&mut self, now_ms: f64) {
        self.cancel();
        self.last_frame_ms = None;
        self.pending_due_ms = Some(now_ms);
    }

    /// Re-arm a suspended chain. Unlike `start` the previous tick's time is
    /// kept, so the first tick after resuming reports the whole suspension.
    pub fn resume(&mut self, now_ms: f64) {
        self.pending_due_ms = Some(now_ms);
    }

    /// Arm the next tick one interval from now, replacing any pending one
    pub fn schedule_next(&mut self, now_ms: f64) {
        self.pending_due_ms = Some(now_ms + self.interval_ms);
    }

    /// Release the pending tick. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        self.pending_due_ms.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.pending_due_ms.is_some()
    }

    pub fn next_due_ms(&self) -> Option<f64> {
        self.pending_due_ms
    }

    /// Milliseconds until the pending tick is due (zero if overdue)
    pub fn time_until_due(&self, now_ms: f64) -> Option<f64> {
        self.pending_due_ms.map(|due| (due - now_ms).max(0.0))
    }

    pub fn ticks_fired(&self) -> u64 {
        self.ticks_fired
    }

    /// Fire the pending tick if it is due, returning the elapsed time since
    /// the previous tick. The tick is consumed; call `schedule_next` to
    /// continue the chain.
    pub fn poll(&mut self, now_ms: f64) -> Option<f64> {
        let due = self.pending_due_ms?;
        if now_ms < due {
            return None;
        }
        self.pending_due_ms = None;
        let elapsed = self
            .last_frame_ms
            .map(|last| (now_ms - last).max(0.0))
            .unwrap_or(0.0);
        self.last_frame_ms = Some(now_ms);
        self.ticks_fired += 1;
        Some(elapsed)
    }
}
