/// Time sources for the simulation.
///
/// The game loop reads the clock exactly once per tick and hands the
/// millisecond reading to `compute::tick`. Every timer in the simulation is
/// an absolute deadline compared against that reading.

use std::cell::Cell;
use std::time::Instant;

pub trait Clock {
    /// Milliseconds since the clock's epoch. Never decreases.
    fn now_ms(&self) -> u64;
}

/// Wall clock anchored at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Synthetic clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    /// Jump to `ms`. Going backwards is a caller bug.
    pub fn set(&self, ms: u64) {
        debug_assert!(ms >= self.now.get(), "clock must not run backwards");
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
