//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  `SimClock` maps ticks
//! to simulated seconds:
//!
//!   elapsed_secs = tick * dt_secs
//!
//! Elapsed time is always derived from the integer tick, never accumulated,
//! so long runs do not drift.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-timestep simulation clock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimClock {
    /// Simulated seconds per tick.
    pub dt_secs: f32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(dt_secs: f32) -> Self {
        Self { dt_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        (self.current_tick.0 as f64 * self.dt_secs as f64) as f32
    }
}
