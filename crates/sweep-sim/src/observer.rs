//! Simulation observer trait for progress reporting and data collection.

use sweep_core::Tick;

use crate::{SimEvent, SimSummary, TickSnapshot};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: rescue ticker
///
/// ```rust,ignore
/// struct Ticker;
///
/// impl SimObserver for Ticker {
///     fn on_snapshot(&mut self, snap: &TickSnapshot) {
///         println!("{}: {} rescued", snap.tick, snap.occupants.rescued);
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the hazard phase.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per event, in the order the events happened.
    fn on_event(&mut self, _event: &SimEvent) {}

    /// Called at the end of each tick.  `events` is the number of events the
    /// tick produced.
    fn on_tick_end(&mut self, _tick: Tick, _events: usize) {}

    /// Called with the state before the first tick and then every
    /// `config.sim.snapshot_interval_ticks` ticks.
    fn on_snapshot(&mut self, _snapshot: &TickSnapshot) {}

    /// Called once after the run stops.
    fn on_sim_end(&mut self, _summary: &SimSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Records every event of a run.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    pub events: Vec<SimEvent>,
}

impl SimObserver for EventLog {
    fn on_event(&mut self, event: &SimEvent) {
        self.events.push(event.clone());
    }
}
