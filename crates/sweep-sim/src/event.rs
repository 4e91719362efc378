//! The run's event log entries.

use serde::Serialize;

use sweep_core::Tick;
use sweep_responder::ResponderEvent;

/// Something that happened during `tick`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimEvent {
    pub tick: Tick,
    pub kind: SimEventKind,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimEventKind {
    /// The fire origin was seeded before the first tick.
    FireStarted { cells: usize },
    /// `cells` cells ignited during the hazard phase.
    FireSpread { cells: usize },
    Responder(ResponderEvent),
}
