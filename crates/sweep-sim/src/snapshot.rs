//! Read-only per-tick state published to observers.

use serde::Serialize;

use sweep_core::{CellId, Point, ResponderId, RoomId, Tick};
use sweep_grid::OccupantTotals;
use sweep_responder::{Responder, StateTag};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TickSnapshot {
    /// Ticks completed so far.
    pub tick:         Tick,
    pub elapsed_secs: f32,
    /// Danger score per cell, indexed by `CellId`.
    pub danger:       Vec<f32>,
    pub burning:      Vec<bool>,
    pub rooms:        Vec<RoomSnapshot>,
    pub responders:   Vec<ResponderSnapshot>,
    pub occupants:    OccupantTotals,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RoomSnapshot {
    pub room:       RoomId,
    pub name:       String,
    pub cleared:    bool,
    pub remaining:  u32,
    /// Reachable by at least one live responder under the assignment stage.
    pub accessible: bool,
    pub danger:     f32,
    pub priority:   f32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponderSnapshot {
    pub id:         ResponderId,
    pub position:   Point,
    pub cell:       CellId,
    pub state:      StateTag,
    pub alive:      bool,
    pub carrying:   bool,
    pub distance_m: f32,
    pub exposure:   f32,
    pub rescued:    u32,
}

impl From<&Responder> for ResponderSnapshot {
    fn from(r: &Responder) -> Self {
        Self {
            id:         r.id,
            position:   r.position,
            cell:       r.cell,
            state:      r.state.tag(),
            alive:      r.is_alive(),
            carrying:   r.carrying.is_some(),
            distance_m: r.distance_m,
            exposure:   r.exposure,
            rescued:    r.rescued,
        }
    }
}

impl TickSnapshot {
    pub fn burning_count(&self) -> usize {
        self.burning.iter().filter(|&&b| b).count()
    }

    pub fn alive_count(&self) -> usize {
        self.responders.iter().filter(|r| r.alive).count()
    }

    pub fn carrying_count(&self) -> u32 {
        self.responders.iter().filter(|r| r.carrying).count() as u32
    }
}
