//! End-of-run metrics.

use serde::Serialize;

use sweep_grid::OccupantTotals;

use crate::StopReason;

/// Weights of the success score: rescued share, cleared share, time left.
const RESCUE_WEIGHT: f32 = 0.5;
const CLEARED_WEIGHT: f32 = 0.3;
const TIME_WEIGHT: f32 = 0.2;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimSummary {
    pub stop_reason:      StopReason,
    pub ticks:            u64,
    pub elapsed_secs:     f32,
    pub occupants:        OccupantTotals,
    /// Searchable (non-exit) rooms.
    pub rooms_total:      usize,
    pub rooms_cleared:    usize,
    pub responders_total: usize,
    pub responders_alive: usize,
    pub burning_cells:    usize,
    pub max_danger:       f32,
    pub total_distance_m: f32,
    pub mean_exposure:    f32,
    pub success_score:    f32,
}

impl SimSummary {
    /// Share of occupants rescued; 1 when there was nobody to rescue.
    pub fn rescue_rate(&self) -> f32 {
        ratio(self.occupants.rescued as usize, self.occupants.total as usize)
    }

    /// Share of searchable rooms cleared; 1 when there are none.
    pub fn clearance_rate(&self) -> f32 {
        ratio(self.rooms_cleared, self.rooms_total)
    }
}

/// `0.5·rescued + 0.3·cleared + 0.2·(1 − elapsed / time_cap)`, each share in
/// `[0, 1]`.  A non-positive time cap earns no time credit.
pub fn success_score(rescue_rate: f32, clearance_rate: f32, elapsed_secs: f32, time_cap_secs: f32) -> f32 {
    let time_left = if time_cap_secs > 0.0 {
        (1.0 - elapsed_secs / time_cap_secs).clamp(0.0, 1.0)
    } else {
        0.0
    };
    RESCUE_WEIGHT * rescue_rate + CLEARED_WEIGHT * clearance_rate + TIME_WEIGHT * time_left
}

pub(crate) fn ratio(part: usize, whole: usize) -> f32 {
    if whole == 0 { 1.0 } else { part as f32 / whole as f32 }
}
