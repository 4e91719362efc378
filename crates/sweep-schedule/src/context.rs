//! Read-only state the scheduler scores against.

use sweep_grid::{Occupancy, Topology};
use sweep_hazard::HazardField;
use sweep_path::{Pathfinder, Router};

/// Borrowed view of everything one scheduling pass reads.
///
/// Built by the simulation after the hazard field has advanced and the
/// safety checks have run, so priorities always see the current tick's
/// danger.  Nothing reachable through it is mutated while it is live.
pub struct ScheduleContext<'a, R: Router> {
    pub topology:   &'a Topology,
    pub hazard:     &'a HazardField,
    pub occupancy:  &'a Occupancy,
    pub pathfinder: &'a Pathfinder<R>,
}

impl<'a, R: Router> ScheduleContext<'a, R> {
    #[inline]
    pub fn new(
        topology:   &'a Topology,
        hazard:     &'a HazardField,
        occupancy:  &'a Occupancy,
        pathfinder: &'a Pathfinder<R>,
    ) -> Self {
        Self { topology, hazard, occupancy, pathfinder }
    }
}
