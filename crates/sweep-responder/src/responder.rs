//! Per-responder state: position, route, carried occupant, counters.

use sweep_core::{CellId, Point, ResponderConfig, ResponderId, RoomId};
use sweep_grid::Grid;
use sweep_hazard::HazardField;
use sweep_path::Path;

use crate::{ResponderState, TransitionError, TransitionResult, Trigger};

/// One firefighter.
///
/// `position` is continuous; `cell` is always the traversable cell that
/// contains it (or the last one that did, while a move is in flight).
/// `carrying` holds the source room of the one occupant being carried.
#[derive(Clone, Debug, PartialEq)]
pub struct Responder {
    pub id:       ResponderId,
    pub position: Point,
    pub cell:     CellId,
    pub state:    ResponderState,
    pub carrying: Option<RoomId>,

    /// Integral of danger over time at the responder's cell.
    pub exposure:      f32,
    pub distance_m:    f32,
    pub rescued:       u32,
    pub rooms_cleared: u32,

    /// Cells still to walk; `route[waypoint]` is the next target.
    pub route:    Vec<CellId>,
    pub waypoint: usize,
}

impl Responder {
    /// An idle responder standing at the centre of `cell`.
    pub fn new(id: ResponderId, cell: CellId, grid: &Grid) -> Self {
        Self {
            id,
            position: grid.center(cell),
            cell,
            state: ResponderState::Idle,
            carrying: None,
            exposure: 0.0,
            distance_m: 0.0,
            rescued: 0,
            rooms_cleared: 0,
            route: Vec::new(),
            waypoint: 0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.state.is_dead()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.state == ResponderState::Idle
    }

    /// Fire `trigger` and move to the resulting state.
    ///
    /// Entering `Dead` or `Idle` drops any remaining route.
    pub fn apply(&mut self, trigger: Trigger) -> TransitionResult<()> {
        if self.state.is_dead() {
            return Err(TransitionError::Dead(self.id));
        }
        let next = self.state.next(trigger)?;
        if matches!(next, ResponderState::Dead | ResponderState::Idle) {
            self.clear_route();
        }
        self.state = next;
        Ok(())
    }

    /// Take one occupant from `room`.  At most one may be carried.
    pub fn pick_up(&mut self, room: RoomId) -> TransitionResult<()> {
        if let Some(carrying) = self.carrying {
            return Err(TransitionError::AlreadyCarrying { responder: self.id, carrying });
        }
        self.carrying = Some(room);
        Ok(())
    }

    /// Hand over the carried occupant at an exit.
    pub fn deliver(&mut self) -> TransitionResult<RoomId> {
        let source = self.carrying.take().ok_or(TransitionError::NothingCarried(self.id))?;
        self.rescued += 1;
        Ok(source)
    }

    /// Follow `path`.  The first cell is the one the responder is in, so
    /// walking starts at the second; a single-cell path re-centres.
    pub fn set_route(&mut self, path: &Path) {
        self.route = path.cells.clone();
        self.waypoint = usize::from(self.route.len() > 1);
    }

    pub fn clear_route(&mut self) {
        self.route.clear();
        self.waypoint = 0;
    }

    #[inline]
    pub fn has_route(&self) -> bool {
        self.waypoint < self.route.len()
    }

    /// Cells not yet reached.
    pub fn remaining_route(&self) -> &[CellId] {
        self.route.get(self.waypoint..).unwrap_or(&[])
    }

    /// Some cell still ahead is on fire.
    pub fn route_blocked(&self, hazard: &HazardField) -> bool {
        self.remaining_route().iter().any(|&c| hazard.is_burning(c))
    }

    pub fn speed(&self, cfg: &ResponderConfig) -> f32 {
        if self.carrying.is_some() { cfg.speed_carrying } else { cfg.speed_normal }
    }

    /// Walk up to `speed * dt` metres along the route.
    ///
    /// A waypoint counts as reached within `tolerance` metres; any budget
    /// left carries on to the next one.  Returns `true` once the final
    /// waypoint is reached.  With no route this does nothing and returns
    /// `false`.
    pub fn advance(&mut self, grid: &Grid, speed: f32, dt: f32, tolerance: f32) -> bool {
        if !self.has_route() {
            return false;
        }
        let mut budget = (speed * dt).max(0.0);
        while let Some(&next) = self.route.get(self.waypoint) {
            let target = grid.center(next);
            let (pos, moved) = self.position.step_towards(target, budget);
            self.position = pos;
            self.distance_m += moved;
            budget -= moved;

            if pos.distance(target) > tolerance {
                break;
            }
            self.position = target;
            self.waypoint += 1;
            if budget <= 0.0 {
                break;
            }
        }

        let here = grid.cell_at(self.position);
        if grid.is_traversable(here) {
            self.cell = here;
        }
        !self.has_route()
    }
}
