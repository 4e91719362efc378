//! Staged threshold relaxation on top of a [`Router`].
//!
//! A search first runs under the strictest stage.  If that finds nothing it
//! is retried under each looser stage in turn.  The last configured stage
//! should block nothing but fire, so an escape route is found whenever any
//! non-burning route exists.

use std::collections::VecDeque;

use sweep_core::{CellId, PathConfig, PathStage};
use sweep_grid::Grid;
use sweep_hazard::HazardField;

use crate::cost::{passable, step_allowed};
use crate::{AStarRouter, Path, PathError, PathResult, Router};

/// A router plus the ordered list of threshold stages.
///
/// Holds no reference to the grid or the hazard field: both are passed to
/// every query, so the pathfinder always sees the field as currently
/// published.
#[derive(Clone, Debug)]
pub struct Pathfinder<R: Router = AStarRouter> {
    pub router: R,
    /// Strict → moderate → unrestricted.
    pub stages: Vec<PathStage>,
}

impl Pathfinder<AStarRouter> {
    /// Default A* router configured from `cfg`.
    pub fn from_config(cfg: &PathConfig) -> Self {
        Self::new(AStarRouter::new(cfg), cfg)
    }
}

impl<R: Router> Pathfinder<R> {
    pub fn new(router: R, cfg: &PathConfig) -> Self {
        Self { router, stages: cfg.stages.clone() }
    }

    /// One search under stage `stage` (clamped to the last stage).
    pub fn route(
        &self,
        grid:   &Grid,
        hazard: &HazardField,
        from:   CellId,
        to:     CellId,
        stage:  usize,
    ) -> PathResult<Path> {
        let idx = stage.min(self.stages.len().saturating_sub(1));
        let Some(s) = self.stages.get(idx) else {
            return Err(PathError::NoPath { from, to });
        };
        let mut path = self.router.route(grid, hazard, from, to, s)?;
        path.stage = idx;
        Ok(path)
    }

    /// Try every stage in order; return the first path found.
    pub fn route_staged(
        &self,
        grid:   &Grid,
        hazard: &HazardField,
        from:   CellId,
        to:     CellId,
    ) -> PathResult<Path> {
        for idx in 0..self.stages.len() {
            if let Ok(path) = self.route(grid, hazard, from, to, idx) {
                return Ok(path);
            }
        }
        Err(PathError::NoPath { from, to })
    }

    /// Best path to any of `goals`, e.g. the nearest exit.
    ///
    /// Stages are relaxed only when no goal is reachable under the current
    /// one.  Within a stage the cheapest path wins; equal costs go to the
    /// goal listed first.
    pub fn route_to_nearest(
        &self,
        grid:   &Grid,
        hazard: &HazardField,
        from:   CellId,
        goals:  &[CellId],
    ) -> PathResult<Path> {
        let Some(&first) = goals.first() else {
            return Err(PathError::NoGoals);
        };
        for idx in 0..self.stages.len() {
            let mut best: Option<Path> = None;
            for &goal in goals {
                if let Ok(path) = self.route(grid, hazard, from, goal, idx) {
                    if best.as_ref().is_none_or(|b| path.cost < b.cost) {
                        best = Some(path);
                    }
                }
            }
            if let Some(path) = best {
                return Ok(path);
            }
        }
        Err(PathError::NoPath { from, to: first })
    }

    /// Cells reachable from `from` under stage `stage`, indexed by `CellId`.
    ///
    /// Uses exactly the passability rules of [`route`](Self::route), so a
    /// cell marked reachable here has a path there.
    pub fn reachable(
        &self,
        grid:   &Grid,
        hazard: &HazardField,
        from:   CellId,
        stage:  usize,
    ) -> Vec<bool> {
        let mut seen = vec![false; grid.cell_count()];
        let idx = stage.min(self.stages.len().saturating_sub(1));
        let Some(s) = self.stages.get(idx) else {
            return seen;
        };
        let connectivity = self.router.connectivity();

        seen[from.index()] = true;
        let mut queue = VecDeque::from([from]);
        while let Some(cell) = queue.pop_front() {
            for (nbr, diagonal) in grid.neighbors(cell, connectivity) {
                if !seen[nbr.index()]
                    && passable(grid, hazard, nbr, s)
                    && step_allowed(grid, cell, nbr, diagonal)
                {
                    seen[nbr.index()] = true;
                    queue.push_back(nbr);
                }
            }
        }
        seen
    }
}
