//! Routing trait and default A* implementation.
//!
//! # Pluggability
//!
//! Responders and the scheduler call routing through the [`Router`] trait
//! via [`Pathfinder`][crate::Pathfinder], so a different search (Dijkstra,
//! jump-point, a flow-field lookup) can be dropped in without touching them.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use sweep_core::{CellId, Connectivity, PathConfig, PathStage};
use sweep_grid::Grid;
use sweep_hazard::HazardField;

use crate::cost::{heuristic_milli, passable, step_allowed, step_cost_milli};
use crate::{PathError, PathResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered list of cells from start to goal, both included.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub cells: Vec<CellId>,
    /// Total cost in steps, penalties included.
    pub cost: f32,
    /// Index of the threshold stage the path was found under.
    pub stage: usize,
}

impl Path {
    pub fn start(&self) -> Option<CellId> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<CellId> {
        self.cells.last().copied()
    }

    /// Geometric length in metres, centre to centre.
    pub fn length_m(&self, grid: &Grid) -> f32 {
        self.cells
            .windows(2)
            .map(|w| grid.center(w[0]).distance(grid.center(w[1])))
            .sum()
    }

    /// `true` if the start is the goal.
    pub fn is_trivial(&self) -> bool {
        self.cells.len() <= 1
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable single-query path search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a `Pathfinder` can be shared by
/// parallel readers of the hazard field.
pub trait Router: Send + Sync {
    /// Find the cheapest path from `from` to `to` under `stage`.
    ///
    /// `from == to` yields a single-cell path, never an error.  The start
    /// cell is exempt from the passability test (a responder can always
    /// leave the cell it stands on); the goal is not.
    fn route(
        &self,
        grid:   &Grid,
        hazard: &HazardField,
        from:   CellId,
        to:     CellId,
        stage:  &PathStage,
    ) -> PathResult<Path>;

    /// Neighbourhood the router expands.  Reachability floods use the same.
    fn connectivity(&self) -> Connectivity;
}

// ── AStarRouter ───────────────────────────────────────────────────────────────

/// A* over the grid with an octile / Manhattan heuristic.
///
/// Heap entries are ordered by `(f, insertion sequence)`, so among equal-cost
/// frontiers the one pushed first is expanded first.  Neighbours are pushed
/// in the grid's fixed N, E, S, W, NE, SE, SW, NW order, which makes the
/// result a pure function of the inputs.
#[derive(Clone, Debug)]
pub struct AStarRouter {
    pub connectivity:  Connectivity,
    /// Extra cost for entering an avoided cell, milli-steps.
    pub penalty_milli: u32,
}

impl AStarRouter {
    pub fn new(cfg: &PathConfig) -> Self {
        Self {
            connectivity:  cfg.connectivity,
            penalty_milli: (cfg.danger_penalty * 1000.0).round() as u32,
        }
    }
}

impl Router for AStarRouter {
    fn route(
        &self,
        grid:   &Grid,
        hazard: &HazardField,
        from:   CellId,
        to:     CellId,
        stage:  &PathStage,
    ) -> PathResult<Path> {
        astar(grid, hazard, from, to, stage, self.connectivity, self.penalty_milli)
    }

    fn connectivity(&self) -> Connectivity {
        self.connectivity
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

fn astar(
    grid:          &Grid,
    hazard:        &HazardField,
    from:          CellId,
    to:            CellId,
    stage:         &PathStage,
    connectivity:  Connectivity,
    penalty_milli: u32,
) -> PathResult<Path> {
    if from == to {
        return Ok(Path { cells: vec![from], cost: 0.0, stage: 0 });
    }
    if !passable(grid, hazard, to, stage) {
        return Err(PathError::NoPath { from, to });
    }

    let diagonal_moves = connectivity == Connectivity::Eight;
    let n = grid.cell_count();
    // g[v] = best known cost (milli-steps) to reach v.
    let mut g = vec![u32::MAX; n];
    // prev[v] = cell that reached v; CellId::INVALID for unreached cells.
    let mut prev = vec![CellId::INVALID; n];
    let mut closed = vec![false; n];

    g[from.index()] = 0;

    // Min-heap on (f, seq).  `seq` is the push counter: equal-f entries pop
    // in insertion order.
    let mut seq: u64 = 0;
    let mut heap: BinaryHeap<Reverse<(u32, u64, CellId)>> = BinaryHeap::new();
    heap.push(Reverse((heuristic_milli(grid, from, to, diagonal_moves), seq, from)));

    while let Some(Reverse((_, _, cell))) = heap.pop() {
        if cell == to {
            return Ok(reconstruct(&prev, from, to, g[to.index()]));
        }
        if closed[cell.index()] {
            continue;
        }
        closed[cell.index()] = true;

        let cost = g[cell.index()];
        for (nbr, diagonal) in grid.neighbors(cell, connectivity) {
            if closed[nbr.index()]
                || !passable(grid, hazard, nbr, stage)
                || !step_allowed(grid, cell, nbr, diagonal)
            {
                continue;
            }
            let new_cost =
                cost.saturating_add(step_cost_milli(hazard, nbr, diagonal, stage, penalty_milli));
            if new_cost < g[nbr.index()] {
                g[nbr.index()] = new_cost;
                prev[nbr.index()] = cell;
                seq += 1;
                let f = new_cost.saturating_add(heuristic_milli(grid, nbr, to, diagonal_moves));
                heap.push(Reverse((f, seq, nbr)));
            }
        }
    }

    Err(PathError::NoPath { from, to })
}

fn reconstruct(prev: &[CellId], from: CellId, to: CellId, total_milli: u32) -> Path {
    let mut cells = vec![to];
    let mut cur = to;
    while cur != from {
        cur = prev[cur.index()];
        cells.push(cur);
    }
    cells.reverse();
    Path { cells, cost: total_milli as f32 / 1000.0, stage: 0 }
}
