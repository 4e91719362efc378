//! Passability and step costs.
//!
//! All costs are in milli-steps (`u32`): an orthogonal step is 1000, a
//! diagonal step 1414.

use sweep_core::{CellId, PathStage};
use sweep_grid::Grid;
use sweep_hazard::HazardField;

pub const ORTHOGONAL_MILLI: u32 = 1_000;
pub const DIAGONAL_MILLI: u32 = 1_414;

/// Whether a search may step *into* `cell` under `stage`.
///
/// Walls and burning cells are excluded at every stage.
#[inline]
pub fn passable(grid: &Grid, hazard: &HazardField, cell: CellId, stage: &PathStage) -> bool {
    grid.is_traversable(cell) && !hazard.is_burning(cell) && hazard.danger(cell) <= stage.block_above
}

/// Whether the step `from → to` is geometrically allowed.  Diagonal steps
/// may not squeeze past a wall corner.
#[inline]
pub fn step_allowed(grid: &Grid, from: CellId, to: CellId, diagonal: bool) -> bool {
    !diagonal || !grid.cuts_corner(from, to)
}

/// Cost of stepping into `to`.
#[inline]
pub fn step_cost_milli(
    hazard:        &HazardField,
    to:            CellId,
    diagonal:      bool,
    stage:         &PathStage,
    penalty_milli: u32,
) -> u32 {
    let base = if diagonal { DIAGONAL_MILLI } else { ORTHOGONAL_MILLI };
    if hazard.danger(to) > stage.avoid_above {
        base.saturating_add(penalty_milli)
    } else {
        base
    }
}

/// Octile (8-connected) or Manhattan (4-connected) distance in milli-steps.
/// Never overestimates, since penalties only add cost.
#[inline]
pub fn heuristic_milli(grid: &Grid, from: CellId, to: CellId, diagonal_moves: bool) -> u32 {
    let (fc, fr) = grid.col_row(from);
    let (tc, tr) = grid.col_row(to);
    let dx = fc.abs_diff(tc);
    let dy = fr.abs_diff(tr);
    if diagonal_moves {
        let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
        ORTHOGONAL_MILLI.saturating_mul(hi - lo).saturating_add(DIAGONAL_MILLI.saturating_mul(lo))
    } else {
        ORTHOGONAL_MILLI.saturating_mul(dx + dy)
    }
}
