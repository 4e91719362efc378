//! Fire-transfer neighbourhood of every cell.
//!
//! # Data layout
//!
//! Compressed Sparse Row over the 4-neighbourhood.  The burnable neighbours
//! of cell `c` occupy
//!
//! ```text
//! nbr_cell[ start[c] .. start[c+1] ]
//! nbr_perm[ start[c] .. start[c+1] ]
//! ```
//!
//! Wall cells have no entries and are never listed as anyone's neighbour, so
//! a wall boundary contributes nothing no matter what the permeability table
//! says for walls.

use sweep_core::{CellId, Connectivity, Permeability};
use sweep_grid::Grid;

#[derive(Clone, Debug)]
pub struct Stencil {
    /// CSR row pointer.  Length = `cell_count + 1`.
    pub start: Vec<u32>,
    pub nbr_cell: Vec<CellId>,
    /// Permeability of the boundary to the matching `nbr_cell`.
    pub nbr_perm: Vec<f32>,
    /// `false` for wall cells.  Indexed by `CellId`.
    pub burnable: Vec<bool>,
}

impl Stencil {
    pub fn new(grid: &Grid, table: &Permeability) -> Self {
        let n = grid.cell_count();
        let mut start = Vec::with_capacity(n + 1);
        let mut nbr_cell = Vec::with_capacity(n * 4);
        let mut nbr_perm = Vec::with_capacity(n * 4);
        let mut burnable = Vec::with_capacity(n);

        start.push(0);
        for i in 0..n {
            let cell = CellId(i as u32);
            let open = grid.is_traversable(cell);
            burnable.push(open);
            if open {
                for (nbr, _) in grid.neighbors(cell, Connectivity::Four) {
                    if grid.is_traversable(nbr) {
                        nbr_cell.push(nbr);
                        nbr_perm.push(grid.boundary(cell, nbr).permeability(table));
                    }
                }
            }
            start.push(nbr_cell.len() as u32);
        }

        Self { start, nbr_cell, nbr_perm, burnable }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.burnable.len()
    }

    /// `(neighbour, permeability)` pairs of `cell`, in N, E, S, W order.
    #[inline]
    pub fn neighbors(&self, cell: CellId) -> impl Iterator<Item = (CellId, f32)> + '_ {
        let lo = self.start[cell.index()] as usize;
        let hi = self.start[cell.index() + 1] as usize;
        self.nbr_cell[lo..hi].iter().copied().zip(self.nbr_perm[lo..hi].iter().copied())
    }

    /// Number of non-wall neighbours.
    #[inline]
    pub fn degree(&self, cell: CellId) -> usize {
        (self.start[cell.index() + 1] - self.start[cell.index()]) as usize
    }
}
