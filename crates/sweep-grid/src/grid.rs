//! Uniform cell grid overlaid on the building footprint.
//!
//! # Data layout
//!
//! Cells are stored row-major: `CellId = row * width + col`.  Per-cell data
//! lives in parallel `Vec`s indexed by `CellId` (classification, owning
//! room), so scans over the whole grid are contiguous.
//!
//! Cell `(col, row)` covers the square
//! `[origin.x + col·s, origin.x + (col+1)·s) × [origin.y + row·s, …)` where
//! `s` is the cell size.

use serde::{Deserialize, Serialize};

use sweep_core::{CellId, Connectivity, Permeability, Point, RoomId};

/// Classification of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Open,
    Wall,
    Door,
}

/// Type of the boundary shared by two adjacent cells.
///
/// A boundary is a wall if either side is a wall, a door if either side is
/// a door, and open otherwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Boundary {
    Open,
    Door,
    Wall,
}

impl Boundary {
    /// Fire transfer factor for this boundary type.
    #[inline]
    pub fn permeability(self, table: &Permeability) -> f32 {
        match self {
            Boundary::Open => table.open,
            Boundary::Door => table.door,
            Boundary::Wall => table.wall,
        }
    }
}

/// Neighbour offsets `(dcol, drow, diagonal)`: N, E, S, W, then NE, SE, SW, NW.
///
/// The order is part of the pathfinder's deterministic tie-breaking.
const OFFSETS: [(i32, i32, bool); 8] = [
    (0, -1, false),
    (1, 0, false),
    (0, 1, false),
    (-1, 0, false),
    (1, -1, true),
    (1, 1, true),
    (-1, 1, true),
    (-1, -1, true),
];

/// The rasterized building.
///
/// Do not construct directly; use [`TopologyBuilder`][crate::TopologyBuilder].
#[derive(Clone, Debug)]
pub struct Grid {
    pub width:     u32,
    pub height:    u32,
    /// Edge length of one cell, metres.
    pub cell_size: f32,
    /// World position of the top-left corner of cell (0, 0).
    pub origin:    Point,
    /// Classification of each cell.  Indexed by `CellId`.
    pub kinds:     Vec<CellKind>,
    /// Room whose rectangle contains the cell, `RoomId::INVALID` outside
    /// every room.  Indexed by `CellId`.
    pub cell_room: Vec<RoomId>,
}

impl Grid {
    /// An all-wall grid.
    pub fn new(width: u32, height: u32, cell_size: f32, origin: Point) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            cell_size,
            origin,
            kinds:     vec![CellKind::Wall; n],
            cell_room: vec![RoomId::INVALID; n],
        }
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.kinds.len()
    }

    #[inline]
    pub fn cell(&self, col: u32, row: u32) -> CellId {
        CellId(row * self.width + col)
    }

    #[inline]
    pub fn col_row(&self, cell: CellId) -> (u32, u32) {
        (cell.0 % self.width, cell.0 / self.width)
    }

    /// Cell containing `p`.  Points outside the grid clamp to the nearest
    /// edge cell rather than failing.
    pub fn cell_at(&self, p: Point) -> CellId {
        let fx = ((p.x - self.origin.x) / self.cell_size).floor();
        let fy = ((p.y - self.origin.y) / self.cell_size).floor();
        let col = fx.clamp(0.0, (self.width - 1) as f32) as u32;
        let row = fy.clamp(0.0, (self.height - 1) as f32) as u32;
        self.cell(col, row)
    }

    /// World position of the centre of `cell`.
    #[inline]
    pub fn center(&self, cell: CellId) -> Point {
        let (col, row) = self.col_row(cell);
        Point::new(
            self.origin.x + (col as f32 + 0.5) * self.cell_size,
            self.origin.y + (row as f32 + 0.5) * self.cell_size,
        )
    }

    #[inline]
    pub fn kind(&self, cell: CellId) -> CellKind {
        self.kinds[cell.index()]
    }

    /// `true` for open and door cells.
    #[inline]
    pub fn is_traversable(&self, cell: CellId) -> bool {
        self.kinds[cell.index()] != CellKind::Wall
    }

    #[inline]
    pub fn room_of(&self, cell: CellId) -> Option<RoomId> {
        let r = self.cell_room[cell.index()];
        (r != RoomId::INVALID).then_some(r)
    }

    /// In-grid neighbours of `cell` with a flag marking diagonal steps.
    ///
    /// Orthogonal neighbours come first, in N, E, S, W order.
    pub fn neighbors(
        &self,
        cell: CellId,
        connectivity: Connectivity,
    ) -> impl Iterator<Item = (CellId, bool)> + '_ {
        let n = match connectivity {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        };
        let (col, row) = self.col_row(cell);
        let (w, h) = (self.width as i32, self.height as i32);
        OFFSETS[..n].iter().filter_map(move |&(dc, dr, diagonal)| {
            let c = col as i32 + dc;
            let r = row as i32 + dr;
            if c < 0 || r < 0 || c >= w || r >= h {
                None
            } else {
                Some((self.cell(c as u32, r as u32), diagonal))
            }
        })
    }

    /// Boundary type between two adjacent cells.
    #[inline]
    pub fn boundary(&self, a: CellId, b: CellId) -> Boundary {
        match (self.kind(a), self.kind(b)) {
            (CellKind::Wall, _) | (_, CellKind::Wall) => Boundary::Wall,
            (CellKind::Door, _) | (_, CellKind::Door) => Boundary::Door,
            _ => Boundary::Open,
        }
    }

    /// Whether a diagonal step from `a` to `b` squeezes past a wall corner.
    ///
    /// Both orthogonal cells shared by `a` and `b` must be traversable.
    pub fn cuts_corner(&self, a: CellId, b: CellId) -> bool {
        let (ac, ar) = self.col_row(a);
        let (bc, br) = self.col_row(b);
        !(self.is_traversable(self.cell(bc, ar)) && self.is_traversable(self.cell(ac, br)))
    }
}
