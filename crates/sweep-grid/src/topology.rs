//! Built building topology: grid, rooms, exits, starts.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over the centres of traversable cells maps a
//! continuous position to the nearest cell a responder can stand on.  Used
//! at build time to snap responder start coordinates.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use sweep_core::{CellId, Point, RoomId};

use crate::Grid;

// ── R-tree cell entry ─────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub(crate) struct CellEntry {
    pub(crate) point: [f32; 2],
    pub(crate) id:    CellId,
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CellEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Room ──────────────────────────────────────────────────────────────────────

/// Static description of one room.  The mutable part (occupants left,
/// cleared flag) lives in [`Occupancy`][crate::Occupancy].
#[derive(Clone, Debug)]
pub struct Room {
    pub id:   RoomId,
    /// Identifier from the layout document.
    pub name: String,
    /// Traversable member cells, ascending.
    pub cells: Vec<CellId>,
    /// Traversable member cell nearest the room centre; the goal of a visit.
    pub interior: CellId,
    pub is_exit: bool,
    pub initial_occupants: u32,
}

// ── Topology ──────────────────────────────────────────────────────────────────

/// Everything the simulation needs to know about the building.
///
/// Do not construct directly; use [`TopologyBuilder`][crate::TopologyBuilder].
#[derive(Debug)]
pub struct Topology {
    pub grid: Grid,
    /// Indexed by `RoomId`.
    pub rooms: Vec<Room>,
    /// Connected rooms per room, ascending and de-duplicated.  Indexed by
    /// `RoomId`.
    pub adjacency: Vec<Vec<RoomId>>,
    /// Interior cells of exit rooms, in room order.
    pub exits: Vec<CellId>,
    pub fire_origin: RoomId,
    /// Snapped responder start cells, in layout order.
    pub responder_starts: Vec<CellId>,

    pub(crate) spatial_idx: RTree<CellEntry>,
}

impl Topology {
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.index()]
    }

    pub fn total_occupants(&self) -> u32 {
        self.rooms.iter().filter(|r| !r.is_exit).map(|r| r.initial_occupants).sum()
    }

    /// Whether `cell` is the interior cell of an exit room.
    pub fn is_exit_cell(&self, cell: CellId) -> bool {
        self.exits.contains(&cell)
    }

    /// Nearest traversable cell to `p`.
    ///
    /// Returns `None` only if the grid has no traversable cell, which a
    /// successful build rules out.
    pub fn snap_to_open(&self, p: Point) -> Option<CellId> {
        self.spatial_idx.nearest_neighbor(&[p.x, p.y]).map(|e| e.id)
    }
}
