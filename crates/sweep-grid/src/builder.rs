//! Rasterize a [`LayoutSpec`] into a [`Topology`].
//!
//! # Algorithm
//!
//! 1. Validate identifiers, origin, exits and starts.
//! 2. Cover the bounding box of all rooms with `cell_size_m` cells plus a
//!    one-cell margin.  Every cell starts as wall.
//! 3. Each room claims the cells whose centre lies strictly inside its
//!    rectangle and opens them.  Enclosed rooms re-wall their outermost ring.
//! 4. Each connection carves a `door_width_m` square opening centred on its
//!    door point: wall cells in the square that lie in either room (grown by
//!    one cell) become doors.
//! 5. Pick each room's interior cell, snap responder starts through the
//!    R-tree, and check that every exit is reachable from some start.

use std::collections::VecDeque;

use rstar::RTree;
use rustc_hash::FxHashMap;
use tracing::info;

use sweep_core::{CellId, Connectivity, GridConfig, Point, RoomId};

use crate::topology::CellEntry;
use crate::{CellKind, Grid, GridError, GridResult, LayoutSpec, Room, RoomSpec, Topology};

/// Grids larger than this are rejected rather than allocated.
const MAX_CELLS: u64 = 1 << 26;

type Rect = (f32, f32, f32, f32);

/// Builds a [`Topology`] from a layout document.
///
/// # Example
///
/// ```
/// use sweep_core::GridConfig;
/// use sweep_grid::{LayoutSpec, TopologyBuilder};
///
/// let layout = LayoutSpec::office_row(3, 2, 1);
/// let topo = TopologyBuilder::new(&GridConfig::default()).build(&layout).unwrap();
/// assert_eq!(topo.room_count(), 5);
/// assert_eq!(topo.exits.len(), 1);
/// assert_eq!(topo.total_occupants(), 6);
/// ```
pub struct TopologyBuilder {
    cell_size:  f32,
    door_width: f32,
}

impl TopologyBuilder {
    pub fn new(cfg: &GridConfig) -> Self {
        Self { cell_size: cfg.cell_size_m, door_width: cfg.door_width_m }
    }

    pub fn build(&self, layout: &LayoutSpec) -> GridResult<Topology> {
        let specs = &layout.rooms;
        if specs.is_empty() {
            return Err(GridError::NoRooms);
        }

        let mut room_index: FxHashMap<String, RoomId> = FxHashMap::default();
        for (i, r) in specs.iter().enumerate() {
            if !(r.width > 0.0 && r.height > 0.0) {
                return Err(GridError::DegenerateRoom(r.id.clone()));
            }
            if room_index.insert(r.id.clone(), RoomId(i as u32)).is_some() {
                return Err(GridError::DuplicateRoom(r.id.clone()));
            }
        }
        let fire_origin = *room_index
            .get(&layout.fire_origin)
            .ok_or_else(|| GridError::UnknownOriginRoom(layout.fire_origin.clone()))?;
        if !specs.iter().any(|r| r.is_exit) {
            return Err(GridError::NoExit);
        }
        if layout.responder_starts.is_empty() {
            return Err(GridError::NoResponderStart);
        }

        let lookup = |name: &str| {
            room_index.get(name).copied().ok_or_else(|| GridError::UnknownRoom(name.to_owned()))
        };
        let mut doors: Vec<(RoomId, RoomId, Point)> = Vec::with_capacity(layout.connections.len());
        for c in &layout.connections {
            let a = lookup(&c.from)?;
            let b = lookup(&c.to)?;
            let door = match c.door {
                Some(p) => p,
                None => shared_midpoint(&specs[a.index()], &specs[b.index()], self.cell_size)
                    .ok_or_else(|| GridError::NotAdjacent { a: c.from.clone(), b: c.to.clone() })?,
            };
            doors.push((a, b, door));
        }

        let mut grid = self.rasterize(specs)?;
        for &(a, b, door) in &doors {
            self.carve_door(&mut grid, &specs[a.index()], &specs[b.index()], door);
        }

        // ── Rooms ─────────────────────────────────────────────────────────
        let mut members: Vec<Vec<CellId>> = vec![Vec::new(); specs.len()];
        for i in 0..grid.cell_count() {
            let cell = CellId(i as u32);
            if let Some(r) = grid.room_of(cell) {
                if grid.is_traversable(cell) {
                    members[r.index()].push(cell);
                }
            }
        }
        let mut rooms = Vec::with_capacity(specs.len());
        for (i, (spec, cells)) in specs.iter().zip(members).enumerate() {
            let interior = interior_cell(&grid, spec.center(), &cells)
                .ok_or_else(|| GridError::EmptyRoom(spec.id.clone()))?;
            rooms.push(Room {
                id: RoomId(i as u32),
                name: spec.id.clone(),
                cells,
                interior,
                is_exit: spec.is_exit,
                initial_occupants: spec.occupants,
            });
        }

        let mut adjacency: Vec<Vec<RoomId>> = vec![Vec::new(); rooms.len()];
        for &(a, b, _) in &doors {
            adjacency[a.index()].push(b);
            adjacency[b.index()].push(a);
        }
        for list in &mut adjacency {
            list.sort_unstable();
            list.dedup();
        }

        let exits: Vec<CellId> = rooms.iter().filter(|r| r.is_exit).map(|r| r.interior).collect();

        // ── Spatial index and starts ──────────────────────────────────────
        let entries: Vec<CellEntry> = (0..grid.cell_count())
            .map(|i| CellId(i as u32))
            .filter(|&c| grid.is_traversable(c))
            .map(|c| {
                let p = grid.center(c);
                CellEntry { point: [p.x, p.y], id: c }
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let responder_starts: Vec<CellId> = layout
            .responder_starts
            .iter()
            .filter_map(|p| spatial_idx.nearest_neighbor(&[p.x, p.y]).map(|e| e.id))
            .collect();
        if responder_starts.is_empty() {
            return Err(GridError::NoResponderStart);
        }

        let reached = flood(&grid, &responder_starts);
        if let Some(r) = rooms.iter().find(|r| r.is_exit && !reached[r.interior.index()]) {
            return Err(GridError::UnreachableExit(r.name.clone()));
        }

        info!(
            layout = %layout.name,
            rooms = rooms.len(),
            cols = grid.width,
            rows = grid.height,
            exits = exits.len(),
            "topology built"
        );

        Ok(Topology {
            grid,
            rooms,
            adjacency,
            exits,
            fire_origin,
            responder_starts,
            spatial_idx,
        })
    }

    fn rasterize(&self, specs: &[RoomSpec]) -> GridResult<Grid> {
        let s = self.cell_size;
        let (mut x0, mut y0, mut x1, mut y1) = (f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for r in specs {
            let (a, b, c, d) = r.bounds();
            x0 = x0.min(a);
            y0 = y0.min(b);
            x1 = x1.max(c);
            y1 = y1.max(d);
        }
        let cols = ((x1 - x0) / s).ceil() as u64 + 2;
        let rows = ((y1 - y0) / s).ceil() as u64 + 2;
        if cols * rows > MAX_CELLS {
            return Err(GridError::TooLarge { cols, rows });
        }

        let mut grid = Grid::new(cols as u32, rows as u32, s, Point::new(x0 - s, y0 - s));
        for (i, spec) in specs.iter().enumerate() {
            let rid = RoomId(i as u32);
            let bounds = spec.bounds();
            let (bx0, by0, bx1, by1) = bounds;
            let cells: Vec<CellId> = cells_in(&grid, bounds).collect();
            for cell in cells {
                let c = grid.center(cell);
                if !spec.contains(c) {
                    continue;
                }
                let on_ring = c.x - bx0 < s || bx1 - c.x < s || c.y - by0 < s || by1 - c.y < s;
                grid.cell_room[cell.index()] = rid;
                grid.kinds[cell.index()] = if spec.is_walled() && on_ring {
                    CellKind::Wall
                } else {
                    CellKind::Open
                };
            }
        }
        Ok(grid)
    }

    fn carve_door(&self, grid: &mut Grid, a: &RoomSpec, b: &RoomSpec, door: Point) {
        let half = self.door_width / 2.0;
        let grow_a = grow(a.bounds(), self.cell_size);
        let grow_b = grow(b.bounds(), self.cell_size);
        let square = (door.x - half, door.y - half, door.x + half, door.y + half);
        let cells: Vec<CellId> = cells_in(grid, square).collect();
        for cell in cells {
            let c = grid.center(cell);
            if (c.x - door.x).abs() > half || (c.y - door.y).abs() > half {
                continue;
            }
            if grid.kind(cell) == CellKind::Wall && (inside(grow_a, c) || inside(grow_b, c)) {
                grid.kinds[cell.index()] = CellKind::Door;
            }
        }
    }
}

/// Every cell whose square intersects `rect`, row-major.
fn cells_in(grid: &Grid, rect: Rect) -> impl Iterator<Item = CellId> + '_ {
    let (c0, r0) = grid.col_row(grid.cell_at(Point::new(rect.0, rect.1)));
    let (c1, r1) = grid.col_row(grid.cell_at(Point::new(rect.2, rect.3)));
    (r0..=r1).flat_map(move |r| (c0..=c1).map(move |c| grid.cell(c, r)))
}

fn grow((x0, y0, x1, y1): Rect, by: f32) -> Rect {
    (x0 - by, y0 - by, x1 + by, y1 + by)
}

fn inside((x0, y0, x1, y1): Rect, p: Point) -> bool {
    p.x > x0 && p.x < x1 && p.y > y0 && p.y < y1
}

/// Midpoint of the boundary two rectangles share.
///
/// Rectangles may be separated by up to two cells (a wall between them) and
/// must share at least one cell of boundary length.  Returns `None` otherwise.
fn shared_midpoint(a: &RoomSpec, b: &RoomSpec, cell_size: f32) -> Option<Point> {
    let (ax0, ay0, ax1, ay1) = a.bounds();
    let (bx0, by0, bx1, by1) = b.bounds();
    let (ox0, ox1) = (ax0.max(bx0), ax1.min(bx1));
    let (oy0, oy1) = (ay0.max(by0), ay1.min(by1));
    let tol = 2.0 * cell_size;
    if ox0 - ox1 > tol || oy0 - oy1 > tol {
        return None;
    }
    if ox1 - ox0 < cell_size && oy1 - oy0 < cell_size {
        return None;
    }
    Some(Point::new((ox0 + ox1) / 2.0, (oy0 + oy1) / 2.0))
}

/// Traversable member nearest `center`, preferring open cells over doors.
/// Ties go to the lower `CellId`.
fn interior_cell(grid: &Grid, center: Point, cells: &[CellId]) -> Option<CellId> {
    cells.iter().copied().min_by(|&a, &b| {
        let ka = grid.kind(a) == CellKind::Door;
        let kb = grid.kind(b) == CellKind::Door;
        ka.cmp(&kb)
            .then(grid.center(a).distance(center).total_cmp(&grid.center(b).distance(center)))
            .then(a.cmp(&b))
    })
}

/// 4-connected reachability over traversable cells from `sources`.
fn flood(grid: &Grid, sources: &[CellId]) -> Vec<bool> {
    let mut seen = vec![false; grid.cell_count()];
    let mut queue: VecDeque<CellId> = VecDeque::new();
    for &s in sources {
        if grid.is_traversable(s) && !seen[s.index()] {
            seen[s.index()] = true;
            queue.push_back(s);
        }
    }
    while let Some(cell) = queue.pop_front() {
        for (n, _) in grid.neighbors(cell, Connectivity::Four) {
            if grid.is_traversable(n) && !seen[n.index()] {
                seen[n.index()] = true;
                queue.push_back(n);
            }
        }
    }
    seen
}
