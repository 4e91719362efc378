//! The hazard field: per-cell exposure, heat, ignition and danger.
//!
//! # Update discipline
//!
//! [`HazardField::advance`] runs two passes over the grid.  Each pass reads
//! only the previous state and writes into fresh buffers that are swapped in
//! once every cell has been computed:
//!
//! 1. exposure / heat / ignition from the *previous* burning set;
//! 2. danger from the *new* burning set and new heat.
//!
//! Cells are therefore independent within a pass, which is what lets the
//! `parallel` feature split them across threads without changing results.

use std::collections::VecDeque;

use tracing::{debug, info};

use sweep_core::{CellId, DangerWeights, HazardConfig, RoomId};
use sweep_grid::{Grid, Room, Topology};

use crate::{HazardError, HazardResult, Stencil};

/// Result of pass 1 for one cell.
#[derive(Copy, Clone)]
struct Spread {
    exposure: f32,
    heat:     f32,
    burning:  bool,
}

/// Fire state of the building.
///
/// The only writer of per-cell hazard state.  Everything else (pathfinder,
/// scheduler, responders) reads it through `&HazardField`.
#[derive(Clone, Debug)]
pub struct HazardField {
    stencil: Stencil,

    ignition_threshold: f32,
    growth_rate:        f32,
    weights:            DangerWeights,

    // ── Per-cell state, indexed by CellId ─────────────────────────────────
    /// Σ permeability · dt over burning-neighbour exposure, seconds.
    exposure: Vec<f32>,
    /// `α · exposure²`, compared against the ignition threshold.
    heat: Vec<f32>,
    burning: Vec<bool>,
    danger: Vec<f32>,
    /// Elapsed seconds at ignition; `NaN` while not burning.
    ignited_at: Vec<f32>,

    burning_count: usize,
    elapsed_secs:  f32,
}

impl HazardField {
    /// A field with nothing burning.
    pub fn new(grid: &Grid, cfg: &HazardConfig) -> Self {
        let n = grid.cell_count();
        Self {
            stencil:            Stencil::new(grid, &cfg.permeability),
            ignition_threshold: cfg.ignition_threshold,
            growth_rate:        cfg.growth_rate,
            weights:            cfg.danger_weights,
            exposure:           vec![0.0; n],
            heat:               vec![0.0; n],
            burning:            vec![false; n],
            danger:             vec![0.0; n],
            ignited_at:         vec![f32::NAN; n],
            burning_count:      0,
            elapsed_secs:       0.0,
        }
    }

    /// Build the field and seed `cfg.seed_cells` burning cells in `origin`.
    ///
    /// Seeds are taken breadth-first from the room's interior cell over the
    /// room's own traversable cells, so the cluster is compact and the same
    /// for the same topology.
    pub fn initialize(topology: &Topology, origin: RoomId, cfg: &HazardConfig) -> HazardResult<Self> {
        if origin.index() >= topology.room_count() {
            return Err(HazardError::UnknownOriginRoom(origin));
        }
        let room = topology.room(origin);
        let grid = &topology.grid;
        if room.cells.is_empty() || !grid.is_traversable(room.interior) {
            return Err(HazardError::UnburnableOrigin(origin));
        }

        let mut field = Self::new(grid, cfg);

        let mut seen = vec![false; grid.cell_count()];
        let mut queue = VecDeque::from([room.interior]);
        seen[room.interior.index()] = true;
        let mut seeded = 0;
        while let Some(cell) = queue.pop_front() {
            if seeded == cfg.seed_cells {
                break;
            }
            field.ignite(cell);
            seeded += 1;
            for (nbr, _) in field.stencil.neighbors(cell) {
                if !seen[nbr.index()] && grid.room_of(nbr) == Some(origin) {
                    seen[nbr.index()] = true;
                    queue.push_back(nbr);
                }
            }
        }

        info!(origin = %room.name, seeded, "fire seeded");
        Ok(field)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Set `cell` on fire now.  Returns `false` (and changes nothing) for
    /// walls and cells already burning.
    pub fn ignite(&mut self, cell: CellId) -> bool {
        let i = cell.index();
        if !self.stencil.burnable[i] || self.burning[i] {
            return false;
        }
        self.burning[i] = true;
        self.ignited_at[i] = self.elapsed_secs;
        self.danger[i] = 1.0;
        self.burning_count += 1;

        let nbrs: Vec<CellId> = self.stencil.neighbors(cell).map(|(c, _)| c).collect();
        for nbr in nbrs {
            self.danger[nbr.index()] = self.danger_of(nbr);
        }
        true
    }

    /// Advance the fire by `dt` seconds.
    ///
    /// Returns the cells that ignited during this step, ascending.
    pub fn advance(&mut self, dt: f32) -> Vec<CellId> {
        if !(dt > 0.0) {
            return Vec::new();
        }
        self.elapsed_secs += dt;

        // ── Pass 1: spread from the previous burning set ──────────────────
        let spread: Vec<Spread> = map_cells(self.cell_count(), |i| self.spread_cell(i, dt));

        let mut ignited = Vec::new();
        for (i, s) in spread.into_iter().enumerate() {
            self.exposure[i] = s.exposure;
            self.heat[i] = s.heat;
            if s.burning && !self.burning[i] {
                self.burning[i] = true;
                self.ignited_at[i] = self.elapsed_secs;
                ignited.push(CellId(i as u32));
            }
        }
        self.burning_count += ignited.len();

        // ── Pass 2: danger from the published burning set ─────────────────
        self.danger = map_cells(self.cell_count(), |i| self.danger_of(CellId(i as u32)));

        if !ignited.is_empty() {
            debug!(
                t = self.elapsed_secs,
                ignited = ignited.len(),
                burning = self.burning_count,
                "fire spread"
            );
        }
        ignited
    }

    fn spread_cell(&self, i: usize, dt: f32) -> Spread {
        let burning = self.burning[i];
        if burning || !self.stencil.burnable[i] {
            return Spread { exposure: self.exposure[i], heat: self.heat[i], burning };
        }
        let gain: f32 = self
            .stencil
            .neighbors(CellId(i as u32))
            .filter(|(n, _)| self.burning[n.index()])
            .map(|(_, perm)| perm * dt)
            .sum();
        let exposure = self.exposure[i] + gain;
        let heat = self.growth_rate * exposure * exposure;
        Spread { exposure, heat, burning: heat >= self.ignition_threshold }
    }

    /// Weighted danger score of one cell from the current state.
    fn danger_of(&self, cell: CellId) -> f32 {
        let i = cell.index();
        if self.burning[i] {
            return 1.0;
        }
        if !self.stencil.burnable[i] {
            return 0.0;
        }

        let degree = self.stencil.degree(cell);
        let mut burning_nbrs = 0usize;
        let mut perm_sum = 0.0f32;
        for (nbr, perm) in self.stencil.neighbors(cell) {
            if self.burning[nbr.index()] {
                burning_nbrs += 1;
                perm_sum += perm;
            }
        }

        let urgency = (self.heat[i] / self.ignition_threshold).min(1.0);
        let (pressure, permeability) = if burning_nbrs == 0 {
            (0.0, 0.0)
        } else {
            (burning_nbrs as f32 / degree as f32, perm_sum / burning_nbrs as f32)
        };

        let w = &self.weights;
        (w.urgency * urgency + w.pressure * pressure + w.permeability * permeability).clamp(0.0, 1.0)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.burning.len()
    }

    #[inline]
    pub fn danger(&self, cell: CellId) -> f32 {
        self.danger[cell.index()]
    }

    #[inline]
    pub fn is_burning(&self, cell: CellId) -> bool {
        self.burning[cell.index()]
    }

    /// Accumulated growth `α · E²` of a cell.
    #[inline]
    pub fn heat(&self, cell: CellId) -> f32 {
        self.heat[cell.index()]
    }

    /// Elapsed seconds at which `cell` ignited, if it has.
    pub fn ignition_time(&self, cell: CellId) -> Option<f32> {
        let t = self.ignited_at[cell.index()];
        (!t.is_nan()).then_some(t)
    }

    /// Mean danger over the room's member cells.
    pub fn room_danger(&self, room: &Room) -> f32 {
        if room.cells.is_empty() {
            return 0.0;
        }
        let sum: f32 = room.cells.iter().map(|&c| self.danger[c.index()]).sum();
        sum / room.cells.len() as f32
    }

    pub fn burning_count(&self) -> usize {
        self.burning_count
    }

    pub fn max_danger(&self) -> f32 {
        self.danger.iter().copied().fold(0.0, f32::max)
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed_secs
    }

    /// Danger of every cell, indexed by `CellId`.
    pub fn dangers(&self) -> &[f32] {
        &self.danger
    }

    /// Burning flag of every cell, indexed by `CellId`.
    pub fn burning_cells(&self) -> &[bool] {
        &self.burning
    }

    pub fn stencil(&self) -> &Stencil {
        &self.stencil
    }
}

/// `(0..n).map(f)`, on Rayon with the `parallel` feature.
fn map_cells<T, F>(n: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(not(feature = "parallel"))]
    {
        (0..n).map(f).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..n).into_par_iter().map(f).collect()
    }
}
