//! Simulation configuration.
//!
//! One section per subsystem.  Every field has a default, so a JSON document
//! only needs to name the values it overrides:
//!
//! ```
//! use sweep_core::SweepConfig;
//!
//! let cfg = SweepConfig::from_json(r#"{ "hazard": { "growth_rate": 0.19 } }"#).unwrap();
//! assert_eq!(cfg.hazard.growth_rate, 0.19);
//! assert_eq!(cfg.grid.cell_size_m, 0.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::{SweepError, SweepResult};

// ── Top level ─────────────────────────────────────────────────────────────────

/// Complete configuration for one simulation run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub grid:      GridConfig,
    pub hazard:    HazardConfig,
    pub path:      PathConfig,
    pub priority:  PriorityConfig,
    pub responder: ResponderConfig,
    pub sim:       RunConfig,
}

impl SweepConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> SweepResult<Self> {
        let cfg: SweepConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check value ranges.  Called by `from_json` and by the simulation
    /// builder, so hand-built configs are checked too.
    pub fn validate(&self) -> SweepResult<()> {
        positive("grid.cell_size_m", self.grid.cell_size_m)?;
        positive("grid.door_width_m", self.grid.door_width_m)?;

        let h = &self.hazard;
        positive("hazard.ignition_threshold", h.ignition_threshold)?;
        positive("hazard.growth_rate", h.growth_rate)?;
        if h.seed_cells == 0 {
            return Err(config_err("hazard.seed_cells must be at least 1"));
        }
        unit("hazard.permeability.open", h.permeability.open)?;
        unit("hazard.permeability.door", h.permeability.door)?;
        unit("hazard.permeability.wall", h.permeability.wall)?;
        let w = &h.danger_weights;
        for (name, v) in [
            ("hazard.danger_weights.urgency", w.urgency),
            ("hazard.danger_weights.pressure", w.pressure),
            ("hazard.danger_weights.permeability", w.permeability),
        ] {
            if !(v >= 0.0) {
                return Err(config_err(format!("{name} must be non-negative, got {v}")));
            }
        }

        let p = &self.path;
        if p.stages.is_empty() {
            return Err(config_err("path.stages must contain at least one stage"));
        }
        if !(p.danger_penalty >= 0.0) {
            return Err(config_err("path.danger_penalty must be non-negative"));
        }
        for pair in p.stages.windows(2) {
            if pair[1].avoid_above < pair[0].avoid_above || pair[1].block_above < pair[0].block_above {
                return Err(config_err("path.stages must relax monotonically"));
            }
        }
        for s in &p.stages {
            if s.block_above < s.avoid_above {
                return Err(config_err("path stage block_above must be >= avoid_above"));
            }
        }
        if self.priority.assignment_stage >= p.stages.len() {
            return Err(config_err(format!(
                "priority.assignment_stage {} out of range ({} stages)",
                self.priority.assignment_stage,
                p.stages.len()
            )));
        }
        if !(self.priority.occupant_weight >= 0.0) {
            return Err(config_err("priority.occupant_weight must be non-negative"));
        }

        let r = &self.responder;
        positive("responder.speed_normal", r.speed_normal)?;
        positive("responder.speed_carrying", r.speed_carrying)?;
        positive("responder.waypoint_tolerance_m", r.waypoint_tolerance_m)?;
        if !(r.search_duration_secs >= 0.0) {
            return Err(config_err("responder.search_duration_secs must be non-negative"));
        }
        unit("responder.escape_threshold", r.escape_threshold)?;
        unit("responder.lethal_threshold", r.lethal_threshold)?;
        if r.escape_threshold > r.lethal_threshold {
            return Err(config_err(format!(
                "responder.escape_threshold ({}) exceeds lethal_threshold ({})",
                r.escape_threshold, r.lethal_threshold
            )));
        }

        positive("sim.tick_duration_secs", self.sim.tick_duration_secs)?;
        if self.sim.max_ticks == 0 {
            return Err(config_err("sim.max_ticks must be at least 1"));
        }
        Ok(())
    }
}

fn config_err(msg: impl Into<String>) -> SweepError {
    SweepError::Config(msg.into())
}

fn positive(name: &str, v: f32) -> SweepResult<()> {
    if v > 0.0 && v.is_finite() {
        Ok(())
    } else {
        Err(config_err(format!("{name} must be positive, got {v}")))
    }
}

fn unit(name: &str, v: f32) -> SweepResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(config_err(format!("{name} must lie in [0, 1], got {v}")))
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Edge length of one square cell, metres.
    pub cell_size_m: f32,
    /// Width of the opening carved for each connection, metres.
    pub door_width_m: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cell_size_m: 0.5, door_width_m: 2.0 }
    }
}

// ── Hazard ────────────────────────────────────────────────────────────────────

/// Fire transfer factor per boundary type.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permeability {
    pub open: f32,
    pub door: f32,
    pub wall: f32,
}

impl Default for Permeability {
    fn default() -> Self {
        Self { open: 1.0, door: 0.15, wall: 0.0 }
    }
}

/// Weights of the three danger-score components.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DangerWeights {
    /// Proximity of accumulated heat to the ignition threshold.
    pub urgency: f32,
    /// Fraction of adjacent non-wall cells burning.
    pub pressure: f32,
    /// Mean permeability across burning-neighbour boundaries.
    pub permeability: f32,
}

impl Default for DangerWeights {
    fn default() -> Self {
        Self { urgency: 0.5, pressure: 0.3, permeability: 0.2 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Heat release at which a cell ignites (Q, kW).
    pub ignition_threshold: f32,
    /// t-squared growth coefficient (α, kW/s²).  A direct open neighbour of a
    /// burning cell ignites after `sqrt(Q / α)` seconds.
    pub growth_rate: f32,
    /// Number of burning cells seeded in the origin room at t = 0.
    pub seed_cells: usize,
    pub permeability: Permeability,
    pub danger_weights: DangerWeights,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            ignition_threshold: 75.0,
            growth_rate:        0.047,
            seed_cells:         4,
            permeability:       Permeability::default(),
            danger_weights:     DangerWeights::default(),
        }
    }
}

// ── Pathfinding ───────────────────────────────────────────────────────────────

/// Grid neighbourhood used by the pathfinder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connectivity {
    Four,
    Eight,
}

/// One step of the pathfinder's threshold relaxation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathStage {
    /// Cells with danger above this cost an extra `danger_penalty` to enter.
    pub avoid_above: f32,
    /// Cells with danger above this are not entered at all.
    pub block_above: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub connectivity: Connectivity,
    /// Additive cost, in cell steps, for entering an avoided cell.
    pub danger_penalty: f32,
    /// Strict → moderate → unrestricted.  Burning and wall cells are excluded
    /// at every stage.
    pub stages: Vec<PathStage>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            connectivity:   Connectivity::Eight,
            danger_penalty: 10.0,
            stages: vec![
                PathStage { avoid_above: 0.3, block_above: 0.6 },
                PathStage { avoid_above: 0.6, block_above: 0.9 },
                PathStage { avoid_above: 0.9, block_above: 1.0 },
            ],
        }
    }
}

// ── Priority ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityConfig {
    /// λ in `P = A · w_E·E · max(0, 1 + λ·D)`.
    ///
    /// Positive values rank dangerous, occupant-rich rooms first; negative
    /// values rank safe rooms first (at `λ <= -1` a fully dangerous room gets
    /// priority 0).  There is no "correct" sign; pick per scenario.
    pub danger_weight: f32,
    /// w_E, scales the occupant count.
    pub occupant_weight: f32,
    /// When `true`, a room already targeted by one responder is not offered
    /// to another.
    pub exclusive_targeting: bool,
    /// Index into `path.stages` used to decide reachability at assignment.
    pub assignment_stage: usize,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            danger_weight:       1.0,
            occupant_weight:     1.0,
            exclusive_targeting: false,
            assignment_stage:    0,
        }
    }
}

// ── Responders ────────────────────────────────────────────────────────────────

/// What happens to the occupant a responder is carrying when it dies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarriedOnDeath {
    /// Counted in the separate "lost" bucket.
    #[default]
    Lost,
    /// Returned to the source room's remaining count.
    ReturnToRoom,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    /// Walking speed, m/s.
    pub speed_normal: f32,
    /// Speed while carrying an occupant, m/s.
    pub speed_carrying: f32,
    /// Time spent searching a room before picking up an occupant, seconds.
    pub search_duration_secs: f32,
    /// Cell danger at or above which a responder abandons its task.
    pub escape_threshold: f32,
    /// Cell danger at or above which a responder dies.
    pub lethal_threshold: f32,
    /// Distance under which a waypoint counts as reached, metres.
    pub waypoint_tolerance_m: f32,
    pub carried_on_death: CarriedOnDeath,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            speed_normal:         1.5,
            speed_carrying:       0.6,
            search_duration_secs: 5.0,
            escape_threshold:     0.7,
            lethal_threshold:     0.95,
            waypoint_tolerance_m: 0.1,
            carried_on_death:     CarriedOnDeath::Lost,
        }
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Simulated seconds per tick.
    pub tick_duration_secs: f32,
    /// Hard cap on the number of ticks.
    pub max_ticks: u64,
    /// Emit a snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_duration_secs:      1.0,
            max_ticks:               600,
            snapshot_interval_ticks: 1,
        }
    }
}
