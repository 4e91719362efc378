//! `sweep-core`: foundational types for the building sweep simulator.
//!
//! This crate is a dependency of every other `sweep-*` crate.  It has no
//! `sweep-*` dependencies and only a handful of external ones (`rand`,
//! `thiserror`, `serde`, `serde_json`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                 |
//! |------------|----------------------------------------------------------|
//! | [`ids`]    | `CellId`, `RoomId`, `ResponderId`                        |
//! | [`geo`]    | `Point`: continuous building coordinates in metres      |
//! | [`time`]   | `Tick`, `SimClock`                                       |
//! | [`rng`]    | `SimRng` (seeded, used by layout generators)             |
//! | [`config`] | `SweepConfig` and its per-subsystem sections             |
//! | [`error`]  | `SweepError`, `SweepResult`                              |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    CarriedOnDeath, Connectivity, DangerWeights, GridConfig, HazardConfig, PathConfig,
    PathStage, Permeability, PriorityConfig, ResponderConfig, RunConfig, SweepConfig,
};
pub use error::{SweepError, SweepResult};
pub use geo::Point;
pub use ids::{CellId, ResponderId, RoomId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
