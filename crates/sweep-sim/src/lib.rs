//! `sweep-sim`: the fixed-timestep stepper for the building sweep simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.sim.max_ticks:
//!   ① Hazard    : advance the fire by dt; newly ignited cells are reported.
//!   ② Safety    : every live responder checks the danger at its cell:
//!                    burning or ≥ lethal  → Dead
//!                    ≥ escape             → Retreating (occupant dropped back)
//!   ③ Schedule  : idle responders are scored against every room and
//!                  assigned the best reachable one (ascending ResponderId).
//!   ④ Movement  : search timers, walking, pick-ups and deliveries.
//!   stop if: all occupants accounted for | all responders dead | tick cap
//! ```
//!
//! Every phase reads the hazard field as published by ①; nothing else writes
//! it.  Responders are always processed in ascending id order, so a run is
//! fully determined by its topology and configuration.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the per-cell hazard update on Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sweep_core::SweepConfig;
//! use sweep_grid::LayoutSpec;
//! use sweep_sim::{NoopObserver, SimBuilder};
//!
//! let layout = LayoutSpec::office_row(4, 2, 2);
//! let mut sim = SimBuilder::from_layout(&layout, SweepConfig::default())?.build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! println!("score {:.3}", summary.success_score);
//! ```

pub mod builder;
pub mod error;
pub mod event;
pub mod observer;
pub mod sim;
pub mod snapshot;
pub mod summary;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use event::{SimEvent, SimEventKind};
pub use observer::{EventLog, NoopObserver, SimObserver};
pub use sim::{Sim, StopReason};
pub use snapshot::{ResponderSnapshot, RoomSnapshot, TickSnapshot};
pub use summary::SimSummary;
