//! `sweep-grid`: building layout, grid topology, and occupancy.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`layout`]    | `LayoutSpec`, `RoomSpec`, `ConnectionSpec` (serde models), generators |
//! | [`grid`]      | `Grid`, `CellKind`, `Boundary`                             |
//! | [`builder`]   | `TopologyBuilder`                                          |
//! | [`topology`]  | `Topology` (grid + rooms + R-tree), `Room`                 |
//! | [`occupancy`] | `Occupancy`, `RoomState`, `OccupantTotals`                 |
//! | [`error`]     | `GridError`, `GridResult<T>`                               |

pub mod builder;
pub mod error;
pub mod grid;
pub mod layout;
pub mod occupancy;
pub mod topology;


pub use builder::TopologyBuilder;
pub use error::{GridError, GridResult};
pub use grid::{Boundary, CellKind, Grid};
pub use layout::{ConnectionSpec, LayoutSpec, RoomKind, RoomSpec};
pub use occupancy::{OccupantTotals, Occupancy, RoomState};
pub use topology::{Room, Topology};
