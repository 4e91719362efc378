//! `sweep-hazard`: fire spread and danger scoring over the building grid.
//!
//! # Model
//!
//! Each non-wall cell accumulates *exposure* from its burning 4-neighbours,
//! weighted by the permeability of the shared boundary:
//!
//! ```text
//! E  += Σ_burning_neighbours permeability · dt
//! heat = α · E²                       (t-squared growth)
//! ignite when heat >= Q
//! ```
//!
//! so a cell next to one burning cell across an open boundary ignites after
//! `sqrt(Q / α)` seconds, across a door after `sqrt(Q / α) / 0.15`, and never
//! across a wall.
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`stencil`] | `Stencil`: CSR neighbour table with permeabilities    |
//! | [`field`]   | `HazardField`: the single writer of per-cell state    |
//! | [`error`]   | `HazardError`, `HazardResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                |
//! |------------|-------------------------------------------------------|
//! | `parallel` | Per-cell update on Rayon (read-old / write-new).      |

pub mod error;
pub mod field;
pub mod stencil;


pub use error::{HazardError, HazardResult};
pub use field::HazardField;
pub use stencil::Stencil;
