//! `sweep-path`: risk-aware pathfinding over the building grid.
//!
//! # Cost model
//!
//! ```text
//! step cost = 1 (orthogonal) | √2 (diagonal)
//!           + danger_penalty      if danger(dest) > stage.avoid_above
//! ```
//!
//! Walls and burning cells are never entered; cells above
//! `stage.block_above` are not entered under that stage.  Costs are integer
//! milli-steps so comparisons are exact and ties resolve by insertion order.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`cost`]       | passability and step-cost rules shared by every search  |
//! | [`router`]     | `Router` trait, `Path`, `AStarRouter`                   |
//! | [`pathfinder`] | `Pathfinder`: staged relaxation, nearest goal, flood   |
//! | [`error`]      | `PathError`, `PathResult<T>`                            |

pub mod cost;
pub mod error;
pub mod pathfinder;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{PathError, PathResult};
pub use pathfinder::Pathfinder;
pub use router::{AStarRouter, Path, Router};
