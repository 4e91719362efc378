//! Pathfinding error type.

use thiserror::Error;

use sweep_core::CellId;

/// Errors produced by `sweep-path`.
///
/// Not fatal: callers treat a missing path as "inaccessible" and try again
/// on a later tick.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("no path from {from} to {to}")]
    NoPath { from: CellId, to: CellId },

    #[error("no goal cells given")]
    NoGoals,
}

pub type PathResult<T> = Result<T, PathError>;
