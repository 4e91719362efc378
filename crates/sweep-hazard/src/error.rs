//! Hazard-field error type.

use thiserror::Error;

use sweep_core::RoomId;

/// Errors produced by `sweep-hazard`.
///
/// Both are configuration problems raised before the first tick.
#[derive(Debug, Error)]
pub enum HazardError {
    #[error("fire origin {0} does not exist")]
    UnknownOriginRoom(RoomId),

    #[error("fire origin {0} has no cell that can burn")]
    UnburnableOrigin(RoomId),
}

pub type HazardResult<T> = Result<T, HazardError>;
