//! Responder error type.

use thiserror::Error;

use sweep_core::{ResponderId, RoomId};

use crate::{StateTag, Trigger};

/// An internal invariant was violated.
///
/// These indicate a defect in the caller, not a runtime condition the
/// simulation can recover from.
#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    #[error("no transition from {state:?} on {trigger:?}")]
    Invalid { state: StateTag, trigger: Trigger },

    #[error("{0} is dead and takes no further transitions")]
    Dead(ResponderId),

    #[error("{responder} already carries an occupant from {carrying}")]
    AlreadyCarrying { responder: ResponderId, carrying: RoomId },

    #[error("{0} has no occupant to deliver")]
    NothingCarried(ResponderId),
}

pub type TransitionResult<T> = Result<T, TransitionError>;
