//! Simulation error type: every lower-crate error, wrapped.

use thiserror::Error;

use sweep_core::SweepError;
use sweep_grid::GridError;
use sweep_hazard::HazardError;
use sweep_responder::TransitionError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] SweepError),

    #[error("topology error: {0}")]
    Grid(#[from] GridError),

    #[error("hazard initialization failed: {0}")]
    Hazard(#[from] HazardError),

    /// A responder was driven through a transition it does not have.  This
    /// is a defect, not a runtime condition; the run is aborted.
    #[error("invalid responder transition: {0}")]
    InvalidTransition(#[from] TransitionError),
}

pub type SimResult<T> = Result<T, SimError>;
