//! Configuration-level error type.
//!
//! Sub-crates define their own error enums and wrap `SweepError` as one
//! variant where configuration problems can surface.

use thiserror::Error;

/// Errors raised while loading or validating a [`SweepConfig`][crate::SweepConfig].
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Shorthand result type for configuration handling.
pub type SweepResult<T> = Result<T, SweepError>;
