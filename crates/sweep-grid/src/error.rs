//! Topology-builder error type.

use thiserror::Error;

/// Errors produced while turning a [`LayoutSpec`][crate::LayoutSpec] into a
/// [`Topology`][crate::Topology].
///
/// Every variant is a configuration problem: the layout cannot be simulated.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("layout has no rooms")]
    NoRooms,

    #[error("duplicate room id {0:?}")]
    DuplicateRoom(String),

    #[error("room {0:?} has a non-positive width or height")]
    DegenerateRoom(String),

    #[error("connection references unknown room {0:?}")]
    UnknownRoom(String),

    #[error("fire origin room {0:?} does not exist")]
    UnknownOriginRoom(String),

    #[error("rooms {a:?} and {b:?} do not share a boundary; give an explicit door point")]
    NotAdjacent { a: String, b: String },

    #[error("room {0:?} has no traversable cell")]
    EmptyRoom(String),

    #[error("layout has no exit room")]
    NoExit,

    #[error("layout has no responder start")]
    NoResponderStart,

    #[error("exit {0:?} is not reachable from any responder start")]
    UnreachableExit(String),

    #[error("grid of {cols}x{rows} cells is too large")]
    TooLarge { cols: u64, rows: u64 },
}

pub type GridResult<T> = Result<T, GridError>;
