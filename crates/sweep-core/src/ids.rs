//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they work as map keys and sort keys.
//! The inner integer is `pub` so SoA-style `Vec`s can be indexed directly,
//! but callers should prefer `.index()`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Row-major index of a grid cell (`row * width + col`).
    pub struct CellId(u32);
}

typed_id! {
    /// Index of a room in the topology's room table.
    pub struct RoomId(u32);
}

typed_id! {
    /// Index of a responder in the simulation's responder table.
    /// Responders are never removed, so the index is stable for a run.
    pub struct ResponderId(u32);
}
