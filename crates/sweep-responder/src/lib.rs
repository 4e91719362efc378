//! `sweep-responder`: the responder lifecycle.
//!
//! # States
//!
//! ```text
//!            assigned             path complete        search elapsed
//!   Idle ───────────────▶ Moving(room) ─────────▶ Searching ─────────┐
//!    ▲  ◀────────────────────────────── nobody found ◀───────────────┤
//!    │                                                   found one   ▼
//!    │◀──── delivered ──── Moving(exit) ◀──────── depart ──── Carrying
//!    │
//!    │◀──── reached exit ── Retreating ◀── escape threshold (any live state)
//!
//!   any live state ── lethal threshold / burning cell ──▶ Dead (terminal)
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`state`]     | `ResponderState`, `Goal`, `Trigger`, `StateTag`: pure transitions |
//! | [`responder`] | `Responder`: position, path, carried occupant, counters     |
//! | [`event`]     | `ResponderEvent`, `EventKind`                                |
//! | [`crew`]      | `Crew`: safety checks, assignments, movement for all responders |
//! | [`error`]     | `TransitionError`, `TransitionResult<T>`                     |

pub mod crew;
pub mod error;
pub mod event;
pub mod responder;
pub mod state;


pub use crew::{Crew, Surroundings};
pub use error::{TransitionError, TransitionResult};
pub use event::{EventKind, ResponderEvent};
pub use responder::Responder;
pub use state::{Goal, ResponderState, StateTag, Trigger};
