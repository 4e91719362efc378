//! `sweep-schedule`: rank rooms and hand idle responders a target.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`context`]   | `ScheduleContext<'a, R>`: read-only view for one pass     |
//! | [`priority`]  | `priority()`: the per-room score                          |
//! | [`scheduler`] | `Scheduler`, `Assignment`, `IdleResponder`, `RoomAssessment` |
//!
//! # Design notes
//!
//! The scheduler never mutates rooms, occupants or responders.  It returns
//! [`Assignment`]s; the simulation applies them.  An unreachable room is not
//! an error here, it simply scores zero and is offered again next tick.

pub mod context;
pub mod priority;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use context::ScheduleContext;
pub use priority::priority;
pub use scheduler::{Assignment, IdleResponder, RoomAssessment, Scheduler};
