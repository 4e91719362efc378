//! Responder states and the transition function.
//!
//! [`ResponderState::next`] is pure: it maps `(state, trigger)` to the next
//! state and knows nothing about grids, rooms or occupants.  Side effects
//! (routing, picking people up, counters) are the job of
//! [`Crew`][crate::Crew], which fires triggers and reacts to the result.

use serde::Serialize;

use sweep_core::RoomId;

use crate::{TransitionError, TransitionResult};

/// Where a moving responder is headed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Goal {
    /// The interior cell of a room to search.
    Room(RoomId),
    /// The nearest reachable exit.
    Exit,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResponderState {
    /// Available for assignment.
    Idle,
    Moving { goal: Goal },
    /// Inside `room`, `elapsed_secs` into the search.
    Searching { room: RoomId, elapsed_secs: f32 },
    /// Just picked up an occupant from `source`.  Left immediately for
    /// `Moving { goal: Exit }`.
    Carrying { source: RoomId },
    /// Abandoned its task; heading for the nearest exit.
    Retreating,
    Dead,
}

/// Fieldless mirror of [`ResponderState`] for snapshots and errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum StateTag {
    Idle,
    Moving,
    Searching,
    Carrying,
    Retreating,
    Dead,
}

/// Events that drive the state machine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// The scheduler handed out a target room.
    Assigned(RoomId),
    /// The current path has been walked to its end.
    PathComplete,
    /// The search timer ran out; `found` if an occupant was picked up.
    SearchDone { found: bool },
    /// Leave with the occupant.
    Depart,
    /// No route to the target room exists any more.
    Stranded,
    /// Danger at the current cell reached the escape threshold.
    Escape,
    /// Danger reached the lethal threshold, or the cell is burning.
    Lethal,
}

impl ResponderState {
    pub fn tag(&self) -> StateTag {
        match self {
            ResponderState::Idle => StateTag::Idle,
            ResponderState::Moving { .. } => StateTag::Moving,
            ResponderState::Searching { .. } => StateTag::Searching,
            ResponderState::Carrying { .. } => StateTag::Carrying,
            ResponderState::Retreating => StateTag::Retreating,
            ResponderState::Dead => StateTag::Dead,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        matches!(self, ResponderState::Dead)
    }

    /// Room this responder is working on, if any.
    pub fn target_room(&self) -> Option<RoomId> {
        match *self {
            ResponderState::Moving { goal: Goal::Room(room) } => Some(room),
            ResponderState::Searching { room, .. } => Some(room),
            _ => None,
        }
    }

    /// The transition function.
    ///
    /// `Lethal` and `Escape` apply from every live state.  Everything not
    /// listed is an invalid transition; nothing leaves `Dead`.
    pub fn next(self, trigger: Trigger) -> TransitionResult<ResponderState> {
        self.successor(trigger)
            .ok_or(TransitionError::Invalid { state: self.tag(), trigger })
    }

    fn successor(self, trigger: Trigger) -> Option<ResponderState> {
        use ResponderState::*;

        match (self, trigger) {
            (Dead, _) => None,
            (_, Trigger::Lethal) => Some(Dead),
            (_, Trigger::Escape) => Some(Retreating),

            (Idle, Trigger::Assigned(room)) => Some(Moving { goal: Goal::Room(room) }),

            (Moving { goal: Goal::Room(room) }, Trigger::PathComplete) => {
                Some(Searching { room, elapsed_secs: 0.0 })
            }
            (Moving { goal: Goal::Room(_) }, Trigger::Stranded) => Some(Idle),

            (Searching { room, .. }, Trigger::SearchDone { found: true }) => {
                Some(Carrying { source: room })
            }
            (Searching { .. }, Trigger::SearchDone { found: false }) => Some(Idle),

            (Carrying { .. }, Trigger::Depart) => Some(Moving { goal: Goal::Exit }),

            // Delivery (or arrival empty-handed) and safe arrival both free
            // the responder.
            (Moving { goal: Goal::Exit }, Trigger::PathComplete) => Some(Idle),
            (Retreating, Trigger::PathComplete) => Some(Idle),

            _ => None,
        }
    }
}
