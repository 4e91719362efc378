//! Things that happened to a responder during one phase.

use serde::Serialize;

use sweep_core::{ResponderId, RoomId};

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ResponderEvent {
    pub responder: ResponderId,
    pub kind:      EventKind,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    Assigned { room: RoomId },
    ArrivedAtRoom { room: RoomId },
    PickedUp { room: RoomId },
    /// The responder's search left `room` empty.
    RoomCleared { room: RoomId },
    /// An occupant from `source` reached an exit.
    Delivered { source: RoomId },
    /// Escape threshold crossed; `dropped` is the room an abandoned occupant
    /// was returned to.
    Retreated { dropped: Option<RoomId> },
    ReachedSafety,
    /// The remaining route crossed fire and was replanned.
    Rerouted,
    /// No route to the target room under any stage.
    Stranded { room: RoomId },
    /// `carried` is the source room of an occupant held at death;
    /// `occupant_lost` says whether that occupant was counted lost.
    Died { carried: Option<RoomId>, occupant_lost: bool },
}

impl ResponderEvent {
    #[inline]
    pub fn new(responder: ResponderId, kind: EventKind) -> Self {
        Self { responder, kind }
    }
}
