//! Mutable per-room occupant bookkeeping.
//!
//! Every occupant is in exactly one of four buckets at all times: still in a
//! room, carried by a responder, rescued, or lost with a responder who died.
//! All transfers between buckets go through the methods here, so
//! [`OccupantTotals::is_conserved`] holds after every call.

use serde::Serialize;

use sweep_core::RoomId;

use crate::Topology;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RoomState {
    pub remaining: u32,
    pub cleared:   bool,
}

/// Snapshot of the four occupant buckets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OccupantTotals {
    pub total:      u32,
    pub remaining:  u32,
    pub in_transit: u32,
    pub rescued:    u32,
    pub lost:       u32,
}

impl OccupantTotals {
    pub fn is_conserved(&self) -> bool {
        self.remaining + self.in_transit + self.rescued + self.lost == self.total
    }

    /// No occupant is left in a room or in a responder's arms.
    pub fn all_accounted(&self) -> bool {
        self.remaining == 0 && self.in_transit == 0
    }
}

/// Room states plus bucket counters.
///
/// A room is cleared exactly when it holds nobody: rooms listed with no
/// occupants start cleared, a pick-up of the last occupant clears a room and
/// a drop-back re-opens it.  Exit rooms start cleared and are never
/// searched.  Occupants listed in an exit room are already outside and are
/// not counted.
#[derive(Clone, Debug)]
pub struct Occupancy {
    rooms:      Vec<RoomState>,
    is_exit:    Vec<bool>,
    total:      u32,
    remaining:  u32,
    in_transit: u32,
    rescued:    u32,
    lost:       u32,
}

impl Occupancy {
    pub fn new(topology: &Topology) -> Self {
        let rooms: Vec<RoomState> = topology
            .rooms
            .iter()
            .map(|r| {
                let remaining = if r.is_exit { 0 } else { r.initial_occupants };
                RoomState { remaining, cleared: remaining == 0 }
            })
            .collect();
        let total = rooms.iter().map(|r| r.remaining).sum();
        Self {
            is_exit: topology.rooms.iter().map(|r| r.is_exit).collect(),
            rooms,
            total,
            remaining: total,
            in_transit: 0,
            rescued: 0,
            lost: 0,
        }
    }

    #[inline]
    pub fn room(&self, id: RoomId) -> RoomState {
        self.rooms[id.index()]
    }

    pub fn rooms(&self) -> &[RoomState] {
        &self.rooms
    }

    /// Take one occupant out of `room`.  The room is cleared when its count
    /// reaches zero.  Returns `false` (and changes nothing) if none remain.
    pub fn pick_up(&mut self, room: RoomId) -> bool {
        let state = &mut self.rooms[room.index()];
        if state.remaining == 0 {
            return false;
        }
        state.remaining -= 1;
        if state.remaining == 0 {
            state.cleared = true;
        }
        self.remaining -= 1;
        self.in_transit += 1;
        true
    }

    /// A carried occupant reached an exit.
    pub fn deliver(&mut self) -> bool {
        if self.in_transit == 0 {
            return false;
        }
        self.in_transit -= 1;
        self.rescued += 1;
        true
    }

    /// Put a carried occupant back in `room`, re-opening it.
    pub fn drop_back(&mut self, room: RoomId) -> bool {
        if self.in_transit == 0 {
            return false;
        }
        self.in_transit -= 1;
        self.remaining += 1;
        let state = &mut self.rooms[room.index()];
        state.remaining += 1;
        state.cleared = false;
        true
    }

    /// A carried occupant died with its responder.
    pub fn lose(&mut self) -> bool {
        if self.in_transit == 0 {
            return false;
        }
        self.in_transit -= 1;
        self.lost += 1;
        true
    }

    pub fn totals(&self) -> OccupantTotals {
        OccupantTotals {
            total:      self.total,
            remaining:  self.remaining,
            in_transit: self.in_transit,
            rescued:    self.rescued,
            lost:       self.lost,
        }
    }

    /// Number of searchable (non-exit) rooms.
    pub fn searchable_rooms(&self) -> usize {
        self.is_exit.iter().filter(|&&e| !e).count()
    }

    /// Number of searchable rooms currently cleared.
    pub fn rooms_cleared(&self) -> usize {
        self.rooms
            .iter()
            .zip(&self.is_exit)
            .filter(|(r, e)| !**e && r.cleared)
            .count()
    }
}
