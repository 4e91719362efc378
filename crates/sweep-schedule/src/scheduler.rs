//! Target selection for idle responders.

use serde::Serialize;
use tracing::debug;

use sweep_core::{CellId, PriorityConfig, ResponderId, RoomId};
use sweep_path::{Path, Router};

use crate::{ScheduleContext, priority};

/// Scores closer than this are treated as equal and fall through to the
/// travel-distance tie-break.
const PRIORITY_EPSILON: f32 = 1e-6;

/// An idle, alive responder waiting for work.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IdleResponder {
    pub id:   ResponderId,
    pub cell: CellId,
}

/// A target handed to one responder.  Applying it is the caller's job.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub responder: ResponderId,
    pub room:      RoomId,
    pub priority:  f32,
    /// Route to the room's interior under the assignment stage.
    pub path:      Path,
}

/// Per-room scoring, as published in snapshots.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct RoomAssessment {
    pub room:       RoomId,
    /// Reachable from at least one of the responders assessed.
    pub accessible: bool,
    pub danger:     f32,
    pub remaining:  u32,
    pub priority:   f32,
}

/// The priority scheduler.
#[derive(Clone, Debug)]
pub struct Scheduler {
    cfg: PriorityConfig,
}

impl Scheduler {
    pub fn new(cfg: &PriorityConfig) -> Self {
        Self { cfg: cfg.clone() }
    }

    pub fn config(&self) -> &PriorityConfig {
        &self.cfg
    }

    /// Score every room as seen from `from` (the cells of the responders
    /// still alive).  A room is accessible if any of them can reach it.
    ///
    /// Exit rooms and cleared rooms are listed with priority zero.
    pub fn assess<R: Router>(&self, ctx: &ScheduleContext<'_, R>, from: &[CellId]) -> Vec<RoomAssessment> {
        let grid = &ctx.topology.grid;
        let mut reach = vec![false; grid.cell_count()];
        for &cell in from {
            let r = ctx.pathfinder.reachable(grid, ctx.hazard, cell, self.cfg.assignment_stage);
            for (acc, hit) in reach.iter_mut().zip(r) {
                *acc |= hit;
            }
        }

        ctx.topology
            .rooms
            .iter()
            .map(|room| {
                let state = ctx.occupancy.room(room.id);
                let accessible = reach[room.interior.index()];
                let danger = ctx.hazard.room_danger(room);
                let candidate = !room.is_exit && !state.cleared;
                RoomAssessment {
                    room: room.id,
                    accessible,
                    danger,
                    remaining: state.remaining,
                    priority: if candidate {
                        priority(&self.cfg, accessible, state.remaining, danger)
                    } else {
                        0.0
                    },
                }
            })
            .collect()
    }

    /// Pick a target for each idle responder, in ascending id order.
    ///
    /// Only uncleared, non-exit rooms reachable under the assignment stage
    /// with a positive priority are offered.  The highest priority wins; ties
    /// go to the shorter route, then the lower room id.  With
    /// `exclusive_targeting`, rooms in `targeted` (and rooms handed out
    /// earlier in this pass) are skipped.
    ///
    /// Responders with no eligible room get no assignment and stay idle.
    pub fn assign<R: Router>(
        &self,
        ctx:      &ScheduleContext<'_, R>,
        idle:     &[IdleResponder],
        targeted: &[RoomId],
    ) -> Vec<Assignment> {
        let grid = &ctx.topology.grid;
        let stage = self.cfg.assignment_stage;
        let mut taken: Vec<RoomId> = targeted.to_vec();

        let mut order: Vec<IdleResponder> = idle.to_vec();
        order.sort_by_key(|r| r.id);

        let mut out = Vec::new();
        for responder in order {
            let reach = ctx.pathfinder.reachable(grid, ctx.hazard, responder.cell, stage);

            let scored: Vec<(RoomId, f32)> = ctx
                .topology
                .rooms
                .iter()
                .filter(|room| !room.is_exit)
                .filter(|room| !ctx.occupancy.room(room.id).cleared)
                .filter(|room| !(self.cfg.exclusive_targeting && taken.contains(&room.id)))
                .map(|room| {
                    let state = ctx.occupancy.room(room.id);
                    let accessible = reach[room.interior.index()];
                    let p = priority(&self.cfg, accessible, state.remaining, ctx.hazard.room_danger(room));
                    (room.id, p)
                })
                .filter(|&(_, p)| p > 0.0)
                .collect();

            let Some(best) = scored.iter().map(|&(_, p)| p).reduce(f32::max) else {
                continue;
            };

            // Among the top-scoring rooms, the shortest route wins.
            let mut choice: Option<(RoomId, f32, Path)> = None;
            for &(room, p) in &scored {
                if best - p > PRIORITY_EPSILON {
                    continue;
                }
                let goal = ctx.topology.room(room).interior;
                let Ok(path) = ctx.pathfinder.route(grid, ctx.hazard, responder.cell, goal, stage) else {
                    continue;
                };
                let len = path.length_m(grid);
                let better = match &choice {
                    None => true,
                    Some((prev_room, _, prev_path)) => {
                        let prev_len = prev_path.length_m(grid);
                        len < prev_len || (len == prev_len && room < *prev_room)
                    }
                };
                if better {
                    choice = Some((room, p, path));
                }
            }

            if let Some((room, p, path)) = choice {
                debug!(
                    responder = responder.id.0,
                    room = %ctx.topology.room(room).name,
                    priority = p,
                    "target assigned"
                );
                taken.push(room);
                out.push(Assignment { responder: responder.id, room, priority: p, path });
            }
        }
        out
    }
}
