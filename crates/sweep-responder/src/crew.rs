//! All responders plus the per-tick phases that drive them.
//!
//! The simulation calls, in order and once per tick:
//!
//! 1. [`Crew::check_safety`] after the hazard field has advanced,
//! 2. [`Crew::assign`] for every assignment the scheduler produced,
//! 3. [`Crew::advance`] to search, walk and deliver.
//!
//! Responders are always processed in ascending id order.

use tracing::{debug, info, warn};

use sweep_core::{CarriedOnDeath, CellId, ResponderConfig, ResponderId, RoomId};
use sweep_grid::{Occupancy, Topology};
use sweep_hazard::HazardField;
use sweep_path::{AStarRouter, Path, PathResult, Pathfinder, Router};

use crate::{
    EventKind, Goal, Responder, ResponderEvent, ResponderState, TransitionResult, Trigger,
};

/// Read-only view of the world a responder reacts to.
pub struct Surroundings<'a, R: Router = AStarRouter> {
    pub topology:   &'a Topology,
    pub hazard:     &'a HazardField,
    pub pathfinder: &'a Pathfinder<R>,
}

impl<'a, R: Router> Surroundings<'a, R> {
    pub fn new(topology: &'a Topology, hazard: &'a HazardField, pathfinder: &'a Pathfinder<R>) -> Self {
        Self { topology, hazard, pathfinder }
    }

    fn route_to_exit(&self, from: CellId) -> PathResult<Path> {
        self.pathfinder
            .route_to_nearest(&self.topology.grid, self.hazard, from, &self.topology.exits)
    }

    fn route_to(&self, from: CellId, goal: Goal) -> PathResult<Path> {
        match goal {
            Goal::Exit => self.route_to_exit(from),
            Goal::Room(room) => {
                let to = self.topology.room(room).interior;
                self.pathfinder.route_staged(&self.topology.grid, self.hazard, from, to)
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Crew {
    pub responders: Vec<Responder>,
    cfg:            ResponderConfig,
}

impl Crew {
    /// One idle responder per start cell, ids in start order.
    pub fn new(topology: &Topology, cfg: &ResponderConfig) -> Self {
        let responders = topology
            .responder_starts
            .iter()
            .enumerate()
            .map(|(i, &cell)| Responder::new(ResponderId(i as u32), cell, &topology.grid))
            .collect();
        Self { responders, cfg: cfg.clone() }
    }

    pub fn config(&self) -> &ResponderConfig {
        &self.cfg
    }

    pub fn len(&self) -> usize {
        self.responders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responders.is_empty()
    }

    pub fn get(&self, id: ResponderId) -> Option<&Responder> {
        self.responders.get(id.index())
    }

    pub fn get_mut(&mut self, id: ResponderId) -> Option<&mut Responder> {
        self.responders.get_mut(id.index())
    }

    pub fn alive_count(&self) -> usize {
        self.responders.iter().filter(|r| r.is_alive()).count()
    }

    pub fn all_dead(&self) -> bool {
        self.responders.iter().all(|r| !r.is_alive())
    }

    /// `(id, cell)` of every idle responder.
    pub fn idle(&self) -> impl Iterator<Item = (ResponderId, CellId)> + '_ {
        self.responders.iter().filter(|r| r.is_idle()).map(|r| (r.id, r.cell))
    }

    /// Cells of every live responder.
    pub fn alive_cells(&self) -> Vec<CellId> {
        self.responders.iter().filter(|r| r.is_alive()).map(|r| r.cell).collect()
    }

    /// Rooms some responder is currently heading to or searching.
    pub fn targeted_rooms(&self) -> Vec<RoomId> {
        self.responders.iter().filter_map(|r| r.state.target_room()).collect()
    }

    /// Number of occupants currently carried.
    pub fn carried(&self) -> u32 {
        self.responders.iter().filter(|r| r.carrying.is_some()).count() as u32
    }

    // ── Phase: safety ─────────────────────────────────────────────────────────

    /// Accumulate exposure and react to the danger at each live responder's
    /// cell.
    ///
    /// A burning cell or danger at or above the lethal threshold kills.  The
    /// carried occupant, if any, is lost or returned to its room depending on
    /// [`CarriedOnDeath`].  Danger at or above the escape threshold turns the
    /// responder around: the occupant is returned to its source room, the
    /// target is dropped and a route to the nearest exit is planned.
    /// Responders already retreating, or idle on an exit cell, are left
    /// alone.
    pub fn check_safety<R: Router>(
        &mut self,
        env:       &Surroundings<'_, R>,
        occupancy: &mut Occupancy,
        dt:        f32,
        events:    &mut Vec<ResponderEvent>,
    ) -> TransitionResult<()> {
        for r in self.responders.iter_mut().filter(|r| r.is_alive()) {
            let danger = env.hazard.danger(r.cell);
            r.exposure += danger * dt.max(0.0);

            if env.hazard.is_burning(r.cell) || danger >= self.cfg.lethal_threshold {
                let carried = r.carrying.take();
                r.apply(Trigger::Lethal)?;
                let occupant_lost = match (carried, self.cfg.carried_on_death) {
                    (Some(_), CarriedOnDeath::Lost) => occupancy.lose(),
                    (Some(source), CarriedOnDeath::ReturnToRoom) => {
                        occupancy.drop_back(source);
                        false
                    }
                    (None, _) => false,
                };
                info!(responder = r.id.0, cell = r.cell.0, danger, occupant_lost, "responder died");
                events.push(ResponderEvent::new(r.id, EventKind::Died { carried, occupant_lost }));
                continue;
            }

            if danger < self.cfg.escape_threshold
                || r.state == ResponderState::Retreating
                || (r.is_idle() && env.topology.is_exit_cell(r.cell))
            {
                continue;
            }

            let dropped = r.carrying.take();
            if let Some(source) = dropped {
                occupancy.drop_back(source);
            }
            r.apply(Trigger::Escape)?;
            match env.route_to_exit(r.cell) {
                Ok(path) => r.set_route(&path),
                Err(e) => {
                    r.clear_route();
                    warn!(responder = r.id.0, cell = r.cell.0, error = %e, "no route out, holding position");
                }
            }
            debug!(responder = r.id.0, danger, ?dropped, "retreating");
            events.push(ResponderEvent::new(r.id, EventKind::Retreated { dropped }));
        }
        Ok(())
    }

    // ── Phase: assignment ─────────────────────────────────────────────────────

    /// Send an idle responder to `room` along `path`.
    pub fn assign(
        &mut self,
        id:     ResponderId,
        room:   RoomId,
        path:   &Path,
        events: &mut Vec<ResponderEvent>,
    ) -> TransitionResult<()> {
        let Some(r) = self.get_mut(id) else {
            return Ok(());
        };
        r.apply(Trigger::Assigned(room))?;
        r.set_route(path);
        events.push(ResponderEvent::new(id, EventKind::Assigned { room }));
        Ok(())
    }

    // ── Phase: movement ───────────────────────────────────────────────────────

    /// Search, walk and deliver for every live responder.
    pub fn advance<R: Router>(
        &mut self,
        env:       &Surroundings<'_, R>,
        occupancy: &mut Occupancy,
        dt:        f32,
        events:    &mut Vec<ResponderEvent>,
    ) -> TransitionResult<()> {
        for r in self.responders.iter_mut().filter(|r| r.is_alive()) {
            match r.state {
                ResponderState::Idle | ResponderState::Dead => {}
                ResponderState::Searching { room, elapsed_secs } => {
                    search(r, &self.cfg, env, occupancy, room, elapsed_secs + dt, events)?;
                }
                // Transient; normally left in the same phase it is entered.
                ResponderState::Carrying { .. } => {
                    r.apply(Trigger::Depart)?;
                    head_out(r, env);
                }
                ResponderState::Moving { goal } => {
                    walk(r, &self.cfg, env, occupancy, Some(goal), dt, events)?;
                }
                ResponderState::Retreating => {
                    walk(r, &self.cfg, env, occupancy, None, dt, events)?;
                }
            }
        }
        Ok(())
    }
}

fn search<R: Router>(
    r:         &mut Responder,
    cfg:       &ResponderConfig,
    env:       &Surroundings<'_, R>,
    occupancy: &mut Occupancy,
    room:      RoomId,
    elapsed:   f32,
    events:    &mut Vec<ResponderEvent>,
) -> TransitionResult<()> {
    if elapsed < cfg.search_duration_secs {
        r.state = ResponderState::Searching { room, elapsed_secs: elapsed };
        return Ok(());
    }

    if occupancy.room(room).remaining == 0 {
        // Emptied by another responder on the way.
        debug!(responder = r.id.0, room = room.0, "search found nobody");
        return r.apply(Trigger::SearchDone { found: false });
    }

    r.pick_up(room)?;
    occupancy.pick_up(room);
    r.apply(Trigger::SearchDone { found: true })?;
    events.push(ResponderEvent::new(r.id, EventKind::PickedUp { room }));
    if occupancy.room(room).cleared {
        r.rooms_cleared += 1;
        events.push(ResponderEvent::new(r.id, EventKind::RoomCleared { room }));
    }
    debug!(responder = r.id.0, room = room.0, left = occupancy.room(room).remaining, "occupant picked up");

    r.apply(Trigger::Depart)?;
    head_out(r, env);
    Ok(())
}

/// Plan the carry to the nearest exit.  Without a route the responder waits
/// and retries on the next movement phase.
fn head_out<R: Router>(r: &mut Responder, env: &Surroundings<'_, R>) {
    match env.route_to_exit(r.cell) {
        Ok(path) => r.set_route(&path),
        Err(e) => {
            r.clear_route();
            warn!(responder = r.id.0, error = %e, "no route to an exit while carrying");
        }
    }
}

/// `goal` is `None` for a retreat.
fn walk<R: Router>(
    r:         &mut Responder,
    cfg:       &ResponderConfig,
    env:       &Surroundings<'_, R>,
    occupancy: &mut Occupancy,
    goal:      Option<Goal>,
    dt:        f32,
    events:    &mut Vec<ResponderEvent>,
) -> TransitionResult<()> {
    let goal_or_exit = goal.unwrap_or(Goal::Exit);

    if !r.has_route() || r.route_blocked(env.hazard) {
        let replanned = !r.route.is_empty();
        match env.route_to(r.cell, goal_or_exit) {
            Ok(path) => {
                r.set_route(&path);
                if replanned {
                    debug!(responder = r.id.0, "route crossed fire, replanned");
                    events.push(ResponderEvent::new(r.id, EventKind::Rerouted));
                }
            }
            Err(_) => {
                r.clear_route();
                if let Goal::Room(room) = goal_or_exit {
                    warn!(responder = r.id.0, room = room.0, "target room unreachable");
                    r.apply(Trigger::Stranded)?;
                    events.push(ResponderEvent::new(r.id, EventKind::Stranded { room }));
                }
                return Ok(());
            }
        }
    }

    let speed = r.speed(cfg);
    if !r.advance(&env.topology.grid, speed, dt, cfg.waypoint_tolerance_m) {
        return Ok(());
    }

    match goal {
        Some(Goal::Room(room)) => {
            r.apply(Trigger::PathComplete)?;
            events.push(ResponderEvent::new(r.id, EventKind::ArrivedAtRoom { room }));
        }
        Some(Goal::Exit) => {
            if r.carrying.is_some() {
                let source = r.deliver()?;
                occupancy.deliver();
                debug!(responder = r.id.0, source = source.0, "occupant delivered");
                events.push(ResponderEvent::new(r.id, EventKind::Delivered { source }));
            }
            r.apply(Trigger::PathComplete)?;
        }
        None => {
            r.apply(Trigger::PathComplete)?;
            events.push(ResponderEvent::new(r.id, EventKind::ReachedSafety));
        }
    }
    Ok(())
}
