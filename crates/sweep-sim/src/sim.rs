//! The `Sim` struct and its tick loop.

use serde::Serialize;
use tracing::{debug, info};

use sweep_core::{SimClock, SweepConfig, Tick};
use sweep_grid::{Occupancy, Topology};
use sweep_hazard::HazardField;
use sweep_path::{AStarRouter, Pathfinder, Router};
use sweep_responder::{Crew, ResponderEvent, Surroundings};
use sweep_schedule::{IdleResponder, ScheduleContext, Scheduler};

use crate::snapshot::{ResponderSnapshot, RoomSnapshot};
use crate::summary::{ratio, success_score};
use crate::{SimEvent, SimEventKind, SimObserver, SimResult, SimSummary, TickSnapshot};

/// Why a run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// No occupant is left in a room or being carried.
    AllAccounted,
    AllDead,
    TickCap,
}

/// The main simulation runner.
///
/// `Sim<R>` owns all simulation state and drives the four-phase tick loop
/// described in the crate docs.  The hazard field is owned here and lent
/// read-only to the pathfinder, scheduler and responders.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<R: Router = AStarRouter> {
    pub config:     SweepConfig,
    pub clock:      SimClock,
    pub topology:   Topology,
    pub hazard:     HazardField,
    pub occupancy:  Occupancy,
    pub pathfinder: Pathfinder<R>,
    pub scheduler:  Scheduler,
    pub crew:       Crew,

    /// Every event of the run so far, in order.
    pub(crate) events: Vec<SimEvent>,
}

impl<R: Router> Sim<R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until a stop condition holds and return the summary.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimSummary> {
        info!(tick = %self.clock.current_tick, "run started");
        let mut seen = 0;
        self.publish_events(&mut seen, observer);
        let interval = self.config.sim.snapshot_interval_ticks;
        if interval > 0 {
            observer.on_snapshot(&self.snapshot());
        }

        let reason = loop {
            if let Some(reason) = self.stop_condition() {
                break reason;
            }
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            self.step()?;
            let produced = self.publish_events(&mut seen, observer);
            observer.on_tick_end(now, produced);
            if interval > 0 && self.clock.current_tick.0.is_multiple_of(interval) {
                observer.on_snapshot(&self.snapshot());
            }
        };

        let summary = self.summary(reason);
        info!(
            reason = ?reason,
            ticks = summary.ticks,
            rescued = summary.occupants.rescued,
            lost = summary.occupants.lost,
            score = summary.success_score,
            "run finished"
        );
        observer.on_sim_end(&summary);
        Ok(summary)
    }

    /// Execute one tick.
    ///
    /// Returns the stop condition that holds afterwards, if any.  Once a stop
    /// condition holds, further calls change nothing.
    pub fn step(&mut self) -> SimResult<Option<StopReason>> {
        if let Some(reason) = self.stop_condition() {
            return Ok(Some(reason));
        }
        let now = self.clock.current_tick;
        let dt = self.clock.dt_secs;

        // ── Phase 1: hazard ───────────────────────────────────────────────
        let ignited = self.hazard.advance(dt);
        if !ignited.is_empty() {
            self.events.push(SimEvent { tick: now, kind: SimEventKind::FireSpread { cells: ignited.len() } });
        }

        let mut crew_events: Vec<ResponderEvent> = Vec::new();

        // ── Phase 2: safety ───────────────────────────────────────────────
        {
            let env = Surroundings::new(&self.topology, &self.hazard, &self.pathfinder);
            self.crew.check_safety(&env, &mut self.occupancy, dt, &mut crew_events)?;
        }

        // ── Phase 3: scheduling ───────────────────────────────────────────
        let idle: Vec<IdleResponder> = self
            .crew
            .idle()
            .map(|(id, cell)| IdleResponder { id, cell })
            .collect();
        if !idle.is_empty() {
            let ctx = ScheduleContext::new(&self.topology, &self.hazard, &self.occupancy, &self.pathfinder);
            let assignments = self.scheduler.assign(&ctx, &idle, &self.crew.targeted_rooms());
            for a in &assignments {
                self.crew.assign(a.responder, a.room, &a.path, &mut crew_events)?;
            }
        }

        // ── Phase 4: movement ─────────────────────────────────────────────
        {
            let env = Surroundings::new(&self.topology, &self.hazard, &self.pathfinder);
            self.crew.advance(&env, &mut self.occupancy, dt, &mut crew_events)?;
        }

        debug!(
            tick = %now,
            ignited = ignited.len(),
            events = crew_events.len(),
            burning = self.hazard.burning_count(),
            "tick complete"
        );
        self.events.extend(
            crew_events
                .into_iter()
                .map(|e| SimEvent { tick: now, kind: SimEventKind::Responder(e) }),
        );
        self.clock.advance();
        Ok(self.stop_condition())
    }

    /// All occupants accounted for, then all responders dead, then the tick
    /// cap, checked in that order.
    pub fn stop_condition(&self) -> Option<StopReason> {
        if self.occupancy.totals().all_accounted() {
            Some(StopReason::AllAccounted)
        } else if self.crew.all_dead() {
            Some(StopReason::AllDead)
        } else if self.clock.current_tick.0 >= self.config.sim.max_ticks {
            Some(StopReason::TickCap)
        } else {
            None
        }
    }

    /// Every event of the run so far.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Current state as published to observers.
    pub fn snapshot(&self) -> TickSnapshot {
        let ctx = ScheduleContext::new(&self.topology, &self.hazard, &self.occupancy, &self.pathfinder);
        let assessed = self.scheduler.assess(&ctx, &self.crew.alive_cells());
        let rooms = self
            .topology
            .rooms
            .iter()
            .zip(assessed)
            .map(|(room, a)| RoomSnapshot {
                room:       room.id,
                name:       room.name.clone(),
                cleared:    self.occupancy.room(room.id).cleared,
                remaining:  a.remaining,
                accessible: a.accessible,
                danger:     a.danger,
                priority:   a.priority,
            })
            .collect();

        TickSnapshot {
            tick:         self.clock.current_tick,
            elapsed_secs: self.clock.elapsed_secs(),
            danger:       self.hazard.dangers().to_vec(),
            burning:      self.hazard.burning_cells().to_vec(),
            rooms,
            responders:   self.crew.responders.iter().map(ResponderSnapshot::from).collect(),
            occupants:    self.occupancy.totals(),
        }
    }

    /// End-of-run metrics for a run stopped for `reason`.
    pub fn summary(&self, reason: StopReason) -> SimSummary {
        let occupants = self.occupancy.totals();
        let rooms_total = self.occupancy.searchable_rooms();
        let rooms_cleared = self.occupancy.rooms_cleared();
        let elapsed_secs = self.clock.elapsed_secs();
        let time_cap = self.config.sim.max_ticks as f32 * self.clock.dt_secs;
        let responders = &self.crew.responders;
        let mean_exposure = if responders.is_empty() {
            0.0
        } else {
            responders.iter().map(|r| r.exposure).sum::<f32>() / responders.len() as f32
        };

        SimSummary {
            stop_reason: reason,
            ticks: self.clock.current_tick.0,
            elapsed_secs,
            occupants,
            rooms_total,
            rooms_cleared,
            responders_total: responders.len(),
            responders_alive: self.crew.alive_count(),
            burning_cells: self.hazard.burning_count(),
            max_danger: self.hazard.max_danger(),
            total_distance_m: responders.iter().map(|r| r.distance_m).sum(),
            mean_exposure,
            success_score: success_score(
                ratio(occupants.rescued as usize, occupants.total as usize),
                ratio(rooms_cleared, rooms_total),
                elapsed_secs,
                time_cap,
            ),
        }
    }

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Hand events from `*seen` on to the observer; returns how many.
    fn publish_events<O: SimObserver>(&self, seen: &mut usize, observer: &mut O) -> usize {
        let fresh = self.events.get(*seen..).unwrap_or(&[]);
        for event in fresh {
            observer.on_event(event);
        }
        *seen = self.events.len();
        fresh.len()
    }
}
