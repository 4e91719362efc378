//! Scenario tests for sweep-sim.

use sweep_core::{Point, ResponderId, RoomId, SweepConfig, Tick};
use sweep_grid::{ConnectionSpec, LayoutSpec, RoomKind, RoomSpec, Topology};
use sweep_responder::{ResponderState, StateTag};

use crate::{NoopObserver, Sim, SimBuilder, SimObserver, StopReason, TickSnapshot};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(max_ticks: u64) -> SweepConfig {
    let mut cfg = SweepConfig::default();
    cfg.sim.max_ticks = max_ticks;
    cfg
}

fn build(layout: &LayoutSpec, cfg: SweepConfig) -> Sim {
    SimBuilder::from_layout(layout, cfg).unwrap().build().unwrap()
}

fn room_id(topo: &Topology, name: &str) -> RoomId {
    topo.rooms.iter().find(|r| r.name == name).map(|r| r.id).unwrap()
}

/// Two offices on a hallway; the fire starts in office1.
fn two_offices(office0: u32, office1: u32, responders: usize) -> LayoutSpec {
    let mut layout = LayoutSpec::office_row(2, 0, responders);
    layout.rooms[2].occupants = office0;
    layout.rooms[3].occupants = office1;
    layout
}

/// lobby (exit) | office (fire origin) | vault with no door anywhere.
fn with_vault() -> LayoutSpec {
    let room = |id: &str, x: f32, occupants: u32| RoomSpec {
        id: id.into(),
        x,
        y: 3.0,
        width: 6.0,
        height: 6.0,
        occupants,
        is_exit: false,
        kind: RoomKind::Room,
    };
    LayoutSpec {
        name: "vault".into(),
        rooms: vec![
            RoomSpec { is_exit: true, kind: RoomKind::Hallway, width: 4.0, ..room("lobby", 2.0, 0) },
            room("office", 7.0, 1),
            room("vault", 13.0, 4),
        ],
        connections: vec![ConnectionSpec { from: "lobby".into(), to: "office".into(), door: None }],
        fire_origin: "office".into(),
        responder_starts: vec![Point::new(1.0, 3.0)],
    }
}

/// Keeps every snapshot.
#[derive(Default)]
struct Recorder {
    snapshots: Vec<TickSnapshot>,
    ticks:     u64,
    ended:     bool,
}

impl SimObserver for Recorder {
    fn on_tick_end(&mut self, _tick: Tick, _events: usize) {
        self.ticks += 1;
    }

    fn on_snapshot(&mut self, snapshot: &TickSnapshot) {
        self.snapshots.push(snapshot.clone());
    }

    fn on_sim_end(&mut self, _summary: &crate::SimSummary) {
        self.ended = true;
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{SimError, SimEventKind};

    #[test]
    fn builds_from_layout() {
        let sim = build(&LayoutSpec::office_row(3, 2, 2), config(100));
        assert_eq!(sim.crew.len(), 2);
        assert_eq!(sim.occupancy.totals().total, 6);
        assert_eq!(sim.current_tick(), Tick::ZERO);
        assert!(sim.hazard.burning_count() > 0, "fire origin seeded");
        assert!(matches!(sim.events()[0].kind, SimEventKind::FireStarted { cells } if cells > 0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut cfg = config(100);
        cfg.responder.escape_threshold = 0.99;
        cfg.responder.lethal_threshold = 0.5;
        let err = SimBuilder::from_layout(&LayoutSpec::office_row(1, 1, 1), cfg).unwrap().build();
        assert!(matches!(err, Err(SimError::Config(_))));
    }

    #[test]
    fn unknown_fire_origin_is_rejected() {
        let mut layout = LayoutSpec::office_row(1, 1, 1);
        layout.fire_origin = "basement".into();
        assert!(matches!(SimBuilder::from_layout(&layout, config(10)), Err(SimError::Grid(_))));
    }
}

// ── Stepping and stop conditions ──────────────────────────────────────────────

#[cfg(test)]
mod stepping {
    use super::*;

    #[test]
    fn nobody_to_rescue_stops_immediately() {
        let mut sim = build(&LayoutSpec::office_row(2, 0, 1), config(100));
        let summary = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(summary.stop_reason, StopReason::AllAccounted);
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.rooms_cleared, summary.rooms_total);
    }

    #[test]
    fn tick_cap_stops_the_run() {
        let mut sim = build(&with_vault(), config(5));
        let mut rec = Recorder::default();
        let summary = sim.run(&mut rec).unwrap();
        assert_eq!(summary.stop_reason, StopReason::TickCap);
        assert_eq!(summary.ticks, 5);
        assert_eq!(rec.ticks, 5);
        assert!(rec.ended);
    }

    #[test]
    fn step_after_stop_changes_nothing() {
        let mut sim = build(&with_vault(), config(2));
        assert_eq!(sim.step().unwrap(), None);
        assert_eq!(sim.step().unwrap(), Some(StopReason::TickCap));
        let before = sim.snapshot();
        assert_eq!(sim.step().unwrap(), Some(StopReason::TickCap));
        assert_eq!(sim.snapshot(), before);
    }

    #[test]
    fn snapshots_follow_the_interval() {
        let mut cfg = config(12);
        cfg.sim.snapshot_interval_ticks = 5;
        let mut sim = build(&with_vault(), cfg);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        let ticks: Vec<u64> = rec.snapshots.iter().map(|s| s.tick.0).collect();
        assert_eq!(ticks, vec![0, 5, 10]);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let mut cfg = config(4);
        cfg.sim.snapshot_interval_ticks = 0;
        let mut sim = build(&with_vault(), cfg);
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert!(rec.snapshots.is_empty());
    }
}

// ── Invariants every tick ─────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    fn recorded_run(layout: &LayoutSpec, max_ticks: u64) -> Vec<TickSnapshot> {
        let mut sim = build(layout, config(max_ticks));
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        rec.snapshots
    }

    #[test]
    fn danger_stays_in_unit_range_and_fire_is_one() {
        for snap in recorded_run(&two_offices(3, 2, 2), 300) {
            for (d, &burning) in snap.danger.iter().zip(&snap.burning) {
                assert!((0.0..=1.0).contains(d), "{}: danger {d}", snap.tick);
                if burning {
                    assert_eq!(*d, 1.0);
                }
            }
        }
    }

    #[test]
    fn occupants_are_conserved() {
        for snap in recorded_run(&two_offices(3, 2, 2), 300) {
            let t = snap.occupants;
            assert!(t.is_conserved(), "{}: {t:?}", snap.tick);
            assert_eq!(t.in_transit, snap.carrying_count(), "{}", snap.tick);
            let in_rooms: u32 = snap.rooms.iter().map(|r| r.remaining).sum();
            assert_eq!(in_rooms, t.remaining);
        }
    }

    #[test]
    fn sealed_room_never_burns_and_never_scores() {
        let mut sim = build(&with_vault(), config(400));
        let vault = room_id(&sim.topology, "vault");
        let cells = sim.topology.room(vault).cells.clone();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();

        for snap in &rec.snapshots {
            let room = &snap.rooms[vault.index()];
            assert!(!room.accessible, "{}", snap.tick);
            assert_eq!(room.priority, 0.0, "{}", snap.tick);
            assert!(cells.iter().all(|c| !snap.burning[c.index()]), "{}: fire crossed a wall", snap.tick);
        }
    }

    #[test]
    fn dead_stay_dead() {
        let snaps = recorded_run(&two_offices(3, 2, 2), 300);
        let mut died_at: Vec<Option<usize>> = vec![None; 2];
        for (i, snap) in snaps.iter().enumerate() {
            for r in &snap.responders {
                if let Some(first) = died_at[r.id.index()] {
                    let then = &snaps[first].responders[r.id.index()];
                    assert!(!r.alive);
                    assert_eq!(r.position, then.position);
                    assert_eq!(r.distance_m, then.distance_m);
                } else if !r.alive {
                    assert_eq!(r.state, StateTag::Dead);
                    died_at[r.id.index()] = Some(i);
                }
            }
        }
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;
    use crate::{EventLog, SimEventKind};
    use sweep_responder::EventKind;

    #[test]
    fn two_responders_empty_one_room() {
        let mut sim = build(&two_offices(2, 0, 2), config(300));
        let office0 = room_id(&sim.topology, "office0");
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(summary.stop_reason, StopReason::AllAccounted);
        assert_eq!(summary.occupants.rescued, 2);
        assert_eq!(sim.occupancy.room(office0).remaining, 0);
        assert!(sim.occupancy.room(office0).cleared);
        assert_eq!(sim.crew.get(ResponderId(0)).unwrap().rescued, 1);
        assert_eq!(sim.crew.get(ResponderId(1)).unwrap().rescued, 1);
        assert!(summary.success_score > 0.5);
    }

    #[test]
    fn responder_in_burning_cell_dies_that_tick() {
        let mut sim = build(&LayoutSpec::office_row(2, 2, 2), config(100));
        let cell = sim.crew.get(ResponderId(0)).unwrap().cell;
        sim.hazard.ignite(cell);

        sim.step().unwrap();
        let r = sim.crew.get(ResponderId(0)).unwrap().clone();
        assert_eq!(r.state, ResponderState::Dead);
        assert!(!r.is_alive());

        for _ in 0..10 {
            sim.step().unwrap();
        }
        let later = sim.crew.get(ResponderId(0)).unwrap();
        assert_eq!(later.position, r.position);
        assert_eq!(later.distance_m, r.distance_m);
    }

    #[test]
    fn all_dead_stops_the_run() {
        let mut sim = build(&LayoutSpec::office_row(2, 2, 2), config(100));
        let cells: Vec<_> = sim.crew.responders.iter().map(|r| r.cell).collect();
        for c in cells {
            sim.hazard.ignite(c);
        }
        assert_eq!(sim.step().unwrap(), Some(StopReason::AllDead));
        let summary = sim.summary(StopReason::AllDead);
        assert_eq!(summary.responders_alive, 0);
        assert_eq!(summary.occupants.rescued, 0);
    }

    #[test]
    fn identical_inputs_give_identical_runs() {
        let layout = two_offices(3, 2, 3);
        let run = || {
            let mut sim = build(&layout, config(250));
            let mut log = EventLog::default();
            let summary = sim.run(&mut log).unwrap();
            (summary, log.events, sim.snapshot())
        };
        let (s1, e1, snap1) = run();
        let (s2, e2, snap2) = run();
        assert_eq!(s1, s2);
        assert_eq!(e1, e2);
        assert_eq!(snap1, snap2);
    }

    #[test]
    fn event_log_tells_the_rescue_story() {
        let mut sim = build(&two_offices(1, 0, 1), config(300));
        let mut log = EventLog::default();
        sim.run(&mut log).unwrap();

        let kinds: Vec<&EventKind> = log
            .events
            .iter()
            .filter_map(|e| match &e.kind {
                SimEventKind::Responder(r) => Some(&r.kind),
                _ => None,
            })
            .collect();
        let pos = |want: fn(&EventKind) -> bool| kinds.iter().position(|k| want(k));
        let assigned = pos(|k| matches!(k, EventKind::Assigned { .. })).unwrap();
        let arrived = pos(|k| matches!(k, EventKind::ArrivedAtRoom { .. })).unwrap();
        let picked = pos(|k| matches!(k, EventKind::PickedUp { .. })).unwrap();
        let delivered = pos(|k| matches!(k, EventKind::Delivered { .. })).unwrap();
        assert!(assigned < arrived && arrived < picked && picked < delivered);
        assert!(log.events.windows(2).all(|w| w[0].tick <= w[1].tick));
    }

    #[test]
    fn summary_serializes() {
        let mut sim = build(&two_offices(1, 0, 1), config(300));
        let summary = sim.run(&mut NoopObserver).unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["stop_reason"], "all_accounted");
        assert_eq!(json["occupants"]["rescued"], 1);
    }
}

// ── Success score ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod score {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::summary::success_score;

    #[test]
    fn weights_sum_to_one() {
        assert_abs_diff_eq!(success_score(1.0, 1.0, 0.0, 600.0), 1.0);
        assert_abs_diff_eq!(success_score(0.0, 0.0, 600.0, 600.0), 0.0);
    }

    #[test]
    fn partial_credit() {
        assert_abs_diff_eq!(success_score(0.5, 1.0, 300.0, 600.0), 0.25 + 0.3 + 0.1, epsilon = 1e-6);
    }

    /// Fire seeded but practically not spreading.
    fn smouldering(max_ticks: u64) -> SweepConfig {
        let mut cfg = config(max_ticks);
        cfg.hazard.growth_rate = 1e-6;
        cfg
    }

    #[test]
    fn clean_sweep_clears_every_room() {
        let mut sim = build(&two_offices(1, 0, 1), smouldering(300));
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(summary.stop_reason, StopReason::AllAccounted);
        assert_eq!(summary.occupants.rescued, 1);
        assert_eq!(summary.rooms_total, 3, "hallway and both offices");
        assert_eq!(summary.rooms_cleared, summary.rooms_total);
        assert_abs_diff_eq!(summary.rescue_rate(), 1.0);
        assert_abs_diff_eq!(summary.clearance_rate(), 1.0);

        let time_left = 1.0 - summary.elapsed_secs / 300.0;
        assert_abs_diff_eq!(summary.success_score, 0.8 + 0.2 * time_left, epsilon = 1e-5);
        assert!(summary.success_score > 0.8);
    }

    #[test]
    fn run_cut_short_earns_partial_credit() {
        let mut sim = build(&two_offices(1, 0, 1), smouldering(3));
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(summary.stop_reason, StopReason::TickCap);
        assert_eq!(summary.occupants.rescued, 0);
        assert_eq!(summary.rooms_cleared, 2, "only the rooms that never held anyone");
        assert_abs_diff_eq!(summary.clearance_rate(), 2.0 / 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(summary.success_score, 0.3 * 2.0 / 3.0, epsilon = 1e-5);
    }

    #[test]
    fn overrun_earns_no_time_credit() {
        assert_abs_diff_eq!(success_score(1.0, 0.0, 900.0, 600.0), 0.5);
        assert_abs_diff_eq!(success_score(1.0, 0.0, 10.0, 0.0), 0.5);
    }
}
