//! Unit tests for sweep-schedule.

use sweep_core::{GridConfig, HazardConfig, PathConfig, Point, PriorityConfig, ResponderId, RoomId};
use sweep_grid::{ConnectionSpec, LayoutSpec, Occupancy, RoomKind, RoomSpec, Topology, TopologyBuilder};
use sweep_hazard::HazardField;
use sweep_path::Pathfinder;

use crate::{IdleResponder, ScheduleContext, Scheduler};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn build(layout: &LayoutSpec) -> Topology {
    TopologyBuilder::new(&GridConfig::default()).build(layout).unwrap()
}

fn room_id(topo: &Topology, name: &str) -> RoomId {
    topo.rooms.iter().find(|r| r.name == name).map(|r| r.id).unwrap()
}

/// Three offices along a hallway, exit at the west end.
fn offices(occupants: [u32; 3]) -> Topology {
    let mut layout = LayoutSpec::office_row(3, 0, 2);
    for (i, n) in occupants.into_iter().enumerate() {
        layout.rooms[2 + i].occupants = n;
    }
    build(&layout)
}

fn idle_at_starts(topo: &Topology) -> Vec<IdleResponder> {
    topo.responder_starts
        .iter()
        .enumerate()
        .map(|(i, &cell)| IdleResponder { id: ResponderId(i as u32), cell })
        .collect()
}

struct Fixture {
    topo:       Topology,
    hazard:     HazardField,
    occupancy:  Occupancy,
    pathfinder: Pathfinder,
}

impl Fixture {
    fn calm(topo: Topology) -> Self {
        let hazard = HazardField::new(&topo.grid, &HazardConfig::default());
        let occupancy = Occupancy::new(&topo);
        Self { topo, hazard, occupancy, pathfinder: Pathfinder::from_config(&PathConfig::default()) }
    }

    fn ctx(&self) -> ScheduleContext<'_, sweep_path::AStarRouter> {
        ScheduleContext::new(&self.topo, &self.hazard, &self.occupancy, &self.pathfinder)
    }
}

// ── Priority formula ──────────────────────────────────────────────────────────

#[cfg(test)]
mod formula {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::priority;

    fn with_lambda(danger_weight: f32) -> PriorityConfig {
        PriorityConfig { danger_weight, ..PriorityConfig::default() }
    }

    #[test]
    fn inaccessible_or_empty_rooms_score_zero() {
        let cfg = PriorityConfig::default();
        assert_eq!(priority(&cfg, false, 10, 0.5), 0.0);
        assert_eq!(priority(&cfg, true, 0, 0.5), 0.0);
    }

    #[test]
    fn positive_lambda_favors_danger() {
        let cfg = with_lambda(1.0);
        assert!(priority(&cfg, true, 3, 0.8) > priority(&cfg, true, 3, 0.1));
        assert_abs_diff_eq!(priority(&cfg, true, 3, 0.5), 4.5);
    }

    #[test]
    fn negative_lambda_favors_safety() {
        let cfg = with_lambda(-0.5);
        assert!(priority(&cfg, true, 3, 0.1) > priority(&cfg, true, 3, 0.8));
    }

    #[test]
    fn lambda_at_minus_one_zeroes_fully_dangerous_room() {
        let cfg = with_lambda(-1.0);
        assert_eq!(priority(&cfg, true, 5, 1.0), 0.0);
        let cfg = with_lambda(-3.0);
        assert_eq!(priority(&cfg, true, 5, 0.9), 0.0, "never negative");
    }

    #[test]
    fn occupant_weight_scales() {
        let cfg = PriorityConfig { occupant_weight: 2.0, danger_weight: 0.0, ..PriorityConfig::default() };
        assert_abs_diff_eq!(priority(&cfg, true, 3, 0.7), 6.0);
    }
}

// ── Assignment ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod assign {
    use super::*;

    #[test]
    fn most_occupied_room_wins() {
        let fx = Fixture::calm(offices([1, 5, 2]));
        let sched = Scheduler::new(&PriorityConfig::default());
        let out = sched.assign(&fx.ctx(), &idle_at_starts(&fx.topo)[..1], &[]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].room, room_id(&fx.topo, "office1"));
        assert_eq!(out[0].path.goal(), Some(fx.topo.room(out[0].room).interior));
    }

    #[test]
    fn equal_priority_goes_to_nearest_room() {
        let fx = Fixture::calm(offices([2, 2, 2]));
        let sched = Scheduler::new(&PriorityConfig::default());
        let out = sched.assign(&fx.ctx(), &idle_at_starts(&fx.topo)[..1], &[]);
        assert_eq!(out[0].room, room_id(&fx.topo, "office0"));
    }

    #[test]
    fn shared_targeting_allows_duplicates() {
        let fx = Fixture::calm(offices([1, 5, 2]));
        let sched = Scheduler::new(&PriorityConfig::default());
        let out = sched.assign(&fx.ctx(), &idle_at_starts(&fx.topo), &[]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].room, out[1].room);
    }

    #[test]
    fn exclusive_targeting_spreads_responders() {
        let fx = Fixture::calm(offices([1, 5, 2]));
        let cfg = PriorityConfig { exclusive_targeting: true, ..PriorityConfig::default() };
        let out = Scheduler::new(&cfg).assign(&fx.ctx(), &idle_at_starts(&fx.topo), &[]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].room, room_id(&fx.topo, "office1"));
        assert_eq!(out[1].room, room_id(&fx.topo, "office2"));
    }

    #[test]
    fn exclusive_targeting_respects_existing_targets() {
        let fx = Fixture::calm(offices([1, 5, 2]));
        let cfg = PriorityConfig { exclusive_targeting: true, ..PriorityConfig::default() };
        let busy = [room_id(&fx.topo, "office1")];
        let out = Scheduler::new(&cfg).assign(&fx.ctx(), &idle_at_starts(&fx.topo)[..1], &busy);
        assert_eq!(out[0].room, room_id(&fx.topo, "office2"));
    }

    #[test]
    fn cleared_rooms_are_not_offered() {
        let mut fx = Fixture::calm(offices([1, 0, 0]));
        let office0 = room_id(&fx.topo, "office0");
        fx.occupancy.pick_up(office0);
        let sched = Scheduler::new(&PriorityConfig::default());
        assert!(sched.assign(&fx.ctx(), &idle_at_starts(&fx.topo), &[]).is_empty());
    }

    #[test]
    fn assignments_follow_responder_id_order() {
        let fx = Fixture::calm(offices([1, 5, 2]));
        let cfg = PriorityConfig { exclusive_targeting: true, ..PriorityConfig::default() };
        let mut idle = idle_at_starts(&fx.topo);
        idle.reverse();
        let out = Scheduler::new(&cfg).assign(&fx.ctx(), &idle, &[]);
        assert_eq!(out[0].responder, ResponderId(0));
        assert_eq!(out[0].room, room_id(&fx.topo, "office1"));
    }

    #[test]
    fn assignment_does_not_touch_occupancy() {
        let fx = Fixture::calm(offices([1, 5, 2]));
        let before = fx.occupancy.totals();
        Scheduler::new(&PriorityConfig::default()).assign(&fx.ctx(), &idle_at_starts(&fx.topo), &[]);
        assert_eq!(fx.occupancy.totals(), before);
    }
}

// ── Accessibility ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod accessibility {
    use super::*;

    /// Exit lobby, a connected office, and a vault with no door.
    fn with_vault() -> Topology {
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
        build(&LayoutSpec {
            name: "vault".into(),
            rooms: vec![
                RoomSpec { is_exit: true, kind: RoomKind::Hallway, width: 4.0, ..room("lobby", 2.0, 0) },
                room("office", 7.0, 1),
                room("vault", 13.0, 9),
            ],
            connections: vec![ConnectionSpec { from: "lobby".into(), to: "office".into(), door: None }],
            fire_origin: "office".into(),
            responder_starts: vec![Point::new(1.0, 3.0)],
        })
    }

    #[test]
    fn sealed_room_scores_zero() {
        let fx = Fixture::calm(with_vault());
        let sched = Scheduler::new(&PriorityConfig::default());
        let vault = room_id(&fx.topo, "vault");

        let assessed = sched.assess(&fx.ctx(), &fx.topo.responder_starts);
        let a = assessed[vault.index()];
        assert!(!a.accessible);
        assert_eq!(a.remaining, 9);
        assert_eq!(a.priority, 0.0);

        let out = sched.assign(&fx.ctx(), &idle_at_starts(&fx.topo), &[]);
        assert_eq!(out[0].room, room_id(&fx.topo, "office"));
    }

    #[test]
    fn exit_rooms_score_zero() {
        let fx = Fixture::calm(with_vault());
        let sched = Scheduler::new(&PriorityConfig::default());
        let assessed = sched.assess(&fx.ctx(), &fx.topo.responder_starts);
        let lobby = room_id(&fx.topo, "lobby");
        assert!(assessed[lobby.index()].accessible);
        assert_eq!(assessed[lobby.index()].priority, 0.0);
    }

    #[test]
    fn no_responders_means_nothing_accessible() {
        let fx = Fixture::calm(with_vault());
        let assessed = Scheduler::new(&PriorityConfig::default()).assess(&fx.ctx(), &[]);
        assert!(assessed.iter().all(|a| !a.accessible && a.priority == 0.0));
    }

    #[test]
    fn burning_doorway_blocks_assignment() {
        let mut fx = Fixture::calm(with_vault());
        let office = fx.topo.room(room_id(&fx.topo, "office"));
        let doors: Vec<_> = office
            .cells
            .iter()
            .copied()
            .filter(|&c| fx.topo.grid.kind(c) == sweep_grid::CellKind::Door)
            .collect();
        for c in doors {
            fx.hazard.ignite(c);
        }
        let sched = Scheduler::new(&PriorityConfig::default());
        assert!(sched.assign(&fx.ctx(), &idle_at_starts(&fx.topo), &[]).is_empty());
    }
}
