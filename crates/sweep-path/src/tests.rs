//! Unit tests for sweep-path.
//!
//! All tests use small hand-drawn grids: `#` wall, `.` open, `D` door.

use sweep_core::{CellId, Connectivity, HazardConfig, PathConfig, PathStage, Point};
use sweep_grid::{CellKind, Grid};
use sweep_hazard::HazardField;

use crate::Pathfinder;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn grid_from(rows: &[&str]) -> Grid {
    let width = rows[0].len() as u32;
    let mut g = Grid::new(width, rows.len() as u32, 1.0, Point::default());
    g.kinds = rows
        .iter()
        .flat_map(|r| r.chars())
        .map(|ch| match ch {
            '#' => CellKind::Wall,
            'D' => CellKind::Door,
            _ => CellKind::Open,
        })
        .collect();
    g
}

fn calm(grid: &Grid) -> HazardField {
    HazardField::new(grid, &HazardConfig::default())
}

fn finder(connectivity: Connectivity) -> Pathfinder {
    Pathfinder::from_config(&PathConfig { connectivity, ..PathConfig::default() })
}

/// Single stage with the given thresholds, penalty 10.
fn single_stage(avoid_above: f32, block_above: f32) -> Pathfinder {
    Pathfinder::from_config(&PathConfig {
        connectivity:   Connectivity::Four,
        danger_penalty: 10.0,
        stages:         vec![PathStage { avoid_above, block_above }],
    })
}

// ── Basic search ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod search {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::PathError;

    #[test]
    fn straight_line_four_connected() {
        let g = grid_from(&["....."]);
        let h = calm(&g);
        let p = finder(Connectivity::Four).route(&g, &h, g.cell(0, 0), g.cell(4, 0), 0).unwrap();
        assert_eq!(p.cells.len(), 5);
        assert_eq!(p.start(), Some(g.cell(0, 0)));
        assert_eq!(p.goal(), Some(g.cell(4, 0)));
        assert_abs_diff_eq!(p.cost, 4.0);
        assert_abs_diff_eq!(p.length_m(&g), 4.0, epsilon = 1e-5);
    }

    #[test]
    fn diagonal_steps_cost_sqrt2() {
        let g = grid_from(&["....", "....", "....", "...."]);
        let h = calm(&g);
        let p = finder(Connectivity::Eight).route(&g, &h, g.cell(0, 0), g.cell(3, 3), 0).unwrap();
        assert_eq!(p.cells.len(), 4);
        assert_abs_diff_eq!(p.cost, 3.0 * 1.414, epsilon = 1e-4);
    }

    #[test]
    fn trivial_path_when_start_is_goal() {
        let g = grid_from(&["..."]);
        let h = calm(&g);
        let p = finder(Connectivity::Four).route(&g, &h, g.cell(1, 0), g.cell(1, 0), 0).unwrap();
        assert!(p.is_trivial());
        assert_eq!(p.cells, vec![g.cell(1, 0)]);
    }

    #[test]
    fn detours_around_walls() {
        let g = grid_from(&[".....", ".###.", "....."]);
        let h = calm(&g);
        let p = finder(Connectivity::Eight).route(&g, &h, g.cell(2, 0), g.cell(2, 2), 0).unwrap();
        assert!(p.cells.iter().all(|&c| g.is_traversable(c)));
        assert!(p.cells.len() > 3);
    }

    #[test]
    fn doors_are_traversable() {
        let g = grid_from(&["..D.."]);
        let h = calm(&g);
        assert!(finder(Connectivity::Four).route(&g, &h, g.cell(0, 0), g.cell(4, 0), 0).is_ok());
    }

    #[test]
    fn diagonal_never_cuts_wall_corner() {
        let g = grid_from(&[".#", "#."]);
        let h = calm(&g);
        let err = finder(Connectivity::Eight)
            .route(&g, &h, g.cell(0, 0), g.cell(1, 1), 0)
            .unwrap_err();
        assert_eq!(err, PathError::NoPath { from: g.cell(0, 0), to: g.cell(1, 1) });
    }

    #[test]
    fn walled_off_goal_has_no_path_at_any_stage() {
        let g = grid_from(&["..#.."]);
        let h = calm(&g);
        let f = finder(Connectivity::Eight);
        assert!(f.route_staged(&g, &h, g.cell(0, 0), g.cell(4, 0)).is_err());
    }

    #[test]
    fn wall_goal_is_rejected() {
        let g = grid_from(&["..#"]);
        let h = calm(&g);
        assert!(finder(Connectivity::Four).route(&g, &h, g.cell(0, 0), g.cell(2, 0), 0).is_err());
    }
}

// ── Hazard-aware costs ────────────────────────────────────────────────────────

#[cfg(test)]
mod hazard {
    use approx::assert_abs_diff_eq;

    use super::*;

    /// Three open rows; fire at the top of the middle column.  Cell (3, 1)
    /// then has danger 0.275 (one of four neighbours burning).
    fn three_rows() -> (Grid, HazardField) {
        let g = grid_from(&[".......", ".......", "......."]);
        let mut h = calm(&g);
        h.ignite(g.cell(3, 0));
        (g, h)
    }

    #[test]
    fn burning_cells_are_never_entered() {
        let g = grid_from(&["....."]);
        let mut h = calm(&g);
        h.ignite(g.cell(2, 0));
        let f = finder(Connectivity::Eight);
        assert!(f.route_staged(&g, &h, g.cell(0, 0), g.cell(4, 0)).is_err());
    }

    #[test]
    fn penalty_steers_around_danger() {
        let (g, h) = three_rows();
        assert!(h.danger(g.cell(3, 1)) > 0.2);

        let p = single_stage(0.2, 1.0).route(&g, &h, g.cell(0, 1), g.cell(6, 1), 0).unwrap();
        assert!(!p.cells.contains(&g.cell(3, 1)));
        assert_abs_diff_eq!(p.cost, 8.0);
    }

    #[test]
    fn tolerant_stage_takes_the_short_way() {
        let (g, h) = three_rows();
        let p = single_stage(0.5, 1.0).route(&g, &h, g.cell(0, 1), g.cell(6, 1), 0).unwrap();
        assert!(p.cells.contains(&g.cell(3, 1)));
        assert_abs_diff_eq!(p.cost, 6.0);
    }

    #[test]
    fn penalty_is_paid_when_no_detour_exists() {
        let g = grid_from(&["###.###", "......."]);
        let mut h = calm(&g);
        h.ignite(g.cell(3, 0));
        let p = single_stage(0.2, 1.0).route(&g, &h, g.cell(0, 1), g.cell(6, 1), 0).unwrap();
        assert_abs_diff_eq!(p.cost, 16.0);
    }

    #[test]
    fn block_threshold_excludes_cells() {
        let (g, h) = three_rows();
        let p = single_stage(1.0, 0.2).route(&g, &h, g.cell(0, 1), g.cell(6, 1), 0).unwrap();
        assert!(p.cells.iter().all(|&c| h.danger(c) <= 0.2));
    }

    #[test]
    fn staged_search_relaxes_until_found() {
        // The only way along the bottom row passes under the fire.
        let g = grid_from(&["###.###", "......."]);
        let mut h = calm(&g);
        h.ignite(g.cell(3, 0));
        let f = Pathfinder::from_config(&PathConfig {
            connectivity:   Connectivity::Four,
            danger_penalty: 10.0,
            stages:         vec![
                PathStage { avoid_above: 0.1, block_above: 0.2 },
                PathStage { avoid_above: 0.5, block_above: 1.0 },
            ],
        });
        assert!(f.route(&g, &h, g.cell(0, 1), g.cell(6, 1), 0).is_err());
        let p = f.route_staged(&g, &h, g.cell(0, 1), g.cell(6, 1)).unwrap();
        assert_eq!(p.stage, 1);
        assert!(p.cells.iter().all(|&c| !h.is_burning(c)));
    }

    #[test]
    fn strict_stage_never_returns_burning_or_wall() {
        let g = grid_from(&["........", ".##..#..", "...#....", "........"]);
        let mut h = calm(&g);
        h.ignite(g.cell(4, 2));
        h.ignite(g.cell(4, 1));
        let f = finder(Connectivity::Eight);
        for goal in [g.cell(7, 0), g.cell(7, 3), g.cell(0, 3)] {
            if let Ok(p) = f.route(&g, &h, g.cell(0, 0), goal, 0) {
                assert!(p.cells.iter().all(|&c| g.is_traversable(c) && !h.is_burning(c)));
            }
        }
    }
}

// ── Determinism and multi-goal ────────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use super::*;
    use crate::PathError;

    #[test]
    fn repeated_calls_return_identical_paths() {
        let g = grid_from(&["........", "........", "........", "........", "........"]);
        let h = calm(&g);
        let f1 = finder(Connectivity::Eight);
        let f2 = finder(Connectivity::Eight);
        let first = f1.route(&g, &h, g.cell(0, 0), g.cell(7, 2), 0).unwrap();
        for _ in 0..10 {
            assert_eq!(f1.route(&g, &h, g.cell(0, 0), g.cell(7, 2), 0).unwrap(), first);
            assert_eq!(f2.route(&g, &h, g.cell(0, 0), g.cell(7, 2), 0).unwrap(), first);
        }
    }

    #[test]
    fn nearest_goal_wins() {
        let g = grid_from(&["........."]);
        let h = calm(&g);
        let f = finder(Connectivity::Four);
        let p = f.route_to_nearest(&g, &h, g.cell(2, 0), &[g.cell(8, 0), g.cell(0, 0)]).unwrap();
        assert_eq!(p.goal(), Some(g.cell(0, 0)));
    }

    #[test]
    fn equal_cost_goals_go_to_first_listed() {
        let g = grid_from(&["....."]);
        let h = calm(&g);
        let f = finder(Connectivity::Four);
        let p = f.route_to_nearest(&g, &h, g.cell(2, 0), &[g.cell(4, 0), g.cell(0, 0)]).unwrap();
        assert_eq!(p.goal(), Some(g.cell(4, 0)));
    }

    #[test]
    fn nearest_skips_unreachable_goals() {
        let g = grid_from(&[".#...."]);
        let h = calm(&g);
        let f = finder(Connectivity::Four);
        let p = f.route_to_nearest(&g, &h, g.cell(3, 0), &[g.cell(0, 0), g.cell(5, 0)]).unwrap();
        assert_eq!(p.goal(), Some(g.cell(5, 0)));
    }

    #[test]
    fn no_goals_is_an_error() {
        let g = grid_from(&["..."]);
        let h = calm(&g);
        let err = finder(Connectivity::Four).route_to_nearest(&g, &h, g.cell(0, 0), &[]).unwrap_err();
        assert_eq!(err, PathError::NoGoals);
    }
}

// ── Reachability ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod reachability {
    use super::*;

    #[test]
    fn flood_matches_route() {
        let g = grid_from(&["...#...", "...#...", "...#..."]);
        let h = calm(&g);
        let f = finder(Connectivity::Eight);
        let reach = f.reachable(&g, &h, g.cell(0, 0), 0);
        for i in 0..g.cell_count() {
            let cell = CellId(i as u32);
            let routed = f.route(&g, &h, g.cell(0, 0), cell, 0).is_ok();
            assert_eq!(reach[i], routed, "cell {cell}");
        }
        assert!(!reach[g.cell(6, 2).index()]);
    }

    #[test]
    fn fire_splits_reachable_region() {
        let g = grid_from(&["......."]);
        let mut h = calm(&g);
        h.ignite(g.cell(3, 0));
        let reach = finder(Connectivity::Four).reachable(&g, &h, g.cell(0, 0), 2);
        assert!(reach[g.cell(2, 0).index()]);
        assert!(!reach[g.cell(3, 0).index()]);
        assert!(!reach[g.cell(6, 0).index()]);
    }
}
