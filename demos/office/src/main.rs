//! office: headless sweep of a row of offices during a fire.
//!
//! Builds a synthetic office floor (exit lobby, hallway, offices along its
//! north wall), seeds the fire in the far office, and runs responders until
//! everyone is out, everyone is dead, or the tick cap is hit.  Progress goes
//! to the log (`RUST_LOG=debug` for per-tick events); the summary is printed
//! as JSON.

use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sweep_core::{SimRng, SweepConfig, Tick};
use sweep_grid::LayoutSpec;
use sweep_responder::EventKind;
use sweep_sim::{SimBuilder, SimEvent, SimEventKind, SimObserver, SimSummary, TickSnapshot};

// ── Constants ─────────────────────────────────────────────────────────────────

const OFFICES:          usize = 6;
const MAX_OCCUPANTS:    u32   = 4;
const RESPONDERS:       usize = 3;
const SEED:             u64   = 42;
const REPORT_INTERVAL:  u64   = 30; // ticks between progress lines

// Overrides on top of the defaults; every other field keeps its default.
const CONFIG_JSON: &str = r#"{
    "priority":  { "danger_weight": 0.5, "exclusive_targeting": true },
    "responder": { "search_duration_secs": 4.0 },
    "sim":       { "max_ticks": 900, "snapshot_interval_ticks": 30 }
}"#;

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ProgressLog {
    deaths:     usize,
    deliveries: usize,
}

impl SimObserver for ProgressLog {
    fn on_event(&mut self, event: &SimEvent) {
        match &event.kind {
            SimEventKind::FireStarted { cells } => info!(cells, "fire started"),
            SimEventKind::Responder(e) => match e.kind {
                EventKind::Died { .. } => self.deaths += 1,
                EventKind::Delivered { .. } => self.deliveries += 1,
                _ => {}
            },
            SimEventKind::FireSpread { .. } => {}
        }
    }

    fn on_snapshot(&mut self, snap: &TickSnapshot) {
        info!(
            tick = %snap.tick,
            burning = snap.burning_count(),
            alive = snap.alive_count(),
            carrying = snap.carrying_count(),
            rescued = snap.occupants.rescued,
            remaining = snap.occupants.remaining,
            "progress"
        );
    }

    fn on_tick_end(&mut self, tick: Tick, events: usize) {
        if tick.0.is_multiple_of(REPORT_INTERVAL) && events > 0 {
            info!(tick = %tick, events, deliveries = self.deliveries, deaths = self.deaths, "tick");
        }
    }

    fn on_sim_end(&mut self, summary: &SimSummary) {
        info!(reason = ?summary.stop_reason, ticks = summary.ticks, "sweep over");
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = SweepConfig::from_json(CONFIG_JSON)?;
    let mut rng = SimRng::new(SEED);
    let layout = LayoutSpec::randomized(OFFICES, MAX_OCCUPANTS, RESPONDERS, &mut rng);
    info!(
        layout = %layout.name,
        occupants = layout.total_occupants(),
        responders = layout.responder_starts.len(),
        "layout generated"
    );

    let mut sim = SimBuilder::from_layout(&layout, config)?.build()?;

    let t0 = Instant::now();
    let mut observer = ProgressLog::default();
    let summary = sim.run(&mut observer)?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "wall time");

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
