//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use sweep_core::{SimClock, SweepConfig, Tick};
use sweep_grid::{LayoutSpec, Occupancy, Topology, TopologyBuilder};
use sweep_hazard::HazardField;
use sweep_path::{AStarRouter, Pathfinder, Router};
use sweep_responder::Crew;
use sweep_schedule::Scheduler;

use crate::{Sim, SimEvent, SimEventKind, SimResult};

/// Fluent builder for [`Sim<R>`].
///
/// # Required inputs
///
/// - [`Topology`]: from [`TopologyBuilder`], or use
///   [`from_layout`](SimBuilder::from_layout)
/// - [`SweepConfig`]: validated in [`build`](SimBuilder::build)
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                               |
/// |---------------|---------------------------------------|
/// | `.router(r)`  | [`AStarRouter`] configured from `path` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(topology, config)
///     .router(MyRouter::default())
///     .build()?;
/// let summary = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: Router = AStarRouter> {
    topology: Topology,
    config:   SweepConfig,
    router:   R,
}

impl SimBuilder<AStarRouter> {
    pub fn new(topology: Topology, config: SweepConfig) -> Self {
        let router = AStarRouter::new(&config.path);
        Self { topology, config, router }
    }

    /// Rasterize `layout` with `config.grid` and start a builder from it.
    pub fn from_layout(layout: &LayoutSpec, config: SweepConfig) -> SimResult<Self> {
        let topology = TopologyBuilder::new(&config.grid).build(layout)?;
        Ok(Self::new(topology, config))
    }
}

impl<R: Router> SimBuilder<R> {
    /// Swap in a different routing algorithm.
    pub fn router<R2: Router>(self, router: R2) -> SimBuilder<R2> {
        SimBuilder { topology: self.topology, config: self.config, router }
    }

    /// Validate the configuration, seed the fire, place the responders, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<R>> {
        self.config.validate()?;
        let topology = self.topology;
        let config = self.config;

        let hazard = HazardField::initialize(&topology, topology.fire_origin, &config.hazard)?;
        let occupancy = Occupancy::new(&topology);
        let crew = Crew::new(&topology, &config.responder);

        info!(
            rooms = topology.room_count(),
            responders = crew.len(),
            occupants = occupancy.totals().total,
            max_ticks = config.sim.max_ticks,
            "simulation ready"
        );

        let events = vec![SimEvent {
            tick: Tick::ZERO,
            kind: SimEventKind::FireStarted { cells: hazard.burning_count() },
        }];

        Ok(Sim {
            clock: SimClock::new(config.sim.tick_duration_secs),
            pathfinder: Pathfinder::new(self.router, &config.path),
            scheduler: Scheduler::new(&config.priority),
            config,
            topology,
            hazard,
            occupancy,
            crew,
            events,
        })
    }
}
