//! Headless driver: owns one grid for a whole run.

use gatelife_core::config::AppConfig;
use gatelife_core::grid::{PopulationGrid, TickReport};
use gatelife_core::metrics::Metrics;
use gatelife_core::organism::Organism;
use gatelife_data::{CellId, PopulationSnapshot};
use gatelife_io::DataFile;
use std::io::Write;
use std::time::Instant;

pub struct Simulation {
    config: AppConfig,
    grid: PopulationGrid,
    metrics: Metrics,
}

impl Simulation {
    /// Validates `config`, builds the grid and injects the founders.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let mut grid: PopulationGrid = PopulationGrid::from_config(&config);
        let placed = grid.inject_random_founders(
            config.world.initial_population,
            config.evolution.genome_length,
            config.evolution.mutation_rate,
        );
        grid.enable_all_monitors();
        tracing::info!(
            seed = config.world.seed,
            width = config.world.width,
            height = config.world.height,
            founders = placed,
            "Simulation initialised"
        );
        Ok(Self {
            metrics: Metrics::new(config.metrics.log_interval),
            config,
            grid,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &PopulationGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut PopulationGrid {
        &mut self.grid
    }

    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// One update, preceded by a movement sweep when enabled.
    pub fn step(&mut self) -> TickReport {
        let start = Instant::now();
        if self.config.world.move_each_update {
            self.grid.move_all_organisms();
        }
        let report = self.grid.update();
        self.metrics.record_tick(&report, start.elapsed());
        report
    }

    /// Runs the configured number of updates without writing anything.
    pub fn run(&mut self) {
        for _ in 0..self.config.world.updates {
            self.step();
        }
        self.metrics.log_summary();
    }

    /// Runs the configured number of updates, appending one row per update.
    pub fn run_with_data<W: Write>(&mut self, data: &mut DataFile<W>) -> anyhow::Result<()> {
        for _ in 0..self.config.world.updates {
            self.step();
            data.write_row(&self.grid.data_row())?;
        }
        data.flush()?;
        self.metrics.log_summary();
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> PopulationSnapshot {
        self.grid.snapshot()
    }

    /// Occupant with the most points, ties going to the lowest cell.
    #[must_use]
    pub fn fittest(&self) -> Option<(CellId, &Organism)> {
        self.grid
            .organisms()
            .fold(None, |best: Option<(CellId, &Organism)>, cur| match best {
                Some(b) if b.1.points() >= cur.1.points() => Some(b),
                _ => Some(cur),
            })
    }
}
