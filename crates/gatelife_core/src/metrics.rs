//! Run-level counters and logging setup.
//!
//! [`Metrics`] folds each [`TickReport`] into running totals and emits a
//! structured summary every `log_interval` updates.

use crate::grid::TickReport;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

pub struct Metrics {
    log_interval: u64,
    ticks: u64,
    births: u64,
    births_dropped: u64,
    peak_population: usize,
    population: usize,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Metrics {
    /// `log_interval` of zero disables the periodic summary.
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            log_interval,
            ticks: 0,
            births: 0,
            births_dropped: 0,
            peak_population: 0,
            population: 0,
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&mut self, report: &TickReport, duration: Duration) {
        self.ticks += 1;
        self.births += report.births as u64;
        self.births_dropped += report.births_dropped as u64;
        self.population = report.population;
        self.peak_population = self.peak_population.max(report.population);

        if self.log_interval > 0 && report.tick % self.log_interval == 0 {
            tracing::info!(
                tick = report.tick,
                population = report.population,
                births = self.births,
                dropped = self.births_dropped,
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn births(&self) -> u64 {
        self.births
    }

    #[must_use]
    pub fn births_dropped(&self) -> u64 {
        self.births_dropped
    }

    #[must_use]
    pub fn peak_population(&self) -> usize {
        self.peak_population
    }

    #[must_use]
    pub fn population(&self) -> usize {
        self.population
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the final totals.
    pub fn log_summary(&self) {
        tracing::info!(
            ticks = self.ticks,
            births = self.births,
            dropped = self.births_dropped,
            peak_population = self.peak_population,
            final_population = self.population,
            elapsed_ms = self.elapsed().as_millis() as u64,
            "Run finished"
        );
    }
}

/// Initialize tracing subscriber for logging. `RUST_LOG` overrides the
/// default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
