//! # Gatelife Core
//!
//! The simulation engine for Gatelife, a spatial evolutionary simulator in
//! which organisms running small genetic programs earn points by computing
//! logic functions of their inputs.
//!
//! This crate contains:
//! - The population grid and its per-tick scheduler
//! - Organism lifecycle and asexual reproduction
//! - The logic-task suite and output evaluator
//! - Lazily built population monitors
//! - The execution-unit trait and a default register machine
//! - Configuration and structured logging
//!
//! ## Example
//!
//! ```
//! use gatelife_core::config::AppConfig;
//! use gatelife_core::grid::PopulationGrid;
//!
//! let config = AppConfig::default();
//! let mut grid: PopulationGrid = PopulationGrid::from_config(&config);
//! grid.inject_random_founders(
//!     config.world.initial_population,
//!     config.evolution.genome_length,
//!     config.evolution.mutation_rate,
//! );
//! grid.enable_all_monitors();
//! let report = grid.update();
//! assert_eq!(report.tick, 1);
//! assert_eq!(grid.data_row().total_orgs, report.population as f64);
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Execution-unit seam and the default virtual CPU
pub mod cpu;
/// Population grid, scheduler, movement and reproduction placement
pub mod grid;
/// Run-level counters and logging setup
pub mod metrics;
/// Per-tick population aggregators
pub mod monitor;
/// Organism lifecycle
pub mod organism;
/// Deterministic random source
pub mod rng;
/// Logic tasks and the output evaluator
pub mod task;
/// Neighbourhood structure and birth placement
pub mod topology;

pub use cpu::{Environment, ExecutionUnit, VirtualCpu};
pub use grid::{MoveOutcome, PopulationGrid, TickReport};
pub use organism::{Organism, ReproductionParams};
pub use task::{Task, TaskKind, TaskSuite};
