//! # Gatelife
//!
//! Headless driver and command-line plumbing around the Gatelife engine.
//! The engine itself lives in `gatelife_core`; persistence and data files in
//! `gatelife_io`.

/// Settings file handling and command-line overrides
pub mod settings;
/// Whole-run driver
pub mod simulation;

pub use settings::{load_or_create, Overrides};
pub use simulation::Simulation;
