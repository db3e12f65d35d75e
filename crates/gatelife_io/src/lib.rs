//! # Gatelife IO
//!
//! I/O and persistence layer for the Gatelife simulation.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - The per-update data file
//! - Population snapshots (rkyv, gzip JSON)
//! - JSON and hex genome helpers
//! - Merging of replicate data files

/// Per-update comma separated data file
pub mod datafile;
/// Error types and result aliases for I/O operations
pub mod error;
/// Merging replicate data files into one table
pub mod munge;
/// Snapshot save and load
pub mod persistence;
/// Validated serialization helpers for JSON and hex genomes
pub mod serialization;

pub use datafile::DataFile;
pub use error::{IoError, Result};
pub use serialization::{
    from_hex_genome, from_json, read_json_file, to_hex_genome, to_json, to_json_pretty,
    write_json_file,
};
