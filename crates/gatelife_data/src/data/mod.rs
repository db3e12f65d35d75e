//! Core data structures for the Gatelife simulation.

pub mod buffer;
pub mod lineage;
pub mod program;
pub mod row;
pub mod snapshot;
pub mod state;
