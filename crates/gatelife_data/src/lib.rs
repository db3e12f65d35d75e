//! Plain data types shared by the Gatelife engine, its persistence layer and tools.
//!
//! Nothing in here knows how a tick is scheduled; these are the records that
//! the engine mutates and the snapshots it hands to storage.

pub mod data;

pub use data::buffer::{InputBuffer, INPUT_WINDOW};
pub use data::lineage::Lineage;
pub use data::program::{Instruction, NUM_REGISTERS};
pub use data::row::DataRow;
pub use data::snapshot::{OrganismSnapshot, PopulationSnapshot};
pub use data::state::{CellId, OrganismState};
