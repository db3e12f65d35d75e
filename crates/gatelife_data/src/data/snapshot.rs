use super::program::Instruction;
use rkyv::{Archive, Deserialize as RkyvDeserialize, Serialize as RkyvSerialize};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Frozen view of a single occupant.
#[derive(
    Clone, Debug, PartialEq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct OrganismSnapshot {
    pub cell: u32,
    pub id: Uuid,
    pub lineage_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub generation: u32,
    pub birth_tick: u64,
    pub points: f64,
    pub last_task_completed: Option<u32>,
    pub tasks_completed: u64,
    pub recent_inputs: [f32; 4],
    /// Empty when the execution unit has no listable program.
    pub program: Vec<Instruction>,
}

/// Whole-population snapshot written at the end of a run.
#[derive(
    Clone, Debug, PartialEq, Serialize, Deserialize, Archive, RkyvSerialize, RkyvDeserialize,
)]
#[archive(check_bytes)]
pub struct PopulationSnapshot {
    pub tick: u64,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub config_fingerprint: String,
    pub created_at: String,
    pub task_names: Vec<String>,
    pub organisms: Vec<OrganismSnapshot>,
}

impl PopulationSnapshot {
    #[must_use]
    pub fn population(&self) -> usize {
        self.organisms.len()
    }

    /// Occupant with the highest points, ties going to the lowest cell.
    #[must_use]
    pub fn fittest(&self) -> Option<&OrganismSnapshot> {
        self.organisms.iter().fold(None, |best, o| match best {
            Some(b) if b.points >= o.points => Some(b),
            _ => Some(o),
        })
    }
}
