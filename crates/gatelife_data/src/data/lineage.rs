use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ancestry metadata carried by every organism.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    pub id: Uuid,
    /// Id of the founder this organism descends from.
    pub lineage_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub generation: u32,
    pub birth_tick: u64,
}

impl Lineage {
    /// Lineage of an injected organism: it founds its own line.
    #[must_use]
    pub fn founder(id: Uuid, tick: u64) -> Self {
        Self {
            id,
            lineage_id: id,
            parent_id: None,
            generation: 0,
            birth_tick: tick,
        }
    }

    #[must_use]
    pub fn child(&self, id: Uuid, tick: u64) -> Self {
        Self {
            id,
            lineage_id: self.lineage_id,
            parent_id: Some(self.id),
            generation: self.generation + 1,
            birth_tick: tick,
        }
    }
}
