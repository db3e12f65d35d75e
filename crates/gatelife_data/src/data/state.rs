use super::buffer::InputBuffer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to one cell of the population grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub usize);

impl CellId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for CellId {
    fn from(idx: usize) -> Self {
        Self(idx)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-organism mutable record touched by the execution unit and the task evaluator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganismState {
    /// The four most recent inputs.
    pub recent_inputs: InputBuffer,
    /// Fitness accumulator.
    pub points: f64,
    /// Cell the organism was last processed in; `None` until its first tick.
    pub position: Option<CellId>,
    /// Index of the last task rewarded; `None` if no task has scored yet.
    pub last_task_completed: Option<usize>,
}

impl OrganismState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_points(points: f64) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub fn push_input(&mut self, value: f32) {
        self.recent_inputs.push(value);
    }

    /// Clears everything; used to give offspring a fresh start.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
