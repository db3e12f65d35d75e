//! Logic-gate tasks and the suite evaluator.
//!
//! A task compares an organism's candidate output with a boolean function of
//! its recent input window. Tasks are a closed set of variants dispatched by
//! `match`; the reward granted on a match is configured per task.

use gatelife_data::{OrganismState, INPUT_WINDOW};
use serde::{Deserialize, Serialize};

/// Magnitude below which a signal reads as `false`, and the tolerance used
/// when comparing an output to an expected boolean.
pub const BOOL_EPSILON: f32 = 0.001;

#[must_use]
pub fn to_bool(x: f32) -> bool {
    x.abs() > BOOL_EPSILON
}

#[must_use]
pub fn to_float(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// The closed set of logic functions an organism can be scored on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Not,
    Nand,
    And,
    /// OR over the whole input window.
    OrN,
    Or,
    /// AND over the whole input window.
    AndN,
    Nor,
    Xor,
    Equ,
    /// `(A AND B) OR (C AND D)`.
    Complex,
}

impl TaskKind {
    /// Default registration order.
    pub const ALL: [TaskKind; 10] = [
        TaskKind::Not,
        TaskKind::Nand,
        TaskKind::And,
        TaskKind::OrN,
        TaskKind::Or,
        TaskKind::AndN,
        TaskKind::Nor,
        TaskKind::Xor,
        TaskKind::Equ,
        TaskKind::Complex,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Nand => "NAND",
            Self::And => "AND",
            Self::OrN => "OR_N",
            Self::Or => "OR",
            Self::AndN => "AND_N",
            Self::Nor => "NOR",
            Self::Xor => "XOR",
            Self::Equ => "EQU",
            Self::Complex => "COMPLEX",
        }
    }

    /// The boolean the organism is expected to produce for `inputs`.
    #[must_use]
    pub fn expected(self, inputs: &[f32; INPUT_WINDOW]) -> bool {
        let a = to_bool(inputs[0]);
        let b = to_bool(inputs[1]);
        match self {
            Self::Not => !a,
            Self::Nand => !(a && b),
            Self::And => a && b,
            Self::OrN => inputs.iter().any(|&x| to_bool(x)),
            Self::Or => a || b,
            Self::AndN => inputs.iter().all(|&x| to_bool(x)),
            Self::Nor => !(a || b),
            Self::Xor => a ^ b,
            Self::Equ => !(a ^ b),
            Self::Complex => (a && b) || (to_bool(inputs[2]) && to_bool(inputs[3])),
        }
    }

    #[must_use]
    pub fn matches(self, output: f32, inputs: &[f32; INPUT_WINDOW]) -> bool {
        (output - to_float(self.expected(inputs))).abs() < BOOL_EPSILON
    }

    /// Reward used by [`TaskSuite::graded`]; grows with the gate's difficulty.
    #[must_use]
    pub fn graded_reward(self) -> f64 {
        match self {
            Self::Not | Self::Nand => 1.0,
            Self::And | Self::OrN | Self::Or => 2.0,
            Self::AndN | Self::Nor => 3.0,
            Self::Xor | Self::Equ => 4.0,
            Self::Complex => 8.0,
        }
    }

    /// Reward used by [`TaskSuite::reference`]: only the composite task pays.
    #[must_use]
    pub fn reference_reward(self) -> f64 {
        match self {
            Self::Complex => 64.0,
            _ => 0.0,
        }
    }
}

/// A task kind paired with the reward it grants on a correct output.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub kind: TaskKind,
    pub reward: f64,
}

impl Task {
    #[must_use]
    pub fn new(kind: TaskKind, reward: f64) -> Self {
        Self { kind, reward }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Reward earned by `output`; zero when it does not match.
    #[must_use]
    pub fn check_output(&self, output: f32, inputs: &[f32; INPUT_WINDOW]) -> f64 {
        if self.kind.matches(output, inputs) {
            self.reward
        } else {
            0.0
        }
    }
}

/// Ordered, fixed collection of tasks. Order decides ties and histogram bins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskSuite {
    tasks: Vec<Task>,
}

impl Default for TaskSuite {
    fn default() -> Self {
        Self::graded()
    }
}

impl TaskSuite {
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    #[must_use]
    pub fn graded() -> Self {
        Self::new(
            TaskKind::ALL
                .iter()
                .map(|&k| Task::new(k, k.graded_reward()))
                .collect(),
        )
    }

    #[must_use]
    pub fn reference() -> Self {
        Self::new(
            TaskKind::ALL
                .iter()
                .map(|&k| Task::new(k, k.reference_reward()))
                .collect(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.name().to_string()).collect()
    }

    /// Best strictly positive reward and the earliest task producing it.
    #[must_use]
    pub fn best_match(&self, output: f32, inputs: &[f32; INPUT_WINDOW]) -> Option<(usize, f64)> {
        let mut best_points = 0.0;
        let mut best_index = None;
        for (idx, task) in self.tasks.iter().enumerate() {
            let points = task.check_output(output, inputs);
            if points > best_points {
                best_points = points;
                best_index = Some(idx);
            }
        }
        best_index.map(|idx| (idx, best_points))
    }

    /// Scores `output` against the organism's input window.
    ///
    /// On a positive best reward the points are credited and the winning task
    /// is recorded; otherwise `state` is left untouched.
    pub fn check_output(&self, output: f32, state: &mut OrganismState) -> Option<usize> {
        let (idx, points) = self.best_match(output, state.recent_inputs.slots())?;
        state.points += points;
        state.last_task_completed = Some(idx);
        Some(idx)
    }
}
