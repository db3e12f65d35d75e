//! The execution-unit seam.
//!
//! The engine never interprets an organism's program itself. It hands the
//! organism's [`ExecutionUnit`] a cycle budget together with an
//! [`Environment`], the only way back into the world: reading inputs and
//! submitting candidate outputs for scoring.

pub mod machine;
pub mod mutation;

pub use machine::VirtualCpu;

use crate::rng::SimRng;
use crate::task::{to_float, TaskSuite};
use gatelife_data::{Instruction, OrganismState};
use rand::Rng;

/// Contract an organism's program interpreter must satisfy.
pub trait ExecutionUnit: Clone {
    /// Clears registers, instruction pointer and other run-time state.
    /// The inheritable program must survive.
    fn reset(&mut self);

    /// Applies a stochastic edit to the program.
    fn mutate(&mut self, rng: &mut SimRng);

    /// Runs `cycles` steps. The unit may record inputs in `state` and score
    /// outputs through `env`.
    fn run_cpu_step(&mut self, cycles: usize, state: &mut OrganismState, env: &mut Environment<'_>);

    /// Program listing for snapshots; units without one return nothing.
    fn program(&self) -> &[Instruction] {
        &[]
    }
}

/// World access lent to an execution unit for the duration of one `process` call.
pub struct Environment<'a> {
    tasks: &'a TaskSuite,
    rng: &'a mut SimRng,
    rewarded: u64,
}

impl<'a> Environment<'a> {
    pub fn new(tasks: &'a TaskSuite, rng: &'a mut SimRng) -> Self {
        Self {
            tasks,
            rng,
            rewarded: 0,
        }
    }

    /// Next environment input: `0.0` or `1.0` with equal odds.
    pub fn sense(&mut self) -> f32 {
        to_float(self.rng.gen_bool(0.5))
    }

    /// Scores `output` against the task suite, crediting `state` on success.
    pub fn submit_output(&mut self, output: f32, state: &mut OrganismState) -> Option<usize> {
        let scored = self.tasks.check_output(output, state);
        if scored.is_some() {
            self.rewarded += 1;
        }
        scored
    }

    pub fn rng(&mut self) -> &mut SimRng {
        &mut *self.rng
    }

    #[must_use]
    pub fn tasks(&self) -> &TaskSuite {
        self.tasks
    }

    /// Outputs rewarded since this environment was created.
    #[must_use]
    pub fn rewarded(&self) -> u64 {
        self.rewarded
    }
}
