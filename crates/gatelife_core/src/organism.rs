//! A single agent: execution unit, fitness state and ancestry.

use crate::cpu::{Environment, ExecutionUnit, VirtualCpu};
use crate::rng::SimRng;
use gatelife_data::{CellId, Lineage, OrganismState};
use rand::Rng;
use uuid::Uuid;

/// Thresholds consulted by [`Organism::check_reproduction`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReproductionParams {
    pub threshold: f64,
    pub birth_cost: f64,
}

impl Default for ReproductionParams {
    fn default() -> Self {
        Self {
            threshold: 20.0,
            birth_cost: 20.0,
        }
    }
}

/// Fresh organism id drawn from the simulation RNG so runs stay reproducible.
pub fn next_id(rng: &mut SimRng) -> Uuid {
    Uuid::from_u128(rng.gen())
}

#[derive(Clone, Debug)]
pub struct Organism<U = VirtualCpu> {
    pub unit: U,
    pub state: OrganismState,
    /// Rewarded outputs over the whole line of descent.
    pub tasks_completed: u64,
    pub lineage: Lineage,
}

impl<U: ExecutionUnit> Organism<U> {
    #[must_use]
    pub fn new(unit: U, state: OrganismState, lineage: Lineage) -> Self {
        Self {
            unit,
            state,
            tasks_completed: 0,
            lineage,
        }
    }

    /// New founder with a blank state and its own lineage.
    pub fn founder(unit: U, rng: &mut SimRng, tick: u64) -> Self {
        Self::new(unit, OrganismState::new(), Lineage::founder(next_id(rng), tick))
    }

    #[must_use]
    pub fn points(&self) -> f64 {
        self.state.points
    }

    #[must_use]
    pub fn position(&self) -> Option<CellId> {
        self.state.position
    }

    #[must_use]
    pub fn last_task_completed(&self) -> Option<usize> {
        self.state.last_task_completed
    }

    /// Runs one scheduler slot for the organism living at `cell`.
    pub fn process(&mut self, cell: CellId, cycles: usize, env: &mut Environment<'_>) {
        self.state.position = Some(cell);
        let before = env.rewarded();
        self.unit.run_cpu_step(cycles, &mut self.state, env);
        self.tasks_completed += env.rewarded() - before;
    }

    /// Produces an offspring when points strictly exceed the threshold.
    ///
    /// The offspring keeps the program, starts from a blank state and is
    /// mutated; the parent pays the birth cost.
    pub fn check_reproduction(
        &mut self,
        params: ReproductionParams,
        rng: &mut SimRng,
        tick: u64,
    ) -> Option<Self> {
        if self.state.points <= params.threshold {
            return None;
        }
        let mut child = self.clone();
        child.unit.reset();
        child.state.reset();
        child.lineage = self.lineage.child(next_id(rng), tick);
        child.unit.mutate(rng);
        self.state.points -= params.birth_cost;
        Some(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;
    use crate::task::TaskSuite;
    use gatelife_data::Instruction;

    fn cpu() -> VirtualCpu {
        VirtualCpu::new(vec![Instruction::Input(0), Instruction::Output(0)], 0.0)
    }

    #[test]
    fn test_process_records_position() {
        let mut rng = create_rng(1);
        let mut org = Organism::founder(cpu(), &mut rng, 0);
        assert!(org.position().is_none());
        let tasks = TaskSuite::graded();
        let mut env = Environment::new(&tasks, &mut rng);
        org.process(CellId(5), 4, &mut env);
        assert_eq!(org.position(), Some(CellId(5)));
        assert_eq!(org.tasks_completed, env.rewarded());
    }

    #[test]
    fn test_below_threshold_is_noop() {
        let mut rng = create_rng(1);
        let mut org = Organism::founder(cpu(), &mut rng, 0);
        org.state.points = 20.0;
        assert!(org
            .check_reproduction(ReproductionParams::default(), &mut rng, 3)
            .is_none());
        assert_eq!(org.points(), 20.0);
    }

    #[test]
    fn test_offspring_is_reset_and_parent_pays() {
        let mut rng = create_rng(1);
        let mut org = Organism::founder(cpu(), &mut rng, 0);
        org.state.points = 21.0;
        org.state.position = Some(CellId(2));
        org.state.last_task_completed = Some(4);
        org.state.push_input(1.0);
        org.tasks_completed = 6;

        let child = org
            .check_reproduction(ReproductionParams::default(), &mut rng, 9)
            .unwrap();
        assert_eq!(org.points(), 1.0);
        assert_eq!(child.points(), 0.0);
        assert!(child.position().is_none());
        assert!(child.last_task_completed().is_none());
        assert_eq!(child.state.recent_inputs.next_slot(), 0);
        assert_eq!(child.tasks_completed, 6);
        assert_eq!(child.lineage.parent_id, Some(org.lineage.id));
        assert_eq!(child.lineage.lineage_id, org.lineage.lineage_id);
        assert_eq!(child.lineage.generation, 1);
        assert_eq!(child.lineage.birth_tick, 9);
        assert_ne!(child.lineage.id, org.lineage.id);
        assert_eq!(child.unit.program(), org.unit.program());
    }

    #[test]
    fn test_birth_cost_may_exceed_threshold() {
        let mut rng = create_rng(1);
        let mut org = Organism::founder(cpu(), &mut rng, 0);
        org.state.points = 25.0;
        let params = ReproductionParams {
            threshold: 20.0,
            birth_cost: 30.0,
        };
        assert!(org.check_reproduction(params, &mut rng, 1).is_some());
        assert_eq!(org.points(), -5.0);
    }
}
