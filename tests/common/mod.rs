pub mod macros;

use gatelife_core::cpu::{Environment, ExecutionUnit};
use gatelife_core::grid::PopulationGrid;
use gatelife_core::organism::{Organism, ReproductionParams};
use gatelife_core::rng::SimRng;
use gatelife_core::task::TaskSuite;
use gatelife_core::topology::{BirthPlacement, PopStructure};
use gatelife_data::{CellId, OrganismState};

/// Execution unit that replays a fixed script on every step.
///
/// Each step pushes `inputs` into the organism's buffer, then submits every
/// value in `outputs`. Counters record how often the engine drove it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptedUnit {
    pub inputs: Vec<f32>,
    pub outputs: Vec<f32>,
    pub steps: u32,
    pub resets: u32,
    pub mutations: u32,
}

#[allow(dead_code)]
impl ScriptedUnit {
    /// Never reads, never outputs.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn scripted(inputs: &[f32], outputs: &[f32]) -> Self {
        Self {
            inputs: inputs.to_vec(),
            outputs: outputs.to_vec(),
            ..Self::default()
        }
    }
}

impl ExecutionUnit for ScriptedUnit {
    fn reset(&mut self) {
        self.resets += 1;
    }

    fn mutate(&mut self, _rng: &mut SimRng) {
        self.mutations += 1;
    }

    fn run_cpu_step(&mut self, _cycles: usize, state: &mut OrganismState, env: &mut Environment<'_>) {
        self.steps += 1;
        for &v in &self.inputs {
            state.push_input(v);
        }
        for &out in &self.outputs {
            env.submit_output(out, state);
        }
    }
}

#[allow(dead_code)]
pub struct GridBuilder {
    width: usize,
    height: usize,
    seed: u64,
    structure: PopStructure,
    placement: BirthPlacement,
    repro: ReproductionParams,
    tasks: TaskSuite,
    organisms: Vec<(CellId, ScriptedUnit, f64)>,
}

#[allow(dead_code)]
impl GridBuilder {
    pub fn new() -> Self {
        Self {
            width: 10,
            height: 10,
            seed: 42,
            structure: PopStructure::Grid,
            placement: BirthPlacement::ReplaceNeighbor,
            repro: ReproductionParams::default(),
            tasks: TaskSuite::graded(),
            organisms: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_structure(mut self, structure: PopStructure) -> Self {
        self.structure = structure;
        self
    }

    pub fn with_placement(mut self, placement: BirthPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_reproduction(mut self, threshold: f64, birth_cost: f64) -> Self {
        self.repro = ReproductionParams {
            threshold,
            birth_cost,
        };
        self
    }

    pub fn with_tasks(mut self, tasks: TaskSuite) -> Self {
        self.tasks = tasks;
        self
    }

    /// Places an organism at `cell` with the given starting points.
    pub fn with_organism(mut self, cell: usize, unit: ScriptedUnit, points: f64) -> Self {
        self.organisms.push((CellId(cell), unit, points));
        self
    }

    /// Fills every cell with an idle organism holding `points`.
    pub fn filled(mut self, points: f64) -> Self {
        for cell in 0..self.width * self.height {
            self.organisms.push((CellId(cell), ScriptedUnit::idle(), points));
        }
        self
    }

    pub fn build(self) -> PopulationGrid<ScriptedUnit> {
        let mut grid = PopulationGrid::new(self.width, self.height, self.seed)
            .with_tasks(self.tasks)
            .with_placement(self.placement)
            .with_reproduction(self.repro);
        grid.set_structure(self.structure);
        for (cell, unit, points) in self.organisms {
            let mut org = Organism::founder(unit, grid.rng(), 0);
            org.state.points = points;
            grid.inject_at(cell, org);
        }
        grid
    }
}

/// Idle organism with `points`, drawing its id from `grid`.
#[allow(dead_code)]
pub fn idle_organism(grid: &mut PopulationGrid<ScriptedUnit>, points: f64) -> Organism<ScriptedUnit> {
    let tick = grid.tick();
    let mut org = Organism::founder(ScriptedUnit::idle(), grid.rng(), tick);
    org.state.points = points;
    org
}
