//! The population grid: a fixed array of cells, each holding at most one
//! organism, plus the scheduler state that drives them.
//!
//! Cells own their organisms by value. Moves and births are
//! extract-then-place within a single `&mut self` call, so no other code can
//! observe a cell mid-transfer.

use crate::config::{AppConfig, BinConfig};
use crate::cpu::{ExecutionUnit, VirtualCpu};
use crate::monitor::{MetricsCollector, Monitor};
use crate::organism::{Organism, ReproductionParams};
use crate::rng::{create_rng, SimRng};
use crate::task::TaskSuite;
use crate::topology::{BirthPlacement, PopStructure, Topology};
use gatelife_data::{CellId, DataRow, OrganismSnapshot, OrganismState, PopulationSnapshot};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub mod update;

pub use update::TickReport;

/// Result of [`PopulationGrid::move_organism`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Nothing lived in the cell.
    Vacant,
    /// The chosen neighbour was occupied, or there was none; the organism
    /// stayed put.
    Blocked,
    Moved(CellId),
}

pub struct PopulationGrid<U = VirtualCpu> {
    topology: Topology,
    slots: Vec<Option<Organism<U>>>,
    rng: SimRng,
    seed: u64,
    tasks: TaskSuite,
    repro_queue: Vec<CellId>,
    tick: u64,
    cycles_per_update: usize,
    repro: ReproductionParams,
    placement: BirthPlacement,
    metrics: MetricsCollector,
    fingerprint: String,
}

impl<U: ExecutionUnit> PopulationGrid<U> {
    /// Empty grid with the default lifecycle, graded tasks and a toroidal
    /// Moore neighbourhood.
    #[must_use]
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        let tasks = TaskSuite::default();
        let metrics = MetricsCollector::new(BinConfig::default(), tasks.len());
        Self {
            topology: Topology::new(width, height, PopStructure::Grid),
            slots: Self::empty_slots(width * height),
            rng: create_rng(seed),
            seed,
            tasks,
            repro_queue: Vec::new(),
            tick: 0,
            cycles_per_update: 10,
            repro: ReproductionParams::default(),
            placement: BirthPlacement::default(),
            metrics,
            fingerprint: String::new(),
        }
    }

    /// Empty grid laid out and parameterised from `config`. Founders are not
    /// injected.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let tasks = config.tasks.build_suite();
        let metrics = MetricsCollector::new(config.metrics.point_bins, tasks.len());
        Self {
            topology: config.topology(),
            slots: Self::empty_slots(config.world.width * config.world.height),
            rng: create_rng(config.world.seed),
            seed: config.world.seed,
            tasks,
            repro_queue: Vec::new(),
            tick: 0,
            cycles_per_update: config.lifecycle.cpu_cycles_per_update,
            repro: ReproductionParams {
                threshold: config.lifecycle.reproduction_threshold,
                birth_cost: config.lifecycle.birth_cost,
            },
            placement: config.lifecycle.birth_placement,
            metrics,
            fingerprint: config.fingerprint(),
        }
    }

    fn empty_slots(size: usize) -> Vec<Option<Organism<U>>> {
        std::iter::repeat_with(|| None).take(size).collect()
    }

    /// Replaces the task suite. Existing monitors are rebuilt for the new
    /// task count on their next request.
    #[must_use]
    pub fn with_tasks(mut self, tasks: TaskSuite) -> Self {
        self.metrics = MetricsCollector::new(self.metrics.point_bins(), tasks.len());
        self.tasks = tasks;
        self
    }

    #[must_use]
    pub fn with_placement(mut self, placement: BirthPlacement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn with_reproduction(mut self, repro: ReproductionParams) -> Self {
        self.repro = repro;
        self
    }

    #[must_use]
    pub fn with_cycles(mut self, cycles: usize) -> Self {
        self.cycles_per_update = cycles;
        self
    }

    /// Changes the dimensions. All organisms are discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.topology = Topology::new(width, height, self.topology.structure);
        self.slots = Self::empty_slots(width * height);
        self.repro_queue.clear();
    }

    pub fn set_structure(&mut self, structure: PopStructure) {
        self.topology.structure = structure;
    }

    /// Empties every cell. The tick counter and RNG stream continue.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.repro_queue.clear();
    }

    /// Places `org` in a random empty cell. Returns `None`, dropping `org`,
    /// when the grid is full.
    pub fn inject(&mut self, org: Organism<U>) -> Option<CellId> {
        let empty: Vec<CellId> = (0..self.slots.len())
            .map(CellId)
            .filter(|&c| !self.is_occupied(c))
            .collect();
        let cell = *empty.choose(&mut self.rng)?;
        self.slots[cell.index()] = Some(org);
        Some(cell)
    }

    /// Places `org` at `cell`, returning whatever lived there. An
    /// out-of-range cell hands `org` straight back.
    pub fn inject_at(&mut self, cell: CellId, org: Organism<U>) -> Option<Organism<U>> {
        match self.slots.get_mut(cell.index()) {
            Some(slot) => slot.replace(org),
            None => Some(org),
        }
    }

    /// Empties `cell` and returns its occupant.
    pub fn extract(&mut self, cell: CellId) -> Option<Organism<U>> {
        self.slots.get_mut(cell.index()).and_then(Option::take)
    }

    #[must_use]
    pub fn is_occupied(&self, cell: CellId) -> bool {
        matches!(self.slots.get(cell.index()), Some(Some(_)))
    }

    #[must_use]
    pub fn organism(&self, cell: CellId) -> Option<&Organism<U>> {
        self.slots.get(cell.index()).and_then(Option::as_ref)
    }

    pub fn organism_mut(&mut self, cell: CellId) -> Option<&mut Organism<U>> {
        self.slots.get_mut(cell.index()).and_then(Option::as_mut)
    }

    /// Occupied cells in index order.
    pub fn organisms(&self) -> impl Iterator<Item = (CellId, &Organism<U>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|o| (CellId(i), o)))
    }

    #[must_use]
    pub fn num_organisms(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.topology.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.topology.height
    }

    #[must_use]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn tasks(&self) -> &TaskSuite {
        &self.tasks
    }

    /// Scores `output` against `state` with this grid's task suite.
    pub fn check_output(&self, output: f32, state: &mut OrganismState) -> Option<usize> {
        self.tasks.check_output(output, state)
    }

    pub fn rng(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    /// Moves the occupant of `cell` to a random neighbour if that neighbour
    /// is empty.
    pub fn move_organism(&mut self, cell: CellId) -> MoveOutcome {
        let Some(org) = self.extract(cell) else {
            return MoveOutcome::Vacant;
        };
        match self.topology.random_neighbor(cell, &mut self.rng) {
            Some(dest) if !self.is_occupied(dest) => {
                self.slots[dest.index()] = Some(org);
                tracing::trace!(from = %cell, to = %dest, "organism moved");
                MoveOutcome::Moved(dest)
            }
            _ => {
                self.slots[cell.index()] = Some(org);
                MoveOutcome::Blocked
            }
        }
    }

    /// Calls [`move_organism`](Self::move_organism) on every cell in index
    /// order. An organism may move more than once if it lands on a cell that
    /// is scanned later. Returns the number of successful moves.
    pub fn move_all_organisms(&mut self) -> usize {
        (0..self.slots.len())
            .filter(|&i| matches!(self.move_organism(CellId(i)), MoveOutcome::Moved(_)))
            .count()
    }

    pub fn org_count_node(&mut self) -> &Monitor {
        self.metrics.org_count_node()
    }

    pub fn point_values_node(&mut self) -> &Monitor {
        self.metrics.point_values_node()
    }

    pub fn tasks_completed_node(&mut self) -> &Monitor {
        self.metrics.tasks_completed_node()
    }

    pub fn enable_all_monitors(&mut self) {
        self.metrics.enable_all();
    }

    #[must_use]
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }

    /// Data-file row for the current tick, read from the monitors as of the
    /// last update.
    #[must_use]
    pub fn data_row(&self) -> DataRow {
        self.metrics.data_row(self.tick)
    }

    #[must_use]
    pub fn snapshot(&self) -> PopulationSnapshot {
        let organisms = self
            .organisms()
            .map(|(cell, org)| OrganismSnapshot {
                cell: cell.index() as u32,
                id: org.lineage.id,
                lineage_id: org.lineage.lineage_id,
                parent_id: org.lineage.parent_id,
                generation: org.lineage.generation,
                birth_tick: org.lineage.birth_tick,
                points: org.state.points,
                last_task_completed: org.state.last_task_completed.map(|t| t as u32),
                tasks_completed: org.tasks_completed,
                recent_inputs: *org.state.recent_inputs.slots(),
                program: org.unit.program().to_vec(),
            })
            .collect();
        PopulationSnapshot {
            tick: self.tick,
            width: self.topology.width as u32,
            height: self.topology.height as u32,
            seed: self.seed,
            config_fingerprint: self.fingerprint.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            task_names: self.tasks.names(),
            organisms,
        }
    }
}

impl PopulationGrid<VirtualCpu> {
    /// Injects `count` founders with random programs into random empty cells.
    /// Returns how many found a cell.
    pub fn inject_random_founders(
        &mut self,
        count: usize,
        genome_length: usize,
        mutation_rate: f64,
    ) -> usize {
        let mut placed = 0;
        for _ in 0..count {
            let unit = VirtualCpu::random(genome_length, mutation_rate, &mut self.rng);
            let org = Organism::founder(unit, &mut self.rng, self.tick);
            if self.inject(org).is_none() {
                break;
            }
            placed += 1;
        }
        placed
    }
}
