use super::PopulationGrid;
use crate::cpu::{Environment, ExecutionUnit};
use gatelife_data::CellId;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// What happened during one [`PopulationGrid::update`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    /// Organisms given a CPU slice.
    pub processed: usize,
    /// Queued organisms still present at drain time that were asked to reproduce.
    pub reproduction_attempts: usize,
    pub births: usize,
    /// Offspring produced but discarded for lack of a destination.
    pub births_dropped: usize,
    pub population: usize,
}

impl<U: ExecutionUnit> PopulationGrid<U> {
    /// Advances the simulation by one tick.
    ///
    /// Every organism present at the start of the sweep runs once, in a
    /// freshly shuffled order. Organisms whose points exceed the reproduction
    /// threshold afterwards are queued and reproduce once the sweep is over.
    /// Existing monitors are refreshed last.
    pub fn update(&mut self) -> TickReport {
        self.tick += 1;
        let mut report = TickReport {
            tick: self.tick,
            ..TickReport::default()
        };

        let mut schedule: Vec<usize> = (0..self.slots.len()).collect();
        schedule.shuffle(&mut self.rng);

        for idx in schedule {
            let Some(org) = self.slots[idx].as_mut() else {
                continue;
            };
            let mut env = Environment::new(&self.tasks, &mut self.rng);
            org.process(CellId(idx), self.cycles_per_update, &mut env);
            report.processed += 1;
            if org.state.points > self.repro.threshold {
                self.repro_queue.push(CellId(idx));
            }
        }

        let queue = std::mem::take(&mut self.repro_queue);
        for &cell in &queue {
            let Some(parent) = self.slots.get_mut(cell.index()).and_then(Option::as_mut) else {
                continue;
            };
            report.reproduction_attempts += 1;
            let Some(child) = parent.check_reproduction(self.repro, &mut self.rng, self.tick) else {
                continue;
            };
            let slots = &self.slots;
            let dest = self.placement.find_cell(
                &self.topology,
                cell,
                |c| matches!(slots.get(c.index()), Some(Some(_))),
                &mut self.rng,
            );
            match dest {
                Some(dest) => {
                    tracing::trace!(parent = %cell, child = %dest, "offspring placed");
                    self.slots[dest.index()] = Some(child);
                    report.births += 1;
                }
                None => {
                    tracing::trace!(parent = %cell, "offspring dropped");
                    report.births_dropped += 1;
                }
            }
        }
        self.repro_queue = queue;
        self.repro_queue.clear();

        self.metrics.refresh(&self.slots);
        report.population = self.num_organisms();

        tracing::debug!(
            tick = report.tick,
            processed = report.processed,
            births = report.births,
            dropped = report.births_dropped,
            population = report.population,
            "update complete"
        );
        report
    }
}
