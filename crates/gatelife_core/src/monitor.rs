//! Per-tick population aggregators.
//!
//! Each monitor is built on first request and from then on is reset and
//! re-filled from the grid at the end of every update. Monitors only read
//! organism state.

use crate::config::BinConfig;
use crate::organism::Organism;
use gatelife_data::DataRow;
use serde::{Deserialize, Serialize};

/// Fixed-width bins over `[min, max)`. Values outside the range land in the
/// first or last bin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    min: f64,
    max: f64,
    counts: Vec<u64>,
}

impl Histogram {
    #[must_use]
    pub fn new(min: f64, max: f64, bins: usize) -> Self {
        Self {
            min,
            max,
            counts: vec![0; bins],
        }
    }

    #[must_use]
    pub fn bin_width(&self) -> f64 {
        if self.counts.is_empty() {
            return 0.0;
        }
        (self.max - self.min) / self.counts.len() as f64
    }

    #[must_use]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let last = self.counts.len().checked_sub(1)?;
        let width = self.bin_width();
        if width <= 0.0 || value.is_nan() || value < self.min {
            return Some(0);
        }
        let idx = ((value - self.min) / width).floor();
        Some(if idx >= last as f64 { last } else { idx as usize })
    }

    pub fn add(&mut self, value: f64) {
        if let Some(idx) = self.bin_index(value) {
            self.counts[idx] += 1;
        }
    }

    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
    }

    #[must_use]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    #[must_use]
    pub fn count(&self, bin: usize) -> u64 {
        self.counts.get(bin).copied().unwrap_or(0)
    }
}

/// Running count/total/min/max with an optional histogram.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    count: u64,
    total: f64,
    min: Option<f64>,
    max: Option<f64>,
    histogram: Option<Histogram>,
}

impl Monitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_histogram(min: f64, max: f64, bins: usize) -> Self {
        Self {
            histogram: Some(Histogram::new(min, max, bins)),
            ..Self::default()
        }
    }

    pub fn add_datum(&mut self, value: f64) {
        self.count += 1;
        self.total += value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
        if let Some(hist) = self.histogram.as_mut() {
            hist.add(value);
        }
    }

    /// Clears the data; the histogram layout is kept.
    pub fn reset(&mut self) {
        self.count = 0;
        self.total = 0.0;
        self.min = None;
        self.max = None;
        if let Some(hist) = self.histogram.as_mut() {
            hist.reset();
        }
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Zero when empty.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total / self.count as f64
        }
    }

    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    #[must_use]
    pub fn histogram(&self) -> Option<&Histogram> {
        self.histogram.as_ref()
    }

    #[must_use]
    pub fn hist_count(&self, bin: usize) -> u64 {
        self.histogram.as_ref().map_or(0, |h| h.count(bin))
    }
}

/// Lazily created monitors over the whole grid.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsCollector {
    point_bins: BinConfig,
    num_tasks: usize,
    org_count: Option<Monitor>,
    point_values: Option<Monitor>,
    tasks_completed: Option<Monitor>,
}

impl MetricsCollector {
    #[must_use]
    pub fn new(point_bins: BinConfig, num_tasks: usize) -> Self {
        Self {
            point_bins,
            num_tasks,
            org_count: None,
            point_values: None,
            tasks_completed: None,
        }
    }

    #[must_use]
    pub fn point_bins(&self) -> BinConfig {
        self.point_bins
    }

    pub fn org_count_node(&mut self) -> &Monitor {
        self.org_count.get_or_insert_with(Monitor::new)
    }

    pub fn point_values_node(&mut self) -> &Monitor {
        let bins = self.point_bins;
        self.point_values
            .get_or_insert_with(|| Monitor::with_histogram(bins.min, bins.max, bins.count))
    }

    pub fn tasks_completed_node(&mut self) -> &Monitor {
        let n = self.num_tasks;
        self.tasks_completed
            .get_or_insert_with(|| Monitor::with_histogram(0.0, n as f64, n))
    }

    pub fn enable_all(&mut self) {
        self.org_count_node();
        self.point_values_node();
        self.tasks_completed_node();
    }

    #[must_use]
    pub fn org_count(&self) -> Option<&Monitor> {
        self.org_count.as_ref()
    }

    #[must_use]
    pub fn point_values(&self) -> Option<&Monitor> {
        self.point_values.as_ref()
    }

    #[must_use]
    pub fn tasks_completed(&self) -> Option<&Monitor> {
        self.tasks_completed.as_ref()
    }

    /// Resets every existing monitor and re-scans `slots`.
    pub fn refresh<U>(&mut self, slots: &[Option<Organism<U>>]) {
        if let Some(m) = self.org_count.as_mut() {
            m.reset();
            for _ in slots.iter().flatten() {
                m.add_datum(1.0);
            }
        }
        if let Some(m) = self.point_values.as_mut() {
            m.reset();
            for org in slots.iter().flatten() {
                m.add_datum(org.state.points);
            }
        }
        if let Some(m) = self.tasks_completed.as_mut() {
            m.reset();
            for org in slots.iter().flatten() {
                if let Some(task) = org.state.last_task_completed {
                    m.add_datum(task as f64);
                }
            }
        }
    }

    /// Row for the data file. Monitors that were never created read as zero.
    #[must_use]
    pub fn data_row(&self, update: u64) -> DataRow {
        let tasks = self.tasks_completed.as_ref();
        DataRow {
            update,
            points: self.point_values.as_ref().map_or(0.0, Monitor::total),
            mean_tasks: tasks.map_or(0.0, Monitor::mean),
            total_tasks: tasks.map_or(0.0, Monitor::total),
            total_orgs: self.org_count.as_ref().map_or(0.0, Monitor::total),
            task_bins: (0..self.num_tasks)
                .map(|i| tasks.map_or(0, |m| m.hist_count(i)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_clamps() {
        let mut hist = Histogram::new(0.0, 9.1, 10);
        hist.add(-4.0);
        hist.add(0.5);
        hist.add(9.0);
        hist.add(250.0);
        assert_eq!(hist.count(0), 2);
        assert_eq!(hist.count(9), 2);
    }

    #[test]
    fn test_task_histogram_is_one_bin_per_task() {
        let mut hist = Histogram::new(0.0, 10.0, 10);
        for i in 0..10 {
            hist.add(i as f64);
        }
        assert!(hist.counts().iter().all(|&c| c == 1));
    }

    #[test]
    fn test_monitor_stats() {
        let mut m = Monitor::new();
        assert_eq!(m.mean(), 0.0);
        assert!(m.min().is_none());
        for v in [2.0, 4.0, 9.0] {
            m.add_datum(v);
        }
        assert_eq!(m.count(), 3);
        assert_eq!(m.total(), 15.0);
        assert_eq!(m.mean(), 5.0);
        assert_eq!(m.min(), Some(2.0));
        assert_eq!(m.max(), Some(9.0));
        m.reset();
        assert_eq!(m.count(), 0);
        assert_eq!(m.total(), 0.0);
    }

    #[test]
    fn test_new_nodes_start_empty() {
        let mut collector = MetricsCollector::new(BinConfig::default(), 10);
        assert_eq!(collector.point_values_node().count(), 0);
        assert_eq!(collector.tasks_completed_node().histogram().map(|h| h.counts().len()), Some(10));
        let row = collector.data_row(0);
        assert_eq!(row.task_bins.len(), 10);
        assert_eq!(row.total_orgs, 0.0);
    }

    #[test]
    fn test_empty_histogram_ignores_data() {
        let mut m = Monitor::with_histogram(0.0, 0.0, 0);
        m.add_datum(3.0);
        assert_eq!(m.count(), 1);
        assert_eq!(m.hist_count(0), 0);
    }
}
