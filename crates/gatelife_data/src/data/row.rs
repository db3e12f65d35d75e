use serde::{Deserialize, Serialize};

/// One line of the per-tick data file.
///
/// Column order is fixed: `update, points, mean_tasks, total_tasks,
/// total_orgs`, then one `task_i` column per registered task.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataRow {
    pub update: u64,
    /// Sum of all occupants' points.
    pub points: f64,
    /// Mean of the recorded last-task indices.
    pub mean_tasks: f64,
    /// Sum of the recorded last-task indices.
    pub total_tasks: f64,
    /// Number of occupied cells.
    pub total_orgs: f64,
    /// Organisms whose last completed task is `i`.
    pub task_bins: Vec<u64>,
}

impl DataRow {
    pub const FIXED_COLUMNS: [&'static str; 5] =
        ["update", "points", "mean_tasks", "total_tasks", "total_orgs"];

    #[must_use]
    pub fn column_names(num_tasks: usize) -> Vec<String> {
        Self::FIXED_COLUMNS
            .iter()
            .map(|c| (*c).to_string())
            .chain((0..num_tasks).map(|i| format!("task_{i}")))
            .collect()
    }

    /// Values rendered in column order.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        let mut out = vec![
            self.update.to_string(),
            self.points.to_string(),
            self.mean_tasks.to_string(),
            self.total_tasks.to_string(),
            self.total_orgs.to_string(),
        ];
        out.extend(self.task_bins.iter().map(u64::to_string));
        out
    }
}
