//! Merges per-replicate data files into one space separated table.
//!
//! Each input row contributes `uid treatment rep update total_orgs` followed
//! by the selected task columns, where `uid` is `{treatment}_{rep}`.

use crate::error::{IoError, Result};
use gatelife_core::task::TaskSuite;
use gatelife_data::DataRow;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Index of `total_orgs` in a data-file row.
const TOTAL_ORGS_COLUMN: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct MungePlan {
    pub folder: PathBuf,
    pub treatments: Vec<u32>,
    pub reps: Vec<u64>,
    /// Output label and task index for each task column to keep.
    pub tasks: Vec<(String, usize)>,
}

impl Default for MungePlan {
    fn default() -> Self {
        Self {
            folder: PathBuf::new(),
            treatments: vec![1],
            reps: (1..=50).collect(),
            tasks: ["EQU", "COMPLEX"]
                .into_iter()
                .filter_map(|name| task_column(&TaskSuite::default(), name))
                .collect(),
        }
    }
}

/// Label and data-file column index of the task called `name` in `suite`.
///
/// Columns follow the registration order of the suite the replicates ran
/// with, so a reordered custom suite must be passed here rather than the
/// default one.
#[must_use]
pub fn task_column(suite: &TaskSuite, name: &str) -> Option<(String, usize)> {
    suite
        .iter()
        .position(|t| t.name().eq_ignore_ascii_case(name))
        .map(|idx| (name.to_ascii_uppercase(), idx))
}

impl MungePlan {
    /// Data file produced by replicate `rep`: `{folder}Org_Vals{rep}SP{rep}.data`.
    #[must_use]
    pub fn replicate_path(&self, rep: u64) -> PathBuf {
        self.folder.join(format!("Org_Vals{rep}SP{rep}.data"))
    }

    #[must_use]
    pub fn header(&self) -> String {
        let mut cols = vec!["uid", "treatment", "rep", "update", "total_orgs"]
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        cols.extend(self.tasks.iter().map(|(label, _)| label.clone()));
        cols.join(" ")
    }
}

/// Converts the body rows of one data file. Lines starting with `u` are
/// headers and skipped.
pub fn munge_reader<R: BufRead, W: Write>(
    reader: R,
    treatment: u32,
    rep: u64,
    tasks: &[(String, usize)],
    out: &mut W,
) -> Result<usize> {
    let uid = format!("{treatment}_{rep}");
    let mut rows = 0;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() || line.starts_with('u') {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let pick = |col: usize| {
            fields.get(col).copied().ok_or_else(|| {
                IoError::validation(format!(
                    "line {} has {} columns, needed column {}",
                    lineno + 1,
                    fields.len(),
                    col
                ))
            })
        };
        let mut cols = vec![
            uid.clone(),
            treatment.to_string(),
            rep.to_string(),
            pick(0)?.to_string(),
            pick(TOTAL_ORGS_COLUMN)?.to_string(),
        ];
        for (_, task) in tasks {
            cols.push(pick(DataRow::FIXED_COLUMNS.len() + task)?.to_string());
        }
        writeln!(out, "{}", cols.join(" "))?;
        rows += 1;
    }
    Ok(rows)
}

/// Writes the header and every replicate's rows to `out`. Returns the number
/// of data rows written.
pub fn munge<W: Write>(plan: &MungePlan, out: &mut W) -> Result<usize> {
    writeln!(out, "{}", plan.header())?;
    let mut total = 0;
    for &treatment in &plan.treatments {
        for &rep in &plan.reps {
            let path = plan.replicate_path(rep);
            let file = open(&path)?;
            total += munge_reader(BufReader::new(file), treatment, rep, &plan.tasks, out)
                .map_err(|e| e.with_context(path.display().to_string()))?;
        }
    }
    tracing::info!(rows = total, "Merged replicate data");
    Ok(total)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => IoError::not_found(path.display().to_string()),
        _ => IoError::FileSystem(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "update,points,mean_tasks,total_tasks,total_orgs,task_0,task_1,task_2\n\
                          1,0,0,0,10,0,0,0\n\
                          2,64,2,2,11,0,0,1\n";

    #[test]
    fn test_munge_reader_selects_columns() {
        let tasks = vec![("B".to_string(), 1), ("C".to_string(), 2)];
        let mut out = Vec::new();
        let rows = munge_reader(SAMPLE.as_bytes(), 1, 7, &tasks, &mut out).unwrap();
        assert_eq!(rows, 2);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "1_7 1 7 1 10 0 0\n1_7 1 7 2 11 0 1\n");
    }

    #[test]
    fn test_short_row_is_validation_error() {
        let tasks = vec![("X".to_string(), 9)];
        let mut out = Vec::new();
        let res = munge_reader(SAMPLE.as_bytes(), 1, 1, &tasks, &mut out);
        assert!(matches!(res, Err(IoError::Validation(_))));
    }

    #[test]
    fn test_default_plan_layout() {
        let plan = MungePlan {
            folder: PathBuf::from("data"),
            ..MungePlan::default()
        };
        assert_eq!(plan.header(), "uid treatment rep update total_orgs EQU COMPLEX");
        assert_eq!(plan.replicate_path(3), PathBuf::from("data/Org_Vals3SP3.data"));
    }

    #[test]
    fn test_task_column_follows_suite_order() {
        use gatelife_core::task::{Task, TaskKind};
        let custom = TaskSuite::new(vec![
            Task::new(TaskKind::Complex, 64.0),
            Task::new(TaskKind::Equ, 4.0),
        ]);
        assert_eq!(task_column(&custom, "equ"), Some(("EQU".to_string(), 1)));
        assert_eq!(task_column(&custom, "COMPLEX"), Some(("COMPLEX".to_string(), 0)));
        assert_eq!(task_column(&custom, "NAND"), None);
        assert_eq!(
            task_column(&TaskSuite::default(), "COMPLEX"),
            Some(("COMPLEX".to_string(), 9))
        );
    }

    #[test]
    fn test_missing_replicate_is_not_found() {
        let plan = MungePlan {
            folder: std::env::temp_dir().join("gatelife_munge_missing"),
            reps: vec![1],
            ..MungePlan::default()
        };
        let mut out = Vec::new();
        assert!(matches!(
            munge(&plan, &mut out),
            Err(IoError::NotFound(_))
        ));
    }

    proptest::proptest! {
        #[test]
        fn munged_rows_have_fixed_width(
            rows in proptest::collection::vec(proptest::collection::vec(0u64..1000, 15), 0..20),
            rep in 1u64..100,
        ) {
            let mut input = DataRow::column_names(10).join(",");
            input.push('\n');
            for row in &rows {
                let line: Vec<String> = row.iter().map(u64::to_string).collect();
                input.push_str(&line.join(","));
                input.push('\n');
            }
            let plan = MungePlan::default();
            let mut out = Vec::new();
            let written = munge_reader(input.as_bytes(), 2, rep, &plan.tasks, &mut out).unwrap();
            proptest::prop_assert_eq!(written, rows.len());
            let text = String::from_utf8(out).unwrap();
            for (line, row) in text.lines().zip(&rows) {
                let fields: Vec<&str> = line.split(' ').collect();
                proptest::prop_assert_eq!(fields.len(), 7);
                proptest::prop_assert_eq!(fields[0], format!("2_{rep}"));
                proptest::prop_assert_eq!(fields[6], row[14].to_string());
            }
        }
    }
}
