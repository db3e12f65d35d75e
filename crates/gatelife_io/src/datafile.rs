//! Per-tick tabular output.
//!
//! A header line of column names followed by one comma separated row per
//! update. The header is the only line starting with a letter, which
//! [`crate::munge`] relies on to skip it.

use crate::error::{IoError, Result};
use gatelife_data::DataRow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct DataFile<W: Write> {
    writer: W,
    num_tasks: usize,
    rows: u64,
}

impl DataFile<BufWriter<File>> {
    /// Creates (truncating) the file at `path`, including missing parent
    /// directories, and writes the header.
    pub fn create<P: AsRef<Path>>(path: P, num_tasks: usize) -> Result<Self> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                IoError::FileSystem(e).with_context(format!("creating {}", dir.display()))
            })?;
        }
        let file = File::create(path).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("creating {}", path.display()))
        })?;
        Self::new(BufWriter::new(file), num_tasks)
    }
}

impl<W: Write> DataFile<W> {
    pub fn new(mut writer: W, num_tasks: usize) -> Result<Self> {
        writeln!(writer, "{}", DataRow::column_names(num_tasks).join(","))?;
        Ok(Self {
            writer,
            num_tasks,
            rows: 0,
        })
    }

    pub fn write_row(&mut self, row: &DataRow) -> Result<()> {
        if row.task_bins.len() != self.num_tasks {
            return Err(IoError::validation(format!(
                "row has {} task columns, file expects {}",
                row.task_bins.len(),
                self.num_tasks
            )));
        }
        writeln!(self.writer, "{}", row.values().join(","))?;
        self.rows += 1;
        Ok(())
    }

    #[must_use]
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
