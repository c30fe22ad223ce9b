//! Flat tabular projection of loaded records and its CSV rendering.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::error::ConsoleError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub cells: Vec<String>,
}

impl ExportRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    pub fn new(headers: &[&str], rows: Vec<ExportRow>) -> Self {
        Self {
            headers: headers.iter().map(|header| header.to_string()).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_csv(&self) -> Result<String, ConsoleError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&self.headers)
            .map_err(|err| ConsoleError::Export(err.to_string()))?;
        for row in &self.rows {
            if row.cells.len() != self.headers.len() {
                return Err(ConsoleError::Export(format!(
                    "row has {} cells, expected {}",
                    row.cells.len(),
                    self.headers.len()
                )));
            }
            writer
                .write_record(&row.cells)
                .map_err(|err| ConsoleError::Export(err.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| ConsoleError::Export(err.to_string()))?;
        String::from_utf8(bytes)
            .map_err(|err| ConsoleError::Export(err.to_string()))
    }

    /// Writes the CSV document into `dir` and returns the created file path.
    pub fn write_csv(&self, dir: &Path, file_name: &str) -> Result<PathBuf, ConsoleError> {
        let csv = self.to_csv()?;
        fs::create_dir_all(dir).map_err(|err| {
            ConsoleError::Export(format!(
                "failed to create export directory '{}': {err}",
                dir.display()
            ))
        })?;
        let path = dir.join(file_name);
        fs::write(&path, csv).map_err(|err| {
            ConsoleError::Export(format!(
                "failed to write export file '{}': {err}",
                path.display()
            ))
        })?;
        Ok(path)
    }
}

pub fn export_file_name(resource: &str, date: NaiveDate) -> String {
    format!("{resource}-export-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
