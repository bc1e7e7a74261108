//! CSV ingestion into `ProjectRecord`s.
//!
//! Files must carry a header row; the columns `title`, `year`, `abstract`,
//! `supervisor` and `student` are read by name, missing ones become empty
//! strings and extra ones are ignored.

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::ProjectRecord;

const ALLOWED_EXTENSIONS: &[&str] = &["csv"];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    title: String,
    year: String,
    #[serde(rename = "abstract")]
    abstract_text: String,
    supervisor: String,
    student: String,
}

impl From<CsvRow> for ProjectRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            title: row.title,
            year: row.year,
            abstract_text: row.abstract_text,
            supervisor: row.supervisor,
            student: row.student,
        }
    }
}

/// True when `file_name` has one of the accepted upload extensions.
pub fn allowed_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvIngestor;

impl CsvIngestor {
    pub fn new() -> Self { Self }

    /// Reads one `.csv` file, or every `.csv` file below a directory in path order.
    pub fn process_path(&self, path: &Path) -> Result<Vec<ProjectRecord>> {
        if path.is_dir() {
            return self.process_directory(path);
        }
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if !allowed_file(name) {
            return Err(Error::Ingest(format!("{} is not a CSV file", path.display())));
        }
        self.process_file(path)
    }

    pub fn process_directory(&self, data_dir: &Path) -> Result<Vec<ProjectRecord>> {
        let files = self.list_csv_files(data_dir);
        if files.is_empty() {
            info!(dir = %data_dir.display(), "no .csv files found");
            return Ok(vec![]);
        }
        let mut records = Vec::new();
        for (file_index, file_path) in files.iter().enumerate() {
            debug!(file = %file_path.display(), "processing file {}/{}", file_index + 1, files.len());
            records.extend(self.process_file(file_path)?);
        }
        info!(files = files.len(), records = records.len(), "processed CSV directory");
        Ok(records)
    }

    pub fn process_file(&self, file_path: &Path) -> Result<Vec<ProjectRecord>> {
        let file = File::open(file_path)
            .map_err(|e| Error::Ingest(format!("cannot open {}: {}", file_path.display(), e)))?;
        self.process_reader(file)
    }

    pub fn process_reader<R: Read>(&self, reader: R) -> Result<Vec<ProjectRecord>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let mut records = Vec::new();
        for (line, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
            let row = row.map_err(|e| Error::Ingest(format!("row {}: {}", line + 1, e)))?;
            records.push(ProjectRecord::from(row));
        }
        Ok(records)
    }

    fn list_csv_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut csv_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if path.file_name().and_then(|s| s.to_str()).is_some_and(allowed_file) { csv_files.push(path.to_path_buf()); }
        }
        csv_files.sort(); csv_files
    }
}
