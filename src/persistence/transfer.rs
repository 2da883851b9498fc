use super::files::{atomic_write, read_file};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Export filename for a given day, e.g. focusflow-tasks-2026-10-18.json
pub fn export_file_name(date: NaiveDate) -> String {
    format!("focusflow-tasks-{}.json", date.format("%Y-%m-%d"))
}

/// Write an export snapshot to `output`, or to the dated default file inside `dir`
pub fn write_export(snapshot: &str, output: Option<&Path>, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    let path = match output {
        Some(path) => path.to_path_buf(),
        None => dir.join(export_file_name(date)),
    };
    atomic_write(&path, snapshot)?;
    Ok(path)
}

/// Read an import file; a missing file is an error here
pub fn read_import(path: &Path) -> Result<String> {
    read_file(path)?.with_context(|| format!("Import file not found: {}", path.display()))
}
