//! Result Store: persists one report file per screened resume.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use tracing::{debug, warn};

use crate::screening::report::render_report;
use crate::screening::ScreeningResult;

/// Upper bound on `_N` suffixes tried for one name and timestamp.
const MAX_SUFFIX: u32 = 1000;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create results folder {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write report {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("no free file name for '{0}' in the results folder")]
    NameExhausted(String),
}

/// Writes reports to `<dir>/<sanitized_name>_<YYYYMMDD_HHMMSS>.txt`.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves the rendered report, stamped with the current local time.
    pub fn save(&self, result: &ScreeningResult) -> Result<PathBuf, StoreError> {
        self.save_at(result, Local::now().naive_local())
    }

    /// Saves the rendered report under the given timestamp.
    ///
    /// Files are created exclusively; when the name is already taken a `_2`, `_3`, ...
    /// suffix is appended instead of overwriting.
    pub fn save_at(
        &self,
        result: &ScreeningResult,
        timestamp: NaiveDateTime,
    ) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let stem = format!(
            "{}_{}",
            sanitize_candidate_name(&result.candidate_name),
            timestamp.format("%Y%m%d_%H%M%S")
        );
        let report = render_report(result);

        for n in 1..=MAX_SUFFIX {
            let file_name = if n == 1 {
                format!("{stem}.txt")
            } else {
                format!("{stem}_{n}.txt")
            };
            let path = self.dir.join(file_name);

            let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(source) => return Err(StoreError::Write { path, source }),
            };

            write_or_remove(file, &path, &report)?;

            debug!("Report written to {}", path.display());
            return Ok(path);
        }

        Err(StoreError::NameExhausted(stem))
    }
}

/// Writes `report` into the freshly created `path`; on failure the partial file is deleted.
fn write_or_remove<W: Write>(mut file: W, path: &Path, report: &str) -> Result<(), StoreError> {
    let written = file.write_all(report.as_bytes()).and_then(|_| file.flush());
    drop(file);
    if let Err(source) = written {
        if let Err(e) = fs::remove_file(path) {
            warn!("Could not remove partial report {}: {e}", path.display());
        }
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Keeps alphanumerics, spaces, `-` and `_`; everything else becomes `_`, then spaces become `_`.
pub fn sanitize_candidate_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| match c {
            ' ' | '-' | '_' => c,
            c if c.is_alphanumeric() => c,
            _ => '_',
        })
        .collect::<String>()
        .replace(' ', "_");

    if safe.is_empty() {
        "Unknown".to_string()
    } else {
        safe
    }
}
