//! Downloads folder adapter
//!
//! Report spreadsheets land here, one file per download, never overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::result::{Error, Result};
use crate::domain::TransactionKind;

/// Destination directory for downloaded reports
#[derive(Debug, Clone)]
pub struct DownloadsFolder {
    dir: PathBuf,
}

impl DownloadsFolder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<Kind>_Report_<unix-millis>.xlsx`
    pub fn report_file_name(kind: TransactionKind, now: DateTime<Utc>) -> String {
        format!("{}_Report_{}.xlsx", kind.title(), now.timestamp_millis())
    }

    /// Write `bytes` to a new file in the folder and return its path
    pub fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::storage(format!("Failed to create downloads folder {:?}: {}", self.dir, e))
        })?;

        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "saved download");
        Ok(path)
    }
}
