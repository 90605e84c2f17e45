//! File-based quote source.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::QuoteSource;
use crate::data::QuoteSnapshot;

/// Read and parse a whole JSON file.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Reads quote snapshots from a JSON file of the form
/// `{"BTC": {"currentPrice": 50000, "change24h": -1.2, "marketCap": 9.8e11}}`.
///
/// Whatever keeps the file fresh (a cron job, another process) is outside
/// this crate. The source tracks the modification time and only returns
/// data when the file has changed since the last successful read.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_modified: Option<SystemTime>,
    latest: Option<QuoteSnapshot>,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            last_error: None,
            last_modified: None,
            latest: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last snapshot successfully read, changed or not.
    pub fn latest(&self) -> Option<&QuoteSnapshot> {
        self.latest.as_ref()
    }

    fn modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    fn read_file(&mut self) -> Option<QuoteSnapshot> {
        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(snapshot) => {
                    self.last_error = None;
                    Some(snapshot)
                }
                Err(e) => {
                    self.last_error = Some(format!("Parse error: {e}"));
                    None
                }
            },
            Err(e) => {
                self.last_error = Some(format!("Read error: {e}"));
                None
            }
        }
    }
}

impl QuoteSource for FileSource {
    fn poll(&mut self) -> Option<QuoteSnapshot> {
        let current = self.modified_time();
        let changed = match (self.last_modified, current) {
            (None, _) => true,
            (Some(_), None) => {
                // Keep the last snapshot, but say it is stale.
                self.last_error = Some(format!(
                    "Read error: {} is no longer readable",
                    self.path.display()
                ));
                return None;
            }
            (Some(last), Some(current)) => current > last,
        };
        if !changed {
            self.last_error = None;
            return None;
        }

        let snapshot = self.read_file()?;
        debug!(path = %self.path.display(), symbols = snapshot.len(), "quote file read");
        self.last_modified = current;
        self.latest = Some(snapshot.clone());
        Some(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
