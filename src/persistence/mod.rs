//! Match history persistence
//!
//! Features:
//! - JSON array file, one object per match, read by key
//! - Write to a temp file then rename over the old history
//! - Missing or corrupt history reads as empty, never fatal

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scores::MatchRecord;

/// Failure to read or write the match history
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("history I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("history could not be encoded: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only store of match records
pub trait ScoreStore {
    /// All records, oldest first. Unreadable history is empty.
    fn load_records(&self) -> Vec<MatchRecord>;

    /// Add a record to the end of the history
    fn append_record(&mut self, record: MatchRecord) -> Result<(), StoreError>;
}

/// History kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonScoreStore {
    path: PathBuf,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_all(&self, records: &[MatchRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the history. A missing or corrupt file is an empty history; any
    /// other read failure is an error so the file is never overwritten.
    fn read_history(&self) -> Result<Vec<MatchRecord>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No history at {}, starting fresh", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_str::<Vec<MatchRecord>>(&json) {
            Ok(records) => {
                log::info!("Loaded {} match records", records.len());
                Ok(records)
            }
            Err(e) => {
                log::warn!("Ignoring corrupt history {}: {e}", self.path.display());
                Ok(Vec::new())
            }
        }
    }
}

impl ScoreStore for JsonScoreStore {
    fn load_records(&self) -> Vec<MatchRecord> {
        self.read_history().unwrap_or_else(|e| {
            log::warn!("{e}");
            Vec::new()
        })
    }

    fn append_record(&mut self, record: MatchRecord) -> Result<(), StoreError> {
        let mut records = self.read_history()?;
        records.push(record);
        self.write_all(&records)?;
        log::info!("Match history saved ({} records)", records.len());
        Ok(())
    }
}

/// History kept in memory (tests, or when no file should be touched)
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    records: Vec<MatchRecord>,
}

impl MemoryScoreStore {
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_records(&self) -> Vec<MatchRecord> {
        self.records.clone()
    }

    fn append_record(&mut self, record: MatchRecord) -> Result<(), StoreError> {
        self.records.push(record);
        Ok(())
    }
}
