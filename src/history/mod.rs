//! Reads recent visits from Chrome's history store. The store is an SQLite file the running
//! browser keeps open, so it can be read in two ways, see [AccessStrategy].

pub mod reader;
pub mod scratch;
pub mod timestamp;

#[cfg(test)]
pub(crate) mod fixtures;

use std::{io, path::PathBuf};

use chrono::{DateTime, Duration, Utc};
use clap::ValueEnum;
use rusqlite::ErrorCode;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};

pub use reader::{query_copy, query_direct, read_entries, HISTORY_QUERY};

pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
pub const MISSING_TITLE: &str = "(No title)";

/// Single visit joined with the metadata of its URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub url: String,
    pub title: String,
    pub visit_time: Option<DateTime<Utc>>,
    /// Visits to this URL overall, not only the one this entry represents.
    pub visit_count: u32,
    #[serde(rename = "duration_seconds", serialize_with = "duration_ser::serialize")]
    pub duration: Duration,
}

impl HistoryEntry {
    pub fn duration_seconds(&self) -> f64 {
        duration_ser::as_seconds(&self.duration)
    }
}

mod duration_ser {
    use chrono::Duration;
    use serde::Serializer;

    pub fn as_seconds(duration: &Duration) -> f64 {
        duration.num_microseconds().unwrap_or(i64::MAX) as f64 / 1_000_000.
    }

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(as_seconds(duration))
    }
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Chrome history database not found at {0:?}")]
    NotFound(PathBuf),
    #[error("database is locked (Chrome might be using it): {0}")]
    Locked(#[source] rusqlite::Error),
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),
    #[error("failed to copy the history database: {0}")]
    Io(#[from] io::Error),
    #[error("scratch path {0:?} would overwrite the history database or its sidecars")]
    ScratchIsStore(PathBuf),
}

impl From<rusqlite::Error> for HistoryError {
    fn from(e: rusqlite::Error) -> Self {
        match e.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked) => Self::Locked(e),
            _ => Self::Database(e),
        }
    }
}

/// How the store is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccessStrategy {
    /// Open the live file read-only. Fails with [HistoryError::Locked] if Chrome holds a lock.
    Direct,
    /// Query a scratch copy of the file. Never contends with Chrome but copies the whole store.
    Copy,
    /// [AccessStrategy::Direct], retried once as [AccessStrategy::Copy] on a lock conflict.
    Auto,
}

#[derive(Debug, Clone)]
pub struct HistoryOptions {
    pub history_path: PathBuf,
    pub scratch_path: PathBuf,
    pub strategy: AccessStrategy,
    pub limit: u32,
}

/// Most recent visits first, at most `options.limit` of them.
pub fn query_history(options: &HistoryOptions) -> Result<Vec<HistoryEntry>, HistoryError> {
    let HistoryOptions {
        history_path,
        scratch_path,
        strategy,
        limit,
    } = options;
    match strategy {
        AccessStrategy::Direct => query_direct(history_path, *limit),
        AccessStrategy::Copy => query_copy(history_path, scratch_path, *limit),
        AccessStrategy::Auto => match query_direct(history_path, *limit) {
            Err(HistoryError::Locked(e)) => {
                warn!("History is locked ({e}), falling back to a scratch copy");
                query_copy(history_path, scratch_path, *limit)
            }
            result => result,
        },
    }
}

/// Same as [query_history], except failures are logged and reported as no history.
pub fn recent_history(options: &HistoryOptions) -> Vec<HistoryEntry> {
    match query_history(options) {
        Ok(entries) => {
            info!("Read {} history entries", entries.len());
            entries
        }
        Err(e) => {
            error!("Error reading Chrome history: {e}");
            Vec::new()
        }
    }
}
