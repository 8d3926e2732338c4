use std::path::Path;

use rusqlite::{params, Connection, OpenFlags, Row};
use tracing::{debug, instrument};

use super::{
    scratch::ScratchCopy,
    timestamp::{duration_from_column, visit_time_from_column},
    HistoryEntry, HistoryError, MISSING_TITLE,
};

/// Latest visits joined with their URL rows.
pub const HISTORY_QUERY: &str = "
SELECT
    urls.url,
    urls.title,
    urls.visit_count,
    visits.visit_time,
    visits.visit_duration
FROM urls
JOIN visits ON urls.id = visits.url
ORDER BY visits.visit_time DESC
LIMIT ?1";

fn row_to_entry(row: &Row) -> rusqlite::Result<HistoryEntry> {
    let title = row
        .get::<_, Option<String>>(1)?
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| MISSING_TITLE.to_string());
    Ok(HistoryEntry {
        url: row.get(0)?,
        title,
        visit_count: row.get::<_, Option<u32>>(2)?.unwrap_or_default(),
        visit_time: visit_time_from_column(row.get(3)?),
        duration: duration_from_column(row.get(4)?),
    })
}

/// Runs [HISTORY_QUERY] on an already opened store.
pub fn read_entries(conn: &Connection, limit: u32) -> Result<Vec<HistoryEntry>, HistoryError> {
    let mut statement = conn.prepare(HISTORY_QUERY)?;
    let entries = statement
        .query_map(params![limit], row_to_entry)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    debug!("Query returned {} rows", entries.len());
    Ok(entries)
}

fn ensure_exists(path: &Path) -> Result<(), HistoryError> {
    if path.exists() {
        Ok(())
    } else {
        Err(HistoryError::NotFound(path.to_path_buf()))
    }
}

/// Reads the live store without taking a write lock, so Chrome can keep it open meanwhile.
#[instrument]
pub fn query_direct(history_path: &Path, limit: u32) -> Result<Vec<HistoryEntry>, HistoryError> {
    ensure_exists(history_path)?;
    let conn = Connection::open_with_flags(
        history_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    read_entries(&conn, limit)
}

/// Copies the store (and its journal or WAL) to `scratch_path`, reads the copy and removes it
/// again whatever the outcome. A `scratch_path` that shares files with the store is refused.
#[instrument]
pub fn query_copy(
    history_path: &Path,
    scratch_path: &Path,
    limit: u32,
) -> Result<Vec<HistoryEntry>, HistoryError> {
    ensure_exists(history_path)?;
    let scratch = ScratchCopy::create(history_path, scratch_path)?;
    let conn = Connection::open(scratch.path())?;
    let entries = read_entries(&conn, limit);
    // The connection has to be closed before the copy is deleted.
    drop(conn);
    drop(scratch);
    entries
}
