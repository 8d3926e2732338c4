//! Builds small stores with the same tables and columns Chrome uses.

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection};

use super::timestamp::utc_to_chrome_time;

pub struct Visit {
    pub url: &'static str,
    pub title: Option<&'static str>,
    pub visit_count: u32,
    pub visit_time: Option<i64>,
    pub visit_duration: Option<i64>,
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 16, 12, 0, 0).unwrap()
}

/// Five visits to four URLs, inserted out of time order.
pub fn sample_visits() -> Vec<Visit> {
    let at = |minutes: i64| {
        Some(utc_to_chrome_time(base_time() + chrono::Duration::minutes(minutes)))
    };
    vec![
        Visit {
            url: "https://docs.rs/rusqlite",
            title: Some("rusqlite - Rust"),
            visit_count: 3,
            visit_time: at(10),
            visit_duration: Some(12_500_000),
        },
        Visit {
            url: "https://www.youtube.com/watch?v=abc",
            title: Some("Some video - YouTube"),
            visit_count: 1,
            visit_time: at(30),
            visit_duration: Some(600_000_000),
        },
        Visit {
            url: "https://example.com/untitled",
            title: None,
            visit_count: 1,
            visit_time: at(20),
            visit_duration: None,
        },
        Visit {
            url: "https://www.reddit.com/r/rust",
            title: Some(""),
            visit_count: 7,
            visit_time: at(0),
            visit_duration: Some(0),
        },
        Visit {
            url: "https://docs.rs/rusqlite",
            title: Some("rusqlite - Rust"),
            visit_count: 3,
            visit_time: at(25),
            visit_duration: Some(1_000_000),
        },
    ]
}

pub fn create_history_store(path: &Path, visits: &[Visit]) -> Result<()> {
    let conn = Connection::open(path)?;
    conn.execute_batch(
        "CREATE TABLE urls (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url LONGVARCHAR,
            title LONGVARCHAR,
            visit_count INTEGER DEFAULT 0 NOT NULL,
            typed_count INTEGER DEFAULT 0 NOT NULL,
            last_visit_time INTEGER NOT NULL DEFAULT 0,
            hidden INTEGER DEFAULT 0 NOT NULL
        );
        CREATE TABLE visits (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url INTEGER NOT NULL,
            visit_time INTEGER,
            from_visit INTEGER,
            transition INTEGER DEFAULT 0 NOT NULL,
            segment_id INTEGER,
            visit_duration INTEGER
        );",
    )?;

    for visit in visits {
        let existing = conn
            .query_row(
                "SELECT id FROM urls WHERE url = ?1",
                params![visit.url],
                |row| row.get::<_, i64>(0),
            )
            .ok();
        let url_id = match existing {
            Some(id) => id,
            None => {
                conn.execute(
                    "INSERT INTO urls (url, title, visit_count) VALUES (?1, ?2, ?3)",
                    params![visit.url, visit.title, visit.visit_count],
                )?;
                conn.last_insert_rowid()
            }
        };
        conn.execute(
            "INSERT INTO visits (url, visit_time, visit_duration) VALUES (?1, ?2, ?3)",
            params![url_id, visit.visit_time, visit.visit_duration],
        )?;
    }
    Ok(())
}
