//! Schema definitions for the event cache
//!
//! All statements use create-if-absent semantics so initialization is safe
//! on every process start.

use sqlx::SqlitePool;

use crate::error::{CacheError, CacheResult};

const CREATE_EVENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        name TEXT NOT NULL,
        location TEXT,
        address TEXT NOT NULL DEFAULT '',
        lat REAL,
        lng REAL,
        start_time TEXT,
        end_time TEXT,
        capacity INTEGER,
        event_type TEXT,
        demand TEXT NOT NULL DEFAULT 'unknown',
        description TEXT NOT NULL DEFAULT '',
        is_small_venue INTEGER NOT NULL DEFAULT 0,
        ingested_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        source TEXT NOT NULL DEFAULT 'weekly'
    )
"#;

const CREATE_REFRESH_LOG: &str = r#"
    CREATE TABLE IF NOT EXISTS refresh_log (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        search_type TEXT NOT NULL,
        timestamp TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        events_found INTEGER NOT NULL DEFAULT 0,
        cost_estimate REAL NOT NULL DEFAULT 0
    )
"#;

// Retrieval filters on date/size and sorts on size, demand and start time.
const INDICES: &[(&str, &str)] = &[
    (
        "idx_events_date",
        "CREATE INDEX IF NOT EXISTS idx_events_date ON events(date)",
    ),
    (
        "idx_events_start_time",
        "CREATE INDEX IF NOT EXISTS idx_events_start_time ON events(start_time)",
    ),
    (
        "idx_events_demand",
        "CREATE INDEX IF NOT EXISTS idx_events_demand ON events(demand)",
    ),
    (
        "idx_events_small_venue",
        "CREATE INDEX IF NOT EXISTS idx_events_small_venue ON events(is_small_venue)",
    ),
    (
        "idx_refresh_log_type",
        "CREATE INDEX IF NOT EXISTS idx_refresh_log_type ON refresh_log(search_type, timestamp)",
    ),
];

/// Create both tables and their indices if they do not exist yet
pub(super) async fn initialize_schema(pool: &SqlitePool) -> CacheResult<()> {
    sqlx::query(CREATE_EVENTS)
        .execute(pool)
        .await
        .map_err(|e| CacheError::store("failed to create events table", e))?;

    sqlx::query(CREATE_REFRESH_LOG)
        .execute(pool)
        .await
        .map_err(|e| CacheError::store("failed to create refresh_log table", e))?;

    for (name, statement) in INDICES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| CacheError::store(format!("failed to create index {}", name), e))?;
    }

    Ok(())
}
