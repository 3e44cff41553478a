//! Record Store - SQLite-backed cache of event listings
//!
//! The store owns two tables:
//! - `events`: one row per ingested candidate, never updated in place
//! - `refresh_log`: append-only history of provider refreshes and their cost
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! ┌──────────┐    ┌──────────────┐    ┌───────────────┐    ┌──────────────┐
//! │ provider │───►│ classify +   │───►│ insert_batch  │───►│ refresh_log  │
//! │ response │    │ NewEvent     │    │ (one tx)      │    │ append       │
//! └──────────┘    └──────────────┘    └───────────────┘    └──────────────┘
//!
//! Read Path:
//! ┌──────────────┐    ┌─────────────────────────────────────────┐
//! │ EventQuery   │───►│ date / window / size filter + ranking   │───► records
//! └──────────────┘    └─────────────────────────────────────────┘
//! ```
//!
//! Access goes through an explicit [`EventStore`] handle with a
//! `connect` → `initialize` → `close` lifecycle. Every write runs in its
//! own transaction; the store never holds a transaction open across an
//! await on anything other than SQLite itself.

mod events;
mod refresh_log;
mod schema;
mod stats;

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use crate::error::{CacheError, CacheResult};

/// Path value selecting a private in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Configuration for the EventStore
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database file, or `:memory:`
    pub path: PathBuf,
    /// Upper bound on pooled connections for file-backed databases
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("crowddrive.db"),
            max_connections: 5,
        }
    }
}

impl StoreConfig {
    /// Create config with a custom database path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Config for a throwaway in-memory database
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY
    }
}

/// Handle to the event cache database
#[derive(Debug, Clone)]
pub struct EventStore {
    pool: SqlitePool,
}

impl EventStore {
    /// Open a connection pool for `config`
    ///
    /// The schema is not touched; call [`EventStore::initialize`] next.
    pub async fn connect(config: &StoreConfig) -> CacheResult<Self> {
        let (options, pool_options) = if config.is_in_memory() {
            // Each in-memory connection is its own database, so pin the pool
            // to a single connection that never expires.
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| CacheError::store("invalid SQLite URL", e))?;
            let pool_options = SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
            (options, pool_options)
        } else {
            let options = SqliteConnectOptions::new()
                .filename(&config.path)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
            let pool_options = SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(config.max_connections.max(1))
                .acquire_timeout(Duration::from_secs(30))
                .idle_timeout(Duration::from_secs(600));
            (options, pool_options)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| CacheError::store("failed to open SQLite pool", e))?;

        debug!(path = %config.path.display(), "event store connected");
        Ok(Self { pool })
    }

    /// Connect and initialize in one step
    pub async fn open(config: &StoreConfig) -> CacheResult<Self> {
        let store = Self::connect(config).await?;
        store.initialize().await?;
        Ok(store)
    }

    /// Fresh, initialized in-memory store
    pub async fn in_memory() -> CacheResult<Self> {
        Self::open(&StoreConfig::in_memory()).await
    }

    /// Idempotently create tables and indices
    pub async fn initialize(&self) -> CacheResult<()> {
        schema::initialize_schema(&self.pool).await
    }

    /// Close all pooled connections; the handle is unusable afterwards
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_in_memory_detection() {
        assert!(StoreConfig::in_memory().is_in_memory());
        assert!(!StoreConfig::new("data/events.db").is_in_memory());
        assert_eq!(StoreConfig::default().path, PathBuf::from("crowddrive.db"));
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let store = EventStore::in_memory().await.unwrap();
        store.initialize().await.unwrap();
        store.initialize().await.unwrap();
        store.close().await;
    }

    #[tokio::test]
    async fn test_file_backed_store_persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("events.db"));
        let date = chrono::NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        let store = EventStore::open(&config).await.unwrap();
        store
            .insert_batch(
                vec![crate::types::NewEvent::new("Vernissage", date)],
                crate::types::EventSource::Manual,
            )
            .await
            .unwrap();
        store.close().await;

        let reopened = EventStore::open(&config).await.unwrap();
        assert_eq!(reopened.count_for_date(date).await.unwrap(), 1);
        reopened.close().await;
    }
}
