//! Refresh history: append and look up the latest entry per search type

use chrono::Utc;
use sqlx::Row;

use super::EventStore;
use crate::error::{CacheError, CacheResult};
use crate::types::RefreshLogEntry;

impl EventStore {
    /// Append one refresh-log entry stamped with the current time
    pub async fn append_refresh_log(
        &self,
        search_type: &str,
        events_found: i64,
        cost_estimate: f64,
    ) -> CacheResult<RefreshLogEntry> {
        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| CacheError::store("failed to begin refresh-log transaction", e))?;

        let row = sqlx::query(
            "INSERT INTO refresh_log (search_type, timestamp, events_found, cost_estimate) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, search_type, timestamp, events_found, cost_estimate",
        )
        .bind(search_type)
        .bind(Utc::now())
        .bind(events_found)
        .bind(cost_estimate)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| CacheError::store("failed to append refresh log", e))?;

        let entry = row_to_entry(&row)?;
        tx.commit()
            .await
            .map_err(|e| CacheError::store("failed to commit refresh log", e))?;

        Ok(entry)
    }

    /// Newest entry for `search_type`, if any
    pub async fn last_refresh(&self, search_type: &str) -> CacheResult<Option<RefreshLogEntry>> {
        let row = sqlx::query(
            "SELECT id, search_type, timestamp, events_found, cost_estimate \
             FROM refresh_log WHERE search_type = ? \
             ORDER BY timestamp DESC, id DESC LIMIT 1",
        )
        .bind(search_type)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| CacheError::store("refresh log lookup failed", e))?;

        row.as_ref().map(row_to_entry).transpose()
    }
}

fn row_to_entry(row: &sqlx::sqlite::SqliteRow) -> CacheResult<RefreshLogEntry> {
    let read = |e: sqlx::Error| CacheError::store("failed to decode refresh log row", e);
    Ok(RefreshLogEntry {
        id: row.try_get("id").map_err(read)?,
        search_type: row.try_get("search_type").map_err(read)?,
        timestamp: row.try_get("timestamp").map_err(read)?,
        events_found: row.try_get("events_found").map_err(read)?,
        cost_estimate: row.try_get("cost_estimate").map_err(read)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_last_refresh_absent() {
        let store = EventStore::in_memory().await.unwrap();
        assert!(store.last_refresh("weekly").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_last_refresh_returns_newest_of_type() {
        let store = EventStore::in_memory().await.unwrap();
        store.append_refresh_log("weekly", 12, 0.75).await.unwrap();
        let second = store.append_refresh_log("weekly", 3, 0.75).await.unwrap();
        store.append_refresh_log("daily", 5, 0.15).await.unwrap();

        let last = store.last_refresh("weekly").await.unwrap().unwrap();
        assert_eq!(last.id, second.id);
        assert_eq!(last.events_found, 3);

        let daily = store.last_refresh("daily").await.unwrap().unwrap();
        assert_eq!(daily.cost_estimate, 0.15);
    }
}
