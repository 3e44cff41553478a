//! Store statistics
//!
//! Statistics feed the health endpoint and must never fail it: any query
//! error is logged and reported as all-zero stats.

use sqlx::Row;
use tracing::warn;

use super::EventStore;
use crate::error::{CacheError, CacheResult};
use crate::types::StoreStats;

impl EventStore {
    /// Aggregate counts and cost; degrades to zeros instead of failing
    pub async fn compute_stats(&self) -> StoreStats {
        match self.collect_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "stats unavailable, reporting zeros");
                StoreStats::default()
            }
        }
    }

    async fn collect_stats(&self) -> CacheResult<StoreStats> {
        let read = |e: sqlx::Error| CacheError::store("stats query failed", e);
        let mut stats = StoreStats::default();

        let row = sqlx::query(
            "SELECT COUNT(*) AS total, \
                    COALESCE(SUM(CASE WHEN is_small_venue = 1 THEN 1 ELSE 0 END), 0) AS small \
             FROM events",
        )
        .fetch_one(self.pool())
        .await
        .map_err(read)?;
        stats.total_events = row.try_get("total").map_err(read)?;
        stats.small_venue_count = row.try_get("small").map_err(read)?;
        stats.large_venue_count = stats.total_events - stats.small_venue_count;

        let rows = sqlx::query(
            "SELECT search_type, COUNT(*) AS count FROM refresh_log GROUP BY search_type",
        )
        .fetch_all(self.pool())
        .await
        .map_err(read)?;
        for row in &rows {
            let search_type: String = row.try_get("search_type").map_err(read)?;
            let count: i64 = row.try_get("count").map_err(read)?;
            stats.record_refresh_count(search_type, count);
        }

        let row = sqlx::query("SELECT COALESCE(SUM(cost_estimate), 0.0) AS total_cost FROM refresh_log")
            .fetch_one(self.pool())
            .await
            .map_err(read)?;
        stats.total_estimated_cost = row.try_get("total_cost").map_err(read)?;

        Ok(stats)
    }
}
