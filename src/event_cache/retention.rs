//! Retention sweeper

use chrono::{Duration, NaiveDate};
use tracing::info;

use super::EventCache;
use crate::error::CacheResult;

/// Records dated more than this many days before the reference date are purged
pub const RETENTION_DAYS: i64 = 2;

impl EventCache {
    /// Delete records dated before `reference - RETENTION_DAYS`
    ///
    /// A record exactly `RETENTION_DAYS` old is kept. The refresh log is
    /// not touched.
    pub async fn sweep(&self, reference: NaiveDate) -> CacheResult<u64> {
        let cutoff = reference - Duration::days(RETENTION_DAYS);
        let removed = self.store.delete_older_than(cutoff).await?;
        info!(cutoff = %cutoff, removed, "retention sweep complete");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::provider::FixedResponseProvider;
    use crate::store::EventStore;
    use crate::types::{EventSource, RawCandidate};

    #[tokio::test]
    async fn test_sweep_boundary() {
        let store = EventStore::in_memory().await.unwrap();
        let cache = EventCache::new(store, Arc::new(FixedResponseProvider::new("[]")), "München");
        cache
            .ingest(
                vec![
                    RawCandidate::new("yesterday", "2025-06-09"),
                    RawCandidate::new("two days", "2025-06-08"),
                    RawCandidate::new("three days", "2025-06-07"),
                    RawCandidate::new("last week", "2025-06-01"),
                ],
                EventSource::Manual,
            )
            .await
            .unwrap();
        cache.store().append_refresh_log("weekly", 4, 0.75).await.unwrap();

        let today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(cache.sweep(today).await.unwrap(), 2);

        let remaining = cache
            .store()
            .events_in_range(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            )
            .await
            .unwrap();
        let mut names: Vec<String> = remaining.into_iter().map(|r| r.name).collect();
        names.sort();
        assert_eq!(names, vec!["two days", "yesterday"]);

        // Refresh history survives the sweep
        assert!(cache.store().last_refresh("weekly").await.unwrap().is_some());
    }
}
