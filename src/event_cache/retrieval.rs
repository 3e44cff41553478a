//! Retrieval engine

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use super::EventCache;
use crate::error::CacheResult;
use crate::types::{EventQuery, EventRecord};
use crate::utils::time::current_window;

/// Answer to a "current events" request
#[derive(Debug, Clone, Serialize)]
pub struct CurrentEvents {
    pub date: NaiveDate,
    #[serde(rename = "windowStart")]
    pub window_start: String,
    #[serde(rename = "windowEnd")]
    pub window_end: String,
    /// Whether a provider refresh ran to answer this request
    pub refreshed: bool,
    pub events: Vec<EventRecord>,
}

impl EventCache {
    /// Filtered records, small venues first, then by demand and start time
    pub async fn retrieve(&self, query: &EventQuery) -> CacheResult<Vec<EventRecord>> {
        let events = self.store.query_events(query).await?;
        debug!(?query, count = events.len(), "retrieved events");
        Ok(events)
    }

    /// Refresh if today is empty, then read today's window around `now`
    ///
    /// The window never leaves the current day: before 02:00 it starts at
    /// `00:00` rather than two hours back.
    pub async fn current_events(&self, now: NaiveDateTime) -> CacheResult<CurrentEvents> {
        let date = now.date();
        let refreshed = self.ensure_fresh(date).await?;
        let (window_start, window_end) = current_window(now);

        let query = EventQuery::for_date(date).window(window_start.clone(), window_end.clone());
        let events = self.retrieve(&query).await?;

        Ok(CurrentEvents {
            date,
            window_start,
            window_end,
            refreshed,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::provider::FixedResponseProvider;
    use crate::store::EventStore;
    use crate::types::{Demand, EventSource, RawCandidate};

    async fn cache(response: &str) -> (EventCache, Arc<FixedResponseProvider>) {
        let provider = Arc::new(FixedResponseProvider::new(response));
        let store = EventStore::in_memory().await.unwrap();
        (EventCache::new(store, provider.clone(), "München"), provider)
    }

    #[tokio::test]
    async fn test_small_venue_outranks_earlier_large() {
        let (cache, _) = cache("[]").await;
        cache
            .ingest(
                vec![
                    RawCandidate::new("A", "2025-06-01")
                        .with_capacity(100)
                        .with_demand(Demand::High)
                        .with_time("21:00"),
                    RawCandidate::new("B", "2025-06-01")
                        .with_capacity(5000)
                        .with_demand(Demand::High)
                        .with_time("20:00"),
                ],
                EventSource::Manual,
            )
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let names: Vec<String> = cache
            .retrieve(&EventQuery::for_date(date))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_current_events_uses_cache_when_present() {
        let (cache, provider) = cache(r#"[{"name": "remote", "date": "2025-06-01"}]"#).await;
        cache
            .ingest(
                vec![RawCandidate::new("cached", "2025-06-01").with_time("19:00")],
                EventSource::Manual,
            )
            .await
            .unwrap();

        let now = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        let current = cache.current_events(now).await.unwrap();

        assert!(!current.refreshed);
        assert_eq!(provider.calls(), 0);
        assert_eq!(current.window_start, "16:00");
        assert_eq!(current.window_end, "23:59");
        assert_eq!(current.events.len(), 1);
        assert_eq!(current.events[0].name, "cached");
    }

    #[tokio::test]
    async fn test_current_events_refreshes_empty_day() {
        let (cache, provider) = cache(
            r#"[{"name": "late show", "date": "2025-06-01", "time": "22:00"},
                {"name": "matinee", "date": "2025-06-01", "time": "11:00", "endTime": "13:00"}]"#,
        )
        .await;

        let now = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(20, 0, 0)
            .unwrap();
        let current = cache.current_events(now).await.unwrap();

        assert!(current.refreshed);
        assert_eq!(provider.calls(), 1);
        let names: Vec<&str> = current.events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["late show"]);
    }
}
