//! Freshness policy and provider refresh
//!
//! Data for a day is "fresh enough" as soon as at least one record exists
//! for it, however old that record is. That bounds provider cost to one
//! on-demand refresh per day of data.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use super::EventCache;
use crate::error::CacheResult;
use crate::provider::{build_prompt, parse_candidates};
use crate::types::{EventRecord, RawCandidate, SearchType};

impl EventCache {
    /// `true` iff no record is stored for `today`
    pub async fn needs_refresh(&self, today: NaiveDate) -> CacheResult<bool> {
        Ok(self.store.count_for_date(today).await? == 0)
    }

    /// Ask the provider for candidates without touching the store
    pub async fn fetch_candidates(&self, search_type: SearchType) -> CacheResult<Vec<RawCandidate>> {
        let prompt = build_prompt(search_type, &self.city, Local::now());
        let text = self.provider.complete(&prompt).await?;
        let candidates = parse_candidates(&text)?;
        info!(
            provider = self.provider.name(),
            search_type = %search_type,
            count = candidates.len(),
            "provider returned candidates"
        );
        Ok(candidates)
    }

    /// One provider call, one ingest batch, one refresh-log entry
    ///
    /// The provider response is fully received and parsed before the store
    /// is written. The log entry is only appended after the batch commits,
    /// so a failed refresh leaves no trace in either table.
    pub async fn refresh(&self, search_type: SearchType) -> CacheResult<Vec<EventRecord>> {
        let candidates = self.fetch_candidates(search_type).await?;
        let stored = self.ingest(candidates, search_type.source()).await?;

        self.store
            .append_refresh_log(
                search_type.as_str(),
                stored.len() as i64,
                search_type.cost_estimate(),
            )
            .await?;

        info!(
            search_type = %search_type,
            events = stored.len(),
            cost = search_type.cost_estimate(),
            "refresh complete"
        );
        Ok(stored)
    }

    /// Refresh `today` on demand; returns whether a refresh ran
    pub async fn ensure_fresh(&self, today: NaiveDate) -> CacheResult<bool> {
        if !self.needs_refresh(today).await? {
            return Ok(false);
        }

        warn!(date = %today, "no cached events for today, refreshing from provider");
        self.refresh(SearchType::Weekly).await?;
        Ok(true)
    }
}
