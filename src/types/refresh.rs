//! Refresh intents and the refresh-history log

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EventSource;
use crate::error::CacheError;

/// Intent of a provider refresh; drives prompt content and cost estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// Broad sweep over the next seven days, small venues first
    #[default]
    Weekly,
    /// Incremental sweep over today and the next few days
    Daily,
}

impl SearchType {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Weekly => "weekly",
            SearchType::Daily => "daily",
        }
    }

    /// Static cost estimate booked for one refresh of this type (USD)
    pub fn cost_estimate(self) -> f64 {
        match self {
            SearchType::Weekly => 0.75,
            SearchType::Daily => 0.15,
        }
    }

    /// Provenance tag given to records ingested by this refresh
    pub fn source(self) -> EventSource {
        match self {
            SearchType::Weekly => EventSource::Weekly,
            SearchType::Daily => EventSource::Daily,
        }
    }
}

impl FromStr for SearchType {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(SearchType::Weekly),
            "daily" => Ok(SearchType::Daily),
            other => Err(CacheError::Validation(format!(
                "unknown search type '{}', expected 'weekly' or 'daily'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the append-only refresh history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshLogEntry {
    pub id: i64,
    /// Stored label; `weekly` and `daily` for provider refreshes
    #[serde(rename = "searchType")]
    pub search_type: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "eventsFound")]
    pub events_found: i64,
    #[serde(rename = "costEstimate")]
    pub cost_estimate: f64,
}
