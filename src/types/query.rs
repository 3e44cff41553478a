//! Retrieval query parameters

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Filter for cached records
///
/// `window_end` is carried for callers and echoed in responses, but only
/// `window_start` restricts results: a record passes when its start or end
/// time is at or after it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventQuery {
    pub date: Option<NaiveDate>,
    #[serde(rename = "windowStart")]
    pub window_start: Option<String>,
    #[serde(rename = "windowEnd")]
    pub window_end: Option<String>,
    #[serde(rename = "smallOnly")]
    pub small_only: bool,
}

impl EventQuery {
    /// All records dated `date`
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Default::default()
        }
    }

    pub fn window(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.window_start = Some(start.into());
        self.window_end = Some(end.into());
        self
    }

    pub fn small_only(mut self, small_only: bool) -> Self {
        self.small_only = small_only;
        self
    }
}
