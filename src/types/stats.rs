//! Aggregate store statistics

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Read-only aggregate over both tables
///
/// `Default` is the all-zero value returned when statistics cannot be
/// computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StoreStats {
    #[serde(rename = "totalEvents")]
    pub total_events: i64,
    #[serde(rename = "smallVenueCount")]
    pub small_venue_count: i64,
    #[serde(rename = "largeVenueCount")]
    pub large_venue_count: i64,
    #[serde(rename = "refreshCountsByType")]
    pub refresh_counts_by_type: BTreeMap<String, i64>,
    #[serde(rename = "totalEstimatedCost")]
    pub total_estimated_cost: f64,
    /// Shortcut for `refresh_counts_by_type["weekly"]`
    #[serde(rename = "weeklySearches")]
    pub weekly_searches: i64,
    /// Shortcut for `refresh_counts_by_type["daily"]`
    #[serde(rename = "dailySearches")]
    pub daily_searches: i64,
}

impl StoreStats {
    /// Number of refreshes logged under `search_type`
    pub fn refresh_count(&self, search_type: &str) -> i64 {
        self.refresh_counts_by_type
            .get(search_type)
            .copied()
            .unwrap_or(0)
    }

    /// Insert one per-type count, keeping the weekly/daily shortcuts in step
    pub fn record_refresh_count(&mut self, search_type: impl Into<String>, count: i64) {
        let search_type = search_type.into();
        match search_type.as_str() {
            "weekly" => self.weekly_searches = count,
            "daily" => self.daily_searches = count,
            _ => {}
        }
        self.refresh_counts_by_type.insert(search_type, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let stats = StoreStats::default();
        assert_eq!(stats.total_events, 0);
        assert_eq!(stats.weekly_searches, 0);
        assert_eq!(stats.total_estimated_cost, 0.0);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalEvents"], 0);
        assert!(json["refreshCountsByType"].as_object().unwrap().is_empty());
        assert_eq!(json["weeklySearches"], 0);
        assert_eq!(json["dailySearches"], 0);
    }

    #[test]
    fn test_refresh_count_lookup() {
        let mut stats = StoreStats::default();
        stats.record_refresh_count("weekly", 2);
        stats.record_refresh_count("daily", 5);
        stats.record_refresh_count("manual", 1);
        assert_eq!(stats.weekly_searches, 2);
        assert_eq!(stats.daily_searches, 5);
        assert_eq!(stats.refresh_count("manual"), 1);
        assert_eq!(stats.refresh_count("hourly"), 0);
    }
}
