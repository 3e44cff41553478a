//! Event endpoints
//!
//! `/api/events` is served from the cache. `/api/events/filter` is a
//! separate, uncached path: every call goes to the provider and the
//! result is filtered in memory without reading or writing the store.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{error_response, ApiError};
use crate::api::state::AppState;
use crate::event_cache::CurrentEvents;
use crate::types::{RawCandidate, SearchType};
use crate::utils::time::now_local;

/// Response for GET /api/events
#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub success: bool,
    pub count: usize,
    #[serde(flatten)]
    pub current: CurrentEvents,
}

/// GET /api/events - Today's events in the current window
///
/// Refreshes from the provider first when nothing is cached for today.
pub async fn list_events(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.cache.current_events(now_local()).await {
        Ok(current) => Json(EventsResponse {
            success: true,
            count: current.events.len(),
            current,
        })
        .into_response(),
        Err(e) => error_response("current events", e),
    }
}

/// Raw query parameters for the live filter endpoint
///
/// Everything arrives as text so malformed values can be answered with a
/// JSON error instead of the extractor's plain-text rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub demand: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    #[serde(rename = "minCapacity")]
    pub min_capacity: Option<String>,
}

/// Validated filters, echoed back in the response
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventFilter {
    /// Demand label, compared case-insensitively with the provider's label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand: Option<String>,
    /// Event type, compared case-insensitively
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Minimum capacity; candidates without a capacity are dropped
    #[serde(rename = "minCapacity", skip_serializing_if = "Option::is_none")]
    pub min_capacity: Option<i64>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<FilterParams> for EventFilter {
    type Error = ApiError;

    /// Blank parameters mean "no filter"; a non-numeric `minCapacity` is rejected
    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        let min_capacity = non_blank(params.min_capacity)
            .map(|raw| {
                raw.parse::<i64>().map_err(|_| {
                    ApiError::bad_request(format!("minCapacity must be an integer, got '{}'", raw))
                })
            })
            .transpose()?;

        Ok(Self {
            demand: non_blank(params.demand),
            event_type: non_blank(params.event_type),
            min_capacity,
        })
    }
}

/// Response for GET /api/events/filter
#[derive(Debug, Serialize)]
pub struct FilterResponse {
    pub success: bool,
    pub count: usize,
    pub filters: EventFilter,
    pub events: Vec<RawCandidate>,
}

fn label_matches(value: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        Some(wanted) => value.is_some_and(|v| v.trim().eq_ignore_ascii_case(wanted)),
        None => true,
    }
}

/// Apply equality and threshold filters to live candidates
///
/// Candidates are compared by the labels the provider wrote, so a demand
/// filter outside `high`/`medium`/`low` only matches that exact label.
pub fn apply_filters(candidates: Vec<RawCandidate>, filter: &EventFilter) -> Vec<RawCandidate> {
    candidates
        .into_iter()
        .filter(|c| label_matches(c.demand.as_deref(), filter.demand.as_deref()))
        .filter(|c| label_matches(c.event_type.as_deref(), filter.event_type.as_deref()))
        .filter(|c| match filter.min_capacity {
            Some(min) => c.capacity.is_some_and(|cap| cap >= min),
            None => true,
        })
        .collect()
}

/// GET /api/events/filter - Uncached provider fetch with filters
pub async fn filter_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<FilterParams>,
) -> impl IntoResponse {
    let filter = match EventFilter::try_from(params) {
        Ok(filter) => filter,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(e)).into_response(),
    };

    match state.cache.fetch_candidates(SearchType::Weekly).await {
        Ok(candidates) => {
            let events = apply_filters(candidates, &filter);
            Json(FilterResponse {
                success: true,
                count: events.len(),
                filters: filter,
                events,
            })
            .into_response()
        }
        Err(e) => error_response("filtered events", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Demand;

    fn candidates() -> Vec<RawCandidate> {
        vec![
            RawCandidate::new("Derby", "2025-06-01")
                .with_capacity(75000)
                .with_demand(Demand::High)
                .with_type("Sport"),
            RawCandidate::new("Slam", "2025-06-01")
                .with_capacity(150)
                .with_demand(Demand::Medium)
                .with_type("Poetry-Slam"),
            RawCandidate::new("Unknown size", "2025-06-01")
                .with_demand(Demand::High)
                .with_type("sport"),
            RawCandidate {
                demand: Some("extreme".to_string()),
                ..RawCandidate::new("Rave", "2025-06-01").with_capacity(900)
            },
        ]
    }

    fn names(list: &[RawCandidate]) -> Vec<&str> {
        list.iter().filter_map(|c| c.name.as_deref()).collect()
    }

    fn params(demand: Option<&str>, event_type: Option<&str>, min_capacity: Option<&str>) -> FilterParams {
        FilterParams {
            demand: demand.map(str::to_string),
            event_type: event_type.map(str::to_string),
            min_capacity: min_capacity.map(str::to_string),
        }
    }

    #[test]
    fn test_no_filters_keeps_all() {
        assert_eq!(apply_filters(candidates(), &EventFilter::default()).len(), 4);
    }

    #[test]
    fn test_demand_and_type_filters() {
        let filter = EventFilter::try_from(params(Some("high"), Some("SPORT"), None)).unwrap();
        let result = apply_filters(candidates(), &filter);
        assert_eq!(names(&result), vec!["Derby", "Unknown size"]);
    }

    #[test]
    fn test_min_capacity_drops_unknown() {
        let filter = EventFilter::try_from(params(None, None, Some("100"))).unwrap();
        let result = apply_filters(candidates(), &filter);
        assert_eq!(names(&result), vec!["Derby", "Slam", "Rave"]);
    }

    #[test]
    fn test_unlisted_demand_matches_only_that_label() {
        let bogus = EventFilter::try_from(params(Some("bogus"), None, None)).unwrap();
        assert!(apply_filters(candidates(), &bogus).is_empty());

        let extreme = EventFilter::try_from(params(Some("extreme"), None, None)).unwrap();
        let result = apply_filters(candidates(), &extreme);
        assert_eq!(names(&result), vec!["Rave"]);
        assert_eq!(result[0].demand.as_deref(), Some("extreme"));
    }

    #[test]
    fn test_blank_parameters_are_ignored() {
        let filter = EventFilter::try_from(params(Some(""), Some("  "), Some(""))).unwrap();
        assert_eq!(filter, EventFilter::default());
    }

    #[test]
    fn test_non_numeric_min_capacity_is_rejected() {
        let err = EventFilter::try_from(params(None, None, Some("lots"))).unwrap_err();
        assert_eq!(err.code, "BAD_REQUEST");
        assert!(err.error.contains("lots"));
    }
}
