//! Forced refresh endpoint

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use super::{error_response, ApiError};
use crate::api::state::AppState;
use crate::types::SearchType;

/// Body for POST /api/refresh
#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    /// `weekly` (default) or `daily`
    #[serde(rename = "type", default)]
    pub search_type: Option<String>,
}

/// Response for POST /api/refresh
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub count: usize,
    #[serde(rename = "type")]
    pub search_type: SearchType,
}

/// Search type requested by a refresh body
///
/// Only an empty body selects the default. Anything else must be a JSON
/// object whose optional `type` names a known search type; the content
/// type header is not consulted.
pub fn requested_search_type(body: &[u8]) -> Result<SearchType, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(SearchType::default());
    }

    let request: RefreshRequest = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("invalid refresh body: {}", e)))?;

    match request.search_type.as_deref() {
        None => Ok(SearchType::default()),
        Some(label) => label
            .parse::<SearchType>()
            .map_err(|e| ApiError::bad_request(e.to_string())),
    }
}

/// POST /api/refresh - Run a provider refresh regardless of freshness
pub async fn refresh(State(state): State<Arc<AppState>>, body: Bytes) -> impl IntoResponse {
    let search_type = match requested_search_type(&body) {
        Ok(search_type) => search_type,
        Err(e) => return (StatusCode::BAD_REQUEST, Json(e)).into_response(),
    };

    match state.cache.refresh(search_type).await {
        Ok(stored) => Json(RefreshResponse {
            success: true,
            count: stored.len(),
            search_type,
        })
        .into_response(),
        Err(e) => error_response("refresh", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_defaults_to_weekly() {
        assert_eq!(requested_search_type(b"").unwrap(), SearchType::Weekly);
        assert_eq!(requested_search_type(b"  \n").unwrap(), SearchType::Weekly);
        assert_eq!(requested_search_type(b"{}").unwrap(), SearchType::Weekly);
    }

    #[test]
    fn test_known_types() {
        assert_eq!(
            requested_search_type(br#"{"type": "daily"}"#).unwrap(),
            SearchType::Daily
        );
        assert_eq!(
            requested_search_type(br#"{"type": "WEEKLY"}"#).unwrap(),
            SearchType::Weekly
        );
    }

    #[test]
    fn test_unreadable_bodies_are_rejected() {
        for body in [
            r#"{"type": "monthly"}"#,
            r#"{"type": 5}"#,
            r#"{"type": "daily""#,
            "daily",
        ] {
            let err = requested_search_type(body.as_bytes()).unwrap_err();
            assert!(!err.success, "accepted {}", body);
            assert_eq!(err.code, "BAD_REQUEST");
        }
    }
}
