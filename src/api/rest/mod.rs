//! REST API module for HTTP endpoints
//!
//! Provides the JSON endpoints consumed by the dispatch client:
//! - `GET /api/health` - Liveness plus store statistics
//! - `GET /api/stats` - Store statistics
//! - `GET /api/events` - Today's ranked events, refreshing on demand
//! - `GET /api/events/filter` - Live provider fetch with in-memory filters
//! - `POST /api/refresh` - Force a weekly or daily refresh

pub mod events;
pub mod health;
pub mod refresh;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::error;

use crate::error::CacheError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub success: bool,
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
            code: code.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, "BAD_REQUEST")
    }
}

/// HTTP status for a cache error
pub fn status_for(err: &CacheError) -> StatusCode {
    match err {
        CacheError::Provider { .. } | CacheError::Parse(_) => StatusCode::BAD_GATEWAY,
        CacheError::Validation(_) => StatusCode::BAD_REQUEST,
        CacheError::Store { .. } | CacheError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Log a failed request and turn it into an error response
pub fn error_response(context: &str, err: CacheError) -> axum::response::Response {
    let status = status_for(&err);
    error!(error = %err, status = status.as_u16(), "{} failed", context);
    (status, Json(ApiError::new(err.to_string(), err.code()))).into_response()
}
