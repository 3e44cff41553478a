//! Health and statistics endpoints

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::state::AppState;
use crate::types::StoreStats;

/// Response for GET /api/health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub stats: StoreStats,
}

/// GET /api/health - Liveness with store statistics
///
/// Statistics degrade to zeros, so this endpoint always answers 200.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let stats = state.cache.store().compute_stats().await;
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        stats,
    })
}

/// GET /api/stats - Store statistics
pub async fn stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.cache.store().compute_stats().await)
}
