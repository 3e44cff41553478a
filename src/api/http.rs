//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    http::{HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use super::rest::{events, health, refresh};
use super::state::AppState;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health::health))
        .route("/api/stats", get(health::stats))
        .route("/api/events", get(events::list_events))
        .route("/api/events/filter", get(events::filter_events))
        .route("/api/refresh", post(refresh::refresh))
        .layer(cors)
        // Tunnelling proxies interpose a browser warning page without this.
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("ngrok-skip-browser-warning"),
            HeaderValue::from_static("true"),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::FixedResponseProvider;
    use crate::store::EventStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let store = EventStore::in_memory().await.unwrap();
        let state = Arc::new(AppState::with_parts(
            store,
            Arc::new(FixedResponseProvider::new("[]")),
            "München",
        ));
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("ngrok-skip-browser-warning").unwrap(),
            "true"
        );
    }
}
