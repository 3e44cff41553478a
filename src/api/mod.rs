//! API module for HTTP endpoints
//!
//! This module exposes the event cache to dispatch clients over a JSON REST API.

pub mod http;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
