//! CrowdDrive Event Cache
//!
//! Caches city event listings produced by an external generative search
//! service in a local SQLite store, and serves ranked subsets of them over
//! HTTP to taxi dispatch clients.
//!
//! # Features
//!
//! - **Bounded provider cost**: at most one on-demand refresh per day of data
//! - **Atomic ingestion**: a candidate batch is stored completely or not at all
//! - **Deterministic ranking**: small venues, then demand, then start time
//! - **Cost accounting**: every refresh is logged with a fixed cost estimate
//! - **Retention**: records older than two days are swept
//!
//! # Modules
//!
//! - `types`: Records, candidates, search types and statistics
//! - `classifier`: Venue size classification
//! - `store`: SQLite record store and refresh history
//! - `event_cache`: Ingestion, freshness, retrieval and retention
//! - `provider`: Provider seam, response parser, prompts, live client
//! - `api`: Axum router and REST handlers
//! - `scheduler`: Periodic refresh and sweep triggers
//! - `config`: Environment configuration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use crowddrive::{EventCache, EventStore, FixedResponseProvider, SearchType};
//!
//! # async fn example() -> crowddrive::CacheResult<()> {
//! let store = EventStore::in_memory().await?;
//! let provider = Arc::new(FixedResponseProvider::new("[]"));
//! let cache = EventCache::new(store, provider, "München");
//! cache.refresh(SearchType::Daily).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod event_cache;
pub mod provider;
pub mod scheduler;
pub mod store;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use classifier::classify;
pub use config::AppConfig;
pub use error::{CacheError, CacheResult};
pub use event_cache::EventCache;
pub use provider::{AnthropicProvider, EventProvider, FixedResponseProvider};
pub use store::{EventStore, StoreConfig};
pub use types::{
    Demand, EventQuery, EventRecord, EventSource, NewEvent, RawCandidate, RefreshLogEntry,
    SearchType, StoreStats,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
