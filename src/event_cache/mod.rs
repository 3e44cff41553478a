//! Event Cache - cache-and-refresh data layer
//!
//! `EventCache` ties the record store to the external provider:
//! - `ingest`: classify candidates and store them as one atomic batch
//! - `freshness`: decide whether today needs a provider refresh, and run it
//! - `retrieval`: filtered, ranked reads from the store
//! - `retention`: purge records past the retention horizon
//!
//! # Control Flow
//!
//! ```text
//! current events:  needs_refresh(today)? ──yes──► refresh(weekly) ──► retrieve
//!                                        └──no──────────────────────► retrieve
//!
//! maintenance:     sweep(today) ; refresh(weekly | daily)
//! ```

mod freshness;
mod ingest;
mod retention;
mod retrieval;

use std::sync::Arc;

use crate::provider::EventProvider;
use crate::store::EventStore;

pub use ingest::to_new_event;
pub use retention::RETENTION_DAYS;
pub use retrieval::CurrentEvents;

/// Cache of provider-sourced event listings
#[derive(Clone)]
pub struct EventCache {
    pub(crate) store: EventStore,
    pub(crate) provider: Arc<dyn EventProvider>,
    pub(crate) city: String,
}

impl EventCache {
    /// Create a cache over an initialized store
    pub fn new(store: EventStore, provider: Arc<dyn EventProvider>, city: impl Into<String>) -> Self {
        Self {
            store,
            provider,
            city: city.into(),
        }
    }

    /// The underlying record store
    pub fn store(&self) -> &EventStore {
        &self.store
    }

    /// The configured provider
    pub fn provider(&self) -> &Arc<dyn EventProvider> {
        &self.provider
    }
}

impl std::fmt::Debug for EventCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventCache")
            .field("provider", &self.provider.name())
            .field("city", &self.city)
            .finish()
    }
}
