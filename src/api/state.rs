//! Shared application state

use std::sync::Arc;

use crate::event_cache::EventCache;
use crate::provider::EventProvider;
use crate::store::EventStore;

/// State shared by all request handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// The event cache
    pub cache: EventCache,
}

impl AppState {
    pub fn new(cache: EventCache) -> Self {
        Self { cache }
    }

    /// Convenience constructor for an already initialized store
    pub fn with_parts(
        store: EventStore,
        provider: Arc<dyn EventProvider>,
        city: impl Into<String>,
    ) -> Self {
        Self::new(EventCache::new(store, provider, city))
    }
}
