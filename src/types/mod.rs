//! Data types for the event cache
//!
//! This module contains the records, candidates and aggregates passed
//! between the provider, the store and the HTTP layer.

mod candidate;
mod event;
mod query;
mod refresh;
mod stats;

pub use candidate::RawCandidate;
pub use event::{Demand, EventRecord, EventSource, NewEvent};
pub use query::EventQuery;
pub use refresh::{RefreshLogEntry, SearchType};
pub use stats::StoreStats;
