//! External event provider
//!
//! A provider turns a natural-language task description into a text
//! answer that should contain one JSON array of candidate events. The
//! call is the only slow operation in a refresh (network plus generation,
//! usually seconds) and is always made before any store transaction opens.
//!
//! - `EventProvider`: async seam for the generative search service
//! - `AnthropicProvider`: live implementation over the Messages API
//! - `FixedResponseProvider`: in-process provider with a canned answer
//! - `parse`: strict extraction of candidates from the answer text
//! - `prompt`: task descriptions per search type

mod anthropic;
pub mod parse;
pub mod prompt;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{CacheError, CacheResult};

pub use anthropic::{AnthropicProvider, ANTHROPIC_API_URL};
pub use parse::{find_json_array, parse_candidates};
pub use prompt::build_prompt;

/// Generative search service producing candidate events
#[async_trait]
pub trait EventProvider: Send + Sync {
    /// Short identifier for logs
    fn name(&self) -> &'static str;

    /// Run one task description and return the raw answer text
    async fn complete(&self, prompt: &str) -> CacheResult<String>;
}

/// Provider that answers every prompt with the same text
///
/// Used for offline runs and tests. Counts calls so callers can check
/// whether the cache was consulted instead of the provider.
#[derive(Debug)]
pub struct FixedResponseProvider {
    response: Result<String, String>,
    calls: AtomicUsize,
}

impl FixedResponseProvider {
    /// Always answer with `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with a provider error carrying `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `complete` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventProvider for FixedResponseProvider {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn complete(&self, _prompt: &str) -> CacheResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .clone()
            .map_err(CacheError::provider_msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_provider_counts_calls() {
        let provider = FixedResponseProvider::new("[]");
        assert_eq!(provider.complete("a").await.unwrap(), "[]");
        assert_eq!(provider.complete("b").await.unwrap(), "[]");
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_failing_provider() {
        let provider = FixedResponseProvider::failing("upstream 529");
        let err = provider.complete("a").await.unwrap_err();
        assert!(matches!(err, CacheError::Provider { .. }));
        assert_eq!(provider.calls(), 1);
    }
}
