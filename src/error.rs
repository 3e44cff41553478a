//! Error types for the event cache
//!
//! Every fallible operation in the crate returns [`CacheResult`]. The
//! variants follow where a failure originated: the external provider, the
//! text it returned, the SQLite store, or the candidate data itself.

use std::error::Error as StdError;
use thiserror::Error;

/// Boxed error for wrapping transport or driver errors
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors raised by the cache-and-refresh layer
#[derive(Debug, Error)]
pub enum CacheError {
    /// Network failure, timeout or non-2xx answer from the provider
    #[error("provider request failed: {message}")]
    Provider {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// Provider answered, but no candidate array could be read from it
    #[error("provider response could not be parsed: {0}")]
    Parse(String),

    /// Constraint violation or I/O failure inside the store
    #[error("store operation failed: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// Candidate or request value outside the accepted domain
    #[error("invalid input: {0}")]
    Validation(String),

    /// Missing or malformed process configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl CacheError {
    /// Create a provider error with source
    pub fn provider(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Provider {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a provider error without an underlying cause
    pub fn provider_msg(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with source
    pub fn store(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Short machine-readable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            CacheError::Provider { .. } => "PROVIDER_ERROR",
            CacheError::Parse(_) => "PARSE_ERROR",
            CacheError::Store { .. } => "STORE_ERROR",
            CacheError::Validation(_) => "BAD_REQUEST",
            CacheError::Config(_) => "CONFIG_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_provider_error_helper() {
        let source = io::Error::new(io::ErrorKind::TimedOut, "timed out");
        let err = CacheError::provider("messages request failed", source);

        match err {
            CacheError::Provider { message, source } => {
                assert_eq!(message, "messages request failed");
                assert!(source.is_some());
            }
            _ => panic!("Expected Provider variant"),
        }
    }

    #[test]
    fn test_store_error_display() {
        let source = io::Error::new(io::ErrorKind::Other, "disk full");
        let err = CacheError::store("insert batch failed", source);
        assert_eq!(err.to_string(), "store operation failed: insert batch failed");
        assert_eq!(err.code(), "STORE_ERROR");
    }

    #[test]
    fn test_parse_error_code() {
        let err = CacheError::Parse("no JSON array found".to_string());
        assert_eq!(err.code(), "PARSE_ERROR");
        assert!(err.to_string().contains("no JSON array found"));
    }
}
