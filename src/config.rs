//! Process configuration from the environment
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file by the binary. Unset variables fall back to defaults; set but
//! malformed numeric values are configuration errors.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::{CacheError, CacheResult};
use crate::store::StoreConfig;

/// Settings for the external provider
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    /// Whole-request timeout; expiry is reported as a provider failure
    pub timeout_secs: u64,
    /// City named in task descriptions
    pub city: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 4000,
            timeout_secs: 120,
            city: "München".to_string(),
        }
    }
}

/// Full process configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    pub store: StoreConfig,
    pub provider: ProviderConfig,
    pub scheduler_enabled: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            store: StoreConfig::default(),
            provider: ProviderConfig::default(),
            scheduler_enabled: true,
        }
    }
}

impl AppConfig {
    /// Load from process environment variables
    pub fn from_env() -> CacheResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> CacheResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = ProviderConfig {
            api_key: get("ANTHROPIC_API_KEY"),
            model: get("ANTHROPIC_MODEL").unwrap_or(defaults.provider.model),
            max_tokens: parse_var("ANTHROPIC_MAX_TOKENS", get("ANTHROPIC_MAX_TOKENS"))?
                .unwrap_or(defaults.provider.max_tokens),
            timeout_secs: parse_var("PROVIDER_TIMEOUT_SECS", get("PROVIDER_TIMEOUT_SECS"))?
                .unwrap_or(defaults.provider.timeout_secs),
            city: get("EVENT_CITY").unwrap_or(defaults.provider.city),
        };

        let store = match get("DATABASE_PATH") {
            Some(path) => StoreConfig::new(path),
            None => defaults.store,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: parse_var("PORT", get("PORT"))?.unwrap_or(defaults.port),
            store,
            provider,
            scheduler_enabled: parse_bool("SCHEDULER_ENABLED", get("SCHEDULER_ENABLED"))?
                .unwrap_or(defaults.scheduler_enabled),
        })
    }

    /// Socket address the HTTP server listens on
    pub fn socket_addr(&self) -> CacheResult<SocketAddr> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .map_err(|e| CacheError::Config(format!("invalid bind address: {}", e)))
    }
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>) -> CacheResult<Option<T>>
where
    T::Err: std::fmt::Display,
{
    value
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| CacheError::Config(format!("{}='{}': {}", key, raw, e)))
        })
        .transpose()
}

fn parse_bool(key: &str, value: Option<String>) -> CacheResult<Option<bool>> {
    value
        .map(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(CacheError::Config(format!("{}='{}' is not a boolean", key, raw))),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> CacheResult<AppConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.provider.max_tokens, 4000);
        assert!(config.scheduler_enabled);
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("PORT", "8080"),
            ("DATABASE_PATH", ":memory:"),
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("EVENT_CITY", "Hamburg"),
            ("SCHEDULER_ENABLED", "off"),
            ("PROVIDER_TIMEOUT_SECS", "30"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.store.is_in_memory());
        assert_eq!(config.provider.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.provider.city, "Hamburg");
        assert_eq!(config.provider.timeout_secs, 30);
        assert!(!config.scheduler_enabled);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = from_map(&[("ANTHROPIC_API_KEY", "  "), ("PORT", "")]).unwrap();
        assert!(config.provider.api_key.is_none());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_malformed_number_is_config_error() {
        let err = from_map(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, CacheError::Config(_)));
    }
}
