//! Anthropic Messages API provider
//!
//! Sends the task description as a single user message with the web
//! search tool enabled, and returns the concatenated text blocks of the
//! answer.
//!
//! # API Endpoint Used
//!
//! - `POST /v1/messages`

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::EventProvider;
use crate::config::ProviderConfig;
use crate::error::{CacheError, CacheResult};

/// Default API base URL
pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    tools: Vec<ToolSpec>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct ToolSpec {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'static str,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Live provider backed by the Messages API
#[derive(Debug)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    base_url: String,
}

impl AnthropicProvider {
    /// Build a provider from configuration
    ///
    /// A missing API key is not an error here; every call will then fail
    /// with a provider error instead.
    pub fn new(config: &ProviderConfig) -> CacheResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CacheError::provider("failed to build HTTP client", e))?;

        if config.api_key.is_none() {
            warn!("ANTHROPIC_API_KEY is not set, provider refreshes will fail");
        }

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            base_url: ANTHROPIC_API_URL.to_string(),
        })
    }

    /// Point the client at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            tools: vec![ToolSpec {
                kind: "web_search_20250305",
                name: "web_search",
            }],
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        }
    }
}

/// Join all text blocks; tool-use and search-result blocks are skipped
fn collect_text(response: MessagesResponse) -> String {
    response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .filter_map(|block| block.text)
        .collect()
}

#[async_trait]
impl EventProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(&self, prompt: &str) -> CacheResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| CacheError::provider_msg("no API key configured"))?;

        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
        debug!(model = %self.model, "sending provider request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| CacheError::provider("messages request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(300).collect();
            return Err(CacheError::provider_msg(format!(
                "messages API returned {}: {}",
                status, snippet
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| CacheError::provider("invalid messages API response body", e))?;

        Ok(collect_text(parsed))
    }
}
