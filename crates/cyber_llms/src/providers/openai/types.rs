//! OpenAI-specific types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Message;

/// Transport configuration for the OpenAI client
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL (default: https://api.openai.com/v1)
    pub base_url: String,
    /// Organization ID (optional)
    pub organization_id: Option<String>,
    /// Whole-request timeout; `None` waits as long as the service takes
    pub timeout: Option<Duration>,
}

impl OpenAIConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const BASE_URL_ENV: &'static str = "OPENAI_BASE_URL";
    pub const ORG_ENV: &'static str = "OPENAI_ORG_ID";
    pub const TIMEOUT_ENV: &'static str = "CYBERAGENT_TIMEOUT_SECS";

    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            organization_id: None,
            timeout: None,
        }
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        // Accept a full endpoint URL as well
        for suffix in ["/chat/completions/", "/chat/completions"] {
            if let Some(stripped) = url.strip_suffix(suffix) {
                url = stripped.to_string();
                break;
            }
        }
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set organization ID
    pub fn with_organization_id(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build from `OPENAI_BASE_URL`, `OPENAI_ORG_ID` and `CYBERAGENT_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(url) = std::env::var(Self::BASE_URL_ENV) {
            config = config.with_base_url(url);
        }

        if let Ok(org) = std::env::var(Self::ORG_ENV) {
            config = config.with_organization_id(org);
        }

        if let Ok(secs) = std::env::var(Self::TIMEOUT_ENV) {
            if let Ok(val) = secs.parse::<u64>() {
                config = config.with_timeout(Duration::from_secs(val));
            }
        }

        config
    }

    pub(crate) fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Chat completion response body. Every field is optional so that a
/// missing field becomes a typed error instead of a decode failure.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Option<Vec<ChatChoice>>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub message: Option<ChatMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}
