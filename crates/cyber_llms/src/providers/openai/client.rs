//! OpenAI client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, StatusCode};

use super::convert::{from_chat_response, to_chat_request};
use super::types::{ChatResponse, OpenAIConfig};
use crate::client::ModelClient;
use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::model::ModelName;
use crate::redact;
use crate::types::CompletionRequest;

/// Chat Completions client.
pub struct OpenAIClient {
    model: ModelConfig,
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIClient {
    /// Create a new client
    pub fn new(model: ModelConfig, config: OpenAIConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            model,
            config,
            client,
        })
    }

    /// Create client from environment
    pub fn from_env() -> Result<Self> {
        Self::new(ModelConfig::from_env()?, OpenAIConfig::from_env())
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.model.api_key().expose()))
            .map_err(|_| Error::Config("API key contains invalid header characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(ref org_id) = self.config.organization_id {
            let value = HeaderValue::from_str(org_id)
                .map_err(|_| Error::Config("organization id is not a valid header".into()))?;
            headers.insert("OpenAI-Organization", value);
        }

        Ok(headers)
    }

    fn status_error(&self, status: StatusCode, headers: &HeaderMap, body: &str) -> Error {
        let message = redact::error_body(body, self.model.api_key());
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::AuthenticationFailure {
                status: status.as_u16(),
                message,
            },
            StatusCode::TOO_MANY_REQUESTS => Error::RateLimited {
                retry_after: retry_after(headers),
                message,
            },
            _ => Error::ServiceError {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// `Retry-After` in delta-seconds form. HTTP-date values are ignored.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

#[async_trait]
impl ModelClient for OpenAIClient {
    fn model(&self) -> ModelName {
        self.model.model_name()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Vec<String>> {
        let url = self.config.completions_url();
        let model = self.model.model_name();
        let body = to_chat_request(model.as_str(), &request);
        let headers = self.build_headers()?;

        tracing::debug!(
            model = %model,
            messages = request.messages.len(),
            candidates = ?request.options.candidates,
            "sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(Error::network)?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let text = response.text().await.map_err(Error::network)?;

        if !status.is_success() {
            let err = self.status_error(status, &response_headers, &text);
            tracing::warn!(model = %model, status = status.as_u16(), kind = err.kind(), "completion request failed");
            return Err(err);
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| Error::malformed(format!("response is not valid JSON: {e}")))?;
        let candidates = from_chat_response(parsed)?;

        tracing::debug!(model = %model, candidates = candidates.len(), "chat completion received");
        Ok(candidates)
    }
}
