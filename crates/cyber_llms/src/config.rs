//! Model configuration: which model to ask and the key to ask it with.
//!
//! Set once at construction and never mutated. There is no process-wide key;
//! every client owns its own `ModelConfig`.

use std::fmt;

use crate::error::{Error, Result};
use crate::model::ModelName;

/// Secret API key. Formatting never reveals the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Raw key, for the `Authorization` header only.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Configuration for the model the policy talks to.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    api_key: ApiKey,
    model_name: ModelName,
}

impl ModelConfig {
    /// Environment variable for API key
    pub const API_KEY_ENV: &'static str = "OPENAI_API_KEY";
    /// Environment variable for model identifier
    pub const MODEL_ENV: &'static str = "CYBERAGENT_MODEL";

    pub fn new(api_key: impl Into<String>, model_name: ModelName) -> Result<Self> {
        let api_key = ApiKey::new(api_key);
        if api_key.is_empty() {
            return Err(Error::MissingApiKey("openai".to_string()));
        }
        Ok(Self {
            api_key,
            model_name,
        })
    }

    /// Create config from environment
    ///
    /// Required: `OPENAI_API_KEY`
    /// Optional: `CYBERAGENT_MODEL` (default: gpt-4)
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV)
            .map_err(|_| Error::MissingApiKey("openai".to_string()))?;

        let model_name = match std::env::var(Self::MODEL_ENV) {
            Ok(name) => name.parse()?,
            Err(_) => ModelName::default(),
        };

        Self::new(api_key, model_name)
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn model_name(&self) -> ModelName {
        self.model_name
    }
}
