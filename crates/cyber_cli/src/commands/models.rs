//! `cyberagent models`.

use anyhow::Result;
use cyber_llms::{ModelConfig, ModelName};

use crate::output;

pub fn handle() -> Result<()> {
    let selected = std::env::var(ModelConfig::MODEL_ENV)
        .ok()
        .and_then(|m| m.parse::<ModelName>().ok())
        .unwrap_or_default();
    let key_status = match std::env::var(ModelConfig::API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => "configured",
        _ => "missing",
    };

    output::header("Supported Models");
    output::models(selected);
    output::kv(ModelConfig::API_KEY_ENV, key_status);

    Ok(())
}
