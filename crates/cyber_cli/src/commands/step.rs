//! `cyberagent exploit` / `cyberagent explore`: one live learner step.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use cyber_llms::{ModelConfig, ModelName, OpenAIClient, OpenAIConfig};
use cyber_policy::{Learner, LlmLearner, PolicyConfig};

use crate::output;
use crate::state::{load_observation, FileState};

fn build_learner(model: Option<&str>, config: PolicyConfig) -> Result<LlmLearner> {
    let mut model_config = ModelConfig::from_env()
        .with_context(|| format!("Set {} to query the model", ModelConfig::API_KEY_ENV))?;
    if let Some(model) = model {
        let model: ModelName = model.parse()?;
        model_config = ModelConfig::new(model_config.api_key().expose(), model)?;
    }
    let client = OpenAIClient::new(model_config, OpenAIConfig::from_env())?;
    Ok(LlmLearner::new(Arc::new(client), config))
}

pub async fn exploit(
    state: &Path,
    observation: Option<&Path>,
    model: Option<&str>,
    candidates: Option<u32>,
) -> Result<()> {
    let state = FileState::load(state)?;
    let observation = load_observation(observation)?;

    let mut config = PolicyConfig::from_env();
    if let Some(candidates) = candidates {
        config = config.with_exploit_candidates(candidates);
    }
    let mut learner = build_learner(model, config)?;

    let spinner = output::spinner(&format!("Querying {}...", learner.model()));
    match learner.exploit(&state, &observation).await {
        Ok(decision) => {
            output::spinner_done(&spinner);
            output::decision(&decision);
            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, "Exploit step failed");
            Err(e.into())
        }
    }
}

pub async fn explore(state: &Path, model: Option<&str>, seed: Option<u64>) -> Result<()> {
    let state = FileState::load(state)?;

    let mut config = PolicyConfig::from_env();
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let mut learner = build_learner(model, config)?;

    let spinner = output::spinner(&format!("Sampling {}...", learner.model()));
    match learner.explore(&state).await {
        Ok(decision) => {
            output::spinner_done(&spinner);
            output::decision(&decision);
            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, "Explore step failed");
            Err(e.into())
        }
    }
}
