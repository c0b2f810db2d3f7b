//! LLM-backed learner.
//!
//! Each decision renders the environment to text, sends the fixed system
//! instruction plus that text to the model in a single request, and maps the
//! returned candidates to an [`Action`](crate::Action). Exploit takes the first candidate
//! that parses. Explore samples uniformly among every candidate that parses.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use cyber_llms::{CompletionOptions, CompletionRequest, ModelClient, ModelName};
use cyber_observability::{model_call_span, policy_step_span, record_duration, record_error};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use crate::config::PolicyConfig;
use crate::error::{PolicyError, Result};
use crate::exploration;
use crate::learner::{
    ActionMetadata, Decision, EnvironmentState, Learner, Observation, Outcome, Phase, StepOutcome,
};
use crate::parse::{self, Rejection};
use crate::prompt;

pub struct LlmLearner {
    client: Arc<dyn ModelClient>,
    config: PolicyConfig,
    rng: StdRng,
}

impl LlmLearner {
    pub fn new(client: Arc<dyn ModelClient>, config: PolicyConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { client, config, rng }
    }

    pub fn model(&self) -> ModelName {
        self.client.model()
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// One outbound request; every candidate comes back in service order.
    async fn query(&self, env_info: &str, options: CompletionOptions) -> Result<Vec<String>> {
        let model = self.client.model();
        let span = model_call_span!(model.as_str(), options.candidates.unwrap_or(1));
        let request = CompletionRequest::new(prompt::build_prompt(env_info)?).with_options(options);

        match self.client.complete(request).instrument(span.clone()).await {
            Ok(candidates) => {
                span.record("returned", candidates.len() as u64);
                Ok(candidates)
            }
            Err(e) => {
                record_error(&span, &e);
                Err(e.into())
            }
        }
    }

    fn metadata(
        &self,
        phase: Phase,
        candidates: usize,
        chosen_index: Option<usize>,
        rejections: Vec<Rejection>,
    ) -> ActionMetadata {
        ActionMetadata {
            decision_id: Uuid::new_v4(),
            phase,
            model: self.client.model(),
            candidates,
            chosen_index,
            outcome: if chosen_index.is_some() {
                Outcome::Chosen
            } else {
                Outcome::NoValidAction
            },
            rejections,
        }
    }

    async fn decide_explore(&mut self, state: &dyn EnvironmentState) -> Result<Decision> {
        let env_info = prompt::render_env_info(state, None);
        let candidates = self.query(&env_info, self.config.explore_options()).await?;

        let (valid, rejections) = parse::partition(&candidates);
        log_rejections(&rejections);

        let Some((index, action)) = exploration::sample_uniform(&valid, &mut self.rng) else {
            warn!(candidates = candidates.len(), "no parseable candidate to explore with");
            return Err(PolicyError::NoValidAction {
                candidates: candidates.len(),
            });
        };

        info!(
            action = %action,
            index,
            valid = valid.len(),
            candidates = candidates.len(),
            "explore chose action"
        );
        let metadata = self.metadata(Phase::Explore, candidates.len(), Some(index), rejections);
        Ok(Decision {
            label: Phase::Explore.label(),
            action: Some(action),
            metadata,
        })
    }

    async fn decide_exploit(
        &mut self,
        state: &dyn EnvironmentState,
        observation: &Observation,
    ) -> Result<Decision> {
        let env_info = prompt::render_env_info(state, Some(observation));
        let candidates = self.query(&env_info, self.config.exploit_options()).await?;

        let selection = parse::parse_candidates(&candidates);
        log_rejections(&selection.rejections);

        match &selection.action {
            Some(action) => info!(action = %action, index = selection.index, "exploit chose action"),
            None => warn!(
                candidates = candidates.len(),
                "no parseable candidate, step is a no-op"
            ),
        }

        let metadata = self.metadata(
            Phase::Exploit,
            candidates.len(),
            selection.index,
            selection.rejections,
        );
        Ok(Decision {
            label: Phase::Exploit.label(),
            action: selection.action,
            metadata,
        })
    }
}

fn log_rejections(rejections: &[Rejection]) {
    for rejection in rejections {
        debug!(
            index = rejection.index,
            error = %rejection.error,
            "candidate rejected"
        );
    }
}

/// Close out a step span with outcome, timing and any error.
fn finish_step(span: &tracing::Span, started: Instant, result: &Result<Decision>) {
    record_duration(span, "duration_ms", started.elapsed());
    match result {
        Ok(decision) => {
            let outcome = match decision.metadata.outcome {
                Outcome::Chosen => "chosen",
                Outcome::NoValidAction => "no_valid_action",
            };
            span.record("outcome", outcome);
            if let Some(index) = decision.metadata.chosen_index {
                span.record("chosen_index", index as u64);
            }
        }
        Err(e) => record_error(span, e),
    }
}

#[async_trait]
impl Learner for LlmLearner {
    async fn explore(&mut self, state: &dyn EnvironmentState) -> Result<Decision> {
        let span = policy_step_span!(Phase::Explore.label(), self.model().as_str());
        let started = Instant::now();
        let result = self.decide_explore(state).instrument(span.clone()).await;
        finish_step(&span, started, &result);
        result
    }

    async fn exploit(
        &mut self,
        state: &dyn EnvironmentState,
        observation: &Observation,
    ) -> Result<Decision> {
        let span = policy_step_span!(Phase::Exploit.label(), self.model().as_str());
        let started = Instant::now();
        let result = self
            .decide_exploit(state, observation)
            .instrument(span.clone())
            .await;
        finish_step(&span, started, &result);
        result
    }

    fn on_step(
        &mut self,
        _state: &dyn EnvironmentState,
        outcome: &StepOutcome,
        metadata: &ActionMetadata,
    ) {
        debug!(
            decision_id = %metadata.decision_id,
            phase = metadata.phase.label(),
            reward = outcome.reward,
            done = outcome.done,
            "step outcome received"
        );
    }

    fn parameters_as_string(&self) -> String {
        let exploit_temperature = self
            .config
            .exploit_temperature
            .map(|t| t.to_string())
            .unwrap_or_else(|| "default".to_string());
        format!(
            "model={} exploit_temperature={} exploit_candidates={} explore_temperature={} explore_candidates={}",
            self.model(),
            exploit_temperature,
            self.config.exploit_candidates,
            self.config.explore_temperature,
            self.config.explore_candidates,
        )
    }
}
