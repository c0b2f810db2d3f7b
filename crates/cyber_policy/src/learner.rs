//! Learner lifecycle contract consumed by the episode driver.
//!
//! The driver owns the environment and the step loop. Each step it asks the
//! learner to `explore` or `exploit`, executes the returned action, then
//! reports the outcome through `on_step`.

use async_trait::async_trait;
use cyber_llms::ModelName;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::action::Action;
use crate::error::Result;
use crate::parse::Rejection;

/// Read-only view of the wrapped environment.
pub trait EnvironmentState: Send + Sync {
    /// Textual rendering of the current network state.
    fn describe(&self) -> String;
}

/// Opaque textual observation produced by the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Observation(String);

impl Observation {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Observation {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Observation {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// What the driver observed after executing an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    #[serde(default)]
    pub info: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Explore,
    Exploit,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Explore => "explore",
            Phase::Exploit => "exploit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Chosen,
    NoValidAction,
}

/// Bookkeeping emitted with every decision and handed back in `on_step`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionMetadata {
    pub decision_id: Uuid,
    pub phase: Phase,
    pub model: ModelName,
    /// Number of completions the service returned
    pub candidates: usize,
    /// Which completion the action came from
    pub chosen_index: Option<usize>,
    pub rejections: Vec<Rejection>,
    pub outcome: Outcome,
}

/// `(label, action, metadata)` returned to the driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub label: &'static str,
    pub action: Option<Action>,
    pub metadata: ActionMetadata,
}

#[async_trait]
pub trait Learner: Send {
    /// Pick an action by exploration. Always returns `Some` action on `Ok`.
    async fn explore(&mut self, state: &dyn EnvironmentState) -> Result<Decision>;

    /// Pick the preferred action for `observation`. `action` is `None`
    /// when nothing usable came back; the step is then a no-op.
    async fn exploit(
        &mut self,
        state: &dyn EnvironmentState,
        observation: &Observation,
    ) -> Result<Decision>;

    /// Called after the driver executed the action from `metadata`'s decision.
    fn on_step(
        &mut self,
        state: &dyn EnvironmentState,
        outcome: &StepOutcome,
        metadata: &ActionMetadata,
    );

    fn new_episode(&mut self, _episode: usize, _t: usize) {}

    fn end_of_episode(&mut self, _episode: usize, _t: usize) {}

    fn end_of_iteration(&mut self, _t: usize, _done: bool) {}

    /// Learner parameters, for the driver's episode logs.
    fn parameters_as_string(&self) -> String {
        String::new()
    }
}
