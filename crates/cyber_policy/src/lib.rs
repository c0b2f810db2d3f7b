//! cyber_policy - LLM action-selection policy for the network intrusion
//! simulation.
//!
//! ## Flow per step
//!
//! ```text
//! EnvironmentState ─► render_env_info ─► [system, user] ─► ModelClient
//!                                                              │
//!        Decision ◄─ parse_candidates / partition ◄── Vec<String>
//! ```
//!
//! The system instruction and the parser are both driven by the command
//! table in [`grammar`], so the two cannot drift apart.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cyber_llms::OpenAIClient;
//! use cyber_policy::{EnvironmentState, Learner, LlmLearner, Observation, PolicyConfig};
//!
//! struct Snapshot(String);
//!
//! impl EnvironmentState for Snapshot {
//!     fn describe(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = Arc::new(OpenAIClient::from_env()?);
//! let mut learner = LlmLearner::new(client, PolicyConfig::from_env());
//!
//! let state = Snapshot("node 1 owned, node 2 discovered".into());
//! let decision = learner.exploit(&state, &Observation::from("port 22 open")).await?;
//! println!("{} {:?}", decision.label, decision.action);
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod exploration;
pub mod gpt;
pub mod grammar;
pub mod learner;
pub mod parse;
pub mod prompt;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::PolicyConfig;
pub use error::{PolicyError, Result};
pub use gpt::LlmLearner;
pub use grammar::{CommandKind, CommandSpec, COMMANDS};
pub use learner::{
    ActionMetadata, Decision, EnvironmentState, Learner, Observation, Outcome, Phase, StepOutcome,
};
pub use parse::{parse_action, parse_candidates, partition, CandidateSelection, ParseError, Rejection};
pub use prompt::{build_prompt, render_env_info, SYSTEM_PROMPT};
