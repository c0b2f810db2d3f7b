//! Prompt builder: fixed system instruction + one user message of state.

use cyber_llms::{Message, Result};
use once_cell::sync::Lazy;

use crate::grammar;
use crate::learner::{EnvironmentState, Observation};

/// System instruction, rendered once from the command table.
pub static SYSTEM_PROMPT: Lazy<String> = Lazy::new(grammar::render_instructions);

/// `[system, user(env_info)]`, in that order.
pub fn build_prompt(env_info: &str) -> Result<Vec<Message>> {
    Ok(vec![
        Message::system(SYSTEM_PROMPT.as_str())?,
        Message::user(env_info)?,
    ])
}

/// Text handed to the model as the user message.
pub fn render_env_info(state: &dyn EnvironmentState, observation: Option<&Observation>) -> String {
    let mut parts = Vec::new();

    let description = state.describe();
    if !description.trim().is_empty() {
        parts.push(format!("## Network state\n{}", description.trim()));
    }

    if let Some(observation) = observation {
        if !observation.as_str().trim().is_empty() {
            parts.push(format!("## Latest observation\n{}", observation.as_str().trim()));
        }
    }

    parts.join("\n\n")
}
