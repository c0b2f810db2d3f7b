//! Command dispatch.

pub mod models;
pub mod parse;
pub mod prompt;
pub mod step;

use crate::cli::{Cli, Command};
use anyhow::Result;

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Models => models::handle(),
        Command::Prompt { state, observation } => prompt::handle(&state, observation.as_deref()),
        Command::Parse { candidates } => parse::handle(&candidates),
        Command::Exploit {
            state,
            observation,
            model,
            candidates,
        } => {
            step::exploit(&state, observation.as_deref(), model.as_deref(), candidates).await
        }
        Command::Explore { state, model, seed } => {
            step::explore(&state, model.as_deref(), seed).await
        }
    }
}
