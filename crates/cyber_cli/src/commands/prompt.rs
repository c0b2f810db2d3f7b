//! `cyberagent prompt`.

use std::path::Path;

use anyhow::Result;
use cyber_policy::{build_prompt, render_env_info};

use crate::output;
use crate::state::{load_observation, FileState};

pub fn handle(state: &Path, observation: Option<&Path>) -> Result<()> {
    let state = FileState::load(state)?;
    let observation = observation
        .map(|path| load_observation(Some(path)))
        .transpose()?;
    let messages = build_prompt(&render_env_info(&state, observation.as_ref()))?;

    output::messages(&messages);
    Ok(())
}
