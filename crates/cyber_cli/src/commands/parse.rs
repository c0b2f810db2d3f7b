//! `cyberagent parse`.

use anyhow::{anyhow, Result};
use cyber_policy::parse_candidates;

use crate::output;

pub fn handle(candidates: &[String]) -> Result<()> {
    let selection = parse_candidates(candidates);
    output::selection(&selection);

    match selection.action {
        Some(_) => Ok(()),
        None => Err(anyhow!(
            "no valid action among {} candidate(s)",
            candidates.len()
        )),
    }
}
