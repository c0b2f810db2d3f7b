//! Environment state read from a file, for stepping the policy by hand.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use cyber_policy::{EnvironmentState, Observation};

/// Snapshot of the network description as written by the environment wrapper.
pub struct FileState {
    text: String,
}

impl FileState {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self {
            text: read_text(path)?,
        })
    }
}

impl EnvironmentState for FileState {
    fn describe(&self) -> String {
        self.text.clone()
    }
}

pub fn load_observation(path: Option<&Path>) -> Result<Observation> {
    match path {
        Some(path) => Ok(Observation::new(read_text(path)?)),
        None => Ok(Observation::default()),
    }
}

/// File contents, or stdin when `path` is `-`.
fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read state from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_names_the_path() {
        let err = FileState::load(Path::new("/nonexistent/cyberagent-state.txt"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("cyberagent-state.txt"));
    }

    #[test]
    fn test_no_observation_is_empty() {
        assert_eq!(load_observation(None).unwrap().as_str(), "");
    }

    #[test]
    fn test_reads_file_contents() {
        let path = std::env::temp_dir().join(format!("cyberagent-state-{}.txt", std::process::id()));
        std::fs::write(&path, "node 1 owned\n").unwrap();
        let state = FileState::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(state.describe(), "node 1 owned\n");
    }
}
