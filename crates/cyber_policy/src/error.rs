//! Policy error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    /// Prompt construction or the model service failed
    #[error(transparent)]
    Client(#[from] cyber_llms::Error),

    /// Every candidate completion failed to parse
    #[error("no valid action among {candidates} candidate completion(s)")]
    NoValidAction { candidates: usize },
}

pub type Result<T> = std::result::Result<T, PolicyError>;
