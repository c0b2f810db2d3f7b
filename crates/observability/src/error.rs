//! Error types for observability crate

use thiserror::Error;

/// Errors that can occur during observability initialization
#[derive(Error, Debug)]
pub enum ObservabilityError {
    /// Failed to initialize OpenTelemetry export
    #[error("Failed to initialize observability: {0}")]
    InitFailed(String),

    /// A global subscriber was already installed
    #[error("Tracing subscriber already installed: {0}")]
    AlreadyInitialized(String),
}
