//! Error types for the model client

use std::time::Duration;

use thiserror::Error;

/// Errors raised while building messages or talking to the completion service.
#[derive(Error, Debug)]
pub enum Error {
    /// No API key was supplied for the provider
    #[error("Missing API key for provider: {0}")]
    MissingApiKey(String),

    /// Message construction rejected its input
    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    /// Model identifier is not in the supported catalogue
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// Client configuration could not be applied
    #[error("Configuration error: {0}")]
    Config(String),

    /// The service rejected our credentials (401/403)
    #[error("Authentication failed ({status}): {message}")]
    AuthenticationFailure { status: u16, message: String },

    /// Transport-level failure: DNS, connect, TLS, timeout, broken body
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    /// The service asked us to slow down (429)
    #[error("Rate limited by service: {message}")]
    RateLimited {
        retry_after: Option<Duration>,
        message: String,
    },

    /// The reply did not carry the fields we expect
    #[error("Malformed service response: {0}")]
    MalformedServiceResponse(String),

    /// Any other non-success status
    #[error("Service error {status}: {message}")]
    ServiceError { status: u16, message: String },
}

impl Error {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedServiceResponse(msg.into())
    }

    pub fn network(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::NetworkFailure(format!("request timed out: {err}"))
        } else {
            Self::NetworkFailure(err.to_string())
        }
    }

    /// Whether a caller-side retry could reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::NetworkFailure(_) | Error::RateLimited { .. } => true,
            Error::ServiceError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Short stable name of the failure kind, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingApiKey(_) => "missing_api_key",
            Error::InvalidMessage(_) => "invalid_message",
            Error::UnsupportedModel(_) => "unsupported_model",
            Error::Config(_) => "config",
            Error::AuthenticationFailure { .. } => "authentication_failure",
            Error::NetworkFailure(_) => "network_failure",
            Error::RateLimited { .. } => "rate_limited",
            Error::MalformedServiceResponse(_) => "malformed_service_response",
            Error::ServiceError { .. } => "service_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
