//! cyber_llms - message model and chat-completion client for the cyberagent policy.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  Vec<Message>  (system, user, ...)            │
//! └───────────────────────┬───────────────────────┘
//!                         ▼
//!              ┌─────────────────────┐
//!              │  dyn ModelClient    │  one request per call,
//!              │  (OpenAIClient)     │  no retries, no cache
//!              └──────────┬──────────┘
//!                         ▼
//!              Vec<String> candidate completions
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cyber_llms::{Message, ModelClient, OpenAIClient, CompletionRequest};
//!
//! # async fn run() -> cyber_llms::Result<()> {
//! let client = OpenAIClient::from_env()?;
//! let request = CompletionRequest::new(vec![
//!     Message::system("Pick a command.")?,
//!     Message::user("node 1 is owned")?,
//! ]);
//! let candidates = client.complete(request).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod providers;
pub mod redact;
pub mod types;


pub use client::ModelClient;
pub use config::{ApiKey, ModelConfig};
pub use error::{Error, Result};
pub use model::ModelName;
pub use providers::openai::{OpenAIClient, OpenAIConfig};
pub use types::{CompletionOptions, CompletionRequest, Message, Role};
