//! OpenAI provider module
//!
//! Chat Completions API client.
//! API docs: https://platform.openai.com/docs/api-reference/chat/create

mod client;
mod convert;
mod types;

pub use client::OpenAIClient;
pub use types::{ChatRequest, ChatResponse, OpenAIConfig};
