//! Model client trait

use async_trait::async_trait;

use crate::error::Result;
use crate::model::ModelName;
use crate::types::CompletionRequest;

/// A remote completion service.
///
/// Implementations issue exactly one outbound request per `complete` call,
/// perform no retries and keep no cache. All returned choices are surfaced
/// in the order the service numbered them.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Model this client is configured for.
    fn model(&self) -> ModelName;

    /// Send the conversation and return every candidate completion.
    async fn complete(&self, request: CompletionRequest) -> Result<Vec<String>>;
}
