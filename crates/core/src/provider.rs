//! Provider trait — the abstraction over the LLM backend.
//!
//! The loop controller hands a fully assembled prompt to the provider and
//! gets the assistant's message content back, already unwrapped from any
//! response envelope. Calls are blocking from the controller's point of
//! view; there is no cancellation mid-call and no retry at this layer.

use async_trait::async_trait;
use crate::error::TransportError;

/// A remote chat-completion backend.
///
/// Implementations: watsonx.ai, any OpenAI-compatible endpoint, scripted
/// mocks in tests.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g. "watsonx").
    fn name(&self) -> &str;

    /// Send a prompt and return the assistant's message content.
    ///
    /// Fails with a [`TransportError`] when the remote call cannot be
    /// completed, returns a non-success status, or the envelope carries
    /// no usable content.
    async fn complete(&self, prompt: &str) -> std::result::Result<String, TransportError>;
}
