//! Generation API boundary.
//!
//! Everything that talks to a hosted LLM goes through the
//! [`GenerationBackend`] trait: one implementation per provider plus a mock
//! for tests and offline use. The rest of the crate never constructs HTTP
//! requests itself.

mod error;
mod gemini;
mod mock;
mod types;

pub use error::GatewayError;
pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use types::{ChatMessage, ChatRequest, GenerateRequest};

use async_trait::async_trait;

/// Provider-facing contract for single-shot generation and multi-turn chat.
///
/// Implementations make exactly one attempt per call; retry policy, if any,
/// belongs to the caller.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Run one generation request and return the produced text.
    async fn generate(&self, api_key: &str, req: &GenerateRequest) -> Result<String, GatewayError>;

    /// Run one chat turn over the supplied transcript and return the reply.
    async fn chat(&self, api_key: &str, req: &ChatRequest) -> Result<String, GatewayError>;
}
