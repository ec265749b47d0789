//! Mock backend for tests and offline use.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::GatewayError;
use super::types::{ChatRequest, GenerateRequest};
use super::GenerationBackend;

enum MockBehavior {
    /// Reply with the request content prefixed, so tests can assert on the
    /// prompt that reached the backend.
    Echo,
    /// Reply with a fixed string.
    Fixed(String),
    /// Fail every call with a provider error.
    Failing(String),
    /// Simulate a safety-filtered response.
    Empty,
}

/// Scripted [`GenerationBackend`] with a call counter.
pub struct MockBackend {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockBackend {
    /// Replies with `"echo: "` followed by the request content.
    pub fn echo() -> Self {
        Self {
            behavior: MockBehavior::Echo,
            calls: AtomicUsize::new(0),
        }
    }

    /// Replies with the given text for every call.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Fixed(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every call with a provider error carrying the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Failing(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Returns `EmptyGeneration` for every call.
    pub fn empty() -> Self {
        Self {
            behavior: MockBehavior::Empty,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of generate/chat calls that reached this backend.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self, api_key: &str, content: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if api_key.is_empty() {
            return Err(GatewayError::MissingCredential);
        }
        match &self.behavior {
            MockBehavior::Echo => Ok(format!("echo: {content}")),
            MockBehavior::Fixed(text) => Ok(text.clone()),
            MockBehavior::Failing(message) => Err(GatewayError::Provider {
                status: 500,
                message: message.clone(),
            }),
            MockBehavior::Empty => Err(GatewayError::EmptyGeneration),
        }
    }
}

#[async_trait]
impl GenerationBackend for MockBackend {
    async fn generate(&self, api_key: &str, req: &GenerateRequest) -> Result<String, GatewayError> {
        self.respond(api_key, &req.content)
    }

    async fn chat(&self, api_key: &str, req: &ChatRequest) -> Result<String, GatewayError> {
        let last = req.messages.last().map(|m| m.text.as_str()).unwrap_or("");
        self.respond(api_key, last)
    }
}
