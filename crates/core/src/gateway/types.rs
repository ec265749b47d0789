//! Request shapes handed to a generation backend.

use af_protocol::note_models::{ChatRole, ChatTurn};

/// One single-shot generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub system_instruction: String,
    pub content: String,
    pub temperature: f32,
    /// None leaves the provider's own output limit in place.
    pub max_output_tokens: Option<u32>,
}

/// One message of a chat transcript, already mapped to wire roles.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl From<&ChatTurn> for ChatMessage {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: turn.role,
            text: turn.text.clone(),
        }
    }
}

/// A multi-turn chat request. The final message must be the new user turn.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub system_instruction: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}
