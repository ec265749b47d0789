//! Note-bound chat request assembly.

use af_protocol::note_models::{ChatRole, ChatTurn};

use crate::gateway::{ChatRequest, GatewayError, GenerationBackend};

const CHAT_TEMPERATURE: f32 = 0.3;

fn chat_system_instruction(note: &str) -> String {
    format!(
        "Role: Assistant answering questions about one specific note.\n\
        The note is reproduced below. Base every answer strictly on its content.\n\
        If the note does not contain the answer, say so explicitly instead of guessing.\n\n\
        [Note]\n{note}"
    )
}

pub(super) fn build_chat_request(
    model: &str,
    note: &str,
    history: &[ChatTurn],
) -> Result<ChatRequest, GatewayError> {
    let last_is_user = history.last().is_some_and(|t| t.role == ChatRole::User);
    if !last_is_user {
        return Err(GatewayError::InvalidRequest(
            "chat history must end with a user message".to_string(),
        ));
    }

    Ok(ChatRequest {
        model: model.to_string(),
        system_instruction: chat_system_instruction(note),
        messages: history.iter().map(Into::into).collect(),
        temperature: CHAT_TEMPERATURE,
    })
}

/// Answers the latest user turn, grounded in the note text.
///
/// All turns but the last are prior transcript; the last must be the new
/// user message. Failures come back as [`GatewayError`] like every other
/// generation call.
pub async fn chat_with_note(
    backend: &dyn GenerationBackend,
    api_key: &str,
    model: &str,
    note: &str,
    history: &[ChatTurn],
) -> Result<String, GatewayError> {
    if api_key.is_empty() {
        return Err(GatewayError::MissingCredential);
    }
    let request = build_chat_request(model, note, history)?;
    backend.chat(api_key, &request).await
}
