//! Note-assistant request assembly.

use af_protocol::note_models::NoteAction;

use crate::gateway::{GatewayError, GenerateRequest, GenerationBackend};

const NOTES_SYSTEM_PROMPT: &str = "\
Role: Meticulous Note Assistant.
Task: Apply exactly one transformation to the user's note.
Rules:
1. Never invent content that is not present in the note.
2. Never drop content unless the instruction says so.
3. Return only the transformed result, with no commentary before or after.";

fn instruction_for(action: &NoteAction) -> String {
    match action {
        NoteAction::Format => "Restructure the note into clean, well-organized Markdown. \
            Use headings, bullet lists, and tables where they fit the content. \
            Keep every piece of information from the original note."
            .to_string(),
        NoteAction::Keywords { keywords, color } => format!(
            "Wrap every occurrence of the following keywords in an HTML span tag \
            with the color {color}: <span style=\"color: {color}\">KEYWORD</span>. \
            Keywords: {}. Leave all other text exactly as is.",
            keywords.join(", ")
        ),
        NoteAction::Entities => "Extract the named entities from the note into a Markdown table \
            with columns Entity | Type | Context. Types include Person, Organization, Location, \
            Date, Document, and Equipment. At most 20 rows."
            .to_string(),
        NoteAction::Mindmap => "Produce a concept graph of the note as strict JSON with the shape \
            {\"nodes\":[{\"id\":\"...\",\"label\":\"...\"}],\"edges\":[{\"source\":\"...\",\"target\":\"...\",\"label\":\"...\"}]}. \
            Output the JSON only, with no surrounding markup or code fences."
            .to_string(),
    }
}

pub(super) fn build_note_request(model: &str, text: &str, action: &NoteAction) -> GenerateRequest {
    // Mindmap output must parse as JSON, so it gets a colder temperature.
    let temperature = match action {
        NoteAction::Mindmap => 0.0,
        _ => 0.2,
    };
    GenerateRequest {
        model: model.to_string(),
        system_instruction: NOTES_SYSTEM_PROMPT.to_string(),
        content: format!(
            "[Note]\n{text}\n\n[Instruction]\n{}",
            instruction_for(action)
        ),
        temperature,
        max_output_tokens: None,
    }
}

/// Applies one note-assistant action and returns the raw transformed text
/// (Markdown for most actions, a JSON document for Mindmap).
pub async fn note_action(
    backend: &dyn GenerationBackend,
    api_key: &str,
    model: &str,
    text: &str,
    action: &NoteAction,
) -> Result<String, GatewayError> {
    if api_key.is_empty() {
        return Err(GatewayError::MissingCredential);
    }
    let request = build_note_request(model, text, action);
    backend.generate(api_key, &request).await
}
