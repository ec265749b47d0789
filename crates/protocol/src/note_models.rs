//! Note-assistant and chat models.

use serde::{Deserialize, Serialize};

/// One-shot transformation the note assistant can apply to a note.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum NoteAction {
    /// Restructure the note into clean Markdown without losing content.
    Format,

    /// Wrap occurrences of the given keywords in a colored span.
    Keywords { keywords: Vec<String>, color: String },

    /// Extract named entities as a Markdown table.
    Entities,

    /// Produce a node/edge graph of the note's concepts as strict JSON.
    Mindmap,
}

/// Who authored a chat turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One turn of the note-bound chat transcript.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// Outcome of an auxiliary tool call, carried over the event channel.
///
/// Generation failures are data here, not channel errors: the UI renders
/// them inline and the session stays interactive.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum ToolResult {
    Ok { text: String },
    Err { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_action_round_trips_tagged() {
        let action = NoteAction::Keywords {
            keywords: vec!["risk".to_string()],
            color: "#ff7f50".to_string(),
        };
        let json = serde_json::to_string(&action).expect("serialize");
        assert!(json.contains(r#""type":"keywords""#));
        let back: NoteAction = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(action, back);
    }

    #[test]
    fn tool_result_tags_on_outcome() {
        let ok = serde_json::to_string(&ToolResult::Ok {
            text: "done".to_string(),
        })
        .expect("serialize");
        assert!(ok.contains(r#""outcome":"ok""#));
    }
}
