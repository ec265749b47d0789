//! Agent configuration models.
//!
//! An agent is one step of the report pipeline: a prompt plus the sampling
//! parameters used to run it against the generation API. Agent lists are
//! exchanged as JSON arrays (`pipeline_config.json`), so every field is
//! serialized in camelCase to keep exported files portable.

use serde::{Deserialize, Serialize};

/// Which hosted provider an agent targets.
///
/// Only Gemini is wired to a live backend today; the other tags are accepted
/// so imported configurations round-trip unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentProvider {
    #[default]
    Gemini,
    OpenAi,
    Grok,
}

/// Represents one pipeline step: identity, prompt text, and generation
/// parameters.
///
/// Every field except `id` carries a serde default so that a minimal imported
/// record such as `{"id":"a"}` deserializes; missing fields fall back to
/// sensible values rather than rejecting the whole file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    /// Stable unique identifier. Execution order is the position in the
    /// owning list, not anything derived from the id.
    pub id: String,

    /// Human-readable display name, also used for report export file names.
    #[serde(default)]
    pub name: String,

    /// Short description of the agent's purpose.
    #[serde(default)]
    pub description: String,

    /// Provider tag.
    #[serde(default)]
    pub provider: AgentProvider,

    /// Model identifier passed to the generation API.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum output size in tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature. The recognized range is 0.0–1.0; values are
    /// forwarded as-is, validation belongs to the edit surface.
    #[serde(default)]
    pub temperature: f32,

    /// The agent-specific instruction appended to the content body.
    #[serde(default)]
    pub user_prompt: String,

    /// Suffix appended to the fixed base system instruction.
    #[serde(default)]
    pub system_prompt_suffix: String,
}

pub(crate) fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_max_tokens() -> u32 {
    4000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_object_deserializes_with_defaults() {
        let agent: AgentConfig = serde_json::from_str(r#"{"id":"a"}"#).expect("minimal record");
        assert_eq!(agent.id, "a");
        assert_eq!(agent.provider, AgentProvider::Gemini);
        assert_eq!(agent.model, "gemini-2.5-flash");
        assert_eq!(agent.max_tokens, 4000);
        assert_eq!(agent.temperature, 0.0);
        assert!(agent.user_prompt.is_empty());
    }

    #[test]
    fn serializes_in_camel_case() {
        let agent = AgentConfig {
            id: "agent_layout".to_string(),
            name: "Layout Mapper".to_string(),
            description: String::new(),
            provider: AgentProvider::Gemini,
            model: "gemini-2.5-flash".to_string(),
            max_tokens: 4000,
            temperature: 0.1,
            user_prompt: "map".to_string(),
            system_prompt_suffix: "strict".to_string(),
        };

        let json = serde_json::to_string(&agent).expect("serialize");
        assert!(json.contains("\"maxTokens\":4000"));
        assert!(json.contains("\"userPrompt\":\"map\""));
        assert!(json.contains("\"systemPromptSuffix\":\"strict\""));
        assert!(json.contains("\"provider\":\"gemini\""));
    }

    #[test]
    fn round_trips_through_json() {
        let agent: AgentConfig =
            serde_json::from_str(r#"{"id":"x","temperature":0.7,"maxTokens":8192}"#)
                .expect("record");
        let json = serde_json::to_string(&agent).expect("serialize");
        let back: AgentConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(agent, back);
    }
}
