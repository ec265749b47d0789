//! Smart-replace request assembly.

use crate::gateway::{GatewayError, GenerateRequest, GenerationBackend};

// Low temperature for precision; the task is mechanical substitution.
const REPLACE_TEMPERATURE: f32 = 0.2;

const REPLACE_SYSTEM_PROMPT: &str = "\
Role: Expert Document Editor and Localizer.
Task: You will receive Template A (Markdown structure) and List B (Data/Content).
Your goal is to replace the content in Template A with the relevant information from List B.

CRITICAL RULES:
1. PRESERVE STRUCTURE: Do not change the markdown headers, tables, or layout of Template A. Only change the content values.
2. LANGUAGE: The output must be in Traditional Chinese (Taiwan). Translate List B content if necessary.
3. HIGHLIGHTING: ANY text that you insert, replace, or translate from List B MUST be wrapped in an HTML span tag with coral color: <span style=\"color: coral\">INSERTED_TEXT</span>.
4. UNTOUCHED TEXT: Text from Template A that was not replaced should remain exactly as is (no color tags).
5. MISSING DATA: If List B does not have data for a section in Template A, leave the placeholder or original text of Template A alone.";

pub(super) fn build_replace_request(model: &str, template_a: &str, list_b: &str) -> GenerateRequest {
    GenerateRequest {
        model: model.to_string(),
        system_instruction: REPLACE_SYSTEM_PROMPT.to_string(),
        content: format!(
            "[Template A]\n{template_a}\n\n[List B]\n{list_b}\n\n[Instruction]\nPerform the replacement and highlighting now."
        ),
        temperature: REPLACE_TEMPERATURE,
        max_output_tokens: None,
    }
}

/// Merges List B content into Template A with marked insertions.
///
/// The returned Markdown is passed through untouched; span markup is the
/// model's responsibility and is not validated here.
pub async fn smart_replace(
    backend: &dyn GenerationBackend,
    api_key: &str,
    model: &str,
    template_a: &str,
    list_b: &str,
) -> Result<String, GatewayError> {
    if api_key.is_empty() {
        return Err(GatewayError::MissingCredential);
    }
    let request = build_replace_request(model, template_a, list_b);
    backend.generate(api_key, &request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockBackend;

    #[test]
    fn request_labels_both_inputs() {
        let request = build_replace_request("gemini-2.5-flash", "# Doc", "- datum");
        assert!(request.content.starts_with("[Template A]\n# Doc"));
        assert!(request.content.contains("[List B]\n- datum"));
        assert!(request.content.ends_with("Perform the replacement and highlighting now."));
        assert!((request.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn system_prompt_mandates_coral_markers() {
        let request = build_replace_request("m", "a", "b");
        assert!(request
            .system_instruction
            .contains("<span style=\"color: coral\">"));
        assert!(request
            .system_instruction
            .contains("Traditional Chinese (Taiwan)"));
    }

    #[tokio::test]
    async fn missing_key_short_circuits() {
        let backend = MockBackend::echo();
        let err = smart_replace(&backend, "", "m", "a", "b")
            .await
            .expect_err("missing key");
        assert!(matches!(err, GatewayError::MissingCredential));
        assert_eq!(backend.call_count(), 0);
    }
}
