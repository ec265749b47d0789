//! Pipeline-step request assembly and execution.

use std::time::Instant;

use af_protocol::agent_models::AgentConfig;
use af_protocol::run_models::AgentRunState;

use crate::defaults::BASE_SYSTEM_PROMPT;
use crate::gateway::{GatewayError, GenerateRequest, GenerationBackend};

use super::{estimate_tokens, now_millis};

/// Everything one agent run needs, assembled by the session before dispatch.
#[derive(Debug, Clone)]
pub struct RunInput {
    pub agent: AgentConfig,
    pub template: String,
    pub observations: String,
    /// Latest output of the preceding agent. None for position 0; an empty
    /// string (never-run or failed predecessor) omits the section.
    pub previous_output: Option<String>,
}

/// Builds the context-heavy prompt for one pipeline step.
///
/// Sections appear in fixed order and each ends with a newline; the section
/// for the previous agent's output only appears when that output is
/// non-empty.
pub fn build_audit_request(input: &RunInput) -> GenerateRequest {
    let mut context_parts = vec![
        format!("[Template]\n{}\n", input.template),
        format!("[Observations]\n{}\n", input.observations),
    ];

    if let Some(previous) = input.previous_output.as_deref() {
        if !previous.is_empty() {
            context_parts.push(format!("[Previous Agent Output]\n{previous}\n"));
        }
    }

    context_parts.push(format!(
        "[Agent-Specific Instructions]\n{}\n",
        input.agent.user_prompt
    ));

    GenerateRequest {
        model: input.agent.model.clone(),
        system_instruction: format!(
            "{BASE_SYSTEM_PROMPT}\n\nAdditional Instructions: {}",
            input.agent.system_prompt_suffix
        ),
        content: context_parts.join("\n"),
        temperature: input.agent.temperature,
        max_output_tokens: Some(input.agent.max_tokens),
    }
}

/// Runs one pipeline step to a terminal state.
///
/// Always returns Completed or Error, never Running or Idle. Failures become
/// an Error state with an empty output; they are data, not propagated
/// errors, so one failed agent never blocks the rest of the chain.
pub async fn run_agent_step(
    backend: &dyn GenerationBackend,
    api_key: &str,
    input: &RunInput,
) -> AgentRunState {
    if api_key.is_empty() {
        return AgentRunState::failed(GatewayError::MissingCredential.to_string(), now_millis());
    }

    let request = build_audit_request(input);
    let started = Instant::now();

    match backend.generate(api_key, &request).await {
        Ok(output) => {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            let tokens = estimate_tokens(&output);
            AgentRunState::completed(output, tokens, elapsed_ms, now_millis())
        }
        Err(err) => AgentRunState::failed(err.to_string(), now_millis()),
    }
}
