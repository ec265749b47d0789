//! Built-in agents, prompts, and sample material.
//!
//! These are the values a fresh session starts from when no `.auditflow/`
//! directory is present. The base system prompt and the three default agents
//! define the standard audit-report chain: structure, compliance, polish.

use af_protocol::agent_models::{AgentConfig, AgentProvider};

/// System instruction shared by every pipeline agent. Each agent appends its
/// own suffix under "Additional Instructions".
pub const BASE_SYSTEM_PROMPT: &str = "
Role: You are an expert Medical Device Audit Report Specialist strictly adhering to ISO 13485 and GMP standards.
Task: Your job is to restructure unstructured observation notes into a formal audit report based on a provided template.
Rules:
1. Do not fabricate facts. If information is missing, use placeholders like [MISSING_DATA].
2. Preserve original text intent.
3. Maintain a professional, objective tone.
4. Output must be in Traditional Chinese (Taiwan) unless the input implies otherwise.
";

/// Model identifiers the edit surface offers.
pub const AVAILABLE_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-3-pro-preview",
    "gemini-2.5-flash-lite-latest",
];

/// The built-in three-agent chain.
pub fn default_agents() -> Vec<AgentConfig> {
    vec![
        AgentConfig {
            id: "agent_layout".to_string(),
            name: "Layout Mapper".to_string(),
            description: "Structure Alignment: Maps raw observations to the template sections."
                .to_string(),
            provider: AgentProvider::Gemini,
            model: "gemini-2.5-flash".to_string(),
            max_tokens: 4000,
            temperature: 0.1,
            user_prompt: "Please parse the raw observations and map them into the provided Markdown template structure. Ensure every observation is categorized correctly. Do not summarize yet, just place the content.".to_string(),
            system_prompt_suffix: "Focus on structural integrity.".to_string(),
        },
        AgentConfig {
            id: "agent_car".to_string(),
            name: "CAR Extractor".to_string(),
            description: "Compliance Check: Identifies and lists Corrective Action Requests."
                .to_string(),
            provider: AgentProvider::Gemini,
            model: "gemini-2.5-flash".to_string(),
            max_tokens: 2000,
            temperature: 0.0,
            user_prompt: "Analyze the structured text. Identify any non-conformities that require a Corrective Action Request (CAR). List them specifically with reference to ISO 13485 clauses if possible.".to_string(),
            system_prompt_suffix: "Be strict about non-conformities.".to_string(),
        },
        AgentConfig {
            id: "agent_polish".to_string(),
            name: "Polisher".to_string(),
            description: "Refinement: Smooths transitions and ensures professional tone."
                .to_string(),
            provider: AgentProvider::Gemini,
            model: "gemini-3-pro-preview".to_string(),
            max_tokens: 8192,
            temperature: 0.7,
            user_prompt: "Review the entire report. Polish the language for a professional medical device audit report. Ensure flow between sections is smooth. Attach the original raw logs as an appendix at the end.".to_string(),
            system_prompt_suffix: "Professional tone, high readability.".to_string(),
        },
    ]
}

/// Sample report template loaded into a fresh session.
pub const DEFAULT_TEMPLATE: &str = "# Medical Device Audit Report
## 1. Audit Summary
[Summary Here]

## 2. Observations
### 2.1 Quality Management System
[QMS Findings]

### 2.2 Production Control
[Production Findings]

## 3. Non-Conformities
[List of CARs]
";

/// Sample observation notes loaded into a fresh session.
pub const DEFAULT_OBSERVATIONS: &str = "
- Visited the cleanroom. Found that the pressure gauge was not calibrated. Last calibration date was 2022.
- Reviewed the QMS manual. Section 4.2 is compliant.
- Interviewed the production manager. He could not produce the training records for operator John Doe.
- The packaging area was clean and organized.
";
