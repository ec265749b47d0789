//! Gemini `generateContent` backend.
//!
//! Speaks the public REST surface: the model id goes in the URL path, the
//! credential in the `x-goog-api-key` header, and the prompt in a
//! `contents` / `systemInstruction` / `generationConfig` body.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use af_protocol::note_models::ChatRole;

use super::error::GatewayError;
use super::types::{ChatRequest, GenerateRequest};
use super::GenerationBackend;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Live backend over the Gemini REST API.
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiBackend {
    /// Build a backend against the public endpoint.
    pub fn new(timeout_secs: u64) -> Result<Self, GatewayError> {
        Self::with_base_url(DEFAULT_BASE_URL.to_string(), timeout_secs)
    }

    /// Build a backend against an alternate endpoint, e.g. a local proxy.
    pub fn with_base_url(base_url: String, timeout_secs: u64) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_generate(
        &self,
        api_key: &str,
        model: &str,
        body: &GenerateContentBody,
    ) -> Result<String, GatewayError> {
        if api_key.is_empty() {
            return Err(GatewayError::MissingCredential);
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        debug!(model, "dispatching generateContent request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.first_text();
        if text.is_empty() {
            return Err(GatewayError::EmptyGeneration);
        }
        Ok(text)
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(&self, api_key: &str, req: &GenerateRequest) -> Result<String, GatewayError> {
        let body = GenerateContentBody::single_turn(req);
        self.post_generate(api_key, &req.model, &body).await
    }

    async fn chat(&self, api_key: &str, req: &ChatRequest) -> Result<String, GatewayError> {
        let body = GenerateContentBody::transcript(req)?;
        self.post_generate(api_key, &req.model, &body).await
    }
}

// Wire types. Field names follow the REST schema, hence camelCase renames.

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize, Debug)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

impl Content {
    fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

impl GenerateContentBody {
    fn single_turn(req: &GenerateRequest) -> Self {
        Self {
            contents: vec![Content::user(&req.content)],
            system_instruction: Content::system(&req.system_instruction),
            generation_config: GenerationConfig {
                temperature: req.temperature,
                max_output_tokens: req.max_output_tokens,
            },
        }
    }

    fn transcript(req: &ChatRequest) -> Result<Self, GatewayError> {
        let last_is_user = req
            .messages
            .last()
            .is_some_and(|m| m.role == ChatRole::User);
        if !last_is_user {
            return Err(GatewayError::InvalidRequest(
                "chat transcript must end with a user turn".to_string(),
            ));
        }

        let contents = req
            .messages
            .iter()
            .map(|m| Content {
                role: Some(
                    match m.role {
                        ChatRole::User => "user",
                        ChatRole::Model => "model",
                    }
                    .to_string(),
                ),
                parts: vec![Part {
                    text: m.text.clone(),
                }],
            })
            .collect();

        Ok(Self {
            contents,
            system_instruction: Content::system(&req.system_instruction),
            generation_config: GenerationConfig {
                temperature: req.temperature,
                max_output_tokens: None,
            },
        })
    }
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, empty when absent.
    fn first_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::types::ChatMessage;

    fn generate_request() -> GenerateRequest {
        GenerateRequest {
            model: "gemini-2.5-flash".to_string(),
            system_instruction: "be brief".to_string(),
            content: "hello".to_string(),
            temperature: 0.1,
            max_output_tokens: Some(4000),
        }
    }

    #[test]
    fn single_turn_body_matches_rest_schema() {
        let body = GenerateContentBody::single_turn(&generate_request());
        let json = serde_json::to_value(&body).expect("serialize body");

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 4000);
        // f32 round-trips through json as a close double
        let temp = json["generationConfig"]["temperature"]
            .as_f64()
            .expect("temperature");
        assert!((temp - 0.1).abs() < 1e-6);
    }

    #[test]
    fn transcript_requires_trailing_user_turn() {
        let req = ChatRequest {
            model: "gemini-2.5-flash".to_string(),
            system_instruction: String::new(),
            messages: vec![ChatMessage {
                role: ChatRole::Model,
                text: "hi".to_string(),
            }],
            temperature: 0.3,
        };
        assert!(matches!(
            GenerateContentBody::transcript(&req),
            Err(GatewayError::InvalidRequest(_))
        ));
    }

    #[test]
    fn transcript_maps_roles() {
        let req = ChatRequest {
            model: "gemini-2.5-flash".to_string(),
            system_instruction: String::new(),
            messages: vec![
                ChatMessage {
                    role: ChatRole::User,
                    text: "q1".to_string(),
                },
                ChatMessage {
                    role: ChatRole::Model,
                    text: "a1".to_string(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    text: "q2".to_string(),
                },
            ],
            temperature: 0.3,
        };
        let body = GenerateContentBody::transcript(&req).expect("body");
        let json = serde_json::to_value(&body).expect("serialize body");
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][2]["parts"][0]["text"], "q2");
    }

    #[test]
    fn response_text_concatenates_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"a"},{"text":"b"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).expect("response");
        assert_eq!(parsed.first_text(), "ab");
    }

    #[test]
    fn empty_candidates_yield_empty_text() {
        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[]}"#).expect("response");
        assert!(parsed.first_text().is_empty());
    }
}
