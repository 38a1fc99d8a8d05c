//! Gemini `generateContent` wire types and REST client.

use std::time::Duration;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};
use kereta_store::app_config::AssistantConfig;
use crate::error::AssistantError;
use crate::prompt::SYSTEM_INSTRUCTION;
use crate::tools;

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
    /// Opaque token that must be echoed back with the function call it came with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<&'a Content>,
    pub contents: &'a [Content],
    #[serde(skip_serializing_if = "no_tools")]
    pub tools: &'a [Tool],
}

fn no_tools(tools: &&[Tool]) -> bool {
    tools.is_empty()
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::with_text("user", text)
    }

    pub fn model_text(text: impl Into<String>) -> Self {
        Self::with_text("model", text)
    }

    fn with_text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part {
                text: Some(text.into()),
                ..Default::default()
            }],
        }
    }

    /// Results of local tool calls, sent back on the user side of the conversation.
    pub fn function_responses(responses: Vec<FunctionResponse>) -> Self {
        Self {
            role: "user".to_string(),
            parts: responses.into_iter().map(|response| Part {
                function_response: Some(response),
                ..Default::default()
            }).collect(),
        }
    }

    pub fn function_calls(&self) -> impl Iterator<Item = &FunctionCall> {
        self.parts.iter().filter_map(|p| p.function_call.as_ref())
    }

    /// Concatenated visible text; thought parts are skipped.
    pub fn text(&self) -> String {
        self.parts.iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text.as_deref())
            .collect()
    }
}

impl FunctionResponse {
    /// Function responses must be JSON objects; anything else is wrapped as `{"result": ...}`.
    pub fn new(name: impl Into<String>, result: Value) -> Self {
        let response = match result {
            Value::Object(_) => result,
            other => serde_json::json!({ "result": other }),
        };
        Self {
            name: name.into(),
            response,
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// A hosted conversational model that may answer with function calls.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the whole conversation and return the model's next turn.
    async fn generate(&self, contents: &[Content]) -> Result<Content, AssistantError>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    system_instruction: Content,
    tools: Vec<Tool>,
}

impl GeminiClient {
    pub fn new(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let api_key = config.api_key.clone()
            .ok_or_else(|| AssistantError::NotConfigured("GEMINI_API_KEY not set".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/v1beta/models/{}:generateContent",
                config.api_base_url.trim_end_matches('/'),
                config.model
            ),
            api_key,
            system_instruction: Content {
                role: String::new(),
                parts: vec![Part {
                    text: Some(SYSTEM_INSTRUCTION.to_string()),
                    ..Default::default()
                }],
            },
            tools: vec![Tool {
                function_declarations: tools::declarations(),
            }],
        })
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn generate(&self, contents: &[Content]) -> Result<Content, AssistantError> {
        let body = GenerateContentRequest {
            system_instruction: Some(&self.system_instruction),
            contents,
            tools: &self.tools,
        };

        debug!("Sending {} turns to {}", contents.len(), self.endpoint);
        let res = self.http.post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!("Model returned non-success status {}: {}", status, body);
            return Err(AssistantError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = res.json().await?;
        let candidate = parsed.candidates.into_iter().next().ok_or(AssistantError::EmptyResponse)?;
        if let Some(reason) = &candidate.finish_reason {
            debug!("Model finish reason: {}", reason);
        }

        let mut content = candidate.content
            .filter(|c| !c.parts.is_empty())
            .ok_or(AssistantError::EmptyResponse)?;
        if content.role.is_empty() {
            content.role = "model".to_string();
        }
        Ok(content)
    }
}
