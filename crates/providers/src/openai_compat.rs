//! OpenAI-compatible gateway implementation.
//!
//! Works with: Google Gemini (via its OpenAI-compatible endpoint), OpenAI,
//! OpenRouter, Ollama, and any endpoint exposing `/chat/completions` with
//! function calling.
//!
//! Tool requests travel as `tool_calls` on the assistant message; the final
//! answer is the assistant `content` when no tool calls are present.

use async_trait::async_trait;
use docagent_core::error::GatewayError;
use docagent_core::gateway::{GatewayRequest, ModelGateway, ModelResponse, ToolDefinition};
use docagent_core::message::{Message, Role};
use docagent_core::tool::ToolCall;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// An OpenAI-compatible model gateway.
pub struct OpenAiCompatGateway {
    name: String,
    base_url: String,
    api_key: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenAiCompatGateway {
    /// Create a new OpenAI-compatible gateway with a per-request timeout.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Unavailable(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout,
            client,
        })
    }

    fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    Role::User => "user".into(),
                    Role::Assistant => "assistant".into(),
                    Role::System => "system".into(),
                    Role::Tool => "tool".into(),
                },
                content: if m.content.is_empty() && !m.tool_calls.is_empty() {
                    None
                } else {
                    Some(m.content.clone())
                },
                tool_calls: if m.tool_calls.is_empty() {
                    None
                } else {
                    Some(
                        m.tool_calls
                            .iter()
                            .map(|tc| ApiToolCall {
                                id: Some(tc.id.clone()),
                                r#type: "function".into(),
                                function: ApiFunction {
                                    name: tc.name.clone(),
                                    arguments: tc.arguments.clone(),
                                },
                            })
                            .collect(),
                    )
                },
                tool_call_id: m.tool_call_id.clone(),
            })
            .collect()
    }

    /// Convert tool definitions to OpenAI API format.
    fn to_api_tools(tools: &[ToolDefinition]) -> Vec<ApiToolDefinition> {
        tools
            .iter()
            .map(|t| ApiToolDefinition {
                r#type: "function".into(),
                function: ApiToolFunction {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.parameters.clone(),
                },
            })
            .collect()
    }

    fn request_body(request: &GatewayRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": request.model,
            "messages": Self::to_api_messages(&request.conversation.messages),
            "temperature": request.temperature,
            "stream": false,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(Self::to_api_tools(&request.tools));
        }

        body
    }

    /// Turn a decoded API response into exactly one `ModelResponse` variant.
    fn interpret(api_response: ApiResponse) -> Result<ModelResponse, GatewayError> {
        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::MalformedResponse("no choices in response".into()))?;

        let api_calls = choice.message.tool_calls.unwrap_or_default();

        if !api_calls.is_empty() {
            if let Some(thought) = choice.message.content.as_deref().filter(|c| !c.is_empty()) {
                debug!(thought = %thought, "Model text alongside tool calls ignored");
            }

            let calls = api_calls
                .into_iter()
                .map(|tc| {
                    let arguments = parse_arguments(&tc.function.name, &tc.function.arguments)?;
                    let id = tc
                        .id
                        .filter(|id| !id.is_empty())
                        .unwrap_or_else(|| format!("call_{}", uuid::Uuid::new_v4().simple()));
                    Ok(ToolCall {
                        id,
                        name: tc.function.name,
                        arguments,
                    })
                })
                .collect::<Result<Vec<_>, GatewayError>>()?;

            return Ok(ModelResponse::ToolRequest(calls));
        }

        match choice.message.content {
            Some(text) if !text.trim().is_empty() => Ok(ModelResponse::FinalAnswer(text)),
            _ => Err(GatewayError::MalformedResponse(
                "response has neither content nor tool calls".into(),
            )),
        }
    }
}

/// Decode the JSON-encoded argument string of a tool call.
///
/// An empty string means "no arguments".
fn parse_arguments(tool: &str, raw: &str) -> Result<serde_json::Value, GatewayError> {
    if raw.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }
    serde_json::from_str(raw).map_err(|e| {
        GatewayError::MalformedResponse(format!("arguments for '{tool}' are not valid JSON: {e}"))
    })
}

#[async_trait]
impl ModelGateway for OpenAiCompatGateway {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: GatewayRequest) -> Result<ModelResponse, GatewayError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = Self::request_body(&request);

        debug!(
            gateway = %self.name,
            model = %request.model,
            messages = request.conversation.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Unavailable(format!(
                        "request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    GatewayError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 401 || status == 403 {
            return Err(GatewayError::Unavailable(
                "authentication failed: invalid API key or insufficient permissions".into(),
            ));
        }

        if status == 429 {
            return Err(GatewayError::Unavailable("rate limited by provider".into()));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gateway returned error");
            return Err(GatewayError::Unavailable(format!(
                "API request failed with status {status}: {error_body}"
            )));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(format!("failed to parse response: {e}")))?;

        Self::interpret(api_response)
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default = "function_type")]
    r#type: String,
    function: ApiFunction,
}

fn function_type() -> String {
    "function".into()
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolDefinition {
    r#type: String,
    function: ApiToolFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}
