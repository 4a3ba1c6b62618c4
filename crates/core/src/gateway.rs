//! Model gateway trait: the boundary to the hosted language model.
//!
//! A gateway takes the assembled conversation plus the tool schemas and
//! returns exactly one of: a final answer, or a list of tool calls to run.
//! How tool calls are encoded on the wire is the implementation's business.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::GatewayError;
use crate::message::Conversation;
use crate::tool::ToolCall;

/// Everything a gateway needs for one completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayRequest {
    /// The model to use (e.g., "gemini-1.5-flash", "gpt-4o-mini")
    pub model: String,

    /// The assembled conversation
    pub conversation: Conversation,

    /// Temperature (0.0 = deterministic)
    #[serde(default)]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Tools the model may call, in registry order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

/// A tool definition sent to the LLM so it knows what tools it can call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// What the model decided to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ModelResponse {
    /// Terminal natural-language answer.
    FinalAnswer(String),
    /// One or more tools to execute, in the order the model listed them.
    /// Never empty.
    ToolRequest(Vec<ToolCall>),
}

/// The core gateway trait.
///
/// The agent loop calls `complete()` without knowing which backend is behind
/// it. Implementations hold no per-query state and may be shared.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// A human-readable name for this gateway (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Send a request and get the model's decision.
    async fn complete(&self, request: GatewayRequest) -> Result<ModelResponse, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_definition_serialization() {
        let tool = ToolDefinition {
            name: "get_time".into(),
            description: "Get the current time".into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "input": { "type": "string" }
                },
                "required": ["input"]
            }),
        };
        let json = serde_json::to_string(&tool).unwrap();
        assert!(json.contains("get_time"));
        assert!(json.contains("input"));
    }

    #[test]
    fn response_variants_are_exclusive() {
        let answer = ModelResponse::FinalAnswer("done".into());
        let request = ModelResponse::ToolRequest(vec![ToolCall {
            id: "call_1".into(),
            name: "get_time".into(),
            arguments: serde_json::json!({"input": "time"}),
        }]);
        assert!(matches!(answer, ModelResponse::FinalAnswer(_)));
        assert!(matches!(request, ModelResponse::ToolRequest(ref calls) if calls.len() == 1));
    }

    #[test]
    fn request_skips_empty_tools() {
        let req = GatewayRequest {
            model: "gemini-1.5-flash".into(),
            conversation: Conversation::new(),
            temperature: 0.0,
            max_tokens: None,
            tools: vec![],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("tools"));
        assert!(!json.contains("max_tokens"));
    }
}
