//! Tool trait: the abstraction over agent capabilities.
//!
//! Tools are what let the agent look things up: documents, user records,
//! the clock. The registry is the containment boundary: whatever a tool
//! does wrong (error, unsuccessful output, panic) comes back to the agent
//! loop as an `"Error: ..."` observation string.

use async_trait::async_trait;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use tracing::warn;
use crate::error::ToolError;
use crate::gateway::ToolDefinition;

/// A request to execute a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique call ID (matches the LLM's tool_call.id)
    pub id: String,

    /// Name of the tool to execute
    pub name: String,

    /// Arguments as a JSON value
    pub arguments: serde_json::Value,
}

/// The output of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Whether the tool executed successfully
    pub success: bool,

    /// The output content
    pub output: String,

    /// Optional structured data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ToolOutput {
    /// A successful text output.
    pub fn text(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            data: None,
        }
    }

    /// An unsuccessful output the tool chose to report rather than raise.
    pub fn failure(output: impl Into<String>) -> Self {
        Self {
            success: false,
            output: output.into(),
            data: None,
        }
    }
}

/// Name and description of a registered tool, as shown in the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescription {
    pub name: String,
    pub description: String,
}

/// The core Tool trait.
///
/// Each tool implements this trait and is registered in the `ToolRegistry`.
/// Tools may read external state (files, the clock) but never touch the
/// agent loop's state.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "get_time").
    fn name(&self) -> &str;

    /// A description of what this tool does (sent to the LLM).
    fn description(&self) -> &str;

    /// JSON Schema describing this tool's parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolOutput, ToolError>;

    /// Convert this tool into a ToolDefinition for sending to the LLM.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

type ToolFn = dyn Fn(&str) -> Result<String, String> + Send + Sync;

/// A tool built from a plain `&str -> String` function.
///
/// This is how collaborators plug in lookups without writing a `Tool` impl.
/// The model sees a single required string parameter named `input`.
pub struct FnTool {
    name: String,
    description: String,
    func: Box<ToolFn>,
}

impl FnTool {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<String, String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            func: Box::new(func),
        }
    }
}

/// Pull the single string argument out of whatever shape the model sent.
///
/// Accepts `{"input": "..."}`, a bare JSON string, or an object with exactly
/// one string field.
pub fn single_string_argument(arguments: &serde_json::Value) -> Option<&str> {
    match arguments {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Object(map) => match map.get("input").and_then(|v| v.as_str()) {
            Some(s) => Some(s),
            None if map.len() == 1 => map.values().next().and_then(|v| v.as_str()),
            None => None,
        },
        _ => None,
    }
}

#[async_trait]
impl Tool for FnTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "input": {
                    "type": "string",
                    "description": "The input for this tool"
                }
            },
            "required": ["input"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let input = single_string_argument(&arguments)
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'input' argument".into()))?;

        (self.func)(input)
            .map(ToolOutput::text)
            .map_err(|reason| ToolError::ExecutionFailed {
                tool_name: self.name.clone(),
                reason,
            })
    }
}

/// An ordered registry of available tools.
///
/// The agent loop uses this to:
/// 1. Get tool descriptions and definitions for the prompt, in registration order
/// 2. Invoke tools when the LLM requests them
///
/// The registry is read-only once the agent is built and is shared via `Arc`.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. Fails without modifying the registry if the name is taken.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            return Err(ToolError::Duplicate(name));
        }
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn resolve(&self, name: &str) -> Result<&dyn Tool, ToolError> {
        self.index
            .get(name)
            .map(|&i| self.tools[i].as_ref())
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }

    /// Name and description of every tool, in registration order.
    pub fn describe_all(&self) -> Vec<ToolDescription> {
        self.tools
            .iter()
            .map(|t| ToolDescription {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Get all tool definitions (for sending to the LLM), in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.to_definition()).collect()
    }

    /// Execute a tool call and return its observation.
    ///
    /// Never fails: unknown tools, tool errors, unsuccessful outputs and
    /// panics all become `"Error: <cause>"`.
    pub async fn invoke(&self, call: &ToolCall) -> String {
        let tool = match self.resolve(&call.name) {
            Ok(tool) => tool,
            Err(e) => {
                warn!(tool = %call.name, "Model requested an unregistered tool");
                return format!("Error: {e}");
            }
        };

        let outcome = AssertUnwindSafe(tool.execute(call.arguments.clone()))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(output)) if output.success => output.output,
            Ok(Ok(output)) => {
                warn!(tool = %call.name, "Tool reported failure");
                format!("Error: {}", output.output)
            }
            Ok(Err(e)) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                format!("Error: {e}")
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                warn!(tool = %call.name, reason = %reason, "Tool panicked");
                format!("Error: tool '{}' panicked: {reason}", call.name)
            }
        }
    }

    /// List all registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for unit tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str { "echo" }
        fn description(&self) -> &str { "Echoes back the input" }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" }
                },
                "required": ["text"]
            })
        }
        async fn execute(&self, arguments: serde_json::Value) -> Result<ToolOutput, ToolError> {
            let text = arguments["text"]
                .as_str()
                .ok_or_else(|| ToolError::InvalidArguments("Missing 'text' argument".into()))?;
            Ok(ToolOutput::text(text))
        }
    }

    struct PanickingTool;

    #[async_trait]
    impl Tool for PanickingTool {
        fn name(&self) -> &str { "explode" }
        fn description(&self) -> &str { "Always panics" }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object"})
        }
        async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolOutput, ToolError> {
            panic!("boom");
        }
    }

    fn call(name: &str, arguments: serde_json::Value) -> ToolCall {
        ToolCall {
            id: "call_1".into(),
            name: name.into(),
            arguments,
        }
    }

    #[test]
    fn registry_register_and_resolve() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        assert!(registry.resolve("echo").is_ok());
        assert!(matches!(
            registry.resolve("nonexistent"),
            Err(ToolError::NotFound(_))
        ));
    }

    #[test]
    fn duplicate_registration_leaves_registry_unchanged() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        let before = registry.describe_all();

        let err = registry
            .register(Box::new(FnTool::new("echo", "impostor", |s| Ok(s.into()))))
            .unwrap_err();

        assert!(matches!(err, ToolError::Duplicate(ref n) if n == "echo"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.describe_all(), before);
        assert_eq!(registry.resolve("echo").unwrap().description(), "Echoes back the input");
    }

    #[test]
    fn describe_all_keeps_registration_order_and_is_stable() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry
                .register(Box::new(FnTool::new(name, format!("{name} tool"), |s| Ok(s.into()))))
                .unwrap();
        }
        let first = registry.describe_all();
        let names: Vec<_> = first.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
        assert_eq!(registry.describe_all(), first);
        assert_eq!(registry.names(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn registry_definitions() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        let defs = registry.definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "echo");
    }

    #[tokio::test]
    async fn invoke_returns_tool_output() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        let out = registry.invoke(&call("echo", serde_json::json!({"text": "hello world"}))).await;
        assert_eq!(out, "hello world");
    }

    #[tokio::test]
    async fn invoke_unknown_tool_is_an_observation() {
        let registry = ToolRegistry::new();
        let out = registry.invoke(&call("nonexistent", serde_json::json!({}))).await;
        assert_eq!(out, "Error: Unknown tool: nonexistent");
    }

    #[tokio::test]
    async fn invoke_converts_tool_errors() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        let out = registry.invoke(&call("echo", serde_json::json!({}))).await;
        assert!(out.starts_with("Error: "));
        assert!(out.contains("text"));
    }

    #[tokio::test]
    async fn invoke_contains_panics() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(PanickingTool)).unwrap();
        let out = registry.invoke(&call("explode", serde_json::json!({}))).await;
        assert_eq!(out, "Error: tool 'explode' panicked: boom");
    }

    #[tokio::test]
    async fn invoke_is_total_for_every_registered_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(EchoTool)).unwrap();
        registry.register(Box::new(PanickingTool)).unwrap();
        registry
            .register(Box::new(FnTool::new("fail", "Always fails", |_| Err("disk on fire".into()))))
            .unwrap();

        for name in registry.names() {
            let out = registry.invoke(&call(name, serde_json::json!({"input": "x"}))).await;
            assert!(!out.is_empty());
        }
    }

    #[tokio::test]
    async fn fn_tool_accepts_input_object_or_bare_string() {
        let tool = FnTool::new("upper", "Uppercase", |s| Ok(s.to_uppercase()));
        let a = tool.execute(serde_json::json!({"input": "abc"})).await.unwrap();
        let b = tool.execute(serde_json::json!("abc")).await.unwrap();
        let c = tool.execute(serde_json::json!({"doc_name": "abc"})).await.unwrap();
        assert_eq!(a.output, "ABC");
        assert_eq!(b.output, "ABC");
        assert_eq!(c.output, "ABC");
        assert!(tool.execute(serde_json::json!(42)).await.is_err());
    }

    #[tokio::test]
    async fn fn_tool_error_becomes_execution_failure() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Box::new(FnTool::new("fail", "Always fails", |_| Err("disk on fire".into()))))
            .unwrap();
        let out = registry.invoke(&call("fail", serde_json::json!({"input": "x"}))).await;
        assert_eq!(out, "Error: Tool execution failed: fail: disk on fire");
    }

    struct MissingFileTool;

    #[async_trait]
    impl Tool for MissingFileTool {
        fn name(&self) -> &str { "read_notes" }
        fn description(&self) -> &str { "Reads a notes file" }
        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object"})
        }
        async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::failure("Failed to read file: not found"))
        }
    }

    #[tokio::test]
    async fn unsuccessful_output_is_prefixed() {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(MissingFileTool)).unwrap();
        let out = registry.invoke(&call("read_notes", serde_json::json!({}))).await;
        assert_eq!(out, "Error: Failed to read file: not found");
    }
}
