//! The agent loop: deliberate with the model, run requested tools, repeat.

use crate::prompt::PromptAssembler;
use docagent_config::AppConfig;
use docagent_core::gateway::{GatewayRequest, ModelGateway, ModelResponse, ToolDefinition};
use docagent_core::query::{AgentQuery, ScratchpadEntry, StopReason};
use docagent_core::tool::{ToolCall, ToolDescription, ToolRegistry};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result text when the model keeps requesting tools past the cap.
pub const ITERATION_LIMIT_MESSAGE: &str = "Error: exceeded maximum reasoning steps";

/// Default cap on model calls per query.
pub const DEFAULT_MAX_ITERATIONS: u32 = 15;

enum LoopState {
    Deliberating,
    ExecutingTools(Vec<ToolCall>),
    Done,
}

/// Drives one query at a time from input to final answer.
pub struct AgentLoop {
    /// Model gateway to deliberate with
    gateway: Arc<dyn ModelGateway>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Default max tokens per response
    max_tokens: Option<u32>,

    /// Tool registry, frozen once the loop is built
    tools: Arc<ToolRegistry>,

    assembler: PromptAssembler,

    /// Maximum model calls per query
    max_iterations: u32,
}

impl AgentLoop {
    /// Create a new agent loop.
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
        assembler: PromptAssembler,
    ) -> Self {
        Self {
            gateway,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            assembler,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Build a loop from the loaded configuration.
    pub fn from_config(
        config: &AppConfig,
        gateway: Arc<dyn ModelGateway>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        let agent = Self::new(
            gateway,
            config.effective_model(),
            config.default_temperature,
            tools,
            PromptAssembler::new(&config.agent.system_prompt),
        )
        .with_max_iterations(config.agent.max_iterations);

        match config.default_max_tokens {
            Some(max) => agent.with_max_tokens(max),
            None => agent,
        }
    }

    /// Set the maximum number of model calls per query.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set the default max tokens per model response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn gateway_name(&self) -> &str {
        self.gateway.name()
    }

    /// Answer a single query. Always returns a finished query.
    pub async fn run(&self, input: impl Into<String>) -> AgentQuery {
        let mut query = AgentQuery::new(input);
        self.execute(&mut query).await;
        query
    }

    /// Convenience wrapper returning only the result text.
    pub async fn answer(&self, input: impl Into<String>) -> String {
        self.run(input).await.result_text().to_string()
    }

    /// Drive `query` to completion. A query that is already finished is left alone.
    pub async fn execute(&self, query: &mut AgentQuery) {
        if query.is_finished() {
            return;
        }

        info!(
            gateway = self.gateway.name(),
            model = %self.model,
            input_len = query.input.len(),
            "Processing query"
        );

        let catalog = self.tools.describe_all();
        let definitions = self.tools.definitions();

        let mut state = LoopState::Deliberating;
        loop {
            state = match state {
                LoopState::Deliberating => self.deliberate(query, &catalog, &definitions).await,
                LoopState::ExecutingTools(calls) => {
                    self.execute_tools(query, calls).await;
                    LoopState::Deliberating
                }
                LoopState::Done => break,
            };
        }

        info!(
            iterations = query.iterations,
            tool_calls = query.scratchpad.len(),
            stop_reason = ?query.stop_reason,
            "Query finished"
        );
    }

    async fn deliberate(
        &self,
        query: &mut AgentQuery,
        catalog: &[ToolDescription],
        definitions: &[ToolDefinition],
    ) -> LoopState {
        query.iterations += 1;
        if query.iterations > self.max_iterations {
            warn!(
                max_iterations = self.max_iterations,
                "Model kept requesting tools; giving up"
            );
            query.iterations = self.max_iterations;
            query.finish(ITERATION_LIMIT_MESSAGE, StopReason::IterationLimit);
            return LoopState::Done;
        }

        let conversation = self
            .assembler
            .build(catalog, &query.input, &query.scratchpad);
        debug!(
            iteration = query.iterations,
            messages = conversation.len(),
            estimated_tokens = conversation.estimated_tokens(),
            "Calling model gateway"
        );

        let request = GatewayRequest {
            model: self.model.clone(),
            conversation,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            tools: definitions.to_vec(),
        };

        match self.gateway.complete(request).await {
            Ok(ModelResponse::FinalAnswer(text)) => {
                query.finish(text, StopReason::Answered);
                LoopState::Done
            }
            Ok(ModelResponse::ToolRequest(calls)) if calls.is_empty() => {
                warn!("Model requested an empty set of tool calls");
                query.finish(
                    "Error: malformed model response: empty tool request",
                    StopReason::GatewayFailure,
                );
                LoopState::Done
            }
            Ok(ModelResponse::ToolRequest(calls)) => LoopState::ExecutingTools(calls),
            Err(e) => {
                warn!(error = %e, "Model gateway failed");
                query.finish(format!("Error: {e}"), StopReason::GatewayFailure);
                LoopState::Done
            }
        }
    }

    /// Run every call in the order the model listed them.
    async fn execute_tools(&self, query: &mut AgentQuery, calls: Vec<ToolCall>) {
        let round = query.iterations;
        for call in calls {
            info!(tool = %call.name, call_id = %call.id, "Executing tool");
            let observation = self.tools.invoke(&call).await;
            debug!(tool = %call.name, observation = %preview(&observation), "Tool returned");

            query.record(ScratchpadEntry {
                round,
                call_id: call.id,
                tool_name: call.name,
                arguments: call.arguments,
                observation,
            });
        }
    }
}

/// First line of an observation, cut to 80 chars for logs.
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    match line.char_indices().nth(80) {
        Some((end, _)) => format!("{}...", &line[..end]),
        None => line.to_string(),
    }
}
