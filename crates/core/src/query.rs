//! Per-query state owned by the agent loop.

use serde::{Deserialize, Serialize};

/// One executed tool call and what it returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScratchpadEntry {
    /// Deliberation round that requested this call (1-based).
    pub round: u32,

    /// Call ID issued by the model
    pub call_id: String,

    /// Tool the model asked for
    pub tool_name: String,

    /// Arguments exactly as the model sent them
    pub arguments: serde_json::Value,

    /// Tool output, or an `"Error: ..."` string
    pub observation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Running,
    Finished,
}

/// Why a finished query stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The model produced a final answer.
    Answered,
    /// The deliberation cap was hit before a final answer.
    IterationLimit,
    /// The model gateway failed.
    GatewayFailure,
}

/// A single user query moving through the agent loop.
///
/// Created fresh for every line the user enters and dropped once the result
/// has been printed. Only the agent loop mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentQuery {
    pub input: String,

    /// Append-only record of tool calls, in execution order.
    pub scratchpad: Vec<ScratchpadEntry>,

    pub status: QueryStatus,

    /// Final text once `status` is `Finished`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,

    /// Number of model calls made so far.
    pub iterations: u32,
}

impl AgentQuery {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            scratchpad: Vec::new(),
            status: QueryStatus::Running,
            result: None,
            stop_reason: None,
            iterations: 0,
        }
    }

    pub fn record(&mut self, entry: ScratchpadEntry) {
        self.scratchpad.push(entry);
    }

    /// Move to the terminal state. The first call wins.
    pub fn finish(&mut self, result: impl Into<String>, reason: StopReason) {
        if self.status == QueryStatus::Finished {
            return;
        }
        self.status = QueryStatus::Finished;
        self.result = Some(result.into());
        self.stop_reason = Some(reason);
    }

    pub fn is_finished(&self) -> bool {
        self.status == QueryStatus::Finished
    }

    /// The result text, or an empty string while still running.
    pub fn result_text(&self) -> &str {
        self.result.as_deref().unwrap_or_default()
    }
}
