//! Shared test gateways for the agent loop tests.

use docagent_core::error::GatewayError;
use docagent_core::gateway::{GatewayRequest, ModelGateway, ModelResponse};
use docagent_core::message::Role;
use docagent_core::tool::ToolCall;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// A gateway that replays a fixed script of responses.
///
/// Each call to `complete` returns the next entry and records the request.
/// Panics if more calls are made than responses provided.
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<ModelResponse, GatewayError>>>,
    requests: Mutex<Vec<GatewayRequest>>,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<Result<ModelResponse, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Tool calls first, then a final answer.
    pub fn tool_then_answer(calls: Vec<ToolCall>, answer: &str) -> Self {
        Self::new(vec![
            Ok(ModelResponse::ToolRequest(calls)),
            Ok(ModelResponse::FinalAnswer(answer.into())),
        ])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ModelGateway for ScriptedGateway {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: GatewayRequest) -> Result<ModelResponse, GatewayError> {
        let mut requests = self.requests.lock().unwrap();
        let next = self.responses.lock().unwrap().pop_front();
        let Some(response) = next else {
            panic!("ScriptedGateway: no more responses (call #{})", requests.len() + 1);
        };
        requests.push(request);
        response
    }
}

/// A gateway that never stops asking for `tool`, with a fresh argument each time.
pub struct LoopingGateway {
    tool: String,
    calls: AtomicU32,
}

impl LoopingGateway {
    pub fn new(tool: &str) -> Self {
        Self {
            tool: tool.into(),
            calls: AtomicU32::new(0),
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ModelGateway for LoopingGateway {
    fn name(&self) -> &str {
        "looping"
    }

    async fn complete(&self, _request: GatewayRequest) -> Result<ModelResponse, GatewayError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(ModelResponse::ToolRequest(vec![tool_call(
            &format!("call_{n}"),
            &self.tool,
            serde_json::json!({"input": format!("attempt {n}")}),
        )]))
    }
}

/// Requests one tool call, then answers with the last observation verbatim.
pub struct EchoObservationGateway {
    call: ToolCall,
}

impl EchoObservationGateway {
    pub fn new(call: ToolCall) -> Self {
        Self { call }
    }
}

#[async_trait::async_trait]
impl ModelGateway for EchoObservationGateway {
    fn name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: GatewayRequest) -> Result<ModelResponse, GatewayError> {
        match request.conversation.messages.last() {
            Some(last) if last.role == Role::Tool => {
                Ok(ModelResponse::FinalAnswer(last.content.clone()))
            }
            _ => Ok(ModelResponse::ToolRequest(vec![self.call.clone()])),
        }
    }
}

/// Helper to create a tool call.
pub fn tool_call(id: &str, name: &str, arguments: serde_json::Value) -> ToolCall {
    ToolCall {
        id: id.into(),
        name: name.into(),
        arguments,
    }
}

/// In-memory log sink for asserting on emitted `tracing` events.
#[derive(Clone, Default)]
pub struct CapturedLogs(std::sync::Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Install a thread-local subscriber writing WARN and above into the sink.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let sink = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
