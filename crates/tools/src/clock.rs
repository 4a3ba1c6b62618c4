//! Clock tools: current local time and date.

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use docagent_core::error::ToolError;
use docagent_core::tool::{Tool, ToolOutput};
use std::sync::Arc;

/// Source of "now". Swapped for [`FixedClock`] in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the local system clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Both clock tools take an optional, ignored string so that models which
/// always send an argument still validate.
fn optional_input_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "input": {
                "type": "string",
                "description": "Unused; may be omitted"
            }
        }
    })
}

pub struct GetTimeTool {
    clock: Arc<dyn Clock>,
}

impl GetTimeTool {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl Tool for GetTimeTool {
    fn name(&self) -> &str {
        "get_time"
    }

    fn description(&self) -> &str {
        "Get the current local time as HH:MM:SS."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        optional_input_schema()
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolOutput, ToolError> {
        Ok(ToolOutput::text(self.clock.now().format("%H:%M:%S").to_string()))
    }
}

pub struct GetDateTool {
    clock: Arc<dyn Clock>,
}

impl GetDateTool {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl Tool for GetDateTool {
    fn name(&self) -> &str {
        "get_date"
    }

    fn description(&self) -> &str {
        "Get today's local date as YYYY-MM-DD."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        optional_input_schema()
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<ToolOutput, ToolError> {
        Ok(ToolOutput::text(self.clock.now().format("%Y-%m-%d").to_string()))
    }
}
