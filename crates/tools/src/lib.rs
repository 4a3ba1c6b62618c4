//! Built-in tool implementations for DocAgent.
//!
//! Tools give the agent something to look up: a small document store,
//! a user directory, and the local clock. Anything else can be plugged in
//! through `docagent_core::FnTool` or a custom `Tool` impl.

pub mod clock;
pub mod document_lookup;
pub mod user_info;

use std::sync::Arc;
use docagent_config::ToolsConfig;
use docagent_core::error::ToolError;
use docagent_core::tool::ToolRegistry;

pub use clock::{Clock, FixedClock, GetDateTool, GetTimeTool, SystemClock};
pub use document_lookup::LoadDocumentInfoTool;
pub use user_info::GetUserInfoTool;

/// Create the tool registry used by the shell.
///
/// Registration order is the order the tools appear in the prompt:
/// documents, users, time, date.
pub fn default_registry(config: &ToolsConfig) -> Result<ToolRegistry, ToolError> {
    registry_with_clock(config, Arc::new(SystemClock))
}

/// Same as [`default_registry`] but reading time from `clock`.
pub fn registry_with_clock(
    config: &ToolsConfig,
    clock: Arc<dyn Clock>,
) -> Result<ToolRegistry, ToolError> {
    let users = match &config.user_info_path {
        Some(path) => GetUserInfoTool::from_file(path),
        None => GetUserInfoTool::builtin(),
    };

    let mut registry = ToolRegistry::new();
    registry.register(Box::new(LoadDocumentInfoTool::builtin()))?;
    registry.register(Box::new(users))?;
    registry.register(Box::new(GetTimeTool::new(clock.clone())))?;
    registry.register(Box::new(GetDateTool::new(clock)))?;
    Ok(registry)
}
