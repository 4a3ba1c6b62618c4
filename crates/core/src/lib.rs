//! # DocAgent Core
//!
//! Domain types, traits, and error definitions for the DocAgent tool-calling
//! agent. This crate has no HTTP or runtime dependencies: it defines the
//! model that the other crates implement against.
//!
//! ## Layout
//!
//! - [`tool`]: the `Tool` trait and the ordered `ToolRegistry`
//! - [`gateway`]: the `ModelGateway` trait and its request/response types
//! - [`message`]: the structured conversation sent to the model
//! - [`query`]: per-query state (`AgentQuery`, scratchpad entries)

pub mod error;
pub mod gateway;
pub mod message;
pub mod query;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use error::{Error, GatewayError, Result, ToolError};
pub use gateway::{GatewayRequest, ModelGateway, ModelResponse, ToolDefinition};
pub use message::{Conversation, Message, MessageToolCall, Role};
pub use query::{AgentQuery, QueryStatus, ScratchpadEntry, StopReason};
pub use tool::{FnTool, Tool, ToolCall, ToolDescription, ToolOutput, ToolRegistry};
