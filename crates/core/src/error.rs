//! Error types for the DocAgent domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum.

use thiserror::Error;

/// The top-level error type for DocAgent operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Gateway errors ---
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures talking to the hosted model.
///
/// Both variants end the current query; neither is retried.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Network, authentication, HTTP status or timeout failure.
    #[error("model service unavailable: {0}")]
    Unavailable(String),

    /// The reply could not be read as a final answer or a tool request.
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, Error)]
pub enum ToolError {
    #[error("Tool already registered: {0}")]
    Duplicate(String),

    #[error("Unknown tool: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_error_displays_correctly() {
        let err = Error::Gateway(GatewayError::Unavailable("connection refused".into()));
        assert!(err.to_string().contains("unavailable"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = ToolError::ExecutionFailed {
            tool_name: "get_user_info".into(),
            reason: "directory missing".into(),
        };
        assert!(err.to_string().contains("get_user_info"));
        assert!(err.to_string().contains("directory missing"));
    }

    #[test]
    fn unknown_tool_names_the_tool() {
        let err = ToolError::NotFound("teleport".into());
        assert_eq!(err.to_string(), "Unknown tool: teleport");
    }
}
