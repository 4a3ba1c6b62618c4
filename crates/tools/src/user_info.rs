//! User info tool: looks people up in a small directory.
//!
//! The directory is either built in or a JSON object on disk
//! (`{"kunal": "Kunal Kumar is ..."}`). A file directory is re-read on every
//! call, so edits show up without restarting.

use async_trait::async_trait;
use docagent_core::error::ToolError;
use docagent_core::tool::{Tool, ToolOutput, single_string_argument};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

enum Directory {
    Builtin(HashMap<String, String>),
    File(PathBuf),
}

pub struct GetUserInfoTool {
    directory: Directory,
}

impl GetUserInfoTool {
    pub fn builtin() -> Self {
        Self::with_users([
            (
                "kunal",
                "Kunal Kumar is an AI/ML engineer who builds LLM-powered agents and created this assistant.",
            ),
            (
                "priya",
                "Priya Sharma is a data scientist working on retrieval and evaluation pipelines.",
            ),
        ])
    }

    pub fn with_users<K, V>(users: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            directory: Directory::Builtin(
                users
                    .into_iter()
                    .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Read the directory from a JSON file at call time.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            directory: Directory::File(path.into()),
        }
    }

    async fn load(&self) -> Result<HashMap<String, String>, ToolError> {
        match &self.directory {
            Directory::Builtin(users) => Ok(users.clone()),
            Directory::File(path) => {
                debug!(path = %path.display(), "Loading user directory");
                let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                    ToolError::ExecutionFailed {
                        tool_name: "get_user_info".into(),
                        reason: format!("cannot read {}: {e}", path.display()),
                    }
                })?;
                let users: HashMap<String, String> =
                    serde_json::from_str(&content).map_err(|e| ToolError::ExecutionFailed {
                        tool_name: "get_user_info".into(),
                        reason: format!("{} is not a JSON object of strings: {e}", path.display()),
                    })?;
                Ok(users
                    .into_iter()
                    .map(|(k, v)| (k.to_lowercase(), v))
                    .collect())
            }
        }
    }
}

#[async_trait]
impl Tool for GetUserInfoTool {
    fn name(&self) -> &str {
        "get_user_info"
    }

    fn description(&self) -> &str {
        "Get information about a user by their first name."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "The user's first name (case-insensitive)"
                }
            },
            "required": ["name"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let name = arguments["name"]
            .as_str()
            .or_else(|| single_string_argument(&arguments))
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'name' argument".into()))?;

        let users = self.load().await?;
        let key = name.trim().to_lowercase();

        Ok(match users.get(&key) {
            Some(info) => ToolOutput::text(info.clone()),
            None => ToolOutput::text(format!("No information found for user '{}'.", name.trim())),
        })
    }
}
