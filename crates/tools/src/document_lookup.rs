//! Document lookup tool: answers from a small in-memory document store.

use async_trait::async_trait;
use docagent_core::error::ToolError;
use docagent_core::tool::{Tool, ToolOutput, single_string_argument};
use std::collections::HashMap;

/// Returned when the requested document is not in the store.
pub const MISSING_DOCUMENT: &str = "Sorry, I don't have that document.";

pub struct LoadDocumentInfoTool {
    /// Keys are stored lowercase.
    documents: HashMap<String, String>,
}

impl LoadDocumentInfoTool {
    /// A store with the project's own documents.
    pub fn builtin() -> Self {
        Self::with_documents([
            (
                "project",
                "This project is a demo of a tool-calling agent backed by a hosted LLM.",
            ),
            ("author", "Kunal Kumar is the creator of this AI agent."),
            (
                "langchain",
                "LangChain is a framework for building LLM applications.",
            ),
        ])
    }

    pub fn with_documents<K, V>(documents: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            documents: documents
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
        }
    }

    fn lookup(&self, doc_name: &str) -> &str {
        self.documents
            .get(&doc_name.trim().to_lowercase())
            .map(String::as_str)
            .unwrap_or(MISSING_DOCUMENT)
    }
}

#[async_trait]
impl Tool for LoadDocumentInfoTool {
    fn name(&self) -> &str {
        "load_document_info"
    }

    fn description(&self) -> &str {
        "Load document info from the document store. Known documents: project, author, langchain."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "doc_name": {
                    "type": "string",
                    "description": "Name of the document to load (case-insensitive)"
                }
            },
            "required": ["doc_name"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let doc_name = arguments["doc_name"]
            .as_str()
            .or_else(|| single_string_argument(&arguments))
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'doc_name' argument".into()))?;

        Ok(ToolOutput::text(self.lookup(doc_name)))
    }
}
