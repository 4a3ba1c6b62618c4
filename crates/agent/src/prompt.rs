//! Prompt assembly: turns query state into the conversation sent to the model.
//!
//! # Layout
//!
//! | # | Role | Content |
//! |---|------|---------|
//! | 1 | system | instruction + tool catalog |
//! | 2 | user | the query text |
//! | 3.. | assistant / tool | one assistant message per scratchpad round carrying its tool calls, then one tool message per observation |
//!
//! # Determinism
//!
//! Assembly is a pure function of its inputs: no ids, clocks or randomness.
//! Identical inputs produce equal conversations.

use docagent_core::message::{Conversation, Message, MessageToolCall};
use docagent_core::query::ScratchpadEntry;
use docagent_core::tool::ToolDescription;

/// Builds conversations for one agent configuration.
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    system_instruction: String,
}

impl PromptAssembler {
    pub fn new(system_instruction: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
        }
    }

    /// The system message: instruction followed by the tool catalog.
    pub fn system_message(&self, tool_catalog: &[ToolDescription]) -> String {
        if tool_catalog.is_empty() {
            return self.system_instruction.clone();
        }

        let mut text = format!(
            "{}\n\nYou have access to the following tools:\n",
            self.system_instruction
        );
        for tool in tool_catalog {
            text.push_str(&format!("- {}: {}\n", tool.name, tool.description));
        }
        text
    }

    /// Assemble the full conversation for one deliberation step.
    pub fn build(
        &self,
        tool_catalog: &[ToolDescription],
        user_input: &str,
        scratchpad: &[ScratchpadEntry],
    ) -> Conversation {
        let mut conversation = Conversation::new();
        conversation.push(Message::system(self.system_message(tool_catalog)));
        conversation.push(Message::user(user_input));

        for round in scratchpad.chunk_by(|a, b| a.round == b.round) {
            let calls = round
                .iter()
                .map(|entry| MessageToolCall {
                    id: entry.call_id.clone(),
                    name: entry.tool_name.clone(),
                    arguments: entry.arguments.to_string(),
                })
                .collect();
            conversation.push(Message::assistant_tool_calls(calls));

            for entry in round {
                conversation.push(Message::tool_result(&entry.call_id, &entry.observation));
            }
        }

        conversation
    }
}
