//! The agent loop: the core of DocAgent.
//!
//! One user query runs through a small state machine:
//!
//! 1. **Start**: fresh [`AgentQuery`](docagent_core::AgentQuery), empty scratchpad
//! 2. **Deliberating**: assemble the prompt, ask the model gateway
//! 3. **Executing tools**: run every requested call in order, record each
//!    observation in the scratchpad, go back to 2
//! 4. **Done**: the model answered, the gateway failed, or the iteration
//!    cap was reached
//!
//! The result is always a string; nothing below the loop can abort it.

pub mod executor;
pub mod prompt;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use executor::{AgentLoop, ITERATION_LIMIT_MESSAGE};
pub use prompt::PromptAssembler;
