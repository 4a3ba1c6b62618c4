//! Model gateway implementations for DocAgent.
//!
//! All gateways implement the `docagent_core::ModelGateway` trait.
//! The router selects the configured one at startup.

pub mod openai_compat;
pub mod router;

pub use openai_compat::OpenAiCompatGateway;
pub use router::{GatewayRouter, build_from_config};
