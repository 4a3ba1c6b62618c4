//! Wiring: configuration → tools + gateway → agent loop.

use docagent_agent::AgentLoop;
use docagent_config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

/// Build the agent the shell talks to.
///
/// Fails on an unusable provider or a tool registration conflict; both are
/// start-up errors rather than per-query ones.
pub fn build_agent(config: &AppConfig) -> Result<AgentLoop, Box<dyn std::error::Error>> {
    let tools = docagent_tools::default_registry(&config.tools)
        .map_err(|e| format!("Failed to register tools: {e}"))?;

    let router = docagent_providers::build_from_config(config)?;
    let gateway = router
        .default()
        .ok_or_else(|| format!("No gateway for provider '{}'", config.default_provider))?;

    if !config.has_api_key() {
        warn!(
            provider = %config.default_provider,
            "No API key configured; hosted providers will reject requests"
        );
    }

    info!(
        provider = %config.default_provider,
        model = config.effective_model(),
        tools = tools.len(),
        "Agent ready"
    );

    Ok(AgentLoop::from_config(config, gateway, Arc::new(tools)))
}

/// Start-up summary printed to stderr before the first prompt.
pub fn banner(config: &AppConfig, agent: &AgentLoop) -> String {
    let mut text = String::new();
    text.push_str("\n  DocAgent: interactive mode\n\n");
    text.push_str(&format!("  Provider:  {}\n", agent.gateway_name()));
    text.push_str(&format!("  Model:     {}\n", config.effective_model()));
    text.push_str(&format!("  Tools:     {}\n", agent.tools().names().join(", ")));

    if !config.has_api_key() {
        text.push_str("\n  No API key found. Set GEMINI_API_KEY (or DOCAGENT_API_KEY),\n");
        text.push_str(&format!(
            "  or add api_key to {}\n",
            AppConfig::config_dir().join("config.toml").display()
        ));
    }

    text.push_str(&format!(
        "\n  Type '{}' or press Ctrl+D to quit.\n",
        config.shell.exit_command
    ));
    text
}
