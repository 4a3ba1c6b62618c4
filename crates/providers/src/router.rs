//! Gateway router: selects the model gateway named in configuration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use docagent_config::AppConfig;
use docagent_core::gateway::ModelGateway;
use crate::openai_compat::OpenAiCompatGateway;

/// Holds the gateways built from configuration.
pub struct GatewayRouter {
    gateways: HashMap<String, Arc<dyn ModelGateway>>,
    default_gateway: String,
}

impl GatewayRouter {
    /// Create a new router with a default gateway name.
    pub fn new(default_gateway: impl Into<String>) -> Self {
        Self {
            gateways: HashMap::new(),
            default_gateway: default_gateway.into(),
        }
    }

    /// Register a gateway.
    pub fn register(&mut self, name: impl Into<String>, gateway: Arc<dyn ModelGateway>) {
        self.gateways.insert(name.into(), gateway);
    }

    /// Get the default gateway.
    pub fn default(&self) -> Option<Arc<dyn ModelGateway>> {
        self.gateways.get(&self.default_gateway).cloned()
    }

    /// Get a specific gateway by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ModelGateway>> {
        self.gateways.get(name).cloned()
    }

    /// List all registered gateway names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.gateways.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

/// Build gateways from configuration.
///
/// Every `[providers.*]` table becomes a gateway; the default provider is
/// added from the top-level key and well-known URL when it has no table.
pub fn build_from_config(config: &AppConfig) -> Result<GatewayRouter, docagent_core::Error> {
    let mut router = GatewayRouter::new(&config.default_provider);
    let timeout = Duration::from_secs(config.request_timeout_secs);

    for (name, provider_config) in &config.providers {
        let api_key = provider_config
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();

        let base_url = provider_config
            .api_url
            .clone()
            .or_else(|| default_base_url(name).map(String::from))
            .ok_or_else(|| unknown_provider(name))?;

        let gateway = OpenAiCompatGateway::new(name, base_url, api_key, timeout)?;
        router.register(name.clone(), Arc::new(gateway));
    }

    // Ensure the default gateway exists (even if not explicitly configured)
    if router.get(&config.default_provider).is_none() {
        let api_key = config.api_key.clone().unwrap_or_default();
        let base_url =
            default_base_url(&config.default_provider).ok_or_else(|| unknown_provider(&config.default_provider))?;

        let gateway = OpenAiCompatGateway::new(&config.default_provider, base_url, api_key, timeout)?;
        router.register(config.default_provider.clone(), Arc::new(gateway));
    }

    Ok(router)
}

fn unknown_provider(name: &str) -> docagent_core::Error {
    docagent_core::Error::Config {
        message: format!("provider '{name}' has no known endpoint; set providers.{name}.api_url"),
    }
}

/// Get the default base URL for well-known providers.
fn default_base_url(provider_name: &str) -> Option<&'static str> {
    match provider_name {
        "gemini" | "google" => Some("https://generativelanguage.googleapis.com/v1beta/openai"),
        "openai" => Some("https://api.openai.com/v1"),
        "openrouter" => Some("https://openrouter.ai/api/v1"),
        "ollama" => Some("http://localhost:11434/v1"),
        "groq" => Some("https://api.groq.com/openai/v1"),
        "together" => Some("https://api.together.xyz/v1"),
        "vllm" => Some("http://localhost:8000/v1"),
        "llamacpp" | "llama.cpp" => Some("http://localhost:8080/v1"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docagent_config::ProviderConfig;

    #[test]
    fn router_register_and_lookup() {
        let mut router = GatewayRouter::new("gemini");
        let gateway = Arc::new(
            OpenAiCompatGateway::new(
                "gemini",
                default_base_url("gemini").unwrap(),
                "key",
                Duration::from_secs(60),
            )
            .unwrap(),
        );
        router.register("gemini", gateway);

        assert!(router.get("gemini").is_some());
        assert!(router.get("nonexistent").is_none());
        assert!(router.default().is_some());
    }

    #[test]
    fn default_base_urls() {
        assert!(default_base_url("gemini").unwrap().contains("googleapis.com"));
        assert!(default_base_url("openai").unwrap().contains("api.openai.com"));
        assert!(default_base_url("ollama").unwrap().contains("localhost:11434"));
        assert!(default_base_url("mystery").is_none());
    }

    #[test]
    fn build_from_default_config() {
        let config = AppConfig::default();
        let router = build_from_config(&config).unwrap();
        let gateway = router.default().unwrap();
        assert_eq!(gateway.name(), "gemini");
    }

    #[test]
    fn configured_providers_are_all_built() {
        let mut config = AppConfig::default();
        config.providers.insert(
            "local".into(),
            ProviderConfig {
                api_url: Some("http://localhost:1234/v1".into()),
                ..ProviderConfig::default()
            },
        );
        let router = build_from_config(&config).unwrap();
        assert_eq!(router.list(), ["gemini", "local"]);
    }

    #[test]
    fn unknown_provider_without_url_is_config_error() {
        let config = AppConfig {
            default_provider: "mystery".into(),
            ..AppConfig::default()
        };
        let err = build_from_config(&config).err().unwrap();
        assert!(err.to_string().contains("mystery"));
    }
}
