use agent_core::config::{self as core_config, get_env};
use agent_core::error::AppError;
use serde::Deserialize;
use std::env;

/// Default Gemini model for explanation generation.
const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";

/// Agent name advertised by the health endpoint.
const DEFAULT_AGENT_NAME: &str = "Error Explainer Agent";

#[derive(Debug, Clone, Deserialize)]
pub struct ExplainerConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub agent: AgentConfig,
    pub provider: ProviderKind,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    pub name: String,
}

/// Which explanation strategy the service runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Remote inference against the Gemini API.
    Gemini,
    /// Local deterministic keyword rules, no network.
    Rules,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    /// Empty when the rules provider is selected.
    pub api_key: String,
    pub model: String,
}

impl ExplainerConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let provider = match get_env("EXPLAINER_PROVIDER", Some("gemini"), is_prod)?.as_str() {
            "gemini" => ProviderKind::Gemini,
            "rules" => ProviderKind::Rules,
            other => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "EXPLAINER_PROVIDER must be 'gemini' or 'rules', got '{}'",
                    other
                )));
            }
        };

        // The API key is the one hard requirement: without it the remote
        // provider cannot start. The rules provider needs no credential.
        let api_key = match provider {
            ProviderKind::Gemini => get_env("GOOGLE_API_KEY", None, is_prod)?,
            ProviderKind::Rules => String::new(),
        };

        Ok(ExplainerConfig {
            common,
            agent: AgentConfig {
                name: get_env("AGENT_NAME", Some(DEFAULT_AGENT_NAME), is_prod)?,
            },
            provider,
            gemini: GeminiSettings {
                api_key,
                model: get_env("GEMINI_MODEL", Some(DEFAULT_TEXT_MODEL), is_prod)?,
            },
        })
    }
}
