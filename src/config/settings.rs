//! Configuration settings for the tutor agent.

use crate::error::{Result, TutorError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the completion API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub agent: AgentSettings,
    pub completion: CompletionSettings,
    pub sink: SinkSettings,
    pub relay: RelaySettings,
    pub prompts: PromptSettings,
}

/// Identity and listen address of the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Display name used in logs and the health endpoint.
    pub name: String,
    /// Host to bind the inbound endpoint to.
    pub host: String,
    /// Port to bind the inbound endpoint to.
    pub port: u16,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            name: "OpenAI Agent".to_string(),
            host: "127.0.0.1".to_string(),
            port: 8007,
        }
    }
}

/// Chat-completion API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionSettings {
    /// Model identifier sent with every request.
    pub model: String,
    /// Base URL of the API; `/chat/completions` is appended.
    pub api_base: String,
    /// API key. Falls back to `OPENAI_API_KEY` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4-turbo".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: None,
            timeout_secs: crate::http_client::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CompletionSettings {
    /// Resolve the API key from config, then from the environment.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key from config, then through `lookup`.
    fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Ok(key.clone());
        }
        match lookup(API_KEY_ENV) {
            Some(key) if !key.is_empty() => Ok(key),
            Some(_) => Err(TutorError::Config(format!(
                "{} is empty. Set it with: export {}='sk-...'",
                API_KEY_ENV, API_KEY_ENV
            ))),
            None => Err(TutorError::Config(format!(
                "{} not set. Set it with: export {}='sk-...'",
                API_KEY_ENV, API_KEY_ENV
            ))),
        }
    }
}

/// Shared-link service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkSettings {
    /// When false, answers are always sent inline.
    pub enabled: bool,
    /// Endpoint that stores a study pack and returns a link to it.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SinkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "http://localhost:8080/sharedlink".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Outbound relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaySettings {
    /// Fixed recipient for every response. When unset, responses go back to
    /// the request's sender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    /// Endpoint accepting outbound envelopes. When unset, envelopes are
    /// written to stdout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            recipient: None,
            endpoint: None,
            timeout_secs: 30,
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Check values that would otherwise fail on the first request.
    pub fn validate(&self) -> Result<()> {
        if self.completion.model.trim().is_empty() {
            return Err(TutorError::Config("completion.model must not be empty".to_string()));
        }
        url::Url::parse(&self.completion.api_base)?;
        if self.sink.enabled {
            url::Url::parse(&self.sink.url)?;
        }
        if let Some(endpoint) = &self.relay.endpoint {
            url::Url::parse(endpoint)?;
        }
        if matches!(&self.relay.recipient, Some(r) if r.trim().is_empty()) {
            return Err(TutorError::Config("relay.recipient must not be empty when set".to_string()));
        }
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ncert-tutor")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Address the inbound endpoint binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.agent.host, self.agent.port)
    }
}
