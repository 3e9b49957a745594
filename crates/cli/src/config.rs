//! Configuration loading from mcp-chat.toml and the environment.

use runtime::tools::Interpreters;
use runtime::{AnthropicBackend, DEFAULT_BASE_URL, DEFAULT_MAX_TOKENS};
use serde::Deserialize;
use std::path::Path;

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const MODEL_ENV: &str = "MCP_CHAT_MODEL";
pub const ENV_FILE: &str = ".env";

/// Load `KEY=value` lines from an env file into the process environment.
///
/// Variables that are already set keep their value. Returns whether the
/// file was loaded; a missing file is not an error.
pub fn load_env_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match dotenvy::from_path(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded environment file");
            true
        }
        Err(e) if e.not_found() => false,
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring environment file: {e}");
            false
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Interpreters used to launch server scripts.
    #[serde(default)]
    pub servers: ServersConfig,
}

/// Model backend configuration.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Model to use.
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound on tokens generated per model call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// API host.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Anthropic API key. `ANTHROPIC_API_KEY` takes precedence.
    pub api_key: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            base_url: default_base_url(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ServersConfig {
    #[serde(default = "default_python")]
    pub python: String,

    #[serde(default = "default_node")]
    pub node: String,
}

impl Default for ServersConfig {
    fn default() -> Self {
        Self {
            python: default_python(),
            node: default_node(),
        }
    }
}

fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_python() -> String {
    "python".to_string()
}

fn default_node() -> String {
    "node".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides taken from the environment.
    pub fn with_model_override(mut self, model: Option<String>) -> Self {
        if let Some(model) = model.filter(|m| !m.is_empty()) {
            self.backend.model = model;
        }
        self
    }

    /// Resolve the API key: the environment value wins over the file.
    ///
    /// The key is not validated here; an absent key is sent as empty and
    /// rejected by the API on the first query.
    pub fn api_key(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|k| !k.is_empty())
            .or_else(|| self.backend.api_key.clone())
            .unwrap_or_else(|| {
                tracing::warn!("{API_KEY_ENV} is not set; model calls will be rejected");
                String::new()
            })
    }

    pub fn interpreters(&self) -> Interpreters {
        Interpreters {
            python: self.servers.python.clone(),
            node: self.servers.node.clone(),
        }
    }

    /// Build the model backend with an explicit credential.
    pub fn backend(&self, api_key: String) -> AnthropicBackend {
        AnthropicBackend::builder(api_key, &self.backend.model)
            .max_tokens(self.backend.max_tokens)
            .base_url(&self.backend.base_url)
            .build()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.backend.model, "claude-3-5-sonnet-20241022");
        assert_eq!(config.backend.max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(config.backend.base_url, "https://api.anthropic.com");
        assert_eq!(config.interpreters(), Interpreters::default());
    }

    #[test]
    fn parses_overrides() {
        let config = Config::parse(
            r#"
            [backend]
            model = "claude-sonnet-4-20250514"
            max_tokens = 256
            base_url = "http://localhost:8080"

            [servers]
            python = "python3"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend.model, "claude-sonnet-4-20250514");
        assert_eq!(config.backend.max_tokens, 256);
        assert_eq!(config.backend.base_url, "http://localhost:8080");
        assert_eq!(config.servers.python, "python3");
        assert_eq!(config.servers.node, "node");
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = Config::parse("[backend\nmodel = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn environment_key_wins() {
        let config = Config::parse("[backend]\napi_key = \"from-file\"").unwrap();
        assert_eq!(config.api_key(Some("from-env".into())), "from-env");
        assert_eq!(config.api_key(Some(String::new())), "from-file");
        assert_eq!(config.api_key(None), "from-file");
        assert_eq!(Config::default().api_key(None), "");
    }

    #[test]
    fn env_file_fills_unset_variables() {
        let path = std::env::temp_dir().join(format!("mcp-chat-{}.env", std::process::id()));
        std::fs::write(&path, "MCP_CHAT_ENV_FILE_TEST=from-file\n").unwrap();

        assert!(load_env_file(&path));
        assert_eq!(std::env::var("MCP_CHAT_ENV_FILE_TEST").unwrap(), "from-file");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_env_file_is_skipped() {
        assert!(!load_env_file("does/not/exist/.env"));
    }

    #[test]
    fn model_override_applies_when_set() {
        let config = Config::default().with_model_override(Some("claude-opus-4-20250514".into()));
        assert_eq!(config.backend.model, "claude-opus-4-20250514");

        let config = Config::default().with_model_override(None);
        assert_eq!(config.backend.model, "claude-3-5-sonnet-20241022");
    }
}
