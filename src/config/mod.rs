//! Configuration system (layered: code > env > config file).
//!
//! [`MemohConfig`] is a plain value owned by the top-level caller and passed
//! into [`ChatClient`](crate::chat::ChatClient) explicitly.

pub mod file;

pub use file::default_config_path;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MemohError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:7002";
pub const DEFAULT_LANGUAGE: &str = "Chinese";
pub const DEFAULT_MAX_CONTEXT_LOAD_TIME: u32 = 60;

/// Connection and request defaults for talking to the agent API.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemohConfig {
    pub api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub language: String,
    /// Minutes of history the agent loads as context.
    pub max_context_load_time: u32,
}

impl std::fmt::Debug for MemohConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemohConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| ".."))
            .field("language", &self.language)
            .field("max_context_load_time", &self.max_context_load_time)
            .finish()
    }
}

impl Default for MemohConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MemohConfig {
    pub fn new() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            language: DEFAULT_LANGUAGE.to_string(),
            max_context_load_time: DEFAULT_MAX_CONTEXT_LOAD_TIME,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Defaults overridden by environment variables (MEMOH_API_URL, MEMOH_TOKEN, ...).
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.apply_env();
        config
    }

    /// Config file at `path` (if any), then environment overrides.
    pub fn layered(path: &Path) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        if let Ok(url) = std::env::var("MEMOH_API_URL") {
            self.api_url = url;
        }
        if let Ok(token) = std::env::var("MEMOH_TOKEN") {
            self.token = Some(token);
        }
        if let Ok(language) = std::env::var("MEMOH_LANGUAGE") {
            self.language = language;
        }
        if let Some(minutes) = std::env::var("MEMOH_MAX_CONTEXT_LOAD_TIME")
            .ok()
            .and_then(|raw| raw.trim().parse().ok())
        {
            self.max_context_load_time = minutes;
        }
    }

    /// API base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The bearer token, or a precondition failure when absent.
    pub fn require_token(&self) -> Result<&str> {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(MemohError::Authentication("Not logged in".into())),
        }
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Check the config is usable before issuing requests.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(MemohError::Configuration(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_agent_api_expectations() {
        let config = MemohConfig::new();
        assert_eq!(config.api_url, "http://localhost:7002");
        assert_eq!(config.language, "Chinese");
        assert_eq!(config.max_context_load_time, 60);
        assert!(!config.is_logged_in());
    }

    #[test]
    fn require_token_is_a_precondition_failure() {
        let err = MemohConfig::new().require_token().unwrap_err();
        assert!(matches!(err, MemohError::Authentication(_)));
        assert!(!err.is_retryable());

        let config = MemohConfig::new().with_token("");
        assert!(config.require_token().is_err());

        let config = MemohConfig::new().with_token("tok");
        assert_eq!(config.require_token().unwrap(), "tok");
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let config = MemohConfig::new().with_api_url("https://api.example.com/");
        assert_eq!(config.base_url(), "https://api.example.com");
    }

    #[test]
    fn validate_rejects_non_http_urls() {
        let config = MemohConfig::new().with_api_url("localhost:7002");
        assert!(matches!(
            config.validate(),
            Err(MemohError::Configuration(_))
        ));
        assert!(MemohConfig::new().validate().is_ok());
    }

    #[test]
    fn debug_redacts_token() {
        let config = MemohConfig::new().with_token("secret-token");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
    }
}
