// File: rhtmx-formguard/src/config.rs
// Purpose: Session configuration parsed from formguard.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::FormGuardError;

/// Form guard configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub page: PageConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Page-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Declared page language, used to build translation URLs
    #[serde(default = "default_lang")]
    pub lang: String,
}

/// Where the translation, group and submit endpoints live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

/// Timing of validation and error messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Quiet period before a field is validated after an edit
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    #[serde(default)]
    pub debounce_scope: DebounceScope,

    /// How long an error message stays before dismissing itself
    #[serde(default = "default_message_timeout_ms")]
    pub message_timeout_ms: u64,
}

/// Whether debounce timers are kept per field or shared by the whole page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DebounceScope {
    /// One pending timer per field name
    #[default]
    PerField,
    /// One pending timer for the page; an edit anywhere cancels the pending run
    Shared,
}

// Default values
fn default_lang() -> String {
    "en".to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_message_timeout_ms() -> u64 {
    5_000
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            debounce_scope: DebounceScope::PerField,
            message_timeout_ms: default_message_timeout_ms(),
        }
    }
}

impl ValidationConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_millis(self.message_timeout_ms)
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default path (./formguard.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("formguard.toml")
    }

    /// Reject settings the session cannot work with
    pub fn validate(&self) -> std::result::Result<(), FormGuardError> {
        if self.page.lang.trim().is_empty() {
            return Err(FormGuardError::Config("page.lang must not be empty".into()));
        }
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(FormGuardError::Config(format!(
                "backend.base_url must be an http(s) URL, got '{}'",
                self.backend.base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.page.lang, "en");
        assert_eq!(config.validation.debounce_ms, 300);
        assert_eq!(config.validation.debounce_scope, DebounceScope::PerField);
        assert_eq!(config.validation.message_timeout(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config() {
        let config = toml::from_str::<Config>("").unwrap_or_default();
        assert_eq!(config.backend.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.backend.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_custom_sections() {
        let toml = r#"
            [page]
            lang = "fr"

            [validation]
            debounce_ms = 500
            debounce_scope = "shared"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.page.lang, "fr");
        assert_eq!(config.validation.debounce(), Duration::from_millis(500));
        assert_eq!(config.validation.debounce_scope, DebounceScope::Shared);
        assert_eq!(config.validation.message_timeout_ms, 5_000);
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.backend.base_url = "ftp://example.com".into();
        assert!(matches!(config.validate(), Err(FormGuardError::Config(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("does/not/exist/formguard.toml").unwrap();
        assert_eq!(config.page.lang, "en");
    }
}
