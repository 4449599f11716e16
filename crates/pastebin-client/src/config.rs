use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{PasteError, Result};

pub const API_BASE_URL_ENV: &str = "PASTEBIN_API_BASE_URL";
pub const SHARE_BASE_URL_ENV: &str = "PASTEBIN_SHARE_BASE_URL";

const CONFIG_FILE_NAME: &str = ".pastebin.json";

fn default_api_base_url() -> String {
    "http://localhost:5000".to_string()
}

/// Client configuration, passed explicitly to the API client and controllers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base of the links handed out after a paste is created.
    /// Falls back to the API base URL when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_base_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            share_base_url: None,
        }
    }
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            share_base_url: None,
        }
        .normalized()
    }

    pub fn with_share_base_url(mut self, share_base_url: impl Into<String>) -> Self {
        self.share_base_url = Some(share_base_url.into());
        self.normalized()
    }

    /// Get the config file path (~/.pastebin.json)
    fn config_file_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the config file and environment.
    ///
    /// A missing config file is not an error.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str::<ClientConfig>(&content).map_err(|e| {
                    PasteError::Config(format!("{}: {e}", path.display()))
                })?
            }
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config.normalized())
    }

    /// Load configuration, falling back to defaults with a warning on failure.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load config, using defaults");
                let mut config = Self::default();
                config.apply_env(|key| std::env::var(key).ok());
                config.normalized()
            }
        }
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(url) = lookup(SHARE_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.share_base_url = Some(url);
        }
    }

    fn normalized(mut self) -> Self {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        self.share_base_url = self
            .share_base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        self
    }

    /// Base URL that share links are built on.
    pub fn share_base(&self) -> &str {
        self.share_base_url.as_deref().unwrap_or(&self.api_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_file_uses_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.share_base(), "http://localhost:5000");
    }

    #[test]
    fn test_config_file_keys_are_camel_case() {
        let json = r#"{
            "apiBaseUrl": "https://api.paste.example/",
            "shareBaseUrl": "https://paste.example"
        }"#;
        let config = serde_json::from_str::<ClientConfig>(json)
            .unwrap()
            .normalized();
        assert_eq!(config.api_base_url, "https://api.paste.example");
        assert_eq!(config.share_base(), "https://paste.example");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = ClientConfig::new("http://file.example");
        config.apply_env(|key| match key {
            API_BASE_URL_ENV => Some("http://env.example/".to_string()),
            _ => None,
        });
        let config = config.normalized();
        assert_eq!(config.api_base_url, "http://env.example");
        assert_eq!(config.share_base(), "http://env.example");
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = ClientConfig::default();
        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config.normalized(), ClientConfig::default());
    }
}
