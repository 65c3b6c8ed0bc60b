//! Application configuration.
//!
//! T010: Implement Config loading from TOML
//! T011: Define suggestion service settings with credential resolution

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable consulted when no API key is configured in the file.
pub const API_KEY_ENV_VAR: &str = "RUNPLAN_API_KEY";

/// Settings for the plan suggestion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionSettings {
    /// Base URL of the generation API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model name used for plan generation
    #[serde(default = "default_model")]
    pub model: String,
    /// API key; falls back to the RUNPLAN_API_KEY environment variable
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SuggestionSettings {
    /// Resolve the API key from config or environment.
    ///
    /// Empty strings count as unset in both places.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .or_else(|| {
                std::env::var(API_KEY_ENV_VAR)
                    .ok()
                    .map(|key| key.trim().to_string())
                    .filter(|key| !key.is_empty())
            })
    }
}

/// UI-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Start with the dark theme
    pub dark_mode: bool,
    /// Font scale multiplier
    pub font_scale: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_scale: 1.0,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// Suggestion service settings
    #[serde(default)]
    pub suggestion: SuggestionSettings,
    /// UI settings
    #[serde(default)]
    pub ui: UiSettings,
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "runplan", "RunPlan")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from file.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = get_config_path();

    if !path.exists() {
        let config = AppConfig {
            data_dir: get_data_dir(),
            ..Default::default()
        };
        return Ok(config);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = get_data_dir();

    Ok(config)
}

/// Save application configuration to file.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    let path = get_config_path();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_suggestion_settings() {
        let settings = SuggestionSettings::default();

        assert!(settings.endpoint.contains("generativelanguage"));
        assert!(settings.api_key.is_none());
        assert_eq!(settings.timeout_secs, 30);
    }

    #[test]
    fn test_config_parses_with_missing_sections() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.suggestion.model, default_model());
        assert!(config.ui.dark_mode);
    }

    #[test]
    fn test_configured_api_key_wins() {
        let settings = SuggestionSettings {
            api_key: Some("file-key".to_string()),
            ..Default::default()
        };

        assert_eq!(settings.resolve_api_key().as_deref(), Some("file-key"));
    }

    #[test]
    fn test_blank_api_key_counts_as_unset() {
        let settings = SuggestionSettings {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };

        // With no environment fallback either, resolution fails
        if std::env::var(API_KEY_ENV_VAR).is_err() {
            assert!(settings.resolve_api_key().is_none());
        }
    }

    #[test]
    fn test_config_serialization_round_trip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();

        assert!(toml_str.contains("[suggestion]"));
        assert!(toml_str.contains("[ui]"));

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.suggestion.model, config.suggestion.model);
    }
}
