//! Configuration management for JobFit

use crate::error::{JobFitError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Model used when none is configured or the configured one is unknown.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini models the tool knows how to talk to.
pub const SUPPORTED_MODELS: &[&str] = &["gemini-2.0-flash", "gemini-pro"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub model: String,
    /// Temperature for the structured analysis call.
    pub temperature: f32,
    /// Temperature for cover letter generation.
    pub cover_letter_temperature: f32,
    /// Timeout for a single provider call, in seconds.
    pub timeout_secs: u64,
    /// Optional stored API key. Lower precedence than the --api-key flag,
    /// higher than the GEMINI_API_KEY environment variable.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                model: DEFAULT_MODEL.to_string(),
                temperature: 0.2,
                cover_letter_temperature: 0.7,
                timeout_secs: 45,
                api_key: None,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Loads the config from the given path, or from the default location,
    /// creating a default file there if none exists yet.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::read(&config_path)
                } else {
                    let config = Self::default();
                    config.save()?;
                    Ok(config)
                }
            }
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| JobFitError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| JobFitError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("jobfit")
            .join("config.toml")
    }

    /// Sets a single value addressed by a dotted key, e.g. "api.model".
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.model" => self.api.model = value.to_string(),
            "api.temperature" => self.api.temperature = parse_value(key, value)?,
            "api.cover_letter_temperature" => {
                self.api.cover_letter_temperature = parse_value(key, value)?
            }
            "api.timeout_secs" => self.api.timeout_secs = parse_value(key, value)?,
            "api.api_key" => {
                self.api.api_key = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "output.detailed" => self.output.detailed = parse_value(key, value)?,
            "output.color_output" => self.output.color_output = parse_value(key, value)?,
            "output.format" => {
                self.output.format = crate::cli::parse_output_format(value)
                    .map_err(JobFitError::Configuration)?
            }
            _ => {
                return Err(JobFitError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        JobFitError::Configuration(format!("Invalid value for {}: {}", key, value))
    })
}

/// Falls back to the default model when the requested one is not supported.
pub fn sanitize_model(model: &str) -> &str {
    if SUPPORTED_MODELS.contains(&model) {
        model
    } else {
        DEFAULT_MODEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_model_falls_back_to_default() {
        assert_eq!(sanitize_model("gemini-pro"), "gemini-pro");
        assert_eq!(sanitize_model("gpt-4"), DEFAULT_MODEL);
    }

    #[test]
    fn test_set_by_dotted_key() {
        let mut config = Config::default();
        config.set("api.model", "gemini-pro").unwrap();
        config.set("api.timeout_secs", "60").unwrap();
        config.set("output.detailed", "true").unwrap();
        assert_eq!(config.api.model, "gemini-pro");
        assert_eq!(config.api.timeout_secs, 60);
        assert!(config.output.detailed);
    }

    #[test]
    fn test_set_rejects_unknown_key() {
        let mut config = Config::default();
        assert!(config.set("api.nope", "x").is_err());
        assert!(config.set("api.timeout_secs", "soon").is_err());
    }
}
