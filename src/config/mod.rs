use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ArticleError;

/// Environment variable holding the Gemini API key.
/// The key is only ever read from the environment, never written to disk.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API configuration
    pub gemini: GeminiConfig,

    /// Application settings
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model used for article generation
    pub model: String,

    /// Optional API endpoint override (defaults to the public API)
    pub endpoint: Option<String>,

    /// Request timeout in seconds; generation with high thinking effort can take minutes
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory articles are written into
    pub output_dir: PathBuf,

    /// Seconds to wait between consecutive transcript fetches
    pub fetch_delay_secs: u64,

    /// Audience recorded in article front-matter and the prompt's context block
    pub audience: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig {
                model: "gemini-3-pro-preview".to_string(),
                endpoint: None,
                request_timeout_secs: 600,
            },
            app: AppConfig {
                output_dir: PathBuf::from("articles"),
                fetch_delay_secs: 15,
                audience: "Senior engineers and technical practitioners".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content =
                fs_err::read_to_string(&config_path).context("Failed to read config file")?;

            let config: Config =
                serde_yaml::from_str(&content).context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        fs_err::write(&config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("articlegen").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.gemini.model.is_empty() {
            anyhow::bail!("Gemini model must be configured");
        }

        if self.gemini.request_timeout_secs == 0 {
            anyhow::bail!("Request timeout must be greater than zero");
        }

        Ok(())
    }

    /// Read the Gemini API key from the environment.
    /// Absence is a fatal configuration error, raised before any network call.
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ArticleError::Config(format!(
                "{API_KEY_ENV} environment variable is not set"
            ))
            .into()),
        }
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Gemini Model: {}", self.gemini.model);
        if let Some(endpoint) = &self.gemini.endpoint {
            println!("  Gemini Endpoint: {}", endpoint);
        }
        println!("  Request Timeout: {}s", self.gemini.request_timeout_secs);
        println!("  Output Directory: {}", self.app.output_dir.display());
        println!("  Fetch Delay: {}s", self.app.fetch_delay_secs);
        println!("  Audience: {}", self.app.audience);
        println!(
            "  API Key: {}",
            if self.api_key().is_ok() {
                format!("set via {API_KEY_ENV}")
            } else {
                format!("NOT SET (export {API_KEY_ENV})")
            }
        );
    }

    /// Interactive configuration setup
    pub async fn interactive_setup(&self) -> Result<()> {
        println!("Interactive configuration setup coming soon!");
        println!("For now, please edit the config file manually:");
        println!("  {}", Self::config_path()?.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.app.fetch_delay_secs, 15);
        assert_eq!(config.app.output_dir, PathBuf::from("articles"));
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let mut config = Config::default();
        config.gemini.model = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.gemini.model, config.gemini.model);
        assert_eq!(parsed.app.fetch_delay_secs, config.app.fetch_delay_secs);
    }

    #[test]
    fn test_save_and_load_yaml_in_temp_dir() {
        // Exercise the serde_yaml round trip through a real file
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let config = Config::default();
        let content = serde_yaml::to_string(&config).unwrap();
        fs_err::write(&path, content).unwrap();

        let loaded: Config = tokio_test::block_on(async {
            let content = fs_err::read_to_string(&path).unwrap();
            serde_yaml::from_str(&content).unwrap()
        });
        assert_eq!(loaded.gemini.request_timeout_secs, 600);
    }
}
