//! Configuration loading: TOML file plus `KOUSEI_*` environment overrides.
//!
//! Resolution order for each setting: command-line flag (applied by the
//! binary), environment variable, config file, compiled default.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use kousei_core::checker::CheckerConfig;
use kousei_core::types::CheckMode;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "kousei.toml";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub store: StoreConfig,
    pub check: CheckConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
        }
    }
}

/// Masked-LM settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier, e.g. `bert-base-uncased`.
    pub name: String,
    /// Directory holding tokenizer.json/config.json/model.safetensors.
    /// Defaults to `models/<name>`.
    pub dir: Option<PathBuf>,
    /// Disable to run rules-only without probing the filesystem.
    pub enabled: bool,
    /// Masked-LM acceptance threshold for homophone swaps.
    pub confidence_threshold: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "bert-base-uncased".into(),
            dir: None,
            enabled: true,
            confidence_threshold: 0.7,
        }
    }
}

/// Lexicon database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub path: PathBuf,
    /// Seed the sample data on startup (idempotent).
    pub seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("kousei.db"),
            seed: true,
        }
    }
}

/// Checking behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    pub context_window: usize,
    pub max_suggestions: usize,
    pub min_confidence: f32,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            context_window: 3,
            max_suggestions: 5,
            min_confidence: 0.5,
        }
    }
}

impl AppConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist; otherwise `kousei.toml` is used when
    /// present, else defaults. Environment overrides apply last.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Apply `KOUSEI_*` environment variable overrides.
    fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("KOUSEI_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("KOUSEI_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(name) = std::env::var("KOUSEI_MODEL") {
            self.model.name = name;
        }
        if let Ok(dir) = std::env::var("KOUSEI_MODEL_DIR") {
            self.model.dir = Some(PathBuf::from(dir));
        }
        if let Ok(path) = std::env::var("KOUSEI_DB") {
            self.store.path = PathBuf::from(path);
        }
    }

    /// Bounds-check thresholds and sizes.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.model.confidence_threshold) {
            bail!("model.confidence_threshold must be between 0.0 and 1.0");
        }
        if !(0.0..=1.0).contains(&self.check.min_confidence) {
            bail!("check.min_confidence must be between 0.0 and 1.0");
        }
        if self.check.context_window < 1 {
            bail!("check.context_window must be at least 1");
        }
        if self.check.max_suggestions < 1 {
            bail!("check.max_suggestions must be at least 1");
        }
        Ok(())
    }

    /// Resolved model directory.
    pub fn model_dir(&self) -> PathBuf {
        self.model
            .dir
            .clone()
            .unwrap_or_else(|| Path::new("models").join(&self.model.name))
    }

    /// Map into the engine configuration.
    pub fn checker_config(&self) -> CheckerConfig {
        CheckerConfig::new()
            .with_mode(if self.model.enabled {
                CheckMode::Auto
            } else {
                CheckMode::Rules
            })
            .with_neural(self.model.enabled)
            .with_model_dir(self.model_dir())
            .with_confidence_threshold(self.model.confidence_threshold)
            .with_context_window(self.check.context_window)
            .with_max_suggestions(self.check.max_suggestions)
            .with_min_confidence(self.check.min_confidence)
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.model.name, "bert-base-uncased");
        assert!(config.model.enabled);
        assert_eq!(config.store.path, PathBuf::from("kousei.db"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_model_dir_defaults_to_name() {
        let config = AppConfig::default();
        assert_eq!(config.model_dir(), Path::new("models").join("bert-base-uncased"));

        let mut config = AppConfig::default();
        config.model.dir = Some(PathBuf::from("/opt/models/bert"));
        assert_eq!(config.model_dir(), PathBuf::from("/opt/models/bert"));
    }

    #[test]
    fn test_parse_toml() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [model]
            name = "distilbert-base-uncased"
            enabled = false

            [check]
            context_window = 2
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.model.name, "distilbert-base-uncased");
        assert!(!config.model.enabled);
        assert_eq!(config.check.context_window, 2);
        // Unspecified sections keep their defaults.
        assert_eq!(config.check.max_suggestions, 5);
        assert_eq!(config.store.path, PathBuf::from("kousei.db"));
    }

    #[test]
    fn test_validation_bounds() {
        let mut config = AppConfig::default();
        config.model.confidence_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.check.context_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_checker_config_mapping() {
        let mut config = AppConfig::default();
        config.model.enabled = false;
        config.check.min_confidence = 0.6;

        let checker_config = config.checker_config();
        assert_eq!(checker_config.mode, CheckMode::Rules);
        assert!(!checker_config.enable_neural);
        assert_eq!(checker_config.min_confidence, 0.6);
    }
}
