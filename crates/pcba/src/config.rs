//! Configuration management for pcba.
//!
//! Configuration is loaded from multiple sources with precedence:
//! 1. Environment variables (PCBA_*)
//! 2. Config file (~/.pcba/config.toml)
//! 3. Default values

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use pcba_rag::embeddings::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Paths
    #[serde(default)]
    pub paths: PathsConfig,

    /// Documentation retrieval settings
    #[serde(default)]
    pub rag: RagConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Base directory for pcba data
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Directory containing process documentation markdown files
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Base URL for the Ollama API
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Ollama embedding model name
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pcba")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("documents")
}

fn default_ollama_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            ollama_url: default_ollama_url(),
            embedding_model: default_embedding_model(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            rag: RagConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")?
        } else {
            Config::default()
        };

        // Environment overrides
        if let Ok(dir) = std::env::var("PCBA_DIR") {
            config.paths.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = std::env::var("PCBA_DOCS_DIR") {
            config.rag.docs_dir = PathBuf::from(dir);
        }
        if let Ok(url) = std::env::var("PCBA_OLLAMA_URL") {
            config.rag.ollama_url = url;
        }
        if let Ok(model) = std::env::var("PCBA_EMBEDDING_MODEL") {
            config.rag.embedding_model = model;
        }

        Ok(config)
    }

    /// Get the config file path.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("PCBA_CONFIG") {
            PathBuf::from(path)
        } else {
            default_data_dir().join("config.toml")
        }
    }

    /// Persisted operator sequence file.
    pub fn state_file(&self) -> PathBuf {
        self.paths.data_dir.join("sequence.toml")
    }

    /// Vector database file.
    pub fn database_path(&self) -> PathBuf {
        self.paths.data_dir.join("vectors.db")
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.paths.data_dir)
            .context("Failed to create data directory")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.paths.data_dir.ends_with(".pcba"));
        assert_eq!(config.rag.docs_dir, PathBuf::from("documents"));
        assert_eq!(config.rag.ollama_url, DEFAULT_BASE_URL);
        assert_eq!(config.rag.embedding_model, DEFAULT_MODEL);
    }

    #[test]
    fn test_derived_paths_live_under_data_dir() {
        let config = Config::default();

        assert!(config.state_file().starts_with(&config.paths.data_dir));
        assert!(config.database_path().starts_with(&config.paths.data_dir));
    }

    #[test]
    fn test_partial_config_file_fills_defaults() {
        let parsed: Config = toml::from_str("[rag]\nollama_url = \"http://ollama:11434\"\n").unwrap();

        assert_eq!(parsed.rag.ollama_url, "http://ollama:11434");
        assert_eq!(parsed.rag.embedding_model, DEFAULT_MODEL);
        assert!(parsed.paths.data_dir.ends_with(".pcba"));
    }

    #[test]
    fn test_ensure_dirs_creates_data_dir() {
        let temp = tempdir().unwrap();
        let config = Config {
            paths: PathsConfig {
                data_dir: temp.path().join("data"),
            },
            ..Config::default()
        };

        assert!(!config.paths.data_dir.exists());
        config.ensure_dirs().unwrap();
        assert!(config.paths.data_dir.exists());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.paths.data_dir, config.paths.data_dir);
        assert_eq!(parsed.rag.embedding_model, config.rag.embedding_model);
    }
}
