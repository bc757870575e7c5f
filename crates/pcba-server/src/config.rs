//! Server configuration.

use std::path::PathBuf;

use pcba_rag::embeddings::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for persistent data
    pub data_dir: PathBuf,
    /// Vector database path
    pub database_path: PathBuf,
    /// Process documentation directory; documentation tools are disabled
    /// when absent
    pub docs_dir: Option<PathBuf>,
    /// Ollama endpoint used for embeddings
    pub ollama_base_url: String,
    /// Ollama embedding model name
    pub embedding_model: String,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let data_dir = home.join(".pcba");

        Self {
            database_path: data_dir.join("vectors.db"),
            data_dir,
            docs_dir: None,
            ollama_base_url: DEFAULT_BASE_URL.to_string(),
            embedding_model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// - `PCBA_DIR`: data directory (default `~/.pcba`)
    /// - `PCBA_DOCS_DIR`: documentation directory (falls back to a local
    ///   `documents/` directory when present)
    /// - `PCBA_OLLAMA_URL`, `PCBA_EMBEDDING_MODEL`: embedding endpoint
    pub fn load() -> anyhow::Result<Self> {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        let data_dir = std::env::var("PCBA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".pcba"));
        std::fs::create_dir_all(&data_dir)?;

        let docs_dir = match std::env::var("PCBA_DOCS_DIR") {
            Ok(dir) => Some(PathBuf::from(dir)),
            Err(_) => {
                let local = PathBuf::from("documents");
                local.is_dir().then_some(local)
            }
        };

        Ok(Self {
            database_path: data_dir.join("vectors.db"),
            data_dir,
            docs_dir,
            ollama_base_url: std::env::var("PCBA_OLLAMA_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            embedding_model: std::env::var("PCBA_EMBEDDING_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.data_dir.ends_with(".pcba"));
        assert!(config.database_path.ends_with("vectors.db"));
        assert!(config.docs_dir.is_none());
        assert_eq!(config.ollama_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.embedding_model, DEFAULT_MODEL);
    }

    #[test]
    fn test_config_load_with_custom_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let custom_path = temp_dir.path().join("nested");

        // Save current value to restore later
        let old_val = env::var("PCBA_DIR").ok();
        // SAFETY: This is the only test touching PCBA_DIR and we restore it afterward
        unsafe { env::set_var("PCBA_DIR", &custom_path) };

        let config = Config::load().unwrap();

        // Should use the custom directory and create it
        assert!(config.data_dir.starts_with(&custom_path));
        assert!(config.database_path.starts_with(&custom_path));
        assert!(custom_path.exists());

        // Cleanup
        // SAFETY: Restoring environment to previous state
        unsafe {
            if let Some(val) = old_val {
                env::set_var("PCBA_DIR", val);
            } else {
                env::remove_var("PCBA_DIR");
            }
        }
    }
}
