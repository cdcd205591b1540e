use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_ADVICE_ENDPOINT: &str = "http://localhost:8787/ai-advice";
pub const ADVICE_URL_ENV: &str = "FOCUSFLOW_ADVICE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub advice_endpoint: String,
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            advice_endpoint: DEFAULT_ADVICE_ENDPOINT.to_string(),
            seed_demo_data: true,
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("focusflow"))
}

impl Config {
    /// Reads `config.toml` from the focusflow config directory, then applies
    /// environment overrides. A missing file yields the defaults.
    pub fn load() -> Result<Config, ConfigError> {
        let config = match config_dir() {
            Some(dir) => Config::from_file(&dir.join("config.toml"))?,
            None => Config::default(),
        };
        Ok(config.with_env_override(std::env::var(ADVICE_URL_ENV).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_env_override(mut self, advice_url: Option<String>) -> Config {
        if let Some(url) = advice_url.filter(|u| !u.trim().is_empty()) {
            self.advice_endpoint = url.trim().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str("seed_demo_data = false").unwrap();
        assert_eq!(config.advice_endpoint, DEFAULT_ADVICE_ENDPOINT);
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("focusflow-missing-config.toml");
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_unreadable_path_is_a_read_error() {
        let dir = std::env::temp_dir();
        let err = Config::from_file(&dir).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "focusflow-invalid-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "seed_demo_data = \"maybe\"").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_override() {
        let config = Config::default().with_env_override(Some("https://advice.test/".to_string()));
        assert_eq!(config.advice_endpoint, "https://advice.test/");

        let config = Config::default().with_env_override(Some("  ".to_string()));
        assert_eq!(config.advice_endpoint, DEFAULT_ADVICE_ENDPOINT);
    }
}
