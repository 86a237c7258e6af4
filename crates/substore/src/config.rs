//! Store configuration
//!
//! Configuration loaded from substore.toml.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, StoreError};

const CONFIG_FILE: &str = "substore.toml";

/// Store configuration loaded from substore.toml
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum nesting of dispatches triggered from inside notifications.
    /// `None` leaves recursion unbounded; breaking dispatch cycles is then up
    /// to the middlewares.
    #[serde(default)]
    pub max_dispatch_depth: Option<usize>,

    /// Emit a debug log line for every dispatched action
    #[serde(default = "default_log_actions")]
    pub log_actions: bool,
}

fn default_log_actions() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_dispatch_depth: None,
            log_actions: default_log_actions(),
        }
    }
}

impl StoreConfig {
    /// Set a dispatch depth limit
    pub fn with_max_dispatch_depth(mut self, limit: usize) -> Self {
        self.max_dispatch_depth = Some(limit);
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a config file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load substore.toml from the working directory, or use defaults
    pub fn load() -> Self {
        if !Path::new(CONFIG_FILE).exists() {
            log::debug!("No {} found, using default store config", CONFIG_FILE);
            return Self::default();
        }

        match Self::load_from(CONFIG_FILE) {
            Ok(config) => {
                log::info!("Loaded store config from {}", CONFIG_FILE);
                config
            }
            Err(e) => {
                log::warn!("{}, using default store config", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.max_dispatch_depth, None);
        assert!(config.log_actions);
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            max_dispatch_depth = 16
            log_actions = false
        "#;
        let config = StoreConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.max_dispatch_depth, Some(16));
        assert!(!config.log_actions);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_invalid_config_is_parse_error() {
        let err = StoreConfig::from_toml_str("max_dispatch_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, StoreError::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let path = std::env::temp_dir().join("substore-missing-config-test.toml");
        let err = StoreConfig::load_from(&path).unwrap_err();
        match err {
            StoreError::ConfigRead { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected ConfigRead, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "substore-config-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "max_dispatch_depth = 3\n").unwrap();
        let config = StoreConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config, StoreConfig::default().with_max_dispatch_depth(3));
    }
}
