//! Store configuration.
//!
//! Every field has a default, so an empty YAML document is a valid config.
//!
//! ```
//! # use recipe_store::StoreConfig;
//! let config = StoreConfig::from_yaml_str("storage_prefix: test_").unwrap();
//! assert_eq!(config.storage_prefix, "test_");
//! assert_eq!(config.default_rating, "5");
//! ```

use crate::storage::StorageKeys;
use camino::Utf8Path;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Prefix prepended to each persisted record name
    pub storage_prefix: String,
    /// Image reference for created recipes without a photo
    pub placeholder_image: String,
    /// Rating given to newly created recipes
    pub default_rating: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            storage_prefix: "foodieFusion_".to_string(),
            placeholder_image: "default-food.png".to_string(),
            default_rating: "5".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::with_prefix(&self.storage_prefix)
    }
}
