//! Loading `WalkConfig` from config documents.

use std::path::Path;

use super::WalkConfig;
use crate::error::ConfigError;

impl WalkConfig {
    /// Load a config file, choosing the parser from its extension.
    ///
    /// Recognised extensions are `json`, `yaml`/`yml` and `toml`, each
    /// available when the matching feature is enabled.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content = std::fs::read_to_string(path)?;

        match ext.as_str() {
            #[cfg(feature = "json")]
            "json" => Self::from_json_str(&content),
            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Self::from_yaml_str(&content),
            #[cfg(feature = "toml")]
            "toml" => Self::from_toml_str(&content),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[cfg(feature = "json")]
impl WalkConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: WalkConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "yaml")]
impl WalkConfig {
    /// Parse and validate a YAML config document.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: WalkConfig = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "toml")]
impl WalkConfig {
    /// Parse and validate a TOML config document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: WalkConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
