//! Pipeline Configuration
//!
//! Recognition settings stored in TOML format. The two behavior toggles
//! (adaptive thresholding, whitespace stripping) default to off.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recognition pipeline settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Strip all whitespace from the recognized text before uppercasing
    pub strip_whitespace: bool,
    /// Frame enhancement settings
    pub enhance: EnhanceConfig,
}

/// Frame enhancement settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Apply adaptive-threshold binarization after the blackhat step
    pub adaptive_threshold: bool,
    /// Block radius for adaptive thresholding
    pub adaptive_block_radius: u32,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            adaptive_threshold: false,
            adaptive_block_radius: 3,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<RecognitionConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: RecognitionConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &RecognitionConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = RecognitionConfig::default();

        assert!(!config.strip_whitespace);
        assert!(!config.enhance.adaptive_threshold);
        assert_eq!(config.enhance.adaptive_block_radius, 3);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = RecognitionConfig::default();
        config.strip_whitespace = true;
        config.enhance.adaptive_threshold = true;
        config.enhance.adaptive_block_radius = 5;

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: RecognitionConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.strip_whitespace, config.strip_whitespace);
        assert_eq!(
            parsed.enhance.adaptive_threshold,
            config.enhance.adaptive_threshold
        );
        assert_eq!(
            parsed.enhance.adaptive_block_radius,
            config.enhance.adaptive_block_radius
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let parsed: RecognitionConfig = toml::from_str("").unwrap();
        assert!(!parsed.strip_whitespace);
        assert!(!parsed.enhance.adaptive_threshold);
    }

    #[test]
    fn test_load_save_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let mut config = RecognitionConfig::default();
        config.enhance.adaptive_threshold = true;

        save_config(&config, file.path()).unwrap();
        let loaded = load_config(file.path()).unwrap();

        assert!(loaded.enhance.adaptive_threshold);
        assert!(!loaded.strip_whitespace);
    }
}
