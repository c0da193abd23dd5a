use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, IoResultExt, Result};

/// repository format version written by this crate
pub const FORMAT_VERSION: u32 = 1;

/// repository configuration stored in config.toml
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// on-disk layout version
    pub format: u32,
    /// settings for `show`
    #[serde(default)]
    pub show: ShowConfig,
}

impl Config {
    /// load config from file, rejecting unknown format versions
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_path(path)?;
        let config: Config = toml::from_str(&content)?;
        if config.format != FORMAT_VERSION {
            return Err(Error::UnsupportedFormat(config.format));
        }
        Ok(config)
    }

    /// save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_path(path)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: FORMAT_VERSION,
            show: ShowConfig::default(),
        }
    }
}

/// `[show]` section
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowConfig {
    /// colorize diff output
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config {
            format: FORMAT_VERSION,
            show: ShowConfig { color: false },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_minimal_toml() {
        let config: Config = toml::from_str("format = 1\n").unwrap();
        assert_eq!(config.format, 1);
        assert!(config.show.color);
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.show.color = false;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_config_unsupported_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "format = 7\n").unwrap();

        assert!(matches!(
            Config::load(&path),
            Err(Error::UnsupportedFormat(7))
        ));
    }
}
