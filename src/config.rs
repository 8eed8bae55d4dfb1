//! Configuration for the metadata tooling
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (component-meta.toml)
//! - Environment variables (COMPONENT_META__*)
//!
//! ## Example config file (component-meta.toml):
//! ```toml
//! [loader]
//! libraries = ["./libs/base-ui", "./libs/charts"]
//!
//! [display]
//! language = "en"
//! compact_output = false
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the metadata tooling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetaConfig {
    /// Loader settings
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Loader configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Library roots to validate when none are given on the command line
    #[serde(default)]
    pub libraries: Vec<PathBuf>,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Language used when resolving strings for display
    #[serde(default = "default_language")]
    pub language: String,

    /// Emit compact JSON instead of pretty-printed
    #[serde(default)]
    pub compact_output: bool,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            compact_output: false,
        }
    }
}

impl MetaConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "component-meta.toml",
            ".component-meta.toml",
            "config/component-meta.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("COMPONENT_META")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
