//! Soundex configuration that extends the base `Config` from core.
//!
//! Adds the rule source and output options on top of the flattened
//! normalization settings, so one TOML file configures both:
//!
//! ```toml
//! ascii_folding = true
//! compose_unicode = true
//! rules_file = "/etc/dmsoundex/rules.txt"
//! primary_only = false
//! ```
//!
//! # Example
//!
//! ```rust
//! use dmsoundex::SoundexConfig;
//!
//! let config = SoundexConfig::from_toml_str("primary_only = true").unwrap();
//! assert!(config.primary_only);
//! assert!(config.base().ascii_folding);
//! ```
use std::path::{Path, PathBuf};

use dmsoundex_core::{Config, ConfigError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SoundexConfig {
    /// Normalization options (folding, NFC)
    #[serde(flatten)]
    pub base: Config,

    /// Rule file to load instead of the embedded rules
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<PathBuf>,

    /// Report only the primary code
    pub primary_only: bool,
}

impl SoundexConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Convert into the base config.
    pub fn into_base(self) -> Config {
        self.base
    }

    pub fn base(&self) -> &Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut Config {
        &mut self.base
    }
}
