//! dmsoundex-core
//!
//! Rule table, input normalization and the branching encoder behind the
//! Daitch-Mokotoff Soundex. The `dmsoundex` crate wraps these pieces with
//! the embedded default rules and a command-line front end.
//!
//! Public API:
//! - `RuleTable` / `Rule` - parsed phonetic rules, longest pattern first
//! - `Normalizer` / `normalize` - whitespace removal, lowercasing, folding
//! - `BranchingEncoder` - the rule walker that forks on ambiguous rules
//! - `SoundexCodes` - ordered, deduplicated result codes
//! - `Config` - serde/TOML configuration shared by front ends
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{ConfigError, RuleError};

pub mod rules;
pub use rules::{Replacement, Rule, RuleTable};

pub mod normalize;
pub use normalize::{normalize, Normalizer};

pub mod encoder;
pub use encoder::{Branch, BranchSet, BranchingEncoder, MAX_LENGTH};

pub mod codes;
pub use codes::SoundexCodes;

/// Normalize `name` and run it through `rules`.
///
/// Returns an empty [`SoundexCodes`] when nothing is left after
/// normalization.
pub fn encode_with(rules: &RuleTable, normalizer: &Normalizer, name: &str) -> SoundexCodes {
    let normalized = normalizer.normalize(name);
    if normalized.is_empty() {
        return SoundexCodes::default();
    }
    BranchingEncoder::new(rules).encode(&normalized)
}

/// Generic encoder configuration.
///
/// Rule sources and output options belong to the front end
/// (`SoundexConfig` in the `dmsoundex` crate), which flattens this struct.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Fold accented Latin letters to their base letter before encoding.
    pub ascii_folding: bool,
    /// Apply Unicode NFC composition before folding.
    pub compose_unicode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ascii_folding: true,
            compose_unicode: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// The normalizer described by this configuration.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.ascii_folding, self.compose_unicode)
    }
}
