//! Error types for rule loading and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`RuleTable`](crate::RuleTable).
///
/// Every variant carries the name of the rule source (a file path or a label
/// such as `"<embedded>"`) so the offending input can be located.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A non-blank line did not split into exactly four fields.
    #[error("malformed rule in {source_name} at line {line}: expected 4 fields, found {fields}: {content:?}")]
    MalformedRule {
        source_name: String,
        line: usize,
        fields: usize,
        content: String,
    },

    /// The pattern field was empty after quote stripping.
    #[error("empty pattern in {source_name} at line {line}")]
    EmptyPattern { source_name: String, line: usize },

    /// A replacement contained something other than digits and `|`.
    #[error("invalid replacement {replacement:?} in {source_name} at line {line}")]
    InvalidReplacement {
        source_name: String,
        line: usize,
        replacement: String,
    },

    /// The source produced no rules at all.
    #[error("no rules found in {source_name}")]
    EmptySource { source_name: String },

    /// The rule file could not be read.
    #[error("failed to read rules from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading a [`Config`](crate::Config) from TOML.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
