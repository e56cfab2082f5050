//! dmsoundex crate root
//!
//! Daitch-Mokotoff Soundex for personal names. The encoder, its builder and
//! the shared default rule table live in `engine`; `config` holds the TOML
//! configuration used by the command-line tool.
//!
//! Public API exported here:
//! - `DmSoundex` and `DmSoundexBuilder` from `engine`
//! - `StringEncoder`, the single-code encoding trait
//! - `SoundexConfig` from `config`

pub mod config;
pub mod engine;

pub use config::SoundexConfig;
pub use engine::{
    default_rules, DmSoundex, DmSoundexBuilder, StringEncoder, DEFAULT_RULES, DEFAULT_RULES_NAME,
};

// Convenience re-exports for callers working with rule tables directly.
pub use dmsoundex_core::{
    ConfigError, Normalizer, Rule, RuleError, RuleTable, SoundexCodes, MAX_LENGTH,
};
