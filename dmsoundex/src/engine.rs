//! Daitch-Mokotoff Soundex encoder
//!
//! `DmSoundex` combines a rule table with the input normalizer and exposes
//! the two classic entry points: `encode` (one code) and `full_encode`
//! (every code, `|`-joined). The embedded rule file is parsed once per
//! process and shared by every encoder built from it.

use std::path::PathBuf;
use std::sync::Arc;

use dmsoundex_core::{encode_with, Normalizer, RuleError, RuleTable, SoundexCodes};
use once_cell::sync::OnceCell;

use crate::config::SoundexConfig;

/// The default rule file, compiled into the binary.
pub const DEFAULT_RULES: &str = include_str!("../data/dmrules.txt");

/// Source label used in errors for [`DEFAULT_RULES`].
pub const DEFAULT_RULES_NAME: &str = "<embedded dmrules.txt>";

static DEFAULT_TABLE: OnceCell<Arc<RuleTable>> = OnceCell::new();

/// The parsed embedded rules, shared process-wide.
///
/// The table is published only after a complete, successful parse; a
/// failed parse is returned to the caller and retried on the next call.
pub fn default_rules() -> Result<Arc<RuleTable>, RuleError> {
    DEFAULT_TABLE
        .get_or_try_init(|| RuleTable::parse(DEFAULT_RULES_NAME, DEFAULT_RULES).map(Arc::new))
        .map(Arc::clone)
}

/// Anything that turns a string into a single phonetic code.
///
/// Lets the soundex sit behind the same interface as other string encoders.
pub trait StringEncoder {
    /// Encode `source`, or `None` when there is nothing to encode.
    fn encode_str(&self, source: &str) -> Option<String>;
}

/// Daitch-Mokotoff Soundex encoder.
///
/// Cheap to clone; the rule table is shared.
///
/// # Example
/// ```
/// use dmsoundex::DmSoundex;
///
/// let dm = DmSoundex::new().unwrap();
/// assert_eq!(dm.encode("GOLDEN").as_deref(), Some("583600"));
/// assert_eq!(dm.full_encode("AUERBACH").as_deref(), Some("097400|097500"));
/// assert_eq!(dm.encode(""), None);
/// ```
#[derive(Debug, Clone)]
pub struct DmSoundex {
    rules: Arc<RuleTable>,
    normalizer: Normalizer,
}

impl DmSoundex {
    /// Encoder over the embedded rules with default normalization.
    pub fn new() -> Result<Self, RuleError> {
        Ok(Self::with_table(default_rules()?))
    }

    /// Encoder over an already parsed rule table.
    pub fn with_table(rules: Arc<RuleTable>) -> Self {
        Self {
            rules,
            normalizer: Normalizer::default(),
        }
    }

    pub fn builder() -> DmSoundexBuilder {
        DmSoundexBuilder::default()
    }

    /// The primary code for `name`, or `None` if `name` is empty after
    /// whitespace removal.
    pub fn encode(&self, name: &str) -> Option<String> {
        self.codes(name).primary().map(str::to_string)
    }

    /// All codes for `name` joined with `|`, or `None` if `name` is empty
    /// after whitespace removal.
    pub fn full_encode(&self, name: &str) -> Option<String> {
        let codes = self.codes(name);
        if codes.is_empty() {
            None
        } else {
            Some(codes.format())
        }
    }

    /// All codes for `name` in production order.
    pub fn codes(&self, name: &str) -> SoundexCodes {
        encode_with(&self.rules, &self.normalizer, name)
    }

    /// The normalized form `name` is encoded from.
    pub fn normalize(&self, name: &str) -> String {
        self.normalizer.normalize(name)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }
}

impl StringEncoder for DmSoundex {
    fn encode_str(&self, source: &str) -> Option<String> {
        self.encode(source)
    }
}

#[derive(Debug, Clone, Default)]
enum RuleSource {
    #[default]
    Embedded,
    Text {
        name: String,
        text: String,
    },
    File(PathBuf),
}

/// Builder for [`DmSoundex`] with custom rules or normalization.
///
/// ```
/// use dmsoundex::DmSoundex;
///
/// let dm = DmSoundex::builder()
///     .with_rules("\"sh\" \"0\" \"\" \"0|1\"")
///     .build()
///     .unwrap();
/// assert_eq!(dm.full_encode("ashsh").as_deref(), Some("000000|010000"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DmSoundexBuilder {
    source: RuleSource,
    normalizer: Normalizer,
}

impl DmSoundexBuilder {
    /// Use rules from a string instead of the embedded file.
    pub fn with_rules<T: Into<String>>(self, text: T) -> Self {
        self.named_rules("<memory>", text)
    }

    /// Like [`with_rules`](Self::with_rules), with a label for error messages.
    pub fn named_rules<N: Into<String>, T: Into<String>>(mut self, name: N, text: T) -> Self {
        self.source = RuleSource::Text {
            name: name.into(),
            text: text.into(),
        };
        self
    }

    /// Read rules from a file when building.
    pub fn rules_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source = RuleSource::File(path.into());
        self
    }

    /// Enable or disable folding of accented letters.
    pub fn ascii_folding(mut self, enabled: bool) -> Self {
        self.normalizer.ascii_folding = enabled;
        self
    }

    /// Enable or disable NFC composition before folding.
    pub fn compose_unicode(mut self, enabled: bool) -> Self {
        self.normalizer.compose_unicode = enabled;
        self
    }

    /// Apply the normalization options and rule file of `config`.
    pub fn from_config(mut self, config: &SoundexConfig) -> Self {
        self.normalizer = config.base.normalizer();
        if let Some(path) = &config.rules_file {
            self.source = RuleSource::File(path.clone());
        }
        self
    }

    /// Parse the rules and construct the encoder.
    pub fn build(self) -> Result<DmSoundex, RuleError> {
        let rules = match self.source {
            RuleSource::Embedded => default_rules()?,
            RuleSource::Text { name, text } => Arc::new(RuleTable::parse(&name, &text)?),
            RuleSource::File(path) => Arc::new(RuleTable::from_path(&path)?),
        };
        tracing::debug!(
            source = rules.source_name(),
            rules = rules.len(),
            "built soundex encoder"
        );
        Ok(DmSoundex {
            rules,
            normalizer: self.normalizer,
        })
    }
}
