//! Finished soundex codes and their textual forms.
use std::fmt;

use ahash::AHashSet;
use serde::Serialize;

/// Separator used when several codes are joined into one string.
pub const CODE_SEPARATOR: &str = "|";

/// Ordered, duplicate-free list of 6-digit codes for one name.
///
/// The first code is the one obtained by always taking the first
/// alternative of every ambiguous rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SoundexCodes(Vec<String>);

impl SoundexCodes {
    /// Build from codes in production order, dropping repeats.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = AHashSet::new();
        let mut out = Vec::new();
        for code in codes {
            let code = code.into();
            if seen.insert(code.clone()) {
                out.push(code);
            }
        }
        Self(out)
    }

    /// The canonical single code.
    pub fn primary(&self) -> Option<&str> {
        primary(&self.0)
    }

    /// All codes joined with `|`.
    pub fn format(&self) -> String {
        format(&self.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.iter().any(|c| c == code)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for SoundexCodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl IntoIterator for SoundexCodes {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a SoundexCodes {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for SoundexCodes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_codes(iter)
    }
}

/// Join codes with `|` in the given order.
pub fn format<S: AsRef<str>>(codes: &[S]) -> String {
    codes
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(CODE_SEPARATOR)
}

/// First code, if any.
pub fn primary<S: AsRef<str>>(codes: &[S]) -> Option<&str> {
    codes.first().map(AsRef::as_ref)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_primary() {
        let codes = SoundexCodes::from_codes(["097400", "097500"]);
        assert_eq!(codes.format(), "097400|097500");
        assert_eq!(codes.to_string(), "097400|097500");
        assert_eq!(codes.primary(), Some("097400"));
        assert_eq!(codes.len(), 2);
    }

    #[test]
    fn test_duplicates_collapse_keeping_first_position() {
        let codes = SoundexCodes::from_codes(["120000", "340000", "120000", "560000"]);
        assert_eq!(codes.as_slice(), &["120000", "340000", "560000"]);
    }

    #[test]
    fn test_empty() {
        let codes = SoundexCodes::default();
        assert!(codes.is_empty());
        assert_eq!(codes.primary(), None);
        assert_eq!(codes.format(), "");
    }

    #[test]
    fn test_free_functions() {
        let codes = vec!["583600".to_string()];
        assert_eq!(format(&codes), "583600");
        assert_eq!(primary(&codes), Some("583600"));
        assert_eq!(primary::<String>(&[]), None);
    }

    #[test]
    fn test_serializes_as_list() {
        let codes: SoundexCodes = ["467000", "567000"].into_iter().collect();
        let json = serde_json::to_string(&codes).unwrap();
        assert_eq!(json, r#"["467000","567000"]"#);
    }
}
