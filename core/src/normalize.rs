//! Input normalization: whitespace removal, lowercasing and folding of
//! accented Latin letters onto the ASCII letters the rule table knows.

use phf::phf_map;
use unicode_normalization::UnicodeNormalization;

/// Accented and extended letters folded to their base letter.
///
/// Letters with their own rules (Polish `ą`/`ę`, Romanian `ţ`/`ț`) are left
/// alone on purpose; everything not listed passes through unchanged.
static FOLDING: phf::Map<char, char> = phf_map! {
    'ß' => 's',
    'à' => 'a', 'á' => 'a', 'â' => 'a', 'ã' => 'a', 'ä' => 'a', 'å' => 'a', 'æ' => 'a',
    'ç' => 'c',
    'è' => 'e', 'é' => 'e', 'ê' => 'e', 'ë' => 'e',
    'ì' => 'i', 'í' => 'i', 'î' => 'i', 'ï' => 'i',
    'ð' => 'd',
    'ñ' => 'n',
    'ò' => 'o', 'ó' => 'o', 'ô' => 'o', 'õ' => 'o', 'ö' => 'o', 'ø' => 'o',
    'ù' => 'u', 'ú' => 'u', 'û' => 'u',
    'ý' => 'y', 'ÿ' => 'y',
    'þ' => 'b',
    'ć' => 'c',
    'ł' => 'l',
    'ś' => 's',
    'ż' => 'z', 'ź' => 'z',
};

/// Fold a single lowercase character, if it has a base letter.
pub fn fold_char(ch: char) -> char {
    FOLDING.get(&ch).copied().unwrap_or(ch)
}

/// Normalization options. The default matches [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalizer {
    /// Fold accented letters (`é` → `e`, `ß` → `s`, ...).
    pub ascii_folding: bool,
    /// Compose decomposed sequences (NFC) before folding.
    pub compose_unicode: bool,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            ascii_folding: true,
            compose_unicode: true,
        }
    }
}

impl Normalizer {
    pub fn new(ascii_folding: bool, compose_unicode: bool) -> Self {
        Self {
            ascii_folding,
            compose_unicode,
        }
    }

    /// Normalize a name for encoding.
    ///
    /// Whitespace anywhere in the input is dropped, so `"Ben Aron"` and
    /// `"BenAron"` encode identically. Other punctuation is kept; the rule
    /// table simply has no rules for it.
    pub fn normalize(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        if self.compose_unicode {
            self.push_chars(&mut out, source.nfc());
        } else {
            self.push_chars(&mut out, source.chars());
        }
        out
    }

    fn push_chars<I: Iterator<Item = char>>(&self, out: &mut String, chars: I) {
        for ch in chars.filter(|c| !c.is_whitespace()) {
            for lower in ch.to_lowercase() {
                out.push(if self.ascii_folding {
                    fold_char(lower)
                } else {
                    lower
                });
            }
        }
    }
}

/// Normalize with default options (NFC + folding).
///
/// # Example
/// ```
/// use dmsoundex_core::normalize::normalize;
///
/// assert_eq!(normalize(" Straßburg "), "strasburg");
/// assert_eq!(normalize("O'Brien"), "o'brien");
/// ```
pub fn normalize(source: &str) -> String {
    Normalizer::default().normalize(source)
}
