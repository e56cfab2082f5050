//! Phonetic rule table.
//!
//! Rules are read from a plain text format, one rule per line:
//!
//! ```text
//! // comment
//! "sch"  "4"  "4"  "4"
//! "ch"   "4|5" "4|5" "4|5"   // trailing comments are fine too
//! ```
//!
//! The four fields are the pattern followed by the replacement used at the
//! start of a name, before a vowel, and everywhere else. A replacement is a
//! `|`-separated list of digit tokens; more than one token means the letter
//! group has several valid pronunciations and the encoder forks.
//!
//! Rules are grouped by the first character of their pattern and each group
//! is sorted longest pattern first, so a linear scan of a group yields the
//! longest match.
use std::fmt;
use std::path::Path;

use ahash::AHashMap;

use crate::error::RuleError;

/// Line comment marker in rule files.
pub const COMMENT: &str = "//";

/// Separator between alternative tokens of a replacement.
pub const ALTERNATIVE_SEPARATOR: char = '|';

const DOUBLE_QUOTE: char = '"';

/// Vowels that select the `before_vowel` replacement.
pub fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// One replacement of a rule with its alternatives split out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    raw: String,
    alternatives: Vec<String>,
}

impl Replacement {
    /// Split `raw` into alternatives.
    ///
    /// Trailing empty alternatives are dropped (`"7|"` is just `7`), but a
    /// leading one is kept (`"|6"` is nothing or `6`).
    pub fn new<T: Into<String>>(raw: T) -> Self {
        let raw = raw.into();
        let mut alternatives: Vec<String> = raw
            .split(ALTERNATIVE_SEPARATOR)
            .map(str::to_string)
            .collect();
        while alternatives.len() > 1 && alternatives.last().is_some_and(String::is_empty) {
            alternatives.pop();
        }
        Self { raw, alternatives }
    }

    /// The replacement as written in the rule file.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Alternative digit tokens, in rule order. Never empty; an empty
    /// replacement has a single empty alternative.
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    fn is_well_formed(&self) -> bool {
        self.raw
            .chars()
            .all(|c| c.is_ascii_digit() || c == ALTERNATIVE_SEPARATOR)
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A single pattern with its three context-dependent replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pattern: String,
    at_start: Replacement,
    before_vowel: Replacement,
    default: Replacement,
}

impl Rule {
    pub fn new(pattern: &str, at_start: &str, before_vowel: &str, default: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            at_start: Replacement::new(at_start),
            before_vowel: Replacement::new(before_vowel),
            default: Replacement::new(default),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Pattern length in bytes, i.e. how far a match advances the scan.
    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }

    /// Number of characters in the pattern.
    pub fn pattern_chars(&self) -> usize {
        self.pattern.chars().count()
    }

    pub fn at_start(&self) -> &Replacement {
        &self.at_start
    }

    pub fn before_vowel(&self) -> &Replacement {
        &self.before_vowel
    }

    pub fn default_replacement(&self) -> &Replacement {
        &self.default
    }

    /// True if `context` starts with this rule's pattern.
    pub fn matches(&self, context: &str) -> bool {
        context.starts_with(&self.pattern)
    }

    /// Pick the replacement for a match at the start of `context`.
    ///
    /// `at_start` must be true only while no rule has been applied yet in
    /// the current scan. Otherwise the character following the pattern
    /// decides between the before-vowel and default replacements.
    pub fn replacement_for(&self, context: &str, at_start: bool) -> &Replacement {
        if at_start {
            return &self.at_start;
        }

        let next = context
            .get(self.pattern_len()..)
            .and_then(|rest| rest.chars().next());
        match next {
            Some(ch) if is_vowel(ch) => &self.before_vowel,
            _ => &self.default,
        }
    }

    fn leading_char(&self) -> Option<char> {
        self.pattern.chars().next()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}=({},{},{})",
            self.pattern, self.at_start, self.before_vowel, self.default
        )
    }
}

/// Immutable rule table keyed by the first character of each pattern.
#[derive(Debug, Clone)]
pub struct RuleTable {
    source_name: String,
    groups: AHashMap<char, Vec<Rule>>,
    rule_count: usize,
}

impl RuleTable {
    /// Parse rules from a sequence of lines.
    ///
    /// `source_name` only labels errors. Line numbers in errors are 1-based
    /// and count every line, including comments and blanks.
    ///
    /// # Example
    /// ```
    /// use dmsoundex_core::RuleTable;
    ///
    /// let table = RuleTable::from_lines("inline", [
    ///     "// two rules for 's'",
    ///     "\"s\"  \"4\" \"4\" \"4\"",
    ///     "\"sch\" \"4\" \"4\" \"4\"",
    /// ]).unwrap();
    ///
    /// let group = table.group('s').unwrap();
    /// assert_eq!(group[0].pattern(), "sch");
    /// assert_eq!(group[1].pattern(), "s");
    /// ```
    pub fn from_lines<I, S>(source_name: &str, lines: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups: AHashMap<char, Vec<Rule>> = AHashMap::new();
        let mut rule_count = 0usize;

        for (idx, raw) in lines.into_iter().enumerate() {
            let line_no = idx + 1;
            let raw = raw.as_ref();
            let Some(rule) = parse_line(source_name, line_no, raw)? else {
                continue;
            };
            // parse_line rejects empty patterns
            if let Some(ch) = rule.leading_char() {
                groups.entry(ch).or_default().push(rule);
                rule_count += 1;
            }
        }

        if rule_count == 0 {
            return Err(RuleError::EmptySource {
                source_name: source_name.to_string(),
            });
        }

        // Stable sort keeps file order among patterns of equal length.
        for rules in groups.values_mut() {
            rules.sort_by(|a, b| b.pattern_chars().cmp(&a.pattern_chars()));
        }

        let table = Self {
            source_name: source_name.to_string(),
            groups,
            rule_count,
        };
        tracing::debug!(
            source = source_name,
            rules = table.len(),
            groups = table.group_count(),
            "loaded phonetic rules"
        );
        Ok(table)
    }

    /// Parse rules from a complete rule text.
    pub fn parse(source_name: &str, text: &str) -> Result<Self, RuleError> {
        Self::from_lines(source_name, text.lines())
    }

    /// Read and parse a rule file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RuleError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RuleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&path.display().to_string(), &text)
    }

    /// Rules whose pattern starts with `ch`, longest first.
    pub fn group(&self, ch: char) -> Option<&[Rule]> {
        self.groups.get(&ch).map(Vec::as_slice)
    }

    /// First (longest) rule matching the start of `context`.
    pub fn find(&self, context: &str) -> Option<&Rule> {
        let ch = context.chars().next()?;
        self.group(ch)?.iter().find(|rule| rule.matches(context))
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Total number of rules.
    pub fn len(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }

    /// Number of distinct leading characters.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Parse one line; `Ok(None)` for blank and comment-only lines.
fn parse_line(source_name: &str, line_no: usize, raw: &str) -> Result<Option<Rule>, RuleError> {
    let line = match raw.find(COMMENT) {
        Some(idx) => &raw[..idx],
        None => raw,
    }
    .trim();

    if line.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let [pattern, at_start, before_vowel, default] = parts.as_slice() else {
        return Err(RuleError::MalformedRule {
            source_name: source_name.to_string(),
            line: line_no,
            fields: parts.len(),
            content: raw.to_string(),
        });
    };

    let pattern = strip_quotes(pattern);
    if pattern.is_empty() {
        return Err(RuleError::EmptyPattern {
            source_name: source_name.to_string(),
            line: line_no,
        });
    }

    let rule = Rule::new(
        pattern,
        strip_quotes(at_start),
        strip_quotes(before_vowel),
        strip_quotes(default),
    );

    for replacement in [&rule.at_start, &rule.before_vowel, &rule.default] {
        if !replacement.is_well_formed() {
            return Err(RuleError::InvalidReplacement {
                source_name: source_name.to_string(),
                line: line_no,
                replacement: replacement.as_str().to_string(),
            });
        }
    }

    Ok(Some(rule))
}

fn strip_quotes(field: &str) -> &str {
    let field = field.strip_prefix(DOUBLE_QUOTE).unwrap_or(field);
    field.strip_suffix(DOUBLE_QUOTE).unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> RuleTable {
        RuleTable::parse("test", text).unwrap()
    }

    #[test]
    fn test_groups_sorted_longest_first() {
        let t = table(
            "\"s\" \"4\" \"4\" \"4\"\n\
             \"sz\" \"4\" \"4\" \"4\"\n\
             \"schtsch\" \"2\" \"4\" \"4\"\n\
             \"sch\" \"4\" \"4\" \"4\"\n",
        );
        let patterns: Vec<&str> = t.group('s').unwrap().iter().map(Rule::pattern).collect();
        assert_eq!(patterns, vec!["schtsch", "sch", "sz", "s"]);
        assert_eq!(t.len(), 4);
        assert_eq!(t.group_count(), 1);
    }

    #[test]
    fn test_equal_length_keeps_file_order() {
        let t = table("\"ai\" \"0\" \"1\" \"\"\n\"aj\" \"0\" \"1\" \"\"\n\"a\" \"0\" \"\" \"\"");
        let patterns: Vec<&str> = t.group('a').unwrap().iter().map(Rule::pattern).collect();
        assert_eq!(patterns, vec!["ai", "aj", "a"]);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let t = table(
            "// header\n\
             \n\
             \"b\" \"7\" \"7\" \"7\" // trailing comment\n\
             \t   \n",
        );
        assert_eq!(t.len(), 1);
        assert_eq!(t.group('b').unwrap()[0].at_start().as_str(), "7");
    }

    #[test]
    fn test_unquoted_fields() {
        let t = table("ks 5 54 54");
        let rule = &t.group('k').unwrap()[0];
        assert_eq!(rule.pattern(), "ks");
        assert_eq!(rule.before_vowel().as_str(), "54");
    }

    #[test]
    fn test_empty_quoted_replacement() {
        let t = table("\"a\" \"0\" \"\" \"\"");
        let rule = &t.group('a').unwrap()[0];
        assert_eq!(rule.before_vowel().as_str(), "");
        assert_eq!(rule.before_vowel().alternatives(), &["".to_string()]);
    }

    #[test]
    fn test_branching_replacement() {
        let t = table("\"ą\" \"\" \"\" \"|6\"");
        let rule = &t.group('ą').unwrap()[0];
        assert_eq!(
            rule.default_replacement().alternatives(),
            &["".to_string(), "6".to_string()]
        );
    }

    #[test]
    fn test_trailing_empty_alternatives_dropped() {
        assert_eq!(Replacement::new("7|").alternatives(), &["7".to_string()]);
        assert_eq!(Replacement::new("4|5||").alternatives(), &["4".to_string(), "5".to_string()]);
        assert_eq!(Replacement::new("|").alternatives(), &["".to_string()]);
        assert_eq!(Replacement::new("7|").as_str(), "7|");
    }

    #[test]
    fn test_wrong_field_count_reports_line() {
        let err = RuleTable::parse("bad.txt", "// ok\n\"a\" \"0\" \"\" \"\"\n\"b\" \"7\" \"7\"\n")
            .unwrap_err();
        match err {
            RuleError::MalformedRule {
                source_name,
                line,
                fields,
                ..
            } => {
                assert_eq!(source_name, "bad.txt");
                assert_eq!(line, 3);
                assert_eq!(fields, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_too_many_fields() {
        let err = RuleTable::parse("bad", "\"b\" \"7\" \"7\" \"7\" \"7\"").unwrap_err();
        assert!(matches!(err, RuleError::MalformedRule { fields: 5, line: 1, .. }));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = RuleTable::parse("bad", "\"\" \"7\" \"7\" \"7\"").unwrap_err();
        assert!(matches!(err, RuleError::EmptyPattern { line: 1, .. }));
    }

    #[test]
    fn test_non_digit_replacement_rejected() {
        let err = RuleTable::parse("bad", "\"b\" \"7\" \"x\" \"7\"").unwrap_err();
        match err {
            RuleError::InvalidReplacement { replacement, .. } => assert_eq!(replacement, "x"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_source_rejected() {
        let err = RuleTable::parse("empty", "// nothing here\n\n").unwrap_err();
        assert!(matches!(err, RuleError::EmptySource { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = RuleTable::from_path("/definitely/not/here/dmrules.txt").unwrap_err();
        assert!(matches!(err, RuleError::Io { .. }));
    }

    #[test]
    fn test_matches_and_find() {
        let t = table("\"ch\" \"4|5\" \"4|5\" \"4|5\"\n\"chs\" \"5\" \"54\" \"54\"\n\"c\" \"4|5\" \"4|5\" \"4|5\"");
        assert_eq!(t.find("chsa").unwrap().pattern(), "chs");
        assert_eq!(t.find("cha").unwrap().pattern(), "ch");
        assert_eq!(t.find("ca").unwrap().pattern(), "c");
        assert!(t.find("xa").is_none());
        assert!(t.find("").is_none());
    }

    #[test]
    fn test_replacement_selection() {
        let rule = Rule::new("au", "0", "7", "");
        assert_eq!(rule.replacement_for("auer", true).as_str(), "0");
        assert_eq!(rule.replacement_for("auer", false).as_str(), "7");
        assert_eq!(rule.replacement_for("aub", false).as_str(), "");
        // nothing follows the pattern
        assert_eq!(rule.replacement_for("au", false).as_str(), "");
    }

    #[test]
    fn test_y_is_not_a_vowel() {
        let rule = Rule::new("ks", "5", "54", "54x");
        assert_eq!(rule.replacement_for("ksy", false).as_str(), "54x");
        assert_eq!(rule.replacement_for("ksu", false).as_str(), "54");
    }

    #[test]
    fn test_rule_display() {
        let rule = Rule::new("ch", "4|5", "4|5", "4|5");
        assert_eq!(rule.to_string(), "ch=(4|5,4|5,4|5)");
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("\"abc\""), "abc");
        assert_eq!(strip_quotes("\"abc"), "abc");
        assert_eq!(strip_quotes("abc\""), "abc");
        assert_eq!(strip_quotes("\"\""), "");
        assert_eq!(strip_quotes("abc"), "abc");
    }
}
