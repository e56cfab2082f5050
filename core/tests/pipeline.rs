//! End-to-end tests for the core pipeline: rule text -> table -> normalizer
//! -> branching encoder -> formatted codes.

use dmsoundex_core::{encode_with, codes, Config, Normalizer, RuleError, RuleTable};

// Excerpt of the standard rules: enough for AUERBACH, OHRBACH, Peters and
// the Romanian t-comma.
const EXCERPT: &str = r#"
// vowels
"au" "0" "7" ""
"a"  "0" "" ""
"e"  "0" "" ""
"o"  "0" "" ""
"u"  "0" "" ""

// consonants
"b"  "7" "7" "7"
"ch" "5|4" "5|4" "5|4"
"h"  "5" "5" ""
"p"  "7" "7" "7"
"rs" "4|94" "4|94" "4|94"
"r"  "9" "9" "9"
"s"  "4" "4" "4"
"t"  "3" "3" "3"
"ț"  "3|4" "3|4" "3|4"
"#;

fn table() -> RuleTable {
    RuleTable::parse("excerpt", EXCERPT).unwrap()
}

fn run(name: &str) -> String {
    encode_with(&table(), &Normalizer::default(), name).format()
}

#[test]
fn test_excerpt_loads_longest_first() {
    let table = table();
    assert_eq!(table.len(), 14);
    let a = table.group('a').unwrap();
    assert_eq!(a[0].pattern(), "au");
    assert_eq!(table.find("rsx").unwrap().pattern(), "rs");
    assert_eq!(table.find("rx").unwrap().pattern(), "r");
    assert!(table.find("x").is_none());
}

#[test]
fn test_reference_names() {
    assert_eq!(run("AUERBACH"), "097500|097400");
    assert_eq!(run("OHRBACH"), "097500|097400");
    assert_eq!(run("Peters"), "734000|739400");
}

#[test]
fn test_decomposed_input() {
    assert_eq!(run("t\u{326}"), "300000|400000");
    let no_nfc = Normalizer::new(true, false);
    // without composition "t" is coded and the combining mark is skipped
    assert_eq!(encode_with(&table(), &no_nfc, "t\u{326}").format(), "300000");
}

#[test]
fn test_config_drives_normalizer() {
    let cfg = Config::from_toml_str("ascii_folding = false").unwrap();
    // "ú" only reaches the "au" rule when it is folded to "u"
    let folded = encode_with(&table(), &Config::default().normalizer(), "saúo");
    let unfolded = encode_with(&table(), &cfg.normalizer(), "saúo");
    assert_eq!(folded.format(), "470000");
    assert_eq!(unfolded.format(), "400000");
    assert_eq!(cfg.normalizer().normalize("Saúo"), "saúo");
}

#[test]
fn test_blank_name_has_no_codes() {
    let result = encode_with(&table(), &Normalizer::default(), " \t ");
    assert!(result.is_empty());
    assert_eq!(codes::primary(result.as_slice()), None);
}

#[test]
fn test_error_points_at_line() {
    let text = format!("{EXCERPT}\n\"x\" \"1\" \"2\"\n");
    let line = text.lines().count();
    match RuleTable::parse("broken", &text) {
        Err(RuleError::MalformedRule {
            source_name,
            line: at,
            fields,
            ..
        }) => {
            assert_eq!(source_name, "broken");
            assert_eq!(at, line);
            assert_eq!(fields, 3);
        }
        other => panic!("expected MalformedRule, got {other:?}"),
    }
}
