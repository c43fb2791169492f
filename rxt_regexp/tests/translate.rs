mod common;

use common::{assert_rejects, assert_translates, assert_translates_with};
use pretty_assertions::assert_eq;
use rstest::rstest;
use rxt_regexp::{parse, translate_regexp, Error, NodeKind, SyntaxErrorKind, TokenTable, Translator};

#[rstest]
#[case("a{2,5}", "a{2,5}")]
#[case("[a-z]", "[a-z]")]
#[case("^abc$", "^abc$")]
#[case(r"\.", r"\.")]
#[case(".", ".")]
#[case("[:xdigit:]", r"\p{XDigit}")]
#[case("[:alpha:]", r"\p{Alpha}")]
#[case("^(foo|bar)+[0-9]{1,3}$", "^(?:foo|bar)+[0-9]{1,3}$")]
#[case(r"^[A-Za-z_][A-Za-z0-9_]*\(\)$", r"^[A-Za-z_][A-Za-z0-9_]*\(\)$")]
#[case(r"\bgetString\b", r"\bgetString\b")]
#[case("[:word:]", "[:word:]")]
#[case("[]-a]", r"[\]\-a]")]
#[case("[^]-]+", r"[^\]\-]+")]
fn translates(#[case] pattern: &str, #[case] expected: &str) {
    assert_translates(pattern, expected);
}

#[rstest]
#[case("a{5,2}", 4, SyntaxErrorKind::BoundsOutOfOrder)]
#[case("[b-a]", 3, SyntaxErrorKind::RangeOutOfOrder)]
#[case("(abc", 4, SyntaxErrorKind::UnterminatedGroup)]
#[case("[abc", 4, SyntaxErrorKind::UnterminatedSet)]
#[case("a{1000}", 5, SyntaxErrorKind::NumberTooLong)]
#[case("[:digits:]", 2, SyntaxErrorKind::UnknownPosixClass)]
#[case("[:words:]", 2, SyntaxErrorKind::UnknownPosixClass)]
#[case("a|*", 2, SyntaxErrorKind::UnexpectedChar)]
#[case("{unknown}", 0, SyntaxErrorKind::UnexpectedChar)]
fn rejects(#[case] pattern: &str, #[case] position: usize, #[case] kind: SyntaxErrorKind) {
    assert_rejects(pattern, position, kind);
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    let limit = rxt_regexp::parser::MAX_NESTING;
    let pattern = format!("{}x{}", "(".repeat(10 * limit), ")".repeat(10 * limit));
    assert_rejects(&pattern, limit, SyntaxErrorKind::NestingTooDeep);
}

#[test]
fn token_substitution() {
    assert_translates_with("{num}", &[("num", "1+1")], r"(?:\Q1+1\E)");
    assert_translates_with(r"{key}\s*=", &[("key", r"a.b\c")], r"(?:\Qa.b\E\\\Qc\E)s*=");
}

#[test]
fn tokens_from_json_config() {
    let table = TokenTable::from_json(r#"{"hex": "0x[0-9a-f]+", "id": "x"}"#).unwrap();
    let translator = Translator::with_tokens(table);
    assert_eq!(translator.translate("^{hex}|{id}$").unwrap(), r"^(?:\Q0x[0-9a-f]+\E)|(?:\Qx\E)$");
}

#[test]
fn bad_json_config_is_rejected() {
    match TokenTable::from_json(r#"{"hex": ["0x"]}"#) {
        Err(Error::TokenTable(_)) => {},
        other => panic!("expected a token table error, got {:?}", other),
    }
}

#[test]
fn syntax_errors_convert_into_crate_error() {
    fn run(pattern: &str) -> Result<String, Error> {
        Ok(translate_regexp(pattern)?)
    }
    match run("a)") {
        Err(Error::Syntax(err)) => assert_eq!(err.position, 1),
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn caret_diagnostic_for_callers() {
    let err = translate_regexp("ab[c-a]").unwrap_err();
    assert_eq!(err.caret_diagnostic(), "ab[c-a]\n     ^");
}

#[test]
fn tree_records_anchors_and_kinds() {
    let root = parse("^a|b$").unwrap().unwrap();
    assert_eq!(root.kind(), NodeKind::Regexp);
    assert!(root.anchors().start && root.anchors().end);
    let body = root.body().unwrap();
    assert_eq!(body.kind(), NodeKind::MultiRegexp);
    assert_eq!(body.children().len(), 2);
}

#[test]
fn empty_pattern() {
    assert_eq!(parse("").unwrap(), None);
    assert_eq!(translate_regexp("").unwrap(), "");
}
