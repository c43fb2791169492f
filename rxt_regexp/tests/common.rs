#![allow(dead_code)]

use rxt_regexp::{translate_regexp, translate_regexp_with_tokens, SyntaxErrorKind, TokenTable};

pub fn assert_translates(pattern: &str, expected: &str) {
    match translate_regexp(pattern) {
        Ok(result) => assert_eq!(result, expected, "translating {:?}", pattern),
        Err(err) => panic!("{:?} failed to translate:\n{}", pattern, err.caret_diagnostic()),
    }
}

pub fn assert_translates_with(pattern: &str, tokens: &[(&str, &str)], expected: &str) {
    let table: TokenTable = tokens.iter().cloned().collect();
    match translate_regexp_with_tokens(pattern, &table) {
        Ok(result) => assert_eq!(result, expected, "translating {:?}", pattern),
        Err(err) => panic!("{:?} failed to translate:\n{}", pattern, err.caret_diagnostic()),
    }
}

pub fn assert_rejects(pattern: &str, position: usize, kind: SyntaxErrorKind) {
    match translate_regexp(pattern) {
        Ok(result) => panic!("{:?} translated to {:?}, expected an error", pattern, result),
        Err(err) => {
            assert_eq!((err.position, err.kind), (position, kind), "\n{}", err.caret_diagnostic());
            assert_eq!(err.pattern, pattern);
        },
    }
}
