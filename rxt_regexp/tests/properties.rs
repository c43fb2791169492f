//! Property-based tests for the translator.

use proptest::prelude::*;
use regex::Regex;
use rxt_regexp::{translate_regexp, SyntaxErrorKind};

/// A quantifier suffix, possibly none.
fn quantifier_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just("*"), Just("+"), Just("?")]
}

/// A concatenation of optionally quantified atoms.
fn sequence_strategy(atom: BoxedStrategy<String>) -> impl Strategy<Value = String> {
    prop::collection::vec((atom, quantifier_strategy()), 1..4)
        .prop_map(|items| items.into_iter().map(|(a, q)| format!("{}{}", a, q)).collect::<String>())
}

/// Literals, `.` and groups of alternatives nested a few levels deep.
fn atom_strategy() -> BoxedStrategy<String> {
    let leaf = prop_oneof!["[a-c]", Just(".".to_string())];
    leaf.prop_recursive(3, 24, 3, |atom| {
        prop::collection::vec(sequence_strategy(atom), 1..3)
            .prop_map(|alts| format!("({})", alts.join("|")))
    }).boxed()
}

/// Patterns that mean the same thing in both dialects.
fn simple_pattern_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(sequence_strategy(atom_strategy()), 1..3)
        .prop_map(|alts| alts.join("|"))
}

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{})$", pattern)).unwrap()
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn simple_patterns_keep_their_meaning(
            pattern in simple_pattern_strategy(),
            inputs in prop::collection::vec("[a-d]{0,6}", 1..8),
        ) {
            let translated = translate_regexp(&pattern).unwrap();
            let original = anchored(&pattern);
            let result = anchored(&translated);
            for input in &inputs {
                prop_assert_eq!(original.is_match(input), result.is_match(input), "input {:?}", input);
            }
        }

        #[test]
        fn bounds_must_be_ordered(low in 0u32..1000, high in 0u32..1000) {
            let pattern = format!("a{{{},{}}}", low, high);
            match translate_regexp(&pattern) {
                Ok(result) => {
                    prop_assert!(low <= high);
                    prop_assert_eq!(result, pattern);
                },
                Err(err) => {
                    prop_assert!(low > high);
                    prop_assert_eq!(err.kind, SyntaxErrorKind::BoundsOutOfOrder);
                },
            }
        }

        #[test]
        fn ranges_must_be_ordered(low in proptest::char::range('a', 'z'), high in proptest::char::range('a', 'z')) {
            let pattern = format!("[{}-{}]", low, high);
            match translate_regexp(&pattern) {
                Ok(result) => {
                    prop_assert!(low < high);
                    prop_assert_eq!(result, pattern);
                },
                Err(err) => {
                    prop_assert!(low >= high);
                    prop_assert_eq!(err.kind, SyntaxErrorKind::RangeOutOfOrder);
                    prop_assert_eq!(err.position, 3);
                },
            }
        }

        #[test]
        fn errors_point_inside_the_pattern(pattern in r"[a-c.\[\]()|*+?{}^$\\:0-9,-]{0,16}") {
            if let Err(err) = translate_regexp(&pattern) {
                prop_assert!(err.position <= pattern.len());
                prop_assert!(pattern.is_char_boundary(err.position));
            }
        }

        #[test]
        fn arbitrary_text_never_panics(pattern in "\\PC{0,24}") {
            let _ = translate_regexp(&pattern);
        }
    }
}
