/**
 * Renders a syntax tree as a `java.util.regex.Pattern` compatible string.
 */

use std::collections::HashMap;
use crate::tokens::TokenTable;
use crate::tree::{Node, QuantifierKind, TreeNode, TreeNodeRoot};

// Characters that must be escaped to match literally outside of a set
const METACHARS: &str = "^$|*+?.()[]{}";
// Characters that must be escaped to match literally inside of a set
const SET_METACHARS: &str = "[]^-&";

/// Renders `tree`, leaving every token as its literal `{name}` form.
pub fn generate(tree: &TreeNodeRoot) -> String {
    Generator::new(tree.pattern(), HashMap::new()).generate(tree)
}

/// Renders `tree`, substituting each token found in `replacements` with its
/// quoted replacement text.
pub fn generate_with_tokens(tree: &TreeNodeRoot, replacements: &TokenTable) -> String {
    let quoted = replacements.iter()
        .map(|(name, text)| (name, quote_replacement(text)))
        .collect();
    Generator::new(tree.pattern(), quoted).generate(tree)
}

/// `None` in, `None` out; the result of parsing an empty pattern passes through.
pub fn generate_opt(tree: Option<&TreeNodeRoot>) -> Option<String> {
    tree.map(generate)
}

/// Quotes `text` so that it matches itself: every run of non-backslash
/// characters is wrapped in `\Q...\E` and every backslash is doubled.
pub fn quote_replacement(text: &str) -> String {
    let mut res = String::with_capacity(text.len() + 4);
    let mut quoting = false;
    for c in text.chars() {
        if c == '\\' {
            if quoting {
                res.push_str(r"\E");
                quoting = false;
            }
            res.push_str(r"\\");
        }
        else {
            if !quoting {
                res.push_str(r"\Q");
                quoting = true;
            }
            res.push(c);
        }
    }
    if quoting {
        res.push_str(r"\E");
    }
    res
}

/// The `\p{...}` class name for a POSIX class name, like `xdigit` -> `XDigit`.
pub fn jdk_posix_name(name: &str) -> String {
    match name {
        "ascii" => "ASCII".into(),
        "xdigit" => "XDigit".into(),
        _ => {
            let mut chars = name.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        },
    }
}

struct Generator<'a> {
    pattern: &'a str,
    // Token name -> already quoted replacement
    replacements: HashMap<&'a str, String>,
    in_set: bool,
    out: String,
}

impl <'a> Generator<'a> {
    fn new(pattern: &'a str, replacements: HashMap<&'a str, String>) -> Self {
        Self{ pattern, replacements, in_set: false, out: String::with_capacity(pattern.len()) }
    }

    fn generate(mut self, tree: &TreeNodeRoot) -> String {
        let anchors = tree.anchors();
        if anchors.start {
            self.out.push('^');
        }
        if let Some(body) = tree.body() {
            self.node(body);
        }
        if anchors.end {
            self.out.push('$');
        }
        self.out
    }

    fn node(&mut self, node: &TreeNode) {
        match &node.node {
            Node::MultiRegexp(branches) => {
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        self.out.push('|');
                    }
                    self.node(branch);
                }
            },

            Node::SimpleRegexp(items) => {
                for item in items {
                    self.node(item);
                }
            },

            Node::QRegexp{ atom, quantifier } => {
                self.node(atom);
                if let Some(q) = quantifier {
                    self.node(q);
                }
            },

            Node::Quantifier{ kind, bounds } => self.quantifier(*kind, bounds),

            Node::Number(n) => self.out.push_str(&n.to_string()),

            Node::Metachar(m) => self.out.push_str(m.as_str()),

            // Written the same way in both dialects
            Node::UnicodeChar(_) => self.out.push_str(node.text(self.pattern)),

            Node::Char(c) => self.char(*c),

            Node::Subexpr(inner) => {
                self.out.push_str("(?:");
                self.node(inner);
                self.out.push(')');
            },

            Node::PosixSet(name) => {
                self.out.push_str(r"\p{");
                self.out.push_str(&jdk_posix_name(name));
                self.out.push('}');
            },

            Node::Set{ specials, items } => {
                self.out.push('[');
                // Only the negation keeps its meaning, a leading `]-` would be a range in JDK
                for special in specials.chars() {
                    if special != '^' {
                        self.out.push('\\');
                    }
                    self.out.push(special);
                }
                self.in_set = true;
                for item in items {
                    self.node(item);
                }
                self.in_set = false;
                self.out.push(']');
            },

            Node::Range{ low, high } => {
                self.node(low);
                self.out.push('-');
                self.node(high);
            },

            Node::Token(name) => {
                match self.replacements.get(name.as_str()) {
                    Some(quoted) => {
                        self.out.push_str("(?:");
                        self.out.push_str(quoted);
                        self.out.push(')');
                    },
                    None => {
                        self.out.push('{');
                        self.out.push_str(name);
                        self.out.push('}');
                    },
                }
            },
        }
    }

    fn quantifier(&mut self, kind: QuantifierKind, bounds: &[TreeNode]) {
        if let Some(symbol) = kind.symbol() {
            self.out.push(symbol);
            return;
        }
        self.out.push('{');
        if let Some(low) = bounds.first() {
            self.node(low);
        }
        match kind {
            QuantifierKind::AtLeast => self.out.push(','),
            QuantifierKind::Between => {
                self.out.push(',');
                if let Some(high) = bounds.get(1) {
                    self.node(high);
                }
            },
            _ => {},
        }
        self.out.push('}');
    }

    fn char(&mut self, c: char) {
        match c {
            '\t' => self.out.push_str(r"\t"),
            '\n' => self.out.push_str(r"\n"),
            '\r' => self.out.push_str(r"\r"),
            '\x0C' => self.out.push_str(r"\f"),
            '\\' => self.out.push_str(r"\\"),
            c => {
                let special = if self.in_set { SET_METACHARS } else { METACHARS };
                if special.contains(c) {
                    self.out.push('\\');
                }
                self.out.push(c);
            },
        }
    }
}

// Tests ///////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod regexp_generator_tests {
    use super::*;
    use crate::parser::{parse, parse_with_tokens};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn regen(pattern: &str) -> String {
        generate(&parse(pattern).unwrap().unwrap())
    }

    #[rstest]
    #[case("abc", "abc")]
    #[case("a.c", "a.c")]
    #[case(r"a\.c", r"a\.c")]
    #[case("a|b|c", "a|b|c")]
    #[case("(ab)*", "(?:ab)*")]
    #[case("(a|b)+c?", "(?:a|b)+c?")]
    #[case("a{3}", "a{3}")]
    #[case("a{3,}", "a{3,}")]
    #[case("a{2,5}", "a{2,5}")]
    #[case("^abc$", "^abc$")]
    #[case("^", "^")]
    #[case("$", "$")]
    #[case("^$", "^$")]
    #[case(r"\t\n\r\f", r"\t\n\r\f")]
    #[case(r"\\", r"\\")]
    #[case(r"\{\}\(\)\[\]", r"\{\}\(\)\[\]")]
    #[case(r"\*\+\?\|\^\$", r"\*\+\?\|\^\$")]
    #[case(r"\b\B", r"\b\B")]
    #[case(r"\q\d", "qd")]
    #[case("[a-z]", "[a-z]")]
    #[case("[^a-z0-9_]", "[^a-z0-9_]")]
    #[case("[^]-a]", r"[^\]\-a]")]
    #[case("[]-a]", r"[\]\-a]")]
    #[case("[-a]", r"[\-a]")]
    #[case("[]]", r"[\]]")]
    #[case("[.*+?$(){}|]", "[.*+?$(){}|]")]
    #[case(r"[\]\-\^x]", r"[\]\-\^x]")]
    #[case(r"[\t\\]", r"[\t\\]")]
    #[case("[:alpha:]", r"\p{Alpha}")]
    #[case("[:xdigit:]+", r"\p{XDigit}+")]
    #[case("[:space:]", r"\p{Space}")]
    #[case("x[:a:]", "x[:a:]")]
    fn translates(#[case] pattern: &str, #[case] expected: &str) {
        assert_eq!(regen(pattern), expected);
    }

    #[rstest]
    #[case("[]-a]", &["]", "-", "a"], &["_", "^", "b"])]
    #[case("[^]-a]", &["_", "b"], &["]", "-", "a"])]
    #[case("[-]", &["-"], &["a"])]
    fn leading_specials_stay_single_characters(#[case] pattern: &str, #[case] hits: &[&str], #[case] misses: &[&str]) {
        let re = regex::Regex::new(&format!("^(?:{})$", regen(pattern))).unwrap();
        for s in hits {
            assert!(re.is_match(s), "{} should match {:?}", pattern, s);
        }
        for s in misses {
            assert!(!re.is_match(s), "{} should not match {:?}", pattern, s);
        }
    }

    #[test]
    fn unicode_escape_is_kept() {
        assert_eq!(regen(r"a\u00e9"), r"a\u00e9");
    }

    #[test]
    fn token_is_replaced_and_quoted() {
        let tree = parse_with_tokens("{num}", &["num"]).unwrap().unwrap();
        let table: TokenTable = vec![("num", "1+1")].into_iter().collect();
        assert_eq!(generate_with_tokens(&tree, &table), r"(?:\Q1+1\E)");
    }

    #[test]
    fn token_with_quantifier() {
        let tree = parse_with_tokens("a{num}*", &["num"]).unwrap().unwrap();
        let table: TokenTable = vec![("num", "[0-9]")].into_iter().collect();
        assert_eq!(generate_with_tokens(&tree, &table), r"a(?:\Q[0-9]\E)*");
    }

    #[test]
    fn unmapped_token_is_literal_braces() {
        let tree = parse_with_tokens("{x}", &["x"]).unwrap().unwrap();
        assert_eq!(generate(&tree), "{x}");
        assert_eq!(generate_with_tokens(&tree, &TokenTable::new()), "{x}");
    }

    #[test]
    fn quoting() {
        assert_eq!(quote_replacement("1+1"), r"\Q1+1\E");
        assert_eq!(quote_replacement(r"a\b"), r"\Qa\E\\\Qb\E");
        assert_eq!(quote_replacement(r"\\"), r"\\\\");
        assert_eq!(quote_replacement(""), "");
    }

    #[test]
    fn empty_replacement() {
        let tree = parse_with_tokens("a{e}b", &["e"]).unwrap().unwrap();
        let table: TokenTable = vec![("e", "")].into_iter().collect();
        assert_eq!(generate_with_tokens(&tree, &table), "a(?:)b");
    }

    #[test]
    fn posix_names() {
        assert_eq!(jdk_posix_name("ascii"), "ASCII");
        assert_eq!(jdk_posix_name("xdigit"), "XDigit");
        assert_eq!(jdk_posix_name("punct"), "Punct");
        assert_eq!(jdk_posix_name(""), "");
    }

    #[test]
    fn nothing_in_nothing_out() {
        assert_eq!(generate_opt(None), None);
        assert_eq!(generate_opt(parse("").unwrap().as_ref()), None);
        assert_eq!(generate_opt(parse("a").unwrap().as_ref()), Some("a".into()));
    }
}
