/**
 * A recursive-descent parser turning a legacy (Jakarta Regexp style) pattern
 * into a syntax tree.
 */

use std::cell::Cell;
use std::collections::HashSet;
use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::tree::{Anchors, Metachar, Node, QuantifierKind, TreeNode, TreeNodeRoot};

/*
 * Reference grammar for the parser:
 *
 * regexp        ::= '^'? multi_regexp? '$'?
 *
 * multi_regexp  ::= simple_regexp ('|' simple_regexp)*
 *
 * simple_regexp ::= q_regexp+
 *
 * q_regexp      ::= single_regexp quantifier?
 *
 * quantifier    ::= '*' | '+' | '?'
 *                 | '{' number '}'
 *                 | '{' number ',' '}'
 *                 | '{' number ',' number '}'
 *
 * single_regexp ::= '.'
 *                 | '(' multi_regexp ')'
 *                 | '[' ':' POSIX_NAME ':' ']'
 *                 | '[' '^'? ']'? '-'? range_or_char* ']'
 *                 | '\' ('b' | 'B')
 *                 | '\' 'u' HEX HEX HEX HEX
 *                 | '\' ANY_CHAR
 *                 | '{' TOKEN_NAME '}'
 *                 | ANY_NONRESERVED_CHAR
 *
 * range_or_char ::= range_char ('-' range_char)?
 *
 * range_char    ::= '\' 'u' HEX HEX HEX HEX
 *                 | '\' ANY_CHAR
 *                 | ANY_CHAR_BUT(']' | '-')
 *
 * number        ::= DIGIT DIGIT? DIGIT?
 */

/// Names accepted in `[:name:]`.
pub const POSIX_CLASSES: &[&str] = &[
    "alnum", "alpha", "blank", "cntrl", "digit", "graph",
    "lower", "print", "punct", "space", "upper", "xdigit",
];

// Characters that never start an atom outside of their grammatical position
const RESERVED: &str = "^$|*+?)]{}";

// At most this many digits in a quantifier bound
const MAX_NUMBER_DIGITS: usize = 3;

/// Groups may nest at most this deep, deeper patterns are rejected instead of
/// exhausting the stack.
pub const MAX_NESTING: usize = 256;

/// Parses `pattern` with no token names recognized.
/// Returns `Ok(None)` for the empty pattern.
pub fn parse(pattern: &str) -> Result<Option<TreeNodeRoot>, SyntaxError> {
    parse_with_tokens::<&str>(pattern, &[])
}

/// Parses `pattern`, recognizing `{name}` as a token for every name in
/// `token_names`.
pub fn parse_with_tokens<S>(pattern: &str, token_names: &[S]) -> Result<Option<TreeNodeRoot>, SyntaxError>
    where S : AsRef<str> {
    let result = Parser::new(pattern, token_names).parse();
    if let Err(err) = &result {
        tracing::debug!(position = err.position, kind = ?err.kind, pattern, "pattern rejected");
    }
    result
}

/// Either a node (matched), `None` (nothing matches here) or a hard error.
type ParseResult<T> = Result<Option<T>, SyntaxError>;

struct Parser<'a> {
    // The whole pattern, for error reporting
    pattern: &'a str,
    // The pattern without the trailing anchor, what the grammar actually sees
    src: &'a str,
    token_names: HashSet<&'a str>,
    // Number of groups currently open
    depth: Cell<usize>,
}

impl <'a> Parser<'a> {
    fn new<S>(pattern: &'a str, token_names: &'a [S]) -> Self where S : AsRef<str> {
        Self{
            pattern,
            src: pattern,
            token_names: token_names.iter().map(|n| n.as_ref()).collect(),
            depth: Cell::new(0),
        }
    }

    fn parse(mut self) -> Result<Option<TreeNodeRoot>, SyntaxError> {
        if self.pattern.is_empty() {
            return Ok(None);
        }

        let mut anchors = Anchors::default();
        let mut start = 0;
        if self.pattern.starts_with('^') {
            anchors.start = true;
            start = 1;
        }
        let mut end = self.pattern.len();
        if end > start && self.has_trailing_anchor(start) {
            anchors.end = true;
            end -= 1;
        }
        self.src = &self.pattern[..end];

        if start == end {
            return Ok(Some(TreeNodeRoot::new(self.pattern, anchors, None)));
        }

        match self.parse_multi_regexp(start)? {
            Some(body) if body.end == end => {
                Ok(Some(TreeNodeRoot::new(self.pattern, anchors, Some(body))))
            },
            Some(body) => Err(self.unexpected(body.end)),
            None => Err(self.unexpected(start)),
        }
    }

    /// A trailing `$` is an anchor unless it is escaped by an odd number of
    /// backslashes.
    fn has_trailing_anchor(&self, start: usize) -> bool {
        let bytes = self.pattern.as_bytes();
        if bytes[bytes.len() - 1] != b'$' {
            return false;
        }
        let backslashes = bytes[start..bytes.len() - 1].iter().rev()
            .take_while(|b| **b == b'\\')
            .count();
        backslashes % 2 == 0
    }

    fn peek(&self, pos: usize) -> Option<char> {
        self.src.get(pos..).and_then(|s| s.chars().next())
    }

    fn error(&self, pos: usize, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(self.pattern, pos, kind)
    }

    /// Like `error`, but running out of input takes precedence.
    fn error_or_end(&self, pos: usize, kind: SyntaxErrorKind) -> SyntaxError {
        if pos >= self.src.len() {
            self.error(pos, SyntaxErrorKind::UnexpectedEnd)
        }
        else {
            self.error(pos, kind)
        }
    }

    fn unexpected(&self, pos: usize) -> SyntaxError {
        self.error_or_end(pos, SyntaxErrorKind::UnexpectedChar)
    }

    /**
     * Regular expressions.
     */

    fn parse_multi_regexp(&self, pos: usize) -> ParseResult<TreeNode> {
        let first = match self.parse_simple_regexp(pos)? {
            Some(n) => n,
            None => return Ok(None),
        };
        let mut end = first.end;
        let mut branches = vec![first];
        while self.peek(end) == Some('|') {
            let branch_start = end + 1;
            match self.parse_simple_regexp(branch_start)? {
                Some(branch) => {
                    end = branch.end;
                    branches.push(branch);
                },
                None => return Err(self.unexpected(branch_start)),
            }
        }
        Ok(Some(TreeNode::new(pos, end, Node::MultiRegexp(branches))))
    }

    fn parse_simple_regexp(&self, pos: usize) -> ParseResult<TreeNode> {
        let mut end = pos;
        let mut items = Vec::new();
        while let Some(item) = self.parse_q_regexp(end)? {
            end = item.end;
            items.push(item);
        }
        if items.is_empty() {
            Ok(None)
        }
        else {
            Ok(Some(TreeNode::new(pos, end, Node::SimpleRegexp(items))))
        }
    }

    fn parse_q_regexp(&self, pos: usize) -> ParseResult<TreeNode> {
        let atom = match self.parse_single_regexp(pos)? {
            Some(a) => a,
            None => return Ok(None),
        };
        let quantifier = self.parse_quantifier(atom.end)?;
        let end = quantifier.as_ref().map_or(atom.end, |q| q.end);
        Ok(Some(TreeNode::new(pos, end, Node::QRegexp{
            atom: Box::new(atom),
            quantifier: quantifier.map(Box::new),
        })))
    }

    fn parse_single_regexp(&self, pos: usize) -> ParseResult<TreeNode> {
        let c = match self.peek(pos) {
            Some(c) => c,
            None => return Ok(None),
        };
        match c {
            '.' => Ok(Some(TreeNode::new(pos, pos + 1, Node::Metachar(Metachar::Any)))),
            '[' => self.parse_set(pos).map(Some),
            '(' => self.parse_subexpr(pos).map(Some),
            '\\' => self.parse_escape(pos).map(Some),
            // A token if the name is known, otherwise reserved like the rest
            '{' => Ok(self.parse_token(pos)),
            c if RESERVED.contains(c) => Ok(None),
            c => Ok(Some(TreeNode::new(pos, pos + c.len_utf8(), Node::Char(c)))),
        }
    }

    fn parse_subexpr(&self, pos: usize) -> Result<TreeNode, SyntaxError> {
        let depth = self.depth.get();
        if depth >= MAX_NESTING {
            return Err(self.error(pos, SyntaxErrorKind::NestingTooDeep));
        }
        self.depth.set(depth + 1);
        let inner = self.parse_multi_regexp(pos + 1);
        self.depth.set(depth);
        let inner = match inner? {
            Some(inner) => inner,
            None => return Err(self.unexpected(pos + 1)),
        };
        if self.peek(inner.end) != Some(')') {
            return Err(self.error(inner.end, SyntaxErrorKind::UnterminatedGroup));
        }
        Ok(TreeNode::new(pos, inner.end + 1, Node::Subexpr(Box::new(inner))))
    }

    fn parse_escape(&self, pos: usize) -> Result<TreeNode, SyntaxError> {
        let c = match self.peek(pos + 1) {
            Some(c) => c,
            None => return Err(self.error(pos + 1, SyntaxErrorKind::UnexpectedEnd)),
        };
        let node = match c {
            'b' => Node::Metachar(Metachar::WordBoundary),
            'B' => Node::Metachar(Metachar::NonWordBoundary),
            'u' => {
                let (value, end) = self.parse_unicode(pos)?;
                return Ok(TreeNode::new(pos, end, Node::UnicodeChar(value)));
            },
            c => Node::Char(unescape(c)),
        };
        Ok(TreeNode::new(pos, pos + 1 + c.len_utf8(), node))
    }

    /// Parses `\uXXXX` starting at the backslash.
    fn parse_unicode(&self, pos: usize) -> Result<(char, usize), SyntaxError> {
        let mut value = 0u32;
        for offs in pos + 2..pos + 6 {
            let digit = self.peek(offs).and_then(|c| c.to_digit(16));
            match digit {
                Some(d) => value = value * 16 + d,
                None => return Err(self.error_or_end(offs, SyntaxErrorKind::InvalidUnicodeEscape)),
            }
        }
        match std::char::from_u32(value) {
            Some(c) => Ok((c, pos + 6)),
            // Lone surrogates
            None => Err(self.error(pos, SyntaxErrorKind::InvalidUnicodeEscape)),
        }
    }

    fn parse_token(&self, pos: usize) -> Option<TreeNode> {
        if self.token_names.is_empty() {
            return None;
        }
        let rest = &self.src[pos + 1..];
        let close = rest.find('}')?;
        let name = &rest[..close];
        if self.token_names.contains(name) {
            Some(TreeNode::new(pos, pos + close + 2, Node::Token(name.into())))
        }
        else {
            None
        }
    }

    /**
     * Quantifiers.
     */

    fn parse_quantifier(&self, pos: usize) -> ParseResult<TreeNode> {
        let kind = match self.peek(pos) {
            Some('*') => QuantifierKind::ZeroOrMore,
            Some('+') => QuantifierKind::OneOrMore,
            Some('?') => QuantifierKind::ZeroOrOne,
            Some('{') => {
                // A token right after an atom is the next atom, not a bound
                if self.parse_token(pos).is_some() {
                    return Ok(None);
                }
                return self.parse_bounds(pos).map(Some);
            },
            _ => return Ok(None),
        };
        Ok(Some(TreeNode::new(pos, pos + 1, Node::Quantifier{ kind, bounds: Vec::new() })))
    }

    fn parse_bounds(&self, pos: usize) -> Result<TreeNode, SyntaxError> {
        let low = match self.parse_number(pos + 1)? {
            Some(n) => n,
            None => return Err(self.error_or_end(pos + 1, SyntaxErrorKind::MalformedQuantifier)),
        };
        match self.peek(low.end) {
            Some('}') => {
                let end = low.end + 1;
                Ok(TreeNode::new(pos, end, Node::Quantifier{ kind: QuantifierKind::Exactly, bounds: vec![low] }))
            },

            Some(',') => {
                let after_comma = low.end + 1;
                if self.peek(after_comma) == Some('}') {
                    let end = after_comma + 1;
                    return Ok(TreeNode::new(pos, end, Node::Quantifier{ kind: QuantifierKind::AtLeast, bounds: vec![low] }));
                }
                let high = match self.parse_number(after_comma)? {
                    Some(n) => n,
                    None => return Err(self.error_or_end(after_comma, SyntaxErrorKind::MalformedQuantifier)),
                };
                if self.peek(high.end) != Some('}') {
                    return Err(self.error_or_end(high.end, SyntaxErrorKind::MalformedQuantifier));
                }
                if number_value(&low) > number_value(&high) {
                    return Err(self.error(high.start, SyntaxErrorKind::BoundsOutOfOrder));
                }
                let end = high.end + 1;
                Ok(TreeNode::new(pos, end, Node::Quantifier{ kind: QuantifierKind::Between, bounds: vec![low, high] }))
            },

            _ => Err(self.error_or_end(low.end, SyntaxErrorKind::MalformedQuantifier)),
        }
    }

    fn parse_number(&self, pos: usize) -> ParseResult<TreeNode> {
        let digits = self.src[pos..].bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Ok(None);
        }
        if digits > MAX_NUMBER_DIGITS {
            return Err(self.error(pos + MAX_NUMBER_DIGITS, SyntaxErrorKind::NumberTooLong));
        }
        let value = self.src[pos..pos + digits].bytes()
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
        Ok(Some(TreeNode::new(pos, pos + digits, Node::Number(value))))
    }

    /**
     * Character sets.
     */

    fn parse_set(&self, pos: usize) -> Result<TreeNode, SyntaxError> {
        if self.peek(pos + 1) == Some(':') {
            if let Some(posix) = self.parse_posix_set(pos)? {
                return Ok(posix);
            }
        }

        let mut p = pos + 1;
        let mut specials = String::new();
        for special in &['^', ']', '-'] {
            if self.peek(p) == Some(*special) {
                specials.push(*special);
                p += 1;
            }
        }

        let mut items = Vec::new();
        loop {
            match self.peek(p) {
                Some(']') => break,
                None => return Err(self.error(p, SyntaxErrorKind::UnterminatedSet)),
                Some(_) => {},
            }
            match self.parse_range_or_char(p)? {
                Some(item) => {
                    p = item.end;
                    items.push(item);
                },
                None => return Err(self.error(p, SyntaxErrorKind::UnexpectedChar)),
            }
        }
        Ok(TreeNode::new(pos, p + 1, Node::Set{ specials, items }))
    }

    /// `[:name:]`, or `None` if the brackets don't have that shape.
    fn parse_posix_set(&self, pos: usize) -> ParseResult<TreeNode> {
        let name_start = pos + 2;
        let rest = &self.src[name_start..];
        let name_len = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
        if !(name_len == 5 || name_len == 6) || !rest[name_len..].starts_with(":]") {
            return Ok(None);
        }
        let name = &rest[..name_len];
        if !POSIX_CLASSES.contains(&name) {
            return Err(self.error(name_start, SyntaxErrorKind::UnknownPosixClass));
        }
        Ok(Some(TreeNode::new(pos, name_start + name_len + 2, Node::PosixSet(name.into()))))
    }

    fn parse_range_or_char(&self, pos: usize) -> ParseResult<TreeNode> {
        let low = match self.parse_range_char(pos)? {
            Some(c) => c,
            None => return Ok(None),
        };
        if self.peek(low.end) != Some('-') {
            return Ok(Some(low));
        }
        let high_start = low.end + 1;
        let high = match self.parse_range_char(high_start)? {
            Some(c) => c,
            None => return Err(self.unexpected(high_start)),
        };
        if char_value(&low) >= char_value(&high) {
            return Err(self.error(high_start, SyntaxErrorKind::RangeOutOfOrder));
        }
        let end = high.end;
        Ok(Some(TreeNode::new(pos, end, Node::Range{ low: Box::new(low), high: Box::new(high) })))
    }

    fn parse_range_char(&self, pos: usize) -> ParseResult<TreeNode> {
        match self.peek(pos) {
            None | Some(']') | Some('-') => Ok(None),

            Some('\\') => {
                match self.peek(pos + 1) {
                    None => Err(self.error(pos + 1, SyntaxErrorKind::UnexpectedEnd)),
                    Some('u') => {
                        let (value, end) = self.parse_unicode(pos)?;
                        // ASCII must be written as itself inside a set
                        if (value as u32) <= 0x7f {
                            return Err(self.error(pos, SyntaxErrorKind::InvalidUnicodeEscape));
                        }
                        Ok(Some(TreeNode::new(pos, end, Node::UnicodeChar(value))))
                    },
                    Some(c) => Ok(Some(TreeNode::new(pos, pos + 1 + c.len_utf8(), Node::Char(unescape(c))))),
                }
            },

            Some(c) => Ok(Some(TreeNode::new(pos, pos + c.len_utf8(), Node::Char(c)))),
        }
    }
}

/// The character denoted by `\c`.
fn unescape(c: char) -> char {
    match c {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        'f' => '\x0C',
        c => c,
    }
}

fn char_value(node: &TreeNode) -> u32 {
    match node.node {
        Node::Char(c) | Node::UnicodeChar(c) => c as u32,
        _ => 0,
    }
}

fn number_value(node: &TreeNode) -> u32 {
    match node.node {
        Node::Number(n) => n,
        _ => 0,
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
