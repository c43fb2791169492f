/**
 * Errors of parsing and translating patterns.
 */

use std::fmt;
use thiserror::Error;

/// What went wrong at the offending offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    UnexpectedChar,
    UnexpectedEnd,
    UnterminatedGroup,
    UnterminatedSet,
    MalformedQuantifier,
    BoundsOutOfOrder,
    NumberTooLong,
    RangeOutOfOrder,
    InvalidUnicodeEscape,
    UnknownPosixClass,
    NestingTooDeep,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            SyntaxErrorKind::UnexpectedChar => "unexpected character",
            SyntaxErrorKind::UnexpectedEnd => "unexpected end of pattern",
            SyntaxErrorKind::UnterminatedGroup => "missing ')'",
            SyntaxErrorKind::UnterminatedSet => "missing ']'",
            SyntaxErrorKind::MalformedQuantifier => "malformed quantifier",
            SyntaxErrorKind::BoundsOutOfOrder => "quantifier bounds out of order",
            SyntaxErrorKind::NumberTooLong => "number has more than 3 digits",
            SyntaxErrorKind::RangeOutOfOrder => "range endpoints out of order",
            SyntaxErrorKind::InvalidUnicodeEscape => "invalid unicode escape",
            SyntaxErrorKind::UnknownPosixClass => "unknown POSIX class",
            SyntaxErrorKind::NestingTooDeep => "groups nested too deeply",
        };
        f.write_str(message)
    }
}

/// A pattern could not be parsed. `position` is the byte offset into `pattern`
/// where parsing could not continue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {position} in pattern {pattern:?}")]
pub struct SyntaxError {
    pub pattern: String,
    pub position: usize,
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub fn new(pattern: &str, position: usize, kind: SyntaxErrorKind) -> Self {
        Self{ pattern: pattern.into(), position, kind }
    }

    /// Renders the pattern with a caret under the offending character:
    ///
    /// ```text
    /// a{3,2}
    ///     ^
    /// ```
    pub fn caret_diagnostic(&self) -> String {
        let prefix = self.pattern.get(..self.position).unwrap_or(&self.pattern);
        let column = prefix.chars().count();
        format!("{}\n{:column$}^", self.pattern, "", column = column)
    }
}

/// Any failure surfaced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("invalid token table: {0}")]
    TokenTable(#[from] serde_json::Error),
}

// Tests ///////////////////////////////////////////////////////////////////////
