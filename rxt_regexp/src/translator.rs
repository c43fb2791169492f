/**
 * The pipeline from a legacy pattern to a JDK pattern.
 */

use crate::error::SyntaxError;
use crate::generator;
use crate::parser;
use crate::tokens::TokenTable;

/// Translates `pattern` with no tokens recognized. The empty pattern
/// translates to the empty string.
pub fn translate_regexp(pattern: &str) -> Result<String, SyntaxError> {
    translate_regexp_with_tokens(pattern, &TokenTable::new())
}

/// Translates `pattern`, recognizing `{name}` for exactly the names in
/// `replacements` and substituting their quoted replacement text.
pub fn translate_regexp_with_tokens(pattern: &str, replacements: &TokenTable) -> Result<String, SyntaxError> {
    let names = replacements.names();
    let tree = parser::parse_with_tokens(pattern, names.as_slice())?;
    let result = match tree {
        Some(tree) => {
            tracing::trace!("syntax tree:\n{}", tree);
            generator::generate_with_tokens(&tree, replacements)
        },
        None => String::new(),
    };
    tracing::debug!(pattern, result = result.as_str(), "translated pattern");
    Ok(result)
}

/// A reusable translator carrying its own token table.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    tokens: TokenTable,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: TokenTable) -> Self {
        Self{ tokens }
    }

    /// Adds (or replaces) a token.
    pub fn token(mut self, name: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.tokens.insert(name, replacement);
        self
    }

    pub fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    pub fn translate(&self, pattern: &str) -> Result<String, SyntaxError> {
        translate_regexp_with_tokens(pattern, &self.tokens)
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
