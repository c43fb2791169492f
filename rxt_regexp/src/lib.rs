/**
 * Translation of legacy (Jakarta Regexp style) regular expressions into
 * `java.util.regex.Pattern` syntax, with optional substitution of named
 * `{token}` placeholders.
 */

extern crate thiserror;
extern crate tracing;

pub mod tree;
pub mod parser;
pub mod generator;
pub mod translator;
pub mod tokens;
mod error;

pub use error::{Error, SyntaxError, SyntaxErrorKind};
pub use tokens::TokenTable;
pub use tree::{NodeKind, Node, TreeNode, TreeNodeRoot};
pub use parser::{parse, parse_with_tokens};
pub use generator::{generate, generate_with_tokens, generate_opt, quote_replacement};
pub use translator::{translate_regexp, translate_regexp_with_tokens, Translator};
