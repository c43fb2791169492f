/**
 * The syntax-tree data-structures produced by the parser.
 */

use std::fmt;

/// Every kind of node that can appear in a syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Regexp,
    MultiRegexp,
    SimpleRegexp,
    QRegexp,
    Quantifier,
    Number,
    Metachar,
    UnicodeChar,
    Char,
    Subexpr,
    PosixSet,
    Set,
    Range,
    Token,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Regexp => "REGEXP",
            NodeKind::MultiRegexp => "MULTI_REGEXP",
            NodeKind::SimpleRegexp => "SIMPLE_REGEXP",
            NodeKind::QRegexp => "Q_REGEXP",
            NodeKind::Quantifier => "QUANTIFIER",
            NodeKind::Number => "NUMBER",
            NodeKind::Metachar => "METACHAR",
            NodeKind::UnicodeChar => "UNICODE_CHAR",
            NodeKind::Char => "CHAR",
            NodeKind::Subexpr => "SUBEXPR",
            NodeKind::PosixSet => "POSIX_SET",
            NodeKind::Set => "SET",
            NodeKind::Range => "RANGE",
            NodeKind::Token => "TOKEN",
        }
    }
}

/// The repetition operator of a quantifier node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantifierKind {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
    /// `{n}`
    Exactly,
    /// `{n,}`
    AtLeast,
    /// `{n,m}`
    Between,
}

impl QuantifierKind {
    /// The single-character symbol, for the non-brace forms.
    pub fn symbol(self) -> Option<char> {
        match self {
            QuantifierKind::ZeroOrMore => Some('*'),
            QuantifierKind::OneOrMore => Some('+'),
            QuantifierKind::ZeroOrOne => Some('?'),
            _ => None,
        }
    }
}

/// Metacharacters that are not plain characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metachar {
    /// `.`
    Any,
    /// `\b`
    WordBoundary,
    /// `\B`
    NonWordBoundary,
}

impl Metachar {
    pub fn as_str(self) -> &'static str {
        match self {
            Metachar::Any => ".",
            Metachar::WordBoundary => r"\b",
            Metachar::NonWordBoundary => r"\B",
        }
    }
}

/// The anchors stripped off the ends of the pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anchors {
    pub start: bool,
    pub end: bool,
}

/// A single node of the tree, spanning `[start, end)` of the source pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub start: usize,
    pub end: usize,
    pub node: Node,
}

/// The payload of a node, one variant per node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Alternatives, each a `SimpleRegexp`.
    MultiRegexp(Vec<TreeNode>),

    /// A concatenation of `QRegexp` nodes.
    SimpleRegexp(Vec<TreeNode>),

    QRegexp{
        atom: Box<TreeNode>,
        quantifier: Option<Box<TreeNode>>,
    },

    /// `bounds` holds zero, one or two `Number` nodes depending on `kind`.
    Quantifier{
        kind: QuantifierKind,
        bounds: Vec<TreeNode>,
    },

    Number(u32),
    Metachar(Metachar),
    UnicodeChar(char),
    Char(char),

    /// A parenthesized `MultiRegexp`.
    Subexpr(Box<TreeNode>),

    /// The lowercase POSIX class name, like `alpha`.
    PosixSet(String),

    /// `specials` is the subset of `^`, `]`, `-` found at the start of the set,
    /// in that order.
    Set{
        specials: String,
        items: Vec<TreeNode>,
    },

    Range{
        low: Box<TreeNode>,
        high: Box<TreeNode>,
    },

    Token(String),
}

impl TreeNode {
    pub fn new(start: usize, end: usize, node: Node) -> Self {
        debug_assert!(start <= end);
        Self{ start, end, node }
    }

    pub fn kind(&self) -> NodeKind {
        match &self.node {
            Node::MultiRegexp(_) => NodeKind::MultiRegexp,
            Node::SimpleRegexp(_) => NodeKind::SimpleRegexp,
            Node::QRegexp{ .. } => NodeKind::QRegexp,
            Node::Quantifier{ .. } => NodeKind::Quantifier,
            Node::Number(_) => NodeKind::Number,
            Node::Metachar(_) => NodeKind::Metachar,
            Node::UnicodeChar(_) => NodeKind::UnicodeChar,
            Node::Char(_) => NodeKind::Char,
            Node::Subexpr(_) => NodeKind::Subexpr,
            Node::PosixSet(_) => NodeKind::PosixSet,
            Node::Set{ .. } => NodeKind::Set,
            Node::Range{ .. } => NodeKind::Range,
            Node::Token(_) => NodeKind::Token,
        }
    }

    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// The source text this node was parsed from.
    pub fn text<'a>(&self, pattern: &'a str) -> &'a str {
        &pattern[self.start..self.end]
    }

    /// The children in left-to-right source order.
    pub fn children(&self) -> Vec<&TreeNode> {
        match &self.node {
              Node::MultiRegexp(children)
            | Node::SimpleRegexp(children)
            | Node::Quantifier{ bounds: children, .. }
            | Node::Set{ items: children, .. } => children.iter().collect(),

            Node::QRegexp{ atom, quantifier } => {
                let mut res = vec![atom.as_ref()];
                if let Some(q) = quantifier {
                    res.push(q.as_ref());
                }
                res
            },

            Node::Subexpr(inner) => vec![inner.as_ref()],
            Node::Range{ low, high } => vec![low.as_ref(), high.as_ref()],

              Node::Number(_)
            | Node::Metachar(_)
            | Node::UnicodeChar(_)
            | Node::Char(_)
            | Node::PosixSet(_)
            | Node::Token(_) => Vec::new(),
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{} [{}, {})", "", self.kind().name(), self.start, self.end, indent = depth * 2)?;
        match &self.node {
            Node::Quantifier{ kind, .. } => write!(f, " {:?}", kind)?,
            Node::Number(n) => write!(f, " {}", n)?,
            Node::Metachar(m) => write!(f, " {}", m.as_str())?,
            Node::UnicodeChar(c) | Node::Char(c) => write!(f, " {:?}", c)?,
            Node::PosixSet(name) | Node::Token(name) => write!(f, " {}", name)?,
            Node::Set{ specials, .. } if !specials.is_empty() => write!(f, " {:?}", specials)?,
            _ => {},
        }
        writeln!(f)?;
        for child in self.children() {
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// The result of a successful parse: owns the pattern and the tree built over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNodeRoot {
    pattern: String,
    anchors: Anchors,
    body: Option<TreeNode>,
}

impl TreeNodeRoot {
    pub fn new(pattern: impl Into<String>, anchors: Anchors, body: Option<TreeNode>) -> Self {
        Self{ pattern: pattern.into(), anchors, body }
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::Regexp
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    /// The `MultiRegexp` between the anchors, absent for `^`, `$` and `^$`.
    pub fn body(&self) -> Option<&TreeNode> {
        self.body.as_ref()
    }

    pub fn span(&self) -> std::ops::Range<usize> {
        0..self.pattern.len()
    }
}

impl fmt::Display for TreeNodeRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REGEXP [0, {})", self.pattern.len())?;
        match (self.anchors.start, self.anchors.end) {
            (true, true) => write!(f, " ^$")?,
            (true, false) => write!(f, " ^")?,
            (false, true) => write!(f, " $")?,
            (false, false) => {},
        }
        writeln!(f)?;
        if let Some(body) = &self.body {
            body.fmt_indented(f, 1)?;
        }
        Ok(())
    }
}

// Tests ///////////////////////////////////////////////////////////////////////
