pub mod flags;
pub mod node;
pub mod quantifier;

pub use self::{
    flags::Flags,
    node::{Assertion, Node},
    quantifier::Quantifier,
};
use super::Result;

/// Where a [`Pattern`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternSource {
    /// Regular-expression text.
    Regex(String),
    /// A plain string matched character for character.
    Literal(String),
}

/// A built pattern: its structural model plus the flags it was built with.
///
/// A pattern is immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    root: Node,
    flags: Flags,
    capture_count: usize,
}

impl Pattern {
    #[must_use]
    pub(crate) fn new(root: Node, flags: Flags, capture_count: usize) -> Self {
        Self {
            root,
            flags,
            capture_count,
        }
    }

    /// Builds a pattern from either regular-expression text or a plain string.
    ///
    /// # Errors
    ///
    /// If the source is regular-expression text that cannot be parsed, an
    /// [`Error`](crate::Error) is returned. Literal sources never fail.
    pub fn build(source: &PatternSource, flags: Flags) -> Result<Self> {
        match source {
            PatternSource::Regex(text) => super::parse_pattern(text, flags),
            PatternSource::Literal(text) => Ok(Self::literal_with_flags(text, flags)),
        }
    }

    /// Parses `source` with a JavaScript-style flag string such as `"i"`.
    pub fn regex(source: &str, flags: &str) -> Result<Self> {
        super::parse_pattern(source, flags.parse()?)
    }

    /// Builds a case-sensitive pattern matching exactly `text`.
    #[must_use]
    pub fn literal(text: &str) -> Self {
        Self::literal_with_flags(text, Flags::default())
    }

    #[must_use]
    pub fn literal_with_flags(text: &str, flags: Flags) -> Self {
        let root = Node::Concatenation(text.chars().map(Node::Literal).collect());
        Self::new(root, flags, 0)
    }

    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    #[must_use]
    pub fn flags(&self) -> Flags {
        self.flags
    }

    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.capture_count
    }
}

impl std::ops::Deref for Pattern {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.root
    }
}

impl PartialEq<Node> for Pattern {
    fn eq(&self, other: &Node) -> bool {
        self.root == *other
    }
}
