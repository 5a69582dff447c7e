use super::{super::CharSet, Quantifier};

#[derive(Clone, PartialEq, Debug)]
pub enum Node {
    Literal(char),
    Class(CharSet), // [...], [^...], \d, \W, ...
    AnyChar,        // .
    Assertion(Assertion),

    // Capturing groups carry their 1-based index; (?:...) has none.
    Group {
        capture: Option<usize>,
        inner: Box<Node>,
    },

    Concatenation(Vec<Node>),
    Alternation(Vec<Node>),

    Repetition {
        inner: Box<Node>,
        quantifier: Quantifier,
    },

    Backreference(usize), // \1, \2, ... (1-based)
}

/// Zero-width assertions.
#[derive(Clone, PartialEq, Debug)]
pub enum Assertion {
    Start,           // ^
    End,             // $
    WordBoundary,    // \b
    NonWordBoundary, // \B
    Lookahead { negated: bool, inner: Box<Node> },
    Lookbehind { negated: bool, inner: Box<Node> },
}
