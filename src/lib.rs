//! Static first-character analysis of regular-expression token patterns.
//!
//! A tokenizer that knows which characters each of its token patterns could
//! start with only needs to try a handful of patterns at every input position.
//! This crate builds a structural model of a pattern, computes its start codes
//! and answers membership questions for finite candidate sets, then turns the
//! results into a dispatch table.

#![warn(clippy::pedantic, rust_2018_idioms)]
#![allow(clippy::missing_errors_doc, clippy::too_many_lines)]

pub mod analysis;
pub mod ast;
pub mod case;
pub mod charset;
pub mod dispatch;
pub mod engine;
pub mod lexer;
pub mod parser;
pub mod tokenizer;

pub use self::{
    analysis::{
        StartCodes, can_contain_char_code, can_match_char_code, compute_start_codes,
        get_start_codes,
    },
    ast::{Assertion, Flags, Node, Pattern, PatternSource, Quantifier},
    case::case_variant,
    charset::CharSet,
    dispatch::{DispatchTable, StartChars},
    lexer::{Lexer, Token},
    parser::{Parser, parse_pattern},
    tokenizer::{Group, LexResult, Tokenizer, TokenizerConfig, TokenType},
};

/// A regular expression that could not be turned into a [`Pattern`].
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An invalid character class range was used.
    #[error("{err} at {pos}")]
    CharSet { pos: usize, err: charset::Error },

    /// The pattern ended with a lone `\`.
    #[error("\\ at end of pattern at {pos}")]
    UnexpectedEnd { pos: usize },

    /// A `\u` escape named something that is not a Unicode scalar value.
    #[error("invalid unicode escape at {pos}")]
    InvalidEscape { pos: usize },

    /// A quantifier followed nothing, or followed something that cannot repeat.
    #[error("nothing to repeat at {pos}")]
    NothingToRepeat { pos: usize },

    /// A `{n,m}` quantifier had `n > m`.
    #[error("numbers out of order in {{}} quantifier at {pos}")]
    QuantifierRange { pos: usize },

    /// A `(?` sequence that does not open a known group kind.
    #[error("invalid group at {pos}")]
    InvalidGroup { pos: usize },

    /// A `\k<name>` reference to a group name that does not exist.
    #[error("invalid named reference at {pos}")]
    GroupName { pos: usize },

    /// A token of an unexpected type was encountered.
    #[error("unexpected '{}' at {pos}", lit.escape_default())]
    UnexpectedToken { pos: usize, lit: char },

    /// A specific token was required but something else was found.
    #[error("expected {expected:?}, got {actual:?} at {pos}")]
    ExpectedToken {
        pos: usize,
        expected: Token,
        actual: Option<Token>,
    },

    /// An unrecognised regular expression flag.
    #[error("invalid regular expression flag '{0}'")]
    UnknownFlag(char),

    /// A regular expression flag given more than once.
    #[error("duplicate regular expression flag '{0}'")]
    DuplicateFlag(char),
}

pub type Result<T> = std::result::Result<T, Error>;
