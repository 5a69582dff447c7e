use std::collections::BTreeMap;

/// A matched token.
///
/// Offsets count characters and `end_offset` is exclusive. Lines and columns
/// are 1-based; the end line/column is that of the last character. Which
/// positions are present depends on the tokenizer's position tracking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Index of the token type in the tokenizer's definition.
    pub token_type: usize,
    pub image: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub start_line: Option<usize>,
    pub start_column: Option<usize>,
    pub end_line: Option<usize>,
    pub end_column: Option<usize>,
}

/// A run of characters that no token type matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexingError {
    pub offset: usize,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub length: usize,
    pub message: String,
}

/// The output of [`Tokenizer::tokenize`](super::Tokenizer::tokenize).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    /// Tokens of [`Group::Named`](super::Group::Named) types, by group name.
    pub groups: BTreeMap<String, Vec<Token>>,
    pub errors: Vec<LexingError>,
}
