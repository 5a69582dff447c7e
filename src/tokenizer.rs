//! A first-match-wins tokenizer driven by the dispatch table.

use super::{
    analysis::{LINE_TERMINATORS, can_contain_char_code},
    ast::Pattern,
    dispatch::{DispatchTable, StartChars},
    engine::Program,
};

pub mod token;

pub use token::{LexResult, LexingError, Token};

/// Where matched tokens of a type end up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Group {
    /// The main token list.
    #[default]
    Default,
    /// Matched and dropped, e.g. whitespace.
    Skipped,
    /// Collected in [`LexResult::groups`] under this name, e.g. comments.
    Named(String),
}

/// Which positions are recorded on tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PositionTracking {
    /// Offsets plus start and end line/column.
    #[default]
    Full,
    /// Offsets plus start line/column.
    OnlyStart,
    /// Offsets only.
    OnlyOffset,
}

/// Tokenizer construction options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Fail construction if any token type would have to be tried at every
    /// position.
    pub ensure_optimizations: bool,
    /// Skip the dispatch table and try every token type everywhere.
    pub safe_mode: bool,
    pub position_tracking: PositionTracking,
}

/// The error type used by [`Tokenizer::new`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("a tokenizer needs at least one token type")]
    NoTokenTypes,

    /// A pattern that matches the empty string would never advance the input.
    #[error("token type '{name}' can match the empty string")]
    EmptyMatch { name: String },

    #[error(
        "the start characters of token type '{name}' cannot be determined; \
         supply a start_chars_hint or disable ensure_optimizations"
    )]
    Unoptimized { name: String },
}

/// One kind of token: a name, a pattern and how matches are handled.
#[derive(Clone, Debug)]
pub struct TokenType {
    name: String,
    pattern: Pattern,
    group: Group,
    start_chars_hint: Option<Vec<u32>>,
    line_breaks: Option<bool>,
}

impl TokenType {
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: Pattern) -> Self {
        Self {
            name: name.into(),
            pattern,
            group: Group::Default,
            start_chars_hint: None,
            line_breaks: None,
        }
    }

    #[must_use]
    pub fn group(self, group: Group) -> Self {
        Self { group, ..self }
    }

    /// Declares the characters this token type can start with, skipping the
    /// analysis of its pattern.
    #[must_use]
    pub fn start_chars_hint(self, chars: impl IntoIterator<Item = char>) -> Self {
        self.start_codes_hint(chars.into_iter().map(u32::from))
    }

    #[must_use]
    pub fn start_codes_hint(self, codes: impl IntoIterator<Item = u32>) -> Self {
        Self {
            start_chars_hint: Some(codes.into_iter().collect()),
            ..self
        }
    }

    /// Declares whether matches can contain line terminators. When not
    /// declared, this is inferred from whether the pattern could match one
    /// anywhere.
    #[must_use]
    pub fn line_breaks(self, line_breaks: bool) -> Self {
        Self {
            line_breaks: Some(line_breaks),
            ..self
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }
}

/// A tokenizer over a fixed, prioritised list of token types.
///
/// All analysis happens in [`Tokenizer::new`]; afterwards the tokenizer is
/// read-only.
#[derive(Debug)]
pub struct Tokenizer {
    types: Vec<TokenType>,
    programs: Vec<Program>,
    start_chars: Vec<StartChars>,
    line_breaks: Vec<bool>,
    dispatch: Option<DispatchTable>,
    all: Vec<usize>,
    config: TokenizerConfig,
}

#[derive(Clone, Copy)]
struct Cursor {
    offset: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Moves up to `end` in `input`, returning the position of the last
    /// character passed over.
    fn advance(&mut self, input: &[char], end: usize, track_lines: bool) -> Cursor {
        let mut last = *self;
        while self.offset < end {
            last = *self;
            let newline = match input[self.offset] {
                '\n' | '\u{2028}' | '\u{2029}' => true,
                // \r\n counts once, on the \n
                '\r' => input.get(self.offset + 1) != Some(&'\n'),
                _ => false,
            };
            self.offset += 1;
            if track_lines && newline {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        last
    }
}

impl Tokenizer {
    /// Analyses every token type and builds the dispatch table.
    ///
    /// # Errors
    ///
    /// If the token types cannot form a working tokenizer, a
    /// [`DefinitionError`] is returned.
    pub fn new(types: Vec<TokenType>, config: TokenizerConfig) -> Result<Self, DefinitionError> {
        if types.is_empty() {
            return Err(DefinitionError::NoTokenTypes);
        }

        let mut programs = Vec::with_capacity(types.len());
        let mut start_chars = Vec::with_capacity(types.len());
        let mut line_breaks = Vec::with_capacity(types.len());
        for token_type in &types {
            let program = Program::new(&token_type.pattern);
            if program.match_at(&[], 0).is_some() {
                return Err(DefinitionError::EmptyMatch {
                    name: token_type.name.clone(),
                });
            }

            let analysed =
                StartChars::analyze(&token_type.pattern, token_type.start_chars_hint.as_deref());
            if config.ensure_optimizations && analysed.codes().is_none() {
                return Err(DefinitionError::Unoptimized {
                    name: token_type.name.clone(),
                });
            }
            start_chars.push(analysed);

            line_breaks.push(token_type.line_breaks.unwrap_or_else(|| {
                can_contain_char_code(&LINE_TERMINATORS, &token_type.pattern)
            }));
            programs.push(program);
        }

        let dispatch = (!config.safe_mode).then(|| DispatchTable::build(&start_chars));

        Ok(Self {
            all: (0..types.len()).collect(),
            types,
            programs,
            start_chars,
            line_breaks,
            dispatch,
            config,
        })
    }

    #[must_use]
    pub fn token_type(&self, index: usize) -> &TokenType {
        &self.types[index]
    }

    #[must_use]
    pub fn token_types(&self) -> &[TokenType] {
        &self.types
    }

    /// The analysis result for the token type at `index`.
    #[must_use]
    pub fn start_chars(&self, index: usize) -> &StartChars {
        &self.start_chars[index]
    }

    /// Returns `true` if tokens of the type at `index` update line numbers.
    #[must_use]
    pub fn tracks_line_breaks(&self, index: usize) -> bool {
        self.line_breaks[index]
    }

    /// The dispatch table, absent in safe mode.
    #[must_use]
    pub fn dispatch(&self) -> Option<&DispatchTable> {
        self.dispatch.as_ref()
    }

    fn candidates(&self, code: u32) -> &[usize] {
        match &self.dispatch {
            Some(dispatch) => dispatch.candidates(code),
            None => &self.all,
        }
    }

    /// Splits `text` into tokens.
    ///
    /// At each position the candidate token types are tried in priority order
    /// and the first match wins. Characters no token type matches are skipped
    /// and reported as one [`LexingError`] per run.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> LexResult {
        let chars: Vec<char> = text.chars().collect();
        let mut result = LexResult::default();
        let mut cursor = Cursor::START;
        let mut error_start: Option<Cursor> = None;

        while cursor.offset < chars.len() {
            let offset = cursor.offset;
            let code = u32::from(chars[offset]);
            let matched = self.candidates(code).iter().find_map(|&index| {
                self.programs[index]
                    .match_at(&chars, offset)
                    .filter(|&end| end > offset)
                    .map(|end| (index, end))
            });

            let Some((index, end)) = matched else {
                error_start.get_or_insert(cursor);
                cursor.advance(&chars, offset + 1, true);
                continue;
            };

            if let Some(start) = error_start.take() {
                result.errors.push(self.lexing_error(start, offset, &chars));
            }

            let start = cursor;
            let last = cursor.advance(&chars, end, self.line_breaks[index]);
            let token = self.make_token(index, &chars[offset..end], start, last);

            match &self.types[index].group {
                Group::Default => result.tokens.push(token),
                Group::Skipped => {}
                Group::Named(name) => result.groups.entry(name.clone()).or_default().push(token),
            }
        }

        if let Some(start) = error_start {
            result.errors.push(self.lexing_error(start, chars.len(), &chars));
        }

        result
    }

    fn make_token(&self, index: usize, image: &[char], start: Cursor, last: Cursor) -> Token {
        let tracking = self.config.position_tracking;
        let with_start = tracking != PositionTracking::OnlyOffset;
        let with_end = tracking == PositionTracking::Full;
        Token {
            token_type: index,
            image: image.iter().collect(),
            start_offset: start.offset,
            end_offset: start.offset + image.len(),
            start_line: with_start.then_some(start.line),
            start_column: with_start.then_some(start.column),
            end_line: with_end.then_some(last.line),
            end_column: with_end.then_some(last.column),
        }
    }

    fn lexing_error(&self, start: Cursor, end: usize, chars: &[char]) -> LexingError {
        let with_start = self.config.position_tracking != PositionTracking::OnlyOffset;
        let length = end - start.offset;
        LexingError {
            offset: start.offset,
            line: with_start.then_some(start.line),
            column: with_start.then_some(start.column),
            length,
            message: format!(
                "unexpected character: ->{}<- at offset: {}, skipped {length} characters.",
                chars[start.offset], start.offset
            ),
        }
    }
}
