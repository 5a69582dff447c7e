/// What a `(` opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// `(` or `(?<name>`
    Capture,
    /// `(?:`
    NonCapture,
    /// `(?=`
    Lookahead,
    /// `(?!`
    NegativeLookahead,
    /// `(?<=`
    Lookbehind,
    /// `(?<!`
    NegativeLookbehind,
}

/// A pattern string token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A normal character.
    Literal(char),
    /// A character written as an escape sequence, already decoded.
    EscapedLiteral(char),
    /// `.`
    Any,
    /// A shorthand class like `\d` or `\W` (just the identifying letter).
    Class(char),
    /// A group opener.
    LParen(GroupKind),
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]` closing a class.
    RBracket,
    /// `^`. Negates a class when it directly follows `[`.
    Caret,
    /// `$`
    Dollar,
    /// `\b` outside a class.
    WordBoundary,
    /// `\B`
    NonWordBoundary,
    /// `|`
    Pipe,
    /// `*`
    Star,
    /// `+`
    Plus,
    /// `?`. Also the lazy suffix of a quantifier.
    Question,
    /// `{n}`, `{n,}` or `{n,m}`.
    Braces(u32, Option<u32>),
    /// `-` inside a class.
    Minus,
    /// `\1`, `\2`, ... or `\k<name>`, as the index of the group it refers to.
    Backreference(usize),
}

impl Token {
    /// Returns a character representation of the token.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Token::Literal(c) | Token::EscapedLiteral(c) | Token::Class(c) => c,
            Token::Any => '.',
            Token::LParen(_) => '(',
            Token::RParen => ')',
            Token::LBracket => '[',
            Token::RBracket => ']',
            Token::Caret => '^',
            Token::Dollar => '$',
            Token::WordBoundary => 'b',
            Token::NonWordBoundary => 'B',
            Token::Pipe => '|',
            Token::Star => '*',
            Token::Plus => '+',
            Token::Question => '?',
            Token::Braces(..) => '{',
            Token::Minus => '-',
            Token::Backreference(_) => '\\',
        }
    }
}

/// A [`Token`] with associated position information.
#[derive(Clone, Copy, Debug, Eq)]
pub struct PosToken {
    /// The start position of the token in the pattern string, in characters.
    pub pos: usize,
    /// The token.
    pub token: Token,
}

impl core::ops::Deref for PosToken {
    type Target = Token;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl PartialEq for PosToken {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}
