use super::{Error, Result};

pub mod token;

pub use token::{GroupKind, PosToken, Token};

fn is_class_char(c: char) -> bool {
    matches!(c, 'd' | 'D' | 'w' | 'W' | 's' | 'S')
}

fn is_name_char(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

/// The capture groups of a whole pattern.
///
/// Whether `\2` is a backreference or an octal escape, and whether `\k` starts
/// a named reference, depends on groups that may only open later in the
/// pattern, so they are counted before lexing starts.
#[derive(Clone, Debug, Default)]
struct Groups {
    count: usize,
    names: Vec<(String, usize)>,
}

impl Groups {
    fn scan(input: &[char]) -> Self {
        let mut groups = Groups::default();
        let mut in_set = false;
        let mut i = 0;
        while let Some(&c) = input.get(i) {
            i += 1;
            match c {
                '\\' => i += 1,
                '[' => in_set = true,
                ']' => in_set = false,
                '(' if !in_set => {
                    if input.get(i) != Some(&'?') {
                        groups.count += 1;
                    } else if input.get(i + 1) == Some(&'<')
                        && !matches!(input.get(i + 2), Some('=' | '!'))
                    {
                        groups.count += 1;
                        let name = input[i + 2..]
                            .iter()
                            .take_while(|&&c| is_name_char(c))
                            .collect();
                        groups.names.push((name, groups.count));
                    }
                }
                _ => {}
            }
        }
        groups
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, index)| index)
    }
}

/// Splits regular-expression text into [`Token`]s.
///
/// The meaning of most characters depends on whether the lexer is inside a
/// bracket class, so the lexer tracks that itself.
pub struct Lexer {
    input: Vec<char>,
    pos: usize,
    in_set: bool,
    set_start: bool,
    peeked: Option<Option<PosToken>>,
    groups: Groups,
}

impl Lexer {
    #[must_use]
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        Lexer {
            groups: Groups::scan(&input),
            input,
            pos: 0,
            in_set: false,
            set_start: false,
            peeked: None,
        }
    }

    /// Returns the position of the next unread token.
    #[must_use]
    pub fn tell(&self) -> usize {
        match self.peeked {
            Some(Some(PosToken { pos, .. })) => pos,
            _ => self.pos,
        }
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Result<Option<PosToken>> {
        if let Some(token) = self.peeked {
            return Ok(token);
        }
        let token = self.lex()?;
        self.peeked = Some(token);
        Ok(token)
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Result<Option<PosToken>> {
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.lex(),
        }
    }

    /// Consumes the next token if it is `token`.
    pub fn consume(&mut self, token: Token) -> Result<bool> {
        if self.peek()?.is_some_and(|next| next.token == token) {
            self.peeked = None;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Consumes the next token, failing unless it is `expected`.
    pub fn expect(&mut self, expected: Token) -> Result<PosToken> {
        let pos = self.tell();
        match self.next_token()? {
            Some(next) if next.token == expected => Ok(next),
            actual => Err(Error::ExpectedToken {
                pos,
                expected,
                actual: actual.map(|t| t.token),
            }),
        }
    }

    /// Consumes the next token unless it is `end` or the input is exhausted.
    pub fn until(&mut self, end: Token) -> Result<Option<PosToken>> {
        match self.peek()? {
            Some(next) if next.token != end => self.next_token(),
            _ => Ok(None),
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn advance_if(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn lex(&mut self) -> Result<Option<PosToken>> {
        let pos = self.pos;
        let Some(c) = self.advance() else {
            return Ok(None);
        };

        let token = if self.in_set {
            self.lex_in_set(c, pos)?
        } else {
            self.lex_outside(c, pos)?
        };

        Ok(Some(PosToken { pos, token }))
    }

    fn lex_in_set(&mut self, c: char, pos: usize) -> Result<Token> {
        let at_start = std::mem::take(&mut self.set_start);
        Ok(match c {
            ']' => {
                self.in_set = false;
                Token::RBracket
            }
            '^' if at_start => Token::Caret,
            '-' => Token::Minus,
            '\\' => self.escape(pos)?,
            _ => Token::Literal(c),
        })
    }

    fn lex_outside(&mut self, c: char, pos: usize) -> Result<Token> {
        Ok(match c {
            '(' => Token::LParen(self.group_kind(pos)?),
            ')' => Token::RParen,
            '[' => {
                self.in_set = true;
                self.set_start = true;
                Token::LBracket
            }
            '.' => Token::Any,
            '^' => Token::Caret,
            '$' => Token::Dollar,
            '|' => Token::Pipe,
            '*' => Token::Star,
            '+' => Token::Plus,
            '?' => Token::Question,
            '{' => match self.braces() {
                Some((min, max)) => Token::Braces(min, max),
                None => Token::Literal('{'),
            },
            '\\' => self.escape(pos)?,
            _ => Token::Literal(c),
        })
    }

    fn group_kind(&mut self, pos: usize) -> Result<GroupKind> {
        if !self.advance_if('?') {
            return Ok(GroupKind::Capture);
        }

        match self.advance() {
            Some(':') => Ok(GroupKind::NonCapture),
            Some('=') => Ok(GroupKind::Lookahead),
            Some('!') => Ok(GroupKind::NegativeLookahead),
            Some('<') if self.advance_if('=') => Ok(GroupKind::Lookbehind),
            Some('<') if self.advance_if('!') => Ok(GroupKind::NegativeLookbehind),
            Some('<') => {
                // (?<name>...) captures like (...); `\k<name>` refers back to it
                // through the group table.
                let name = self.name();
                let uses = self.groups.names.iter().filter(|(n, _)| *n == name).count();
                if !name.is_empty() && uses == 1 && self.advance_if('>') {
                    Ok(GroupKind::Capture)
                } else {
                    Err(Error::InvalidGroup { pos })
                }
            }
            _ => Err(Error::InvalidGroup { pos }),
        }
    }

    fn name(&mut self) -> String {
        let start = self.pos;
        while self.peek_char().is_some_and(is_name_char) {
            self.pos += 1;
        }
        self.input[start..self.pos].iter().collect()
    }

    /// Lexes the rest of `{n}`, `{n,}` or `{n,m}`. Leaves the input untouched
    /// and returns `None` if the text is not a quantifier.
    fn braces(&mut self) -> Option<(u32, Option<u32>)> {
        let save = self.pos;
        let bounds = self.brace_bounds();
        if bounds.is_none() {
            self.pos = save;
        }
        bounds
    }

    fn brace_bounds(&mut self) -> Option<(u32, Option<u32>)> {
        let min = self.decimal()?;
        let max = if self.advance_if(',') {
            self.decimal()
        } else {
            Some(min)
        };
        self.advance_if('}').then_some((min, max))
    }

    fn decimal(&mut self) -> Option<u32> {
        let mut value: Option<u32> = None;
        while let Some(digit) = self.peek_char().and_then(|c| c.to_digit(10)) {
            self.pos += 1;
            value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit));
        }
        value
    }

    fn hex(&mut self, digits: usize) -> Option<u32> {
        let save = self.pos;
        let mut value = 0;
        for _ in 0..digits {
            let Some(digit) = self.peek_char().and_then(|c| c.to_digit(16)) else {
                self.pos = save;
                return None;
            };
            self.pos += 1;
            value = value * 16 + digit;
        }
        Some(value)
    }

    fn escape(&mut self, pos: usize) -> Result<Token> {
        let Some(c) = self.advance() else {
            return Err(Error::UnexpectedEnd { pos });
        };

        let decoded = match c {
            c if is_class_char(c) => return Ok(Token::Class(c)),
            'b' if self.in_set => '\u{8}',
            'b' => return Ok(Token::WordBoundary),
            'B' if !self.in_set => return Ok(Token::NonWordBoundary),
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{b}',
            'f' => '\u{c}',
            '0' if !self.peek_char().is_some_and(|c| c.is_ascii_digit()) => '\0',
            '1'..='9' if !self.in_set => {
                self.pos -= 1;
                let save = self.pos;
                let index = self.decimal().map_or(usize::MAX, |index| index as usize);
                if index <= self.groups.count {
                    return Ok(Token::Backreference(index));
                }
                // Without such a group this is an octal escape, or \8 and \9
                // standing for themselves.
                self.pos = save + 1;
                if c >= '8' { c } else { self.octal(c) }
            }
            'k' if !self.in_set && !self.groups.names.is_empty() => {
                let name = if self.advance_if('<') {
                    let name = self.name();
                    self.advance_if('>').then_some(name)
                } else {
                    None
                };
                return name
                    .and_then(|name| self.groups.index_of(&name))
                    .map(Token::Backreference)
                    .ok_or(Error::GroupName { pos });
            }
            '0'..='7' => self.octal(c),
            'c' => match self.peek_char() {
                Some(letter) if letter.is_ascii_alphabetic() => {
                    self.pos += 1;
                    char::from(letter as u8 % 32)
                }
                // A lone \c stands for the backslash itself.
                _ => {
                    self.pos -= 1;
                    '\\'
                }
            },
            'x' => self.hex(2).and_then(char::from_u32).unwrap_or('x'),
            'u' => match self.unicode_escape() {
                Some(code) => char::from_u32(code).ok_or(Error::InvalidEscape { pos })?,
                None => 'u',
            },
            _ => c,
        };

        Ok(Token::EscapedLiteral(decoded))
    }

    fn unicode_escape(&mut self) -> Option<u32> {
        let save = self.pos;
        if self.advance_if('{') {
            let mut value: u32 = 0;
            let mut any = false;
            while let Some(digit) = self.peek_char().and_then(|c| c.to_digit(16)) {
                self.pos += 1;
                any = true;
                value = value.saturating_mul(16).saturating_add(digit);
            }
            if any && self.advance_if('}') {
                return Some(value);
            }
            self.pos = save;
            return None;
        }
        self.hex(4)
    }

    /// Legacy octal escape: up to three octal digits, at most `\377`.
    fn octal(&mut self, first: char) -> char {
        let mut value = first.to_digit(8).unwrap_or_default();
        for _ in 0..2 {
            match self.peek_char().and_then(|c| c.to_digit(8)) {
                Some(digit) if value * 8 + digit <= 0o377 => {
                    self.pos += 1;
                    value = value * 8 + digit;
                }
                _ => break,
            }
        }
        char::from_u32(value).unwrap_or_default()
    }
}

impl Iterator for Lexer {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token.token)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
