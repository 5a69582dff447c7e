use super::{
    Error, Result,
    ast::{Assertion, Flags, Node, Pattern, Quantifier},
    charset::CharSet,
    lexer::{GroupKind, Lexer, PosToken, Token},
};

/// Parses a JavaScript-style regular expression into a [`Pattern`].
///
/// # Errors
///
/// If the pattern string cannot be parsed, an [`Error`] is returned.
pub fn parse_pattern(pattern: &str, flags: Flags) -> Result<Pattern> {
    Parser::new(pattern, flags).parse()
}

/// Converts a pattern string into its structural model.
pub struct Parser {
    lexer: Lexer,
    flags: Flags,
    capture_count: usize,
}

impl Parser {
    /// Creates a new parser for the given `pattern`.
    #[must_use]
    pub fn new(pattern: &str, flags: Flags) -> Self {
        Parser {
            lexer: Lexer::new(pattern),
            flags,
            capture_count: 0,
        }
    }

    /// Converts the pattern into a [`Pattern`], consuming the parser.
    ///
    /// # Errors
    ///
    /// If the pattern string is invalid, an [`Error`] is returned.
    pub fn parse(mut self) -> Result<Pattern> {
        let root = self.parse_alternation()?;

        if let Some(PosToken { pos, token }) = self.lexer.peek()? {
            return Err(Error::UnexpectedToken {
                pos,
                lit: token.to_char(),
            });
        }

        Ok(Pattern::new(root, self.flags, self.capture_count))
    }

    fn parse_alternation(&mut self) -> Result<Node> {
        let mut branches = vec![self.parse_sequence()?];

        while self.lexer.consume(Token::Pipe)? {
            branches.push(self.parse_sequence()?);
        }

        Ok(if branches.len() == 1 {
            branches.swap_remove(0)
        } else {
            Node::Alternation(branches)
        })
    }

    fn parse_sequence(&mut self) -> Result<Node> {
        let mut items = Vec::new();

        while let Some(PosToken { token, .. }) = self.lexer.peek()?
            && !matches!(token, Token::Pipe | Token::RParen)
        {
            items.push(self.parse_item()?);
        }

        Ok(if items.len() == 1 {
            items.swap_remove(0)
        } else {
            Node::Concatenation(items)
        })
    }

    fn parse_item(&mut self) -> Result<Node> {
        let mut item = self.parse_base()?;

        while let Some(PosToken { pos, token }) = self.lexer.peek()? {
            let quantifier = match token {
                Token::Star => Quantifier::STAR,
                Token::Plus => Quantifier::PLUS,
                Token::Question => Quantifier::QUESTION,
                Token::Braces(min, max) => {
                    if max.is_some_and(|max| max < min) {
                        return Err(Error::QuantifierRange { pos });
                    }
                    Quantifier::new(min, max)
                }
                _ => break,
            };
            self.lexer.next_token()?;

            let quantifier = if self.lexer.consume(Token::Question)? {
                quantifier.lazy()
            } else {
                quantifier
            };

            match item {
                Node::Repetition { .. }
                | Node::Assertion(
                    Assertion::Start
                    | Assertion::End
                    | Assertion::WordBoundary
                    | Assertion::NonWordBoundary
                    | Assertion::Lookbehind { .. },
                ) => return Err(Error::NothingToRepeat { pos }),
                _ => {}
            }

            item = Node::Repetition {
                inner: Box::new(item),
                quantifier,
            };
        }

        Ok(item)
    }

    fn parse_base(&mut self) -> Result<Node> {
        let Some(PosToken { pos, token }) = self.lexer.next_token()? else {
            return Err(Error::ExpectedToken {
                pos: self.lexer.tell(),
                expected: Token::RParen,
                actual: None,
            });
        };

        match token {
            Token::Literal(c) | Token::EscapedLiteral(c) => Ok(Node::Literal(c)),
            Token::Any => Ok(Node::AnyChar),
            Token::Class(c) => CharSet::shorthand(c)
                .map(Node::Class)
                .ok_or(Error::UnexpectedToken { pos, lit: c }),
            Token::Caret => Ok(Node::Assertion(Assertion::Start)),
            Token::Dollar => Ok(Node::Assertion(Assertion::End)),
            Token::WordBoundary => Ok(Node::Assertion(Assertion::WordBoundary)),
            Token::NonWordBoundary => Ok(Node::Assertion(Assertion::NonWordBoundary)),
            Token::LBracket => self.parse_set(),
            Token::LParen(kind) => self.parse_group(kind),
            Token::Backreference(index) => Ok(Node::Backreference(index)),
            Token::Star | Token::Plus | Token::Question | Token::Braces(..) => {
                Err(Error::NothingToRepeat { pos })
            }
            Token::RParen | Token::RBracket | Token::Pipe | Token::Minus => {
                Err(Error::UnexpectedToken {
                    pos,
                    lit: token.to_char(),
                })
            }
        }
    }

    fn parse_group(&mut self, kind: GroupKind) -> Result<Node> {
        let capture = if kind == GroupKind::Capture {
            self.capture_count += 1;
            Some(self.capture_count)
        } else {
            None
        };

        let inner = Box::new(self.parse_alternation()?);
        self.lexer.expect(Token::RParen)?;

        Ok(match kind {
            GroupKind::Capture | GroupKind::NonCapture => Node::Group { capture, inner },
            GroupKind::Lookahead | GroupKind::NegativeLookahead => {
                Node::Assertion(Assertion::Lookahead {
                    negated: kind == GroupKind::NegativeLookahead,
                    inner,
                })
            }
            GroupKind::Lookbehind | GroupKind::NegativeLookbehind => {
                Node::Assertion(Assertion::Lookbehind {
                    negated: kind == GroupKind::NegativeLookbehind,
                    inner,
                })
            }
        })
    }

    fn parse_set(&mut self) -> Result<Node> {
        let mut set = CharSet::new();
        let negated = self.lexer.consume(Token::Caret)?;

        while let Some(PosToken { pos, token }) = self.lexer.until(Token::RBracket)? {
            if let Token::Class(c) = token {
                set.add_shorthand(c);
                continue;
            }

            let start = token.to_char();
            if !self.lexer.consume(Token::Minus)? {
                set.add_char(start);
                continue;
            }

            match self.lexer.peek()?.map(|next| next.token) {
                // [a-]
                Some(Token::RBracket) | None => {
                    set.add_char(start);
                    set.add_char('-');
                }
                // [\w-a] is a union with '-', not a range
                Some(Token::Class(_)) => {
                    set.add_char(start);
                    set.add_char('-');
                }
                Some(end) => {
                    self.lexer.next_token()?;
                    set.add_range(start, end.to_char())
                        .map_err(|err| Error::CharSet { pos, err })?;
                }
            }
        }

        self.lexer.expect(Token::RBracket)?;

        if negated {
            set.invert();
        }

        Ok(Node::Class(set))
    }
}
