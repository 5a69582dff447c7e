use startcodes::{
    Error,
    ast::{Assertion, Flags, Node, Pattern, PatternSource, Quantifier},
    charset::{self, CharSet},
    lexer::Token,
    parse_pattern,
};

fn parse_ok(pattern: &str) -> Pattern {
    parse_pattern(pattern, Flags::default())
        .unwrap_or_else(|err| panic!("Parser failed for pattern {pattern:?}: {err}"))
}

fn parse_err(pattern: &str) -> Error {
    match parse_pattern(pattern, Flags::default()) {
        Ok(ast) => panic!("Parser accepted {pattern:?} as {ast:?}"),
        Err(err) => err,
    }
}

fn lit(c: char) -> Node {
    Node::Literal(c)
}

fn seq(items: &[Node]) -> Node {
    Node::Concatenation(items.to_vec())
}

fn repeated(item: Node, quantifier: Quantifier) -> Node {
    Node::Repetition {
        inner: Box::new(item),
        quantifier,
    }
}

fn group(capture: Option<usize>, inner: Node) -> Node {
    Node::Group {
        capture,
        inner: Box::new(inner),
    }
}

fn make_set(chars: &[char], ranges: &[(char, char)], negated: bool) -> CharSet {
    let mut set = CharSet::new();
    for &c in chars {
        set.add_char(c);
    }
    for &(s, e) in ranges {
        set.add_range(s, e).unwrap();
    }
    if negated {
        set.invert();
    }
    set
}

#[test]
fn test_simple_sequence_parser() {
    assert_eq!(parse_ok("abc"), seq(&[lit('a'), lit('b'), lit('c')]));
    assert_eq!(parse_ok("a.c"), seq(&[lit('a'), Node::AnyChar, lit('c')]));
    assert_eq!(
        parse_ok(r"a\dc"),
        seq(&[
            lit('a'),
            Node::Class(CharSet::shorthand('d').unwrap()),
            lit('c')
        ])
    );
    assert_eq!(parse_ok("a"), lit('a'));
    assert_eq!(parse_ok(""), seq(&[]));
}

#[test]
fn test_assertions_parser() {
    assert_eq!(
        parse_ok(r"^$\b\Ba"),
        seq(&[
            Node::Assertion(Assertion::Start),
            Node::Assertion(Assertion::End),
            Node::Assertion(Assertion::WordBoundary),
            Node::Assertion(Assertion::NonWordBoundary),
            lit('a'),
        ])
    );
    assert_eq!(
        parse_ok("(?=a)(?<!b)"),
        seq(&[
            Node::Assertion(Assertion::Lookahead {
                negated: false,
                inner: Box::new(lit('a')),
            }),
            Node::Assertion(Assertion::Lookbehind {
                negated: true,
                inner: Box::new(lit('b')),
            }),
        ])
    );
}

#[test]
fn test_alternation_parser() {
    assert_eq!(parse_ok("w|A"), Node::Alternation(vec![lit('w'), lit('A')]));
    assert_eq!(
        parse_ok("ab|"),
        Node::Alternation(vec![seq(&[lit('a'), lit('b')]), seq(&[])])
    );
    assert_eq!(
        parse_ok("(a|b)c"),
        seq(&[
            group(Some(1), Node::Alternation(vec![lit('a'), lit('b')])),
            lit('c')
        ])
    );
}

#[test]
fn test_quantifiers_parser() {
    assert_eq!(
        parse_ok("b*a"),
        seq(&[repeated(lit('b'), Quantifier::STAR), lit('a')])
    );
    assert_eq!(parse_ok("a+"), repeated(lit('a'), Quantifier::PLUS));
    assert_eq!(parse_ok("a?"), repeated(lit('a'), Quantifier::QUESTION));
    assert_eq!(
        parse_ok("a*?"),
        repeated(lit('a'), Quantifier::STAR.lazy())
    );
    assert_eq!(
        parse_ok("a{2,4}"),
        repeated(lit('a'), Quantifier::new(2, Some(4)))
    );
    assert_eq!(
        parse_ok("a{3}"),
        repeated(lit('a'), Quantifier::new(3, Some(3)))
    );
    assert_eq!(parse_ok("a{,3}"), seq(&[lit('a'), lit('{'), lit(','), lit('3'), lit('}')]));
}

#[test]
fn test_groups_parser() {
    assert_eq!(
        parse_ok("(?:ab)+"),
        repeated(group(None, seq(&[lit('a'), lit('b')])), Quantifier::PLUS)
    );
    let pattern = parse_ok(r"(a)(?<x>b)\2");
    assert_eq!(pattern.capture_count(), 2);
    assert_eq!(
        pattern,
        seq(&[
            group(Some(1), lit('a')),
            group(Some(2), lit('b')),
            Node::Backreference(2)
        ])
    );
    // Backreferences may refer forward.
    assert_eq!(
        parse_ok(r"\1(a)"),
        seq(&[Node::Backreference(1), group(Some(1), lit('a'))])
    );
    assert_eq!(
        parse_ok(r"(?<q>['])\k<q>"),
        seq(&[
            group(Some(1), Node::Class(make_set(&['\''], &[], false))),
            Node::Backreference(1)
        ])
    );
    // Without a second group, \2 is an octal escape.
    assert_eq!(
        parse_ok(r"(a)\2"),
        seq(&[group(Some(1), lit('a')), lit('\u{2}')])
    );
}

#[test]
fn test_sets_parser() {
    assert_eq!(
        parse_ok(r"[\n-\r]"),
        Node::Class(make_set(&[], &[('\n', '\r')], false))
    );
    let mut expected = CharSet::new();
    expected.add_range('a', 'z').unwrap();
    expected.add_char('_');
    expected.invert();
    assert_eq!(parse_ok("[^a-z_]"), Node::Class(expected));
    assert_eq!(
        parse_ok("[a-]"),
        Node::Class(make_set(&['a', '-'], &[], false))
    );
    assert_eq!(
        parse_ok("[-a]"),
        Node::Class(make_set(&['-', 'a'], &[], false))
    );
    assert_eq!(parse_ok("[]"), Node::Class(CharSet::new()));
    assert_eq!(
        parse_ok(r"[\]]"),
        Node::Class(make_set(&[']'], &[], false))
    );
}

#[test]
fn test_shorthand_inside_set_parser() {
    let Node::Class(set) = parse_ok(r"[\d_]").root().clone() else {
        panic!("expected a class");
    };
    assert!(!set.is_unbounded());
    assert!(set.matches(u32::from('7'), false));
    assert!(set.matches(u32::from('_'), false));
    assert!(!set.matches(u32::from('a'), false));

    let Node::Class(set) = parse_ok(r"[\Wa]").root().clone() else {
        panic!("expected a class");
    };
    assert!(!set.is_negated());
    assert!(set.is_unbounded());
    assert!(set.matches(u32::from(' '), false));
    assert!(set.matches(u32::from('a'), false));
    assert!(!set.matches(u32::from('b'), false));
}

#[test]
fn test_literal_patterns() {
    assert_eq!(
        Pattern::literal("a-z"),
        seq(&[lit('a'), lit('-'), lit('z')])
    );
    assert_eq!(Pattern::literal("x"), seq(&[lit('x')]));
    assert_eq!(
        Pattern::build(&PatternSource::Literal("(".to_string()), Flags::default()),
        Ok(Pattern::literal("("))
    );
    assert_eq!(
        Pattern::build(&PatternSource::Regex("(".to_string()), Flags::default()),
        Err(Error::ExpectedToken {
            pos: 1,
            expected: Token::RParen,
            actual: None
        })
    );
}

#[test]
fn test_flags_parser() {
    let pattern = Pattern::regex("a", "gi").unwrap();
    assert!(pattern.flags().ignore_case);
    assert!(pattern.flags().global);
    assert!(!pattern.flags().multiline);
    assert_eq!("ix".parse::<Flags>(), Err(Error::UnknownFlag('x')));
    assert_eq!("ii".parse::<Flags>(), Err(Error::DuplicateFlag('i')));
}

#[test]
fn test_error_parser() {
    assert_eq!(parse_err("*a"), Error::NothingToRepeat { pos: 0 });
    assert_eq!(parse_err("a|+"), Error::NothingToRepeat { pos: 2 });
    assert_eq!(parse_err("a**"), Error::NothingToRepeat { pos: 2 });
    assert_eq!(parse_err("^*"), Error::NothingToRepeat { pos: 1 });
    assert_eq!(parse_err("a{3,1}"), Error::QuantifierRange { pos: 1 });
    assert_eq!(
        parse_err("a)"),
        Error::UnexpectedToken { pos: 1, lit: ')' }
    );
    assert_eq!(
        parse_err("[abc"),
        Error::ExpectedToken {
            pos: 4,
            expected: Token::RBracket,
            actual: None
        }
    );
    assert_eq!(
        parse_err("[z-a]"),
        Error::CharSet {
            pos: 1,
            err: charset::Error::Range('z', 'a')
        }
    );
    assert_eq!(parse_err(r"(?<name>a)\k<nome>"), Error::GroupName { pos: 10 });
}
