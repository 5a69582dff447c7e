use startcodes::{
    Pattern,
    dispatch::{StartChars, Unknown},
    tokenizer::{
        DefinitionError, Group, PositionTracking, Tokenizer, TokenizerConfig, TokenType,
    },
};

fn regex(source: &str) -> Pattern {
    Pattern::regex(source, "").unwrap()
}

fn json_like_types() -> Vec<TokenType> {
    vec![
        TokenType::new("WhiteSpace", regex(r"\s+"))
            .group(Group::Skipped)
            .line_breaks(true),
        // Alternations of words are enumerable, but the hint is used as is.
        TokenType::new("Boolean", regex("true|false")).start_chars_hint(['t', 'f']),
        TokenType::new("Function", Pattern::literal("function")),
        TokenType::new("Name", regex(r"\w+|\$")).line_breaks(false),
    ]
}

fn images(tokenizer: &Tokenizer, text: &str) -> Vec<(String, String)> {
    tokenizer
        .tokenize(text)
        .tokens
        .into_iter()
        .map(|token| {
            (
                tokenizer.token_type(token.token_type).name().to_string(),
                token.image,
            )
        })
        .collect()
}

#[test]
fn test_hinted_dispatch_falls_through_to_later_types() {
    let tokenizer = Tokenizer::new(
        vec![
            TokenType::new("WhiteSpace", regex(r"\s+"))
                .group(Group::Skipped)
                .line_breaks(true),
            TokenType::new("Boolean", regex("true|false")).start_chars_hint(['t', 'f']),
            TokenType::new("Function", Pattern::literal("function")),
            TokenType::new("Name", regex(r"\w+")),
        ],
        TokenizerConfig::default(),
    )
    .unwrap();

    assert_eq!(
        tokenizer.start_chars(1),
        &StartChars::Hinted(vec![u32::from('t'), u32::from('f')])
    );

    let result = tokenizer.tokenize("fool");
    assert!(result.errors.is_empty());
    assert_eq!(result.tokens.len(), 1);
    let token = &result.tokens[0];
    assert_eq!(tokenizer.token_type(token.token_type).name(), "Name");
    assert_eq!(token.image, "fool");
    assert_eq!((token.start_offset, token.end_offset), (0, 4));
}

#[test]
fn test_non_enumerable_types_are_always_attempted() {
    let tokenizer = Tokenizer::new(
        vec![
            TokenType::new("Boolean", regex("true|false")),
            TokenType::new("Function", Pattern::literal("function")),
            TokenType::new("Name", regex(r"[^\s()]+")),
        ],
        TokenizerConfig::default(),
    )
    .unwrap();

    assert_eq!(
        tokenizer.start_chars(2),
        &StartChars::Unknown(Unknown::NotEnumerable)
    );
    assert_eq!(
        images(&tokenizer, "fool"),
        vec![("Name".to_string(), "fool".to_string())]
    );
    assert_eq!(
        images(&tokenizer, "#x"),
        vec![("Name".to_string(), "#x".to_string())]
    );
}

#[test]
fn test_first_match_wins_in_priority_order() {
    let tokenizer = Tokenizer::new(json_like_types(), TokenizerConfig::default()).unwrap();
    assert_eq!(
        images(&tokenizer, "true function functional"),
        vec![
            ("Boolean".to_string(), "true".to_string()),
            ("Function".to_string(), "function".to_string()),
            ("Function".to_string(), "function".to_string()),
            ("Name".to_string(), "al".to_string()),
        ]
    );
}

#[test]
fn test_safe_mode_gives_the_same_tokens() {
    let text = "false fool\n$ function";
    let optimized = Tokenizer::new(json_like_types(), TokenizerConfig::default()).unwrap();
    let safe = Tokenizer::new(
        json_like_types(),
        TokenizerConfig {
            safe_mode: true,
            ..TokenizerConfig::default()
        },
    )
    .unwrap();
    assert!(safe.dispatch().is_none());
    assert!(optimized.dispatch().is_some());
    assert_eq!(optimized.tokenize(text), safe.tokenize(text));
}

#[test]
fn test_dispatch_table_of_tokenizer() {
    let tokenizer = Tokenizer::new(json_like_types(), TokenizerConfig::default()).unwrap();
    let dispatch = tokenizer.dispatch().unwrap();
    assert_eq!(dispatch.candidates(u32::from('f')), &[1, 2, 3]);
    assert_eq!(dispatch.candidates(u32::from('t')), &[1, 3]);
    assert_eq!(dispatch.candidates(u32::from('$')), &[3]);
    assert_eq!(dispatch.candidates(u32::from(' ')), &[0]);
    // Nothing starts with '#', and every type is optimized, so all are tried.
    assert_eq!(dispatch.candidates(u32::from('#')), &[0, 1, 2, 3]);
}

#[test]
fn test_ensure_optimizations() {
    let config = TokenizerConfig {
        ensure_optimizations: true,
        ..TokenizerConfig::default()
    };
    assert!(Tokenizer::new(json_like_types(), config).is_ok());
    assert_eq!(
        Tokenizer::new(vec![TokenType::new("Any", regex("."))], config).unwrap_err(),
        DefinitionError::Unoptimized {
            name: "Any".to_string()
        }
    );
}

#[test]
fn test_definition_errors() {
    assert_eq!(
        Tokenizer::new(Vec::new(), TokenizerConfig::default()).unwrap_err(),
        DefinitionError::NoTokenTypes
    );
    assert_eq!(
        Tokenizer::new(
            vec![TokenType::new("Maybe", regex("a*"))],
            TokenizerConfig::default()
        )
        .unwrap_err(),
        DefinitionError::EmptyMatch {
            name: "Maybe".to_string()
        }
    );
}

#[test]
fn test_groups() {
    let tokenizer = Tokenizer::new(
        vec![
            TokenType::new("Comment", regex("//[^\\n]*")).group(Group::Named("comments".into())),
            TokenType::new("WhiteSpace", regex(r"\s+")).group(Group::Skipped),
            TokenType::new("Word", regex("[a-z]+")),
        ],
        TokenizerConfig::default(),
    )
    .unwrap();

    let result = tokenizer.tokenize("a // note\nb");
    assert_eq!(
        result
            .tokens
            .iter()
            .map(|t| t.image.as_str())
            .collect::<Vec<_>>(),
        vec!["a", "b"]
    );
    let comments = &result.groups["comments"];
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].image, "// note");
}

#[test]
fn test_line_breaks_inferred_from_pattern() {
    let tokenizer = Tokenizer::new(
        vec![
            TokenType::new("NewLine", regex(r"\r?\n")),
            TokenType::new("Blank", regex("[ \\t]+")),
            TokenType::new("Word", regex("[a-z]+")),
        ],
        TokenizerConfig::default(),
    )
    .unwrap();
    assert!(tokenizer.tracks_line_breaks(0));
    assert!(!tokenizer.tracks_line_breaks(1));
    assert!(!tokenizer.tracks_line_breaks(2));

    let result = tokenizer.tokenize("ab\r\n  cd");
    let positions: Vec<_> = result
        .tokens
        .iter()
        .map(|t| (t.image.as_str(), t.start_line, t.start_column, t.end_line, t.end_column))
        .collect();
    assert_eq!(
        positions,
        vec![
            ("ab", Some(1), Some(1), Some(1), Some(2)),
            ("\r\n", Some(1), Some(3), Some(1), Some(4)),
            ("  ", Some(2), Some(1), Some(2), Some(2)),
            ("cd", Some(2), Some(3), Some(2), Some(4)),
        ]
    );
}

#[test]
fn test_line_breaks_inside_a_token_are_tracked() {
    let tokenizer = Tokenizer::new(
        vec![
            TokenType::new("Comment", regex(r"/\*[\s\S]*?\*/"))
                .group(Group::Named("comments".to_string())),
            TokenType::new("WhiteSpace", regex(r"\s+")).group(Group::Skipped),
            TokenType::new("Word", regex("[a-z]+")),
        ],
        TokenizerConfig::default(),
    )
    .unwrap();
    // The comment cannot start with a line terminator but can contain one.
    assert!(tokenizer.tracks_line_breaks(0));
    assert!(tokenizer.tracks_line_breaks(1));
    assert!(!tokenizer.tracks_line_breaks(2));

    let result = tokenizer.tokenize("/* a\nb */ x");
    let comment = &result.groups["comments"][0];
    assert_eq!(comment.image, "/* a\nb */");
    assert_eq!((comment.end_line, comment.end_column), (Some(2), Some(4)));

    let word = &result.tokens[0];
    assert_eq!(word.image, "x");
    assert_eq!(word.start_offset, 10);
    assert_eq!((word.start_line, word.start_column), (Some(2), Some(6)));
}

#[test]
fn test_long_tokens_are_matched() {
    let tokenizer = Tokenizer::new(
        vec![
            TokenType::new("String", regex(r#""(?:[^\\"]|\\.)*""#)),
            TokenType::new("Word", regex("[a-z]+")),
        ],
        TokenizerConfig::default(),
    )
    .unwrap();
    let text = format!("\"{}\"", "x".repeat(5_000));
    let result = tokenizer.tokenize(&text);
    assert!(result.errors.is_empty());
    assert_eq!(result.tokens.len(), 1);
    assert_eq!(result.tokens[0].end_offset, 5_002);
}

#[test]
fn test_position_tracking() {
    let types = || vec![TokenType::new("Word", regex("[a-z]+"))];
    let only_start = Tokenizer::new(
        types(),
        TokenizerConfig {
            position_tracking: PositionTracking::OnlyStart,
            ..TokenizerConfig::default()
        },
    )
    .unwrap();
    let token = &only_start.tokenize("abc").tokens[0];
    assert_eq!((token.start_line, token.start_column), (Some(1), Some(1)));
    assert_eq!((token.end_line, token.end_column), (None, None));

    let only_offset = Tokenizer::new(
        types(),
        TokenizerConfig {
            position_tracking: PositionTracking::OnlyOffset,
            ..TokenizerConfig::default()
        },
    )
    .unwrap();
    let token = &only_offset.tokenize("abc").tokens[0];
    assert_eq!(token.start_line, None);
    assert_eq!((token.start_offset, token.end_offset), (0, 3));
}

#[test]
fn test_unmatched_characters_are_reported_once_per_run() {
    let tokenizer = Tokenizer::new(
        vec![TokenType::new("Word", regex("[a-z]+"))],
        TokenizerConfig::default(),
    )
    .unwrap();
    let result = tokenizer.tokenize("ab%%!cd#");
    assert_eq!(
        result
            .tokens
            .iter()
            .map(|t| t.image.as_str())
            .collect::<Vec<_>>(),
        vec!["ab", "cd"]
    );
    assert_eq!(result.errors.len(), 2);
    assert_eq!(
        (result.errors[0].offset, result.errors[0].length),
        (2, 3)
    );
    assert_eq!(result.errors[0].column, Some(3));
    assert_eq!(
        result.errors[0].message,
        "unexpected character: ->%<- at offset: 2, skipped 3 characters."
    );
    assert_eq!(
        (result.errors[1].offset, result.errors[1].length),
        (7, 1)
    );
}
