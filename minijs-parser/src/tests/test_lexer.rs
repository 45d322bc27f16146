use crate::lexer::{tokenize, tokenize_with, LexerConfig};
use crate::token::{Literal, TokenKind};
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn listing(source: &str) -> Vec<String> {
    tokenize(source)
        .unwrap()
        .iter()
        .filter(|token| !token.is(TokenKind::Eof))
        .map(|token| token.to_string())
        .collect()
}

#[test]
fn test_declaration_token_listing() {
    assert_eq!(
        listing("let x = 1 + 2;"),
        vec!["LET", "ID(x)", "ASSIGN", "NUMBER(1)", "PLUS", "NUMBER(2)", "SEMICOLON"]
    );
}

#[test]
fn test_stream_ends_with_eof() {
    let tokens = tokenize("x").unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(tokens[1].is(TokenKind::Eof));

    let empty = tokenize("").unwrap();
    assert_eq!(empty.len(), 1);
    assert!(empty[0].is(TokenKind::Eof));
}

#[test]
fn test_multi_character_operators_win() {
    assert_eq!(
        kinds("== != >= <= && || => = > < !"),
        vec![
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::GreaterEqual,
            TokenKind::LessEqual,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Arrow,
            TokenKind::Assign,
            TokenKind::Greater,
            TokenKind::Less,
            TokenKind::Not,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_adjacent_operators_without_spaces() {
    assert_eq!(
        kinds("a>=b"),
        vec![
            TokenKind::Identifier,
            TokenKind::GreaterEqual,
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
    assert_eq!(
        kinds("!=="),
        vec![TokenKind::NotEquals, TokenKind::Assign, TokenKind::Eof]
    );
}

#[test]
fn test_numbers_are_floats() {
    let tokens = tokenize("42 3.14 .5").unwrap();
    assert_eq!(tokens[0].literal, Literal::Number(42.0));
    assert_eq!(tokens[1].literal, Literal::Number(3.14));
    assert_eq!(tokens[2].literal, Literal::Number(0.5));
}

#[test]
fn test_trailing_dot_is_separate_token() {
    assert_eq!(
        kinds("1."),
        vec![TokenKind::Number, TokenKind::Dot, TokenKind::Eof]
    );
}

#[test]
fn test_string_quotes_stripped_escapes_kept() {
    let tokens = tokenize(r#""hello \"there\"\n""#).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].text(), Some(r#"hello \"there\"\n"#));
}

#[test]
fn test_keywords_are_reclassified() {
    assert_eq!(
        kinds("if else while function return var let const console log"),
        vec![
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Function,
            TokenKind::Return,
            TokenKind::Var,
            TokenKind::Let,
            TokenKind::Const,
            TokenKind::Console,
            TokenKind::Log,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("break for switch case default try catch throw true false"),
        vec![
            TokenKind::Break,
            TokenKind::For,
            TokenKind::Switch,
            TokenKind::Case,
            TokenKind::Default,
            TokenKind::Try,
            TokenKind::Catch,
            TokenKind::Throw,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keyword_prefix_is_identifier() {
    let tokens = tokenize("iffy letter _private").unwrap();
    assert!(tokens[..3].iter().all(|t| t.is(TokenKind::Identifier)));
    assert_eq!(tokens[0].text(), Some("iffy"));
}

#[test]
fn test_accented_identifiers() {
    let tokens = tokenize("let número = 1; función;").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].text(), Some("número"));
    assert_eq!(tokens[5].text(), Some("función"));
}

#[test]
fn test_line_and_column_tracking() {
    let tokens = tokenize("let a = 1;\n  a = 2;").unwrap();
    let a = &tokens[5];
    assert_eq!(a.text(), Some("a"));
    assert_eq!((a.line, a.column), (2, 3));

    let first = &tokens[0];
    assert_eq!((first.line, first.column), (1, 1));
}

#[test]
fn test_columns_count_characters() {
    let tokens = tokenize("\"é\" x").unwrap();
    assert_eq!(tokens[1].column, 5);
}

#[test]
fn test_comments_dropped_by_default() {
    assert_eq!(
        kinds("x; // trailing words\ny;"),
        vec![
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comments_emitted_when_configured() {
    let tokens = tokenize_with("x; // note\ny;", LexerConfig::with_comments()).unwrap();
    let comment = &tokens[2];
    assert_eq!(comment.kind, TokenKind::Comment);
    assert_eq!(comment.text(), Some("note"));
    assert_eq!((comment.line, comment.column), (1, 4));
    assert_eq!(tokens[3].line, 2);
}

#[test]
fn test_illegal_character_reports_position() {
    let err = tokenize("let x = 1;\nlet y = @;").unwrap_err();
    assert_eq!(err.character, '@');
    assert_eq!((err.line, err.column), (2, 9));
    assert_eq!(
        err.to_string(),
        "lexical error at line 2, column 9: illegal character '@'"
    );
}

#[test]
fn test_lone_ampersand_and_pipe_are_illegal() {
    assert_eq!(tokenize("a & b").unwrap_err().character, '&');
    assert_eq!(tokenize("a | b").unwrap_err().character, '|');
}

#[test]
fn test_unterminated_string_is_illegal() {
    let err = tokenize("let s = \"open;").unwrap_err();
    assert_eq!(err.character, '"');
    assert_eq!(err.column, 9);
}

#[test]
fn test_carriage_returns_are_whitespace() {
    let tokens = tokenize("a;\r\nb;").unwrap();
    assert_eq!(tokens[2].line, 2);
    assert_eq!(tokens[2].column, 1);
}

#[test]
fn test_columns_on_a_long_single_line() {
    let source = "x;".repeat(50_000);
    let tokens = tokenize(&source).unwrap();
    assert_eq!(tokens.len(), 100_001);
    let last = &tokens[tokens.len() - 2];
    assert_eq!(last.kind, TokenKind::Semicolon);
    assert_eq!((last.line, last.column), (1, 100_000));
    assert_eq!(tokens[tokens.len() - 1].column, 100_001);
}

#[test]
fn test_columns_count_characters_and_reset_per_line() {
    let tokens = tokenize("let é = \"ü\"; y\nz").unwrap();
    let y = tokens.iter().find(|t| t.lexeme == "y").unwrap();
    assert_eq!((y.line, y.column), (1, 14));
    let z = tokens.iter().find(|t| t.lexeme == "z").unwrap();
    assert_eq!((z.line, z.column), (2, 1));
}
