use pretty_assertions::assert_eq;
use protoself::syntax::{lex, tokenize};
use protoself::*;

// Helper to lex into (kind, text) pairs
fn pairs(src: &str) -> Vec<(SelfToken, String)> {
    lex(src)
        .expect("lex failed")
        .into_iter()
        .map(|t| (t.kind, t.text.to_string()))
        .collect()
}

fn kinds(src: &str) -> Vec<SelfToken> {
    pairs(src).into_iter().map(|(kind, _)| kind).collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Names and keywords
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_lex_names() {
    assert_eq!(
        kinds("size self resend true false selfish _tmp"),
        vec![
            SelfToken::Identifier,
            SelfToken::SelfKw,
            SelfToken::Resend,
            SelfToken::Boolean,
            SelfToken::Boolean,
            SelfToken::Identifier,
            SelfToken::Identifier,
        ]
    );
}

#[test]
fn test_lex_keywords_and_arguments() {
    assert_eq!(
        pairs("at: 1 Put: 2 plus:And: :x _IntAdd:"),
        vec![
            (SelfToken::KeywordLowercase, "at:".to_string()),
            (SelfToken::Number, "1".to_string()),
            (SelfToken::Keyword, "Put:".to_string()),
            (SelfToken::Number, "2".to_string()),
            (SelfToken::KeywordLowercase, "plus:".to_string()),
            (SelfToken::Keyword, "And:".to_string()),
            (SelfToken::Argument, ":x".to_string()),
            (SelfToken::Keyword, "_IntAdd:".to_string()),
        ]
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Operators and punctuation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_lex_operator_runs() {
    assert_eq!(
        pairs("| = <- || == <= +"),
        vec![
            (SelfToken::Bar, "|".to_string()),
            (SelfToken::Equal, "=".to_string()),
            (SelfToken::Arrow, "<-".to_string()),
            (SelfToken::Operator, "||".to_string()),
            (SelfToken::Operator, "==".to_string()),
            (SelfToken::Operator, "<=".to_string()),
            (SelfToken::Operator, "+".to_string()),
        ]
    );
}

#[test]
fn test_lex_punctuation() {
    assert_eq!(
        kinds("( ) [ ] ."),
        vec![
            SelfToken::LParen,
            SelfToken::RParen,
            SelfToken::LBracket,
            SelfToken::RBracket,
            SelfToken::Dot,
        ]
    );
}

// ═══════════════════════════════════════════════════════════════════════
// Literals
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_lex_numbers() {
    assert_eq!(
        pairs("42 16r27fe 1.5 2e10"),
        vec![
            (SelfToken::Number, "42".to_string()),
            (SelfToken::Number, "16r27fe".to_string()),
            (SelfToken::Number, "1.5".to_string()),
            (SelfToken::Number, "2e10".to_string()),
        ]
    );
}

#[test]
fn test_statement_dot_after_number() {
    assert_eq!(
        kinds("1. 2"),
        vec![SelfToken::Number, SelfToken::Dot, SelfToken::Number]
    );
}

#[test]
fn test_negative_literals() {
    assert_eq!(
        pairs("abs: -1"),
        vec![
            (SelfToken::KeywordLowercase, "abs:".to_string()),
            (SelfToken::Number, "-1".to_string()),
        ]
    );
    assert_eq!(
        pairs("x -1"),
        vec![
            (SelfToken::Identifier, "x".to_string()),
            (SelfToken::Operator, "-".to_string()),
            (SelfToken::Number, "1".to_string()),
        ]
    );
    assert_eq!(
        pairs("(-1)"),
        vec![
            (SelfToken::LParen, "(".to_string()),
            (SelfToken::Number, "-1".to_string()),
            (SelfToken::RParen, ")".to_string()),
        ]
    );
    assert_eq!(kinds(") - 1"), vec![SelfToken::RParen, SelfToken::Operator, SelfToken::Number]);
}

#[test]
fn test_lex_text_and_comment() {
    let tokens = lex("'it\\'s' \"a comment\" 'x'").unwrap();
    assert_eq!(tokens[0].kind, SelfToken::Text);
    assert_eq!(&*tokens[0].text, "'it\\'s'");
    assert_eq!(tokens[1].kind, SelfToken::Comment);
    assert_eq!(tokens[2].offset, 20);
}

#[test]
fn test_cursor_skips_comments() {
    let mut cursor = tokenize("\"lead\" a \"mid\" b").unwrap();
    assert_eq!(cursor.advance().map(|t| t.text.to_string()), Some("a".to_string()));
    assert_eq!(cursor.advance().map(|t| t.text.to_string()), Some("b".to_string()));
    assert!(cursor.peek().is_none());
}

// ═══════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_lex_errors() {
    let err = lex("x 'open").unwrap_err();
    assert_eq!(err.offset, 2);
    assert_eq!(err.message, "unterminated text literal");

    let err = lex("\"never closed").unwrap_err();
    assert_eq!(err.message, "unterminated comment");

    let err = lex("Foo").unwrap_err();
    assert_eq!(err.offset, 0);
    assert_eq!(err.message, "capitalized names are only valid as keywords");

    let err = lex("a : b").unwrap_err();
    assert_eq!(err.offset, 2);
    assert_eq!(err.to_string(), "Lex error: `:` must start an argument name at offset 2");
}

#[test]
fn test_raw_newline_in_text_is_an_error() {
    assert!(lex("'line\nbreak'").is_err());
}
