//! Lexer for Self source text using logos.
//!
//! Produces [`Token<SelfToken>`]s with byte offsets. Comments are kept as
//! trivia tokens; [`TokenCursor`] skips them. A few kinds are settled after
//! scanning:
//! - a lone `|` is a [`SelfToken::Bar`], a lone `=` an [`SelfToken::Equal`]
//!   and `<-` an [`SelfToken::Arrow`]; longer runs stay operators
//! - `-` immediately followed by digits becomes part of the number unless
//!   the previous significant token ends an operand, so `n-1` subtracts
//!   while `abs: -5` passes a negative literal

use logos::Logos;

use super::token::SelfToken;
use crate::error::LexError;
use crate::grammar::{Token, TokenCursor};

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r#""[^"]*""#)]
    Comment,

    // === Reserved words ===
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("self")]
    SelfKw,
    #[token("resend")]
    Resend,

    // === Names ===
    #[regex(r"[a-z_][A-Za-z0-9_]*")]
    Identifier,
    #[regex(r"[a-z][A-Za-z0-9_]*:")]
    KeywordLowercase,
    #[regex(r"[A-Z_][A-Za-z0-9_]*:")]
    Keyword,
    #[regex(r":[a-z_][A-Za-z0-9_]*")]
    Argument,

    // === Literals ===
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[rR][0-9a-zA-Z]+")]
    Number,
    #[regex(r"'([^'\\\n]|\\.)*'")]
    Text,

    // === Punctuation ===
    #[regex(r"[!@#$%^&*\-+=~/?<>,;|\\]+")]
    Operator,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(".")]
    Dot,
}

/// Lex source text into tokens, comments included.
pub fn lex(source: &str) -> Result<Vec<Token<SelfToken>>, LexError> {
    let mut tokens: Vec<Token<SelfToken>> = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let raw = result.map_err(|()| unexpected(source, span.start))?;
        let kind = classify(raw, slice);

        if kind == SelfToken::Number && is_sign(&tokens, span.start) {
            if let Some(sign) = tokens.pop() {
                tokens.push(Token::new(kind, format!("-{}", slice), sign.offset));
                continue;
            }
        }
        tokens.push(Token::new(kind, slice, span.start));
    }

    Ok(tokens)
}

/// Lex source text into a cursor ready for parsing.
pub fn tokenize(source: &str) -> Result<TokenCursor<SelfToken>, LexError> {
    lex(source).map(TokenCursor::new)
}

fn classify(raw: RawToken, slice: &str) -> SelfToken {
    match raw {
        RawToken::Comment => SelfToken::Comment,
        RawToken::True | RawToken::False => SelfToken::Boolean,
        RawToken::SelfKw => SelfToken::SelfKw,
        RawToken::Resend => SelfToken::Resend,
        RawToken::Identifier => SelfToken::Identifier,
        RawToken::KeywordLowercase => SelfToken::KeywordLowercase,
        RawToken::Keyword => SelfToken::Keyword,
        RawToken::Argument => SelfToken::Argument,
        RawToken::Number => SelfToken::Number,
        RawToken::Text => SelfToken::Text,
        RawToken::Operator => match slice {
            "|" => SelfToken::Bar,
            "=" => SelfToken::Equal,
            "<-" => SelfToken::Arrow,
            _ => SelfToken::Operator,
        },
        RawToken::LParen => SelfToken::LParen,
        RawToken::RParen => SelfToken::RParen,
        RawToken::LBracket => SelfToken::LBracket,
        RawToken::RBracket => SelfToken::RBracket,
        RawToken::Dot => SelfToken::Dot,
    }
}

/// Whether the last token is a `-` that signs a number starting at `start`.
fn is_sign(tokens: &[Token<SelfToken>], start: usize) -> bool {
    let Some((last, before)) = tokens.split_last() else {
        return false;
    };
    if last.kind != SelfToken::Operator || &*last.text != "-" || last.offset + 1 != start {
        return false;
    }
    let previous = before
        .iter()
        .rev()
        .find(|token| token.kind != SelfToken::Comment);
    !previous.is_some_and(|token| token.kind.ends_operand())
}

fn unexpected(source: &str, offset: usize) -> LexError {
    let message = match source[offset..].chars().next() {
        Some('\'') => "unterminated text literal".to_string(),
        Some('"') => "unterminated comment".to_string(),
        Some(':') => "`:` must start an argument name".to_string(),
        Some(c) if c.is_ascii_uppercase() => {
            "capitalized names are only valid as keywords".to_string()
        }
        Some(c) => format!("unexpected character `{}`", c),
        None => "unexpected end of input".to_string(),
    };
    LexError::new(message, offset)
}

// ═══════════════════════════════════════════════════════════════════════
// Text literals
// ═══════════════════════════════════════════════════════════════════════

/// Decode the escapes of a text literal body (without its quotes).
pub fn unescape_text(body: &str) -> Result<String, String> {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        let decoded = match chars.next() {
            Some('t') => '\t',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\u{c}',
            Some('b') => '\u{8}',
            Some('0') => '\0',
            Some('\'') => '\'',
            Some('"') => '"',
            Some('\\') => '\\',
            Some('x') => code_point(&mut chars, 2, 16)?,
            Some('d') => code_point(&mut chars, 3, 10)?,
            Some('o') => code_point(&mut chars, 3, 8)?,
            Some(other) => return Err(format!("unknown escape `\\{}`", other)),
            None => return Err("text ends with a lone `\\`".to_string()),
        };
        result.push(decoded);
    }

    Ok(result)
}

fn code_point(chars: &mut std::str::Chars<'_>, digits: usize, radix: u32) -> Result<char, String> {
    let text: String = chars.by_ref().take(digits).collect();
    if text.chars().count() != digits || !text.chars().all(|c| c.is_digit(radix)) {
        return Err(format!("escape needs {} base-{} digits, got `{}`", digits, radix, text));
    }
    u32::from_str_radix(&text, radix)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| format!("escape `{}` is not a character", text))
}
