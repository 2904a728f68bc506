//! Token kinds of the Self surface syntax

use std::fmt;

use crate::grammar::TokenKind;

/// Kind of a Self token.
///
/// Discriminants are dense and start at 1; they are the ordinals used in
/// FIRST sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SelfToken {
    /// Lowercase identifier: `size`, `n`
    Identifier = 1,
    /// `resend`
    Resend,
    /// `self`
    SelfKw,
    /// Lowercase keyword part: `at:`
    KeywordLowercase,
    /// Capitalized keyword part: `Put:`, `_IntAdd:`
    Keyword,
    /// Argument slot marker: `:x`
    Argument,
    /// Run of operator characters: `+`, `<=`, `&&`
    Operator,
    /// `true` or `false`
    Boolean,
    /// Integer, radix or float literal
    Number,
    /// Single-quoted text literal
    Text,
    /// Double-quoted comment
    Comment,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// A lone `|`
    Bar,
    /// `.`
    Dot,
    /// A lone `=`
    Equal,
    /// `<-`
    Arrow,
}

impl SelfToken {
    /// Every kind, in ordinal order.
    pub const ALL: [SelfToken; 19] = [
        SelfToken::Identifier,
        SelfToken::Resend,
        SelfToken::SelfKw,
        SelfToken::KeywordLowercase,
        SelfToken::Keyword,
        SelfToken::Argument,
        SelfToken::Operator,
        SelfToken::Boolean,
        SelfToken::Number,
        SelfToken::Text,
        SelfToken::Comment,
        SelfToken::LParen,
        SelfToken::RParen,
        SelfToken::LBracket,
        SelfToken::RBracket,
        SelfToken::Bar,
        SelfToken::Dot,
        SelfToken::Equal,
        SelfToken::Arrow,
    ];

    /// Whether a token of this kind can end an operand, so that a following
    /// `-` is a binary operator rather than a sign.
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            SelfToken::Identifier
                | SelfToken::SelfKw
                | SelfToken::Boolean
                | SelfToken::Number
                | SelfToken::Text
                | SelfToken::RParen
                | SelfToken::RBracket
        )
    }
}

impl TokenKind for SelfToken {
    fn ordinal(self) -> u8 {
        self as u8
    }

    fn is_trivia(self) -> bool {
        self == SelfToken::Comment
    }
}

impl fmt::Display for SelfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SelfToken::Identifier => "identifier",
            SelfToken::Resend => "`resend`",
            SelfToken::SelfKw => "`self`",
            SelfToken::KeywordLowercase => "keyword",
            SelfToken::Keyword => "capitalized keyword",
            SelfToken::Argument => "argument",
            SelfToken::Operator => "operator",
            SelfToken::Boolean => "boolean",
            SelfToken::Number => "number",
            SelfToken::Text => "text",
            SelfToken::Comment => "comment",
            SelfToken::LParen => "`(`",
            SelfToken::RParen => "`)`",
            SelfToken::LBracket => "`[`",
            SelfToken::RBracket => "`]`",
            SelfToken::Bar => "`|`",
            SelfToken::Dot => "`.`",
            SelfToken::Equal => "`=`",
            SelfToken::Arrow => "`<-`",
        };
        f.write_str(name)
    }
}
