//! Self surface syntax: tokens, lexer and grammar

mod grammar;
mod lexer;
mod token;

pub use grammar::SelfParser;
pub use lexer::{lex, tokenize, unescape_text};
pub use token::SelfToken;
