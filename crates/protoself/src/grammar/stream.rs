//! Token stream interface consumed by the grammar engine

use std::fmt;
use std::sync::Arc;

/// A token kind usable in FIRST sets.
///
/// Ordinals must be below 128; the engine stores FIRST sets as two 64-bit
/// words.
pub trait TokenKind: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Dense ordinal of this kind.
    fn ordinal(self) -> u8;

    /// Whether tokens of this kind are skipped by [`TokenCursor`].
    fn is_trivia(self) -> bool {
        false
    }
}

/// A lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K> {
    /// Token kind
    pub kind: K,

    /// Source text of the token
    pub text: Arc<str>,

    /// Byte offset in the source
    pub offset: usize,

    /// Byte length in the source
    pub len: usize,
}

impl<K> Token<K> {
    /// Create a new token.
    pub fn new(kind: K, text: impl Into<Arc<str>>, offset: usize) -> Self {
        let text = text.into();
        let len = text.len();
        Self {
            kind,
            text,
            offset,
            len,
        }
    }
}

/// Source of tokens with one token of lookahead.
pub trait TokenStream<K: TokenKind> {
    /// The next significant token, or `None` at end of input.
    fn peek(&self) -> Option<&Token<K>>;

    /// Consume and return the next significant token.
    fn advance(&mut self) -> Option<Token<K>>;

    /// Save the current position.
    fn mark(&self) -> usize;

    /// Return to a position obtained from [`TokenStream::mark`].
    fn reset(&mut self, mark: usize);

    /// Describe the current position for diagnostics.
    fn position(&self) -> String {
        match self.peek() {
            Some(token) => format!("offset {} (`{}`)", token.offset, token.text),
            None => "end of input".to_string(),
        }
    }
}

/// A [`TokenStream`] over an owned vector of tokens.
#[derive(Debug, Clone)]
pub struct TokenCursor<K> {
    tokens: Vec<Token<K>>,
    pos: usize,
}

impl<K: TokenKind> TokenCursor<K> {
    /// Create a cursor positioned at the first significant token.
    pub fn new(tokens: Vec<Token<K>>) -> Self {
        let mut cursor = Self { tokens, pos: 0 };
        cursor.skip_trivia();
        cursor
    }

    /// All tokens, trivia included.
    pub fn tokens(&self) -> &[Token<K>] {
        &self.tokens
    }

    fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .is_some_and(|token| token.kind.is_trivia())
        {
            self.pos += 1;
        }
    }
}

impl<K: TokenKind> TokenStream<K> for TokenCursor<K> {
    fn peek(&self) -> Option<&Token<K>> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token<K>> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
            self.skip_trivia();
        }
        token
    }

    fn mark(&self) -> usize {
        self.pos
    }

    fn reset(&mut self, mark: usize) {
        self.pos = mark.min(self.tokens.len());
        self.skip_trivia();
    }
}
