//! Error types for parsing and evaluation

use std::fmt;

use thiserror::Error;

/// Main error type for protoself operations
#[derive(Error, Debug)]
pub enum Error {
    /// The source text could not be tokenized
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The grammar violates a construction-time contract
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// The token stream does not match the grammar
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Evaluation of parsed code failed
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Error::Parse(ParseError::Syntax(err))
    }
}

/// Result type alias for protoself operations
pub type Result<T> = std::result::Result<T, Error>;

// ═══════════════════════════════════════════════════════════════════════
// Lexing
// ═══════════════════════════════════════════════════════════════════════

/// A malformed token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Lex error: {message} at offset {offset}")]
pub struct LexError {
    /// What was wrong with the input
    pub message: String,

    /// Byte offset of the offending input
    pub offset: usize,
}

impl LexError {
    /// Create a new lex error.
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Grammar construction
// ═══════════════════════════════════════════════════════════════════════

/// A contract violation detected while composing or initializing a grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A rule was referenced but never given a body
    #[error("Rule `{name}` was declared but never defined")]
    UndefinedRule {
        /// Rule name
        name: String,
    },

    /// A rule body was supplied twice
    #[error("Rule `{name}` is already defined")]
    RedefinedRule {
        /// Rule name
        name: String,
    },

    /// A sequence consists only of optional elements
    #[error("Sequence needs at least one non-optional element")]
    NoMandatoryElement,

    /// A FIRST set was requested for an element that may match nothing
    #[error("No FIRST set for a bare repetition or optional element ({context})")]
    NullableFirst {
        /// Where the element was used
        context: String,
    },

    /// A token kind does not fit the 128-bit FIRST-set mask
    #[error("Token kind {kind} has ordinal {ordinal}, but at most 128 kinds are supported")]
    KindOutOfRange {
        /// Debug rendering of the kind
        kind: String,
        /// Its ordinal
        ordinal: u8,
    },

    /// An element handle does not belong to this grammar
    #[error("Element does not belong to this grammar")]
    UnknownElement,
}

// ═══════════════════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════════════════

/// A fatal mismatch between the token stream and the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable description
    pub message: String,

    /// Byte offset of the lookahead token, `None` at end of input
    pub offset: Option<usize>,

    /// Innermost rule being parsed when the failure was detected
    pub rule: String,
}

impl SyntaxError {
    /// Create a new syntax error.
    pub fn new(message: impl Into<String>, offset: Option<usize>, rule: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            offset,
            rule: rule.into(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Syntax error: {}", self.message)?;
        match self.offset {
            Some(offset) => write!(f, " at offset {}", offset)?,
            None => write!(f, " at end of input")?,
        }
        write!(f, " in rule `{}`", self.rule)
    }
}

impl std::error::Error for SyntaxError {}

/// Error produced while running a grammar over a token stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input does not conform to the grammar
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// A semantic value had an unexpected type
    #[error("Internal parser error: {message}")]
    Internal {
        /// Description of the inconsistency
        message: String,
    },
}

// ═══════════════════════════════════════════════════════════════════════
// Evaluation
// ═══════════════════════════════════════════════════════════════════════

/// Error produced while evaluating code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// No object in the receiver's parent chain has a slot for the selector
    #[error("Unknown identifier: {selector}")]
    UnknownSelector {
        /// The selector that was sent
        selector: String,
    },

    /// An activation received a different number of arguments than it declares
    #[error("Arity mismatch: expected {expected} arguments, got {got}")]
    ArityMismatch {
        /// Declared argument slots
        expected: usize,
        /// Supplied arguments
        got: usize,
    },

    /// A native primitive rejected its operands
    #[error("Primitive `{selector}` failed: {message}")]
    Primitive {
        /// The primitive's selector
        selector: String,
        /// What went wrong
        message: String,
    },
}

impl EvalError {
    /// Create a primitive failure.
    pub fn primitive(selector: impl Into<String>, message: impl Into<String>) -> Self {
        EvalError::Primitive {
            selector: selector.into(),
            message: message.into(),
        }
    }
}
