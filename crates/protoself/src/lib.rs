//! # Protoself
//!
//! A predictive grammar-combinator engine and a tree-walking interpreter for
//! a small Self-like language built on it.
//!
//! The language is prototype-based and message-passing: every value is an
//! object with named slots and an optional parent to delegate to, and every
//! computation is a message send. Methods and blocks are objects with a
//! body; sending to one clones it into an activation whose parent is the
//! receiver.
//!
//! ## Architecture
//!
//! - **Grammar engine** ([`grammar`]): sequence, alternative, repetition,
//!   optional and token elements with bitset FIRST sets; one token of
//!   lookahead, no backtracking
//! - **Syntax** ([`syntax`]): logos lexer and the Self grammar, whose
//!   semantic actions build code and literal objects while parsing
//! - **Code** ([`code`]): immutable executable trees
//! - **Object model** ([`object`]): slots, delegation, activation by
//!   cloning, and primitive wrapper objects
//! - **Evaluator** ([`evaluator`]): the host embedding surface
//!
//! ## Example
//!
//! ```
//! use protoself::{Evaluator, NativeValue};
//!
//! let evaluator = Evaluator::new().unwrap();
//! let fib = "( | fib: n = ( n < 3 ifTrue: 1 False: [ (fib: (n-1)) + (fib: (n-2)) ] ) | ) fib: 10";
//! let result = evaluator.eval(fib).unwrap();
//! assert_eq!(evaluator.unbox(&result), Some(NativeValue::Int(55)));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod code;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod grammar;
pub mod object;
pub mod stack;
pub mod syntax;

// Re-export main types
pub use code::{Code, NativeFn};
pub use context::EvalContext;
pub use error::{Error, EvalError, GrammarError, LexError, ParseError, Result, SyntaxError};
pub use evaluator::{Evaluator, EvaluatorConfig, HostValue};
pub use grammar::{
    Element, FirstSet, Grammar, GrammarBuilder, ParserConfig, Rule, RuleDispatch, Token,
    TokenCursor, TokenKind, TokenStream,
};
pub use object::{NativeValue, ObjectBuilder, ObjectRef, Primitives, SelfObject, Selector, Slot};
pub use syntax::{SelfParser, SelfToken};

/// Protoself version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
