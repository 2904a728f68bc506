//! Type-erased grammar nodes stored in the builder's arena

use std::any::Any;

use super::stream::Token;

/// A semantic value produced by a node.
pub(crate) type Value = Box<dyn Any>;

/// Why a transduction function did not produce a value.
#[derive(Debug)]
pub(crate) enum ActionFailure {
    /// The action rejected its input (reported as a syntax error)
    Rejected(String),

    /// A child produced a value of the wrong type
    WrongType(&'static str),
}

pub(crate) type ActionResult = Result<Value, ActionFailure>;

pub(crate) type SequenceFn = Box<dyn Fn(Vec<Value>) -> ActionResult + Send + Sync>;
pub(crate) type SeedFn = Box<dyn Fn() -> Value + Send + Sync>;
pub(crate) type AccumulateFn = Box<dyn Fn(Value, Value) -> ActionResult + Send + Sync>;
pub(crate) type MapFn = Box<dyn Fn(Value) -> ActionResult + Send + Sync>;
pub(crate) type TokenFn<K> = Box<dyn Fn(Token<K>) -> ActionResult + Send + Sync>;

/// One grammar expression. Children are indices into the node arena.
pub(crate) enum Node<K> {
    /// Reference to a named rule
    Rule(usize),

    /// Children consumed in order, then transduced
    Sequence {
        children: Vec<usize>,
        action: SequenceFn,
    },

    /// First option whose FIRST set holds the lookahead
    Alternative { options: Vec<usize> },

    /// Zero or more `body`, folded from `seed`
    Repetition {
        body: usize,
        seed: SeedFn,
        accumulate: AccumulateFn,
        finish: MapFn,
    },

    /// `body` if the lookahead allows it
    Optional {
        body: usize,
        present: MapFn,
        absent: SeedFn,
    },

    /// Exactly one token of `kind`
    TokenMatch { kind: K, action: TokenFn<K> },
}

impl<K> Node<K> {
    /// Whether this node may match no tokens at all.
    pub(crate) fn is_nullable(&self) -> bool {
        matches!(self, Node::Repetition { .. } | Node::Optional { .. })
    }

    /// Short name used in diagnostics.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Node::Rule(_) => "rule reference",
            Node::Sequence { .. } => "sequence",
            Node::Alternative { .. } => "alternative",
            Node::Repetition { .. } => "repetition",
            Node::Optional { .. } => "optional",
            Node::TokenMatch { .. } => "token",
        }
    }
}

/// A named, forward-declared rule.
pub(crate) struct RuleDef {
    pub(crate) name: String,
    pub(crate) body: Option<usize>,
}

/// Unbox a semantic value of a known type.
pub(crate) fn take<T: 'static>(value: Value) -> Result<T, ActionFailure> {
    value
        .downcast::<T>()
        .map(|boxed| *boxed)
        .map_err(|_| ActionFailure::WrongType(std::any::type_name::<T>()))
}

/// Unbox the next value of a sequence.
pub(crate) fn take_next<T: 'static>(
    values: &mut impl Iterator<Item = Value>,
) -> Result<T, ActionFailure> {
    match values.next() {
        Some(value) => take(value),
        None => Err(ActionFailure::WrongType(std::any::type_name::<T>())),
    }
}
