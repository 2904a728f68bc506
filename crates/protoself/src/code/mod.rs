//! Executable code trees
//!
//! A [`Code`] tree is built once by the parser's semantic actions and never
//! changes afterwards; the same tree may be evaluated any number of times
//! against different receivers.

mod display;
mod eval;

use std::sync::Arc;

use crate::context::EvalContext;
use crate::error::EvalError;
use crate::object::{ObjectRef, Selector};

/// A host function implementing a primitive.
///
/// Receives the activation of the native method; the message receiver is its
/// parent and the operands are its argument slots.
pub type NativeFn =
    Arc<dyn Fn(&EvalContext, &ObjectRef) -> Result<ObjectRef, EvalError> + Send + Sync>;

/// An immutable node of executable code.
#[derive(Clone)]
pub enum Code {
    /// A literal object, activated when evaluated
    Constant(ObjectRef),

    /// The current receiver
    SelfRef,

    /// A message send
    Message {
        /// Code producing the object the message is sent to
        receiver: Arc<Code>,
        /// The message
        selector: Selector,
        /// Argument code, evaluated left to right
        args: Vec<Arc<Code>>,
    },

    /// Statements evaluated in order; the last value is the result
    Block(Vec<Arc<Code>>),

    /// A primitive implemented by the host
    Native(NativeFn),

    /// A host-supplied argument, by position
    Argument(usize),
}

impl Code {
    /// A constant.
    pub fn constant(value: ObjectRef) -> Arc<Code> {
        Arc::new(Code::Constant(value))
    }

    /// A send of `selector` to the result of `receiver`.
    pub fn message(receiver: Arc<Code>, selector: impl Into<Selector>, args: Vec<Arc<Code>>) -> Arc<Code> {
        Arc::new(Code::Message {
            receiver,
            selector: selector.into(),
            args,
        })
    }

    /// A send to the implicit receiver.
    pub fn implicit(selector: impl Into<Selector>, args: Vec<Arc<Code>>) -> Arc<Code> {
        Code::message(Arc::new(Code::SelfRef), selector, args)
    }

    /// A primitive backed by a host function.
    pub fn native(
        f: impl Fn(&EvalContext, &ObjectRef) -> Result<ObjectRef, EvalError> + Send + Sync + 'static,
    ) -> Code {
        Code::Native(Arc::new(f))
    }
}

impl PartialEq for Code {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Code::Constant(a), Code::Constant(b)) => a == b,
            (Code::SelfRef, Code::SelfRef) => true,
            (
                Code::Message {
                    receiver: ra,
                    selector: sa,
                    args: aa,
                },
                Code::Message {
                    receiver: rb,
                    selector: sb,
                    args: ab,
                },
            ) => sa == sb && ra == rb && aa == ab,
            (Code::Block(a), Code::Block(b)) => a == b,
            (Code::Native(a), Code::Native(b)) => {
                std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
            }
            (Code::Argument(a), Code::Argument(b)) => a == b,
            _ => false,
        }
    }
}
