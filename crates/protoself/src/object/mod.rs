//! Prototype objects, activations and primitive wrappers
//!
//! Every runtime value is a [`SelfObject`]: an ordered map of slots, an
//! optional parent to delegate lookups to, an optional body and, for
//! primitive values, an opaque native payload. Objects are immutable once
//! built and shared through [`ObjectRef`].
//!
//! Sending a message to a method object clones it into an *activation*:
//! argument slots are bound positionally and the clone's parent becomes the
//! message receiver, so the method body reaches the receiver's slots through
//! ordinary delegation.

mod builder;
mod display;
mod primitives;
mod selector;

pub use builder::ObjectBuilder;
pub use primitives::Primitives;
pub use selector::Selector;

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::trace;

use crate::code::Code;
use crate::context::EvalContext;
use crate::error::EvalError;

/// Shared handle to an immutable object.
pub type ObjectRef = Arc<SelfObject>;

/// Contents of a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// A value (plain data, a method, or a block)
    Data(ObjectRef),

    /// A positional argument, bound when the object is activated
    Argument,
}

/// Host payload carried by a primitive wrapper object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeValue {
    /// 64-bit signed integer
    Int(i64),

    /// Boolean
    Bool(bool),

    /// Text
    Text(Arc<str>),
}

/// A prototype, an activation, or a primitive wrapper.
#[derive(Clone, PartialEq)]
pub struct SelfObject {
    slots: IndexMap<Selector, Slot>,
    parent: Option<ObjectRef>,
    body: Option<Arc<Code>>,
    block: bool,
    wrapped: Option<NativeValue>,
}

impl SelfObject {
    /// An object with no slots, parent or body.
    pub fn empty() -> ObjectRef {
        ObjectBuilder::new().build()
    }

    /// Look up a slot value, delegating to the parent chain.
    ///
    /// Unbound argument slots are not values and are skipped.
    pub fn get(&self, name: &str) -> Option<ObjectRef> {
        match self.slots.get(name) {
            Some(Slot::Data(value)) => Some(Arc::clone(value)),
            _ => self.parent.as_ref().and_then(|parent| parent.get(name)),
        }
    }

    /// The local slot named `name`, without delegation.
    pub fn local_slot(&self, name: &str) -> Option<&Slot> {
        self.slots.get(name)
    }

    /// All local slots, in declaration order.
    pub fn slots(&self) -> impl Iterator<Item = (&Selector, &Slot)> {
        self.slots.iter()
    }

    /// Names of the argument slots, in declaration order.
    pub fn argument_names(&self) -> impl Iterator<Item = &Selector> {
        self.slots
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Argument))
            .map(|(name, _)| name)
    }

    /// Number of argument slots.
    pub fn arity(&self) -> usize {
        self.argument_names().count()
    }

    /// The delegation parent.
    pub fn parent(&self) -> Option<&ObjectRef> {
        self.parent.as_ref()
    }

    /// The executable body, if this is a method or block.
    pub fn body(&self) -> Option<&Arc<Code>> {
        self.body.as_ref()
    }

    /// Whether this object came from a block literal.
    pub fn is_block(&self) -> bool {
        self.block
    }

    /// The native payload of this object itself.
    pub fn wrapped(&self) -> Option<&NativeValue> {
        self.wrapped.as_ref()
    }

    /// The first native payload found on this object or its parent chain.
    pub fn find_wrapped_value(&self) -> Option<&NativeValue> {
        match &self.wrapped {
            Some(value) => Some(value),
            None => self.parent.as_deref().and_then(SelfObject::find_wrapped_value),
        }
    }

    /// Activate `this` on behalf of `receiver`.
    ///
    /// An object without a body evaluates to itself. Otherwise it is cloned
    /// with `args` bound to its argument slots and `receiver` as parent; a
    /// block clone is returned as a value, any other clone has its body
    /// evaluated against it.
    pub fn eval_self(
        this: &ObjectRef,
        receiver: &ObjectRef,
        args: &[ObjectRef],
        ctx: &EvalContext,
    ) -> Result<ObjectRef, EvalError> {
        let Some(body) = &this.body else {
            return Ok(Arc::clone(this));
        };
        let activation = Arc::new(this.clone_with_args(args, Some(Arc::clone(receiver)))?);
        if this.block {
            trace!(slots = activation.slots.len(), "block closed over receiver");
            return Ok(activation);
        }
        body.eval(&activation, &[], ctx)
    }

    /// Copy every slot, binding argument slots to `args` in order.
    ///
    /// The receiver of the copy is untouched.
    pub fn clone_with_args(
        &self,
        args: &[ObjectRef],
        parent: Option<ObjectRef>,
    ) -> Result<SelfObject, EvalError> {
        let expected = self.arity();
        if expected != args.len() {
            return Err(EvalError::ArityMismatch {
                expected,
                got: args.len(),
            });
        }
        let mut args = args.iter();
        let slots = self
            .slots
            .iter()
            .map(|(name, slot)| {
                let slot = match slot {
                    Slot::Data(value) => Slot::Data(Arc::clone(value)),
                    Slot::Argument => match args.next() {
                        Some(arg) => Slot::Data(Arc::clone(arg)),
                        None => Slot::Argument,
                    },
                };
                (name.clone(), slot)
            })
            .collect();
        Ok(SelfObject {
            slots,
            parent,
            body: self.body.clone(),
            block: self.block,
            wrapped: self.wrapped.clone(),
        })
    }

    /// Run a block value: evaluate its body against it.
    ///
    /// Anything that is not a block with a body is returned unchanged.
    pub fn run_block(this: &ObjectRef, ctx: &EvalContext) -> Result<ObjectRef, EvalError> {
        match (&this.body, this.block) {
            (Some(body), true) => body.eval(this, &[], ctx),
            _ => Ok(Arc::clone(this)),
        }
    }
}
