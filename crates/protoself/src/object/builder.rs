//! Incremental construction of immutable objects

use std::sync::Arc;

use indexmap::IndexMap;

use super::{NativeValue, ObjectRef, SelfObject, Selector, Slot};
use crate::code::Code;

/// Accumulates slots, parent, body and payload, then freezes them into a
/// [`SelfObject`].
///
/// # Example
///
/// ```
/// use protoself::object::{ObjectBuilder, SelfObject};
///
/// let point = ObjectBuilder::new()
///     .slot("x", SelfObject::empty())
///     .argument("y")
///     .build();
/// assert_eq!(point.arity(), 1);
/// assert!(point.get("x").is_some());
/// assert!(point.get("y").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilder {
    slots: IndexMap<Selector, Slot>,
    parent: Option<ObjectRef>,
    body: Option<Arc<Code>>,
    block: bool,
    wrapped: Option<NativeValue>,
}

impl ObjectBuilder {
    /// Start an empty object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a copy of `object`; the source is never modified.
    pub fn from_object(object: &SelfObject) -> Self {
        Self {
            slots: object.slots.clone(),
            parent: object.parent.clone(),
            body: object.body.clone(),
            block: object.block,
            wrapped: object.wrapped.clone(),
        }
    }

    /// Add or replace a data slot. A replaced slot keeps its position.
    pub fn slot(mut self, name: impl Into<Selector>, value: ObjectRef) -> Self {
        self.slots.insert(name.into(), Slot::Data(value));
        self
    }

    /// Add or replace an argument slot.
    pub fn argument(mut self, name: impl Into<Selector>) -> Self {
        self.slots.insert(name.into(), Slot::Argument);
        self
    }

    /// Insert argument slots ahead of every existing slot, in the given order.
    ///
    /// Existing slots with the same names are replaced.
    pub fn leading_arguments<S: Into<Selector>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        let mut slots: IndexMap<Selector, Slot> = names
            .into_iter()
            .map(|name| (name.into(), Slot::Argument))
            .collect();
        for (name, slot) in self.slots {
            slots.entry(name).or_insert(slot);
        }
        self.slots = slots;
        self
    }

    /// Whether a slot of this name has been added.
    pub fn has_slot(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Set the delegation parent.
    pub fn parent(mut self, parent: ObjectRef) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the executable body.
    pub fn body(mut self, body: Arc<Code>) -> Self {
        self.body = Some(body);
        self
    }

    /// Mark the object as a block literal.
    pub fn block(mut self, block: bool) -> Self {
        self.block = block;
        self
    }

    /// Attach a native payload.
    pub fn wrapped(mut self, value: NativeValue) -> Self {
        self.wrapped = Some(value);
        self
    }

    /// Freeze into a shared object.
    pub fn build(self) -> ObjectRef {
        Arc::new(SelfObject {
            slots: self.slots,
            parent: self.parent,
            body: self.body,
            block: self.block,
            wrapped: self.wrapped,
        })
    }
}
