//! Primitive prototypes for numbers, booleans and texts
//!
//! A primitive value is a wrapper object: an opaque [`NativeValue`] payload
//! plus a parent prototype whose slots are native methods. Native methods
//! read their receiver's payload through the activation's parent chain and
//! their operands from named argument slots.

use std::sync::Arc;

use super::{NativeValue, ObjectBuilder, ObjectRef, SelfObject};
use crate::code::Code;
use crate::context::EvalContext;
use crate::error::EvalError;
use crate::evaluator::HostValue;

/// The primitive prototypes shared by every wrapper object.
#[derive(Debug, Clone)]
pub struct Primitives {
    numbers: ObjectRef,
    booleans: ObjectRef,
    texts: ObjectRef,
    true_object: ObjectRef,
    false_object: ObjectRef,
}

impl Default for Primitives {
    fn default() -> Self {
        Self::new()
    }
}

impl Primitives {
    /// Build the primitive prototypes.
    pub fn new() -> Self {
        let booleans = boolean_prototype();
        let true_object = ObjectBuilder::new()
            .parent(Arc::clone(&booleans))
            .wrapped(NativeValue::Bool(true))
            .build();
        let false_object = ObjectBuilder::new()
            .parent(Arc::clone(&booleans))
            .wrapped(NativeValue::Bool(false))
            .build();
        Self {
            numbers: number_prototype(),
            booleans,
            texts: text_prototype(),
            true_object,
            false_object,
        }
    }

    /// Wrap an integer.
    pub fn number(&self, value: i64) -> ObjectRef {
        ObjectBuilder::new()
            .parent(Arc::clone(&self.numbers))
            .wrapped(NativeValue::Int(value))
            .build()
    }

    /// The shared `true` or `false` object.
    pub fn boolean(&self, value: bool) -> ObjectRef {
        if value {
            Arc::clone(&self.true_object)
        } else {
            Arc::clone(&self.false_object)
        }
    }

    /// Wrap a text.
    pub fn text(&self, value: impl Into<Arc<str>>) -> ObjectRef {
        ObjectBuilder::new()
            .parent(Arc::clone(&self.texts))
            .wrapped(NativeValue::Text(value.into()))
            .build()
    }

    /// Wrap any native value.
    pub fn wrap(&self, value: NativeValue) -> ObjectRef {
        match value {
            NativeValue::Int(n) => self.number(n),
            NativeValue::Bool(b) => self.boolean(b),
            NativeValue::Text(s) => self.text(s),
        }
    }

    /// Convert a host value into an object; objects pass through unchanged.
    pub fn project(&self, value: &HostValue) -> ObjectRef {
        match value {
            HostValue::Int(n) => self.number(*n),
            HostValue::Bool(b) => self.boolean(*b),
            HostValue::Text(s) => self.text(s.as_str()),
            HostValue::Object(object) => Arc::clone(object),
        }
    }

    /// Parent of every number.
    pub fn numbers(&self) -> &ObjectRef {
        &self.numbers
    }

    /// Parent of `true` and `false`.
    pub fn booleans(&self) -> &ObjectRef {
        &self.booleans
    }

    /// Parent of every text.
    pub fn texts(&self) -> &ObjectRef {
        &self.texts
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Native methods
// ═══════════════════════════════════════════════════════════════════════

fn native(
    arguments: &[&str],
    f: impl Fn(&EvalContext, &ObjectRef) -> Result<ObjectRef, EvalError> + Send + Sync + 'static,
) -> ObjectRef {
    arguments
        .iter()
        .fold(ObjectBuilder::new(), |builder, name| builder.argument(*name))
        .body(Arc::new(Code::native(f)))
        .build()
}

fn payload_name(value: Option<&NativeValue>) -> &'static str {
    match value {
        Some(NativeValue::Int(_)) => "a number",
        Some(NativeValue::Bool(_)) => "a boolean",
        Some(NativeValue::Text(_)) => "a text",
        None => "a plain object",
    }
}

fn receiver_int(activation: &SelfObject, selector: &str) -> Result<i64, EvalError> {
    match activation.find_wrapped_value() {
        Some(NativeValue::Int(n)) => Ok(*n),
        other => Err(EvalError::primitive(
            selector,
            format!("receiver is {}, expected a number", payload_name(other)),
        )),
    }
}

fn receiver_bool(activation: &SelfObject, selector: &str) -> Result<bool, EvalError> {
    match activation.find_wrapped_value() {
        Some(NativeValue::Bool(b)) => Ok(*b),
        other => Err(EvalError::primitive(
            selector,
            format!("receiver is {}, expected a boolean", payload_name(other)),
        )),
    }
}

fn receiver_text(activation: &SelfObject, selector: &str) -> Result<Arc<str>, EvalError> {
    match activation.find_wrapped_value() {
        Some(NativeValue::Text(s)) => Ok(Arc::clone(s)),
        other => Err(EvalError::primitive(
            selector,
            format!("receiver is {}, expected a text", payload_name(other)),
        )),
    }
}

fn argument(activation: &SelfObject, name: &str, selector: &str) -> Result<ObjectRef, EvalError> {
    activation
        .get(name)
        .ok_or_else(|| EvalError::primitive(selector, format!("missing argument `{}`", name)))
}

fn int_argument(activation: &SelfObject, name: &str, selector: &str) -> Result<i64, EvalError> {
    let arg = argument(activation, name, selector)?;
    match arg.find_wrapped_value() {
        Some(NativeValue::Int(n)) => Ok(*n),
        other => Err(EvalError::primitive(
            selector,
            format!("argument is {}, expected a number", payload_name(other)),
        )),
    }
}

fn bool_argument(activation: &SelfObject, name: &str, selector: &str) -> Result<bool, EvalError> {
    let arg = argument(activation, name, selector)?;
    match arg.find_wrapped_value() {
        Some(NativeValue::Bool(b)) => Ok(*b),
        other => Err(EvalError::primitive(
            selector,
            format!("argument is {}, expected a boolean", payload_name(other)),
        )),
    }
}

fn arithmetic(selector: &'static str, op: fn(i64, i64) -> Option<i64>) -> ObjectRef {
    native(&["b"], move |ctx, activation| {
        let a = receiver_int(activation, selector)?;
        let b = int_argument(activation, "b", selector)?;
        match op(a, b) {
            Some(n) => Ok(ctx.primitives.number(n)),
            None if b == 0 && matches!(selector, "/" | "%") => {
                Err(EvalError::primitive(selector, "division by zero"))
            }
            None => Err(EvalError::primitive(
                selector,
                format!("overflow in {} {} {}", a, selector, b),
            )),
        }
    })
}

fn comparison(selector: &'static str, op: fn(&i64, &i64) -> bool) -> ObjectRef {
    native(&["b"], move |ctx, activation| {
        let a = receiver_int(activation, selector)?;
        let b = int_argument(activation, "b", selector)?;
        Ok(ctx.primitives.boolean(op(&a, &b)))
    })
}

fn number_prototype() -> ObjectRef {
    ObjectBuilder::new()
        .slot("+", arithmetic("+", i64::checked_add))
        .slot("-", arithmetic("-", i64::checked_sub))
        .slot("*", arithmetic("*", i64::checked_mul))
        .slot("/", arithmetic("/", i64::checked_div))
        .slot("%", arithmetic("%", i64::checked_rem))
        .slot("<", comparison("<", i64::lt))
        .slot(">", comparison(">", i64::gt))
        .slot("<=", comparison("<=", i64::le))
        .slot(">=", comparison(">=", i64::ge))
        .slot("==", comparison("==", i64::eq))
        .build()
}

fn boolean_prototype() -> ObjectRef {
    ObjectBuilder::new()
        .slot(
            "not",
            native(&[], |ctx, activation| {
                Ok(ctx.primitives.boolean(!receiver_bool(activation, "not")?))
            }),
        )
        .slot(
            "&&",
            native(&["b"], |ctx, activation| {
                let a = receiver_bool(activation, "&&")?;
                let b = bool_argument(activation, "b", "&&")?;
                Ok(ctx.primitives.boolean(a && b))
            }),
        )
        .slot(
            "||",
            native(&["b"], |ctx, activation| {
                let a = receiver_bool(activation, "||")?;
                let b = bool_argument(activation, "b", "||")?;
                Ok(ctx.primitives.boolean(a || b))
            }),
        )
        .slot(
            "ifTrue:False:",
            native(&["t", "f"], |ctx, activation| {
                let condition = receiver_bool(activation, "ifTrue:False:")?;
                let branch = if condition { "t" } else { "f" };
                let chosen = argument(activation, branch, "ifTrue:False:")?;
                SelfObject::run_block(&chosen, ctx)
            }),
        )
        .build()
}

fn text_prototype() -> ObjectRef {
    ObjectBuilder::new()
        .slot(
            "+",
            native(&["b"], |ctx, activation| {
                let a = receiver_text(activation, "+")?;
                let b = argument(activation, "b", "+")?;
                let suffix = match b.find_wrapped_value() {
                    Some(NativeValue::Text(s)) => s.to_string(),
                    Some(NativeValue::Int(n)) => n.to_string(),
                    Some(NativeValue::Bool(b)) => b.to_string(),
                    None => {
                        return Err(EvalError::primitive(
                            "+",
                            "argument is a plain object, expected a text or number",
                        ))
                    }
                };
                Ok(ctx.primitives.text(format!("{}{}", a, suffix)))
            }),
        )
        .slot(
            "size",
            native(&[], |ctx, activation| {
                let text = receiver_text(activation, "size")?;
                let size = i64::try_from(text.chars().count())
                    .map_err(|_| EvalError::primitive("size", "text too long"))?;
                Ok(ctx.primitives.number(size))
            }),
        )
        .build()
}
