//! Tree-walking evaluation of code

use std::sync::Arc;

use tracing::{debug, trace};

use super::Code;
use crate::context::EvalContext;
use crate::error::EvalError;
use crate::evaluator::HostValue;
use crate::object::{ObjectRef, SelfObject};
use crate::stack::ensure_sufficient_stack;

impl Code {
    /// Evaluate against `receiver`.
    ///
    /// `args` are host-supplied values read by [`Code::Argument`] nodes; code
    /// produced by the parser never reads them.
    pub fn eval(
        &self,
        receiver: &ObjectRef,
        args: &[HostValue],
        ctx: &EvalContext,
    ) -> Result<ObjectRef, EvalError> {
        match self {
            Code::Constant(value) => SelfObject::eval_self(value, receiver, &[], ctx),

            Code::SelfRef => Ok(Arc::clone(receiver)),

            Code::Message {
                receiver: target,
                selector,
                args: arg_code,
            } => {
                let target = target.eval(receiver, args, ctx)?;
                let values = arg_code
                    .iter()
                    .map(|arg| arg.eval(receiver, args, ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                let method = target
                    .get(selector.as_str())
                    .ok_or_else(|| EvalError::UnknownSelector {
                        selector: selector.to_string(),
                    })?;
                if ctx.trace {
                    debug!(selector = %selector, args = values.len(), "send");
                } else {
                    trace!(selector = %selector, args = values.len(), "send");
                }
                ensure_sufficient_stack(|| SelfObject::eval_self(&method, &target, &values, ctx))
            }

            Code::Block(children) => {
                let mut result = Arc::clone(receiver);
                for child in children {
                    result = child.eval(receiver, args, ctx)?;
                }
                Ok(result)
            }

            Code::Native(f) => f(ctx, receiver),

            Code::Argument(index) => match args.get(*index) {
                Some(value) => Ok(ctx.primitives.project(value)),
                None => Err(EvalError::ArityMismatch {
                    expected: index + 1,
                    got: args.len(),
                }),
            },
        }
    }
}
