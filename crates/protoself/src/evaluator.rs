//! Host embedding surface
//!
//! An [`Evaluator`] owns everything needed to run Self source text: the
//! primitive prototypes, an initialized parser and the lobby object that
//! top-level code runs against.
//!
//! # Example
//!
//! ```
//! use protoself::{Evaluator, HostValue, NativeValue};
//!
//! let evaluator = Evaluator::new().unwrap();
//! let adder = evaluator.eval("( | plus: n = ( n + 1 ) | )").unwrap();
//! let result = evaluator.invoke(&adder, "plus:", &[HostValue::Int(41)]).unwrap();
//! assert_eq!(evaluator.unbox(&result), Some(NativeValue::Int(42)));
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::code::Code;
use crate::context::EvalContext;
use crate::error::{GrammarError, Result};
use crate::grammar::{ParserConfig, RuleDispatch};
use crate::object::{NativeValue, ObjectRef, Primitives, SelfObject, Selector};
use crate::syntax::SelfParser;

/// A value crossing into the interpreter from the host.
#[derive(Debug, Clone)]
pub enum HostValue {
    /// Integer, wrapped as a number
    Int(i64),

    /// Boolean, mapped to `true` or `false`
    Bool(bool),

    /// Text, wrapped as a text
    Text(String),

    /// An interpreter object, passed through unchanged
    Object(ObjectRef),
}

impl From<i64> for HostValue {
    fn from(n: i64) -> Self {
        HostValue::Int(n)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::Text(s.to_string())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::Text(s)
    }
}

impl From<ObjectRef> for HostValue {
    fn from(object: ObjectRef) -> Self {
        HostValue::Object(object)
    }
}

/// Evaluator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EvaluatorConfig {
    /// How the parser reaches rule bodies
    pub rule_dispatch: RuleDispatch,

    /// Whether to log every message send at debug level
    pub trace: bool,
}

impl EvaluatorConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule dispatch strategy.
    pub fn with_rule_dispatch(mut self, rule_dispatch: RuleDispatch) -> Self {
        self.rule_dispatch = rule_dispatch;
        self
    }

    /// Enable or disable send tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

/// Parses and runs Self programs.
#[derive(Debug)]
pub struct Evaluator {
    config: EvaluatorConfig,
    ctx: EvalContext,
    parser: SelfParser,
    lobby: ObjectRef,
}

impl Evaluator {
    /// Create an evaluator with the default configuration.
    pub fn new() -> std::result::Result<Self, GrammarError> {
        Self::with_config(EvaluatorConfig::default())
    }

    /// Create an evaluator.
    pub fn with_config(config: EvaluatorConfig) -> std::result::Result<Self, GrammarError> {
        let primitives = Arc::new(Primitives::new());
        let parser = SelfParser::with_config(
            Arc::clone(&primitives),
            ParserConfig::with_dispatch(config.rule_dispatch),
        )?;
        let ctx = EvalContext::with_primitives(primitives).with_trace(config.trace);
        debug!(?config, "evaluator ready");
        Ok(Self {
            config,
            ctx,
            parser,
            lobby: SelfObject::empty(),
        })
    }

    /// Parse source text into code.
    pub fn parse(&self, source: &str) -> Result<Arc<Code>> {
        self.parser.parse(source)
    }

    /// Parse and evaluate source text against the lobby.
    pub fn eval(&self, source: &str) -> Result<ObjectRef> {
        let code = self.parse(source)?;
        Ok(code.eval(&self.lobby, &[], &self.ctx)?)
    }

    /// Send `selector` to `target` with host-supplied arguments.
    pub fn invoke(
        &self,
        target: &ObjectRef,
        selector: impl Into<Selector>,
        args: &[HostValue],
    ) -> Result<ObjectRef> {
        let args_code = (0..args.len()).map(|i| Arc::new(Code::Argument(i))).collect();
        let send = Code::implicit(selector, args_code);
        Ok(send.eval(target, args, &self.ctx)?)
    }

    /// The native payload of a primitive result.
    pub fn unbox(&self, object: &ObjectRef) -> Option<NativeValue> {
        object.find_wrapped_value().cloned()
    }

    /// The primitive prototypes.
    pub fn primitives(&self) -> &Arc<Primitives> {
        &self.ctx.primitives
    }

    /// The receiver of top-level code.
    pub fn lobby(&self) -> &ObjectRef {
        &self.lobby
    }

    /// The evaluation context.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// The configuration this evaluator was built with.
    pub fn config(&self) -> EvaluatorConfig {
        self.config
    }
}
