//! Evaluation context configuration

use std::sync::Arc;

use crate::object::Primitives;

/// Configuration and shared state for evaluation.
///
/// This is passed through all evaluation calls. It carries the primitive
/// prototypes that native methods use to wrap their results.
#[derive(Debug, Clone)]
pub struct EvalContext {
    /// Primitive prototypes for numbers, booleans and texts
    pub primitives: Arc<Primitives>,

    /// Whether to log every message send at debug level
    pub trace: bool,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            primitives: Arc::new(Primitives::new()),
            trace: false,
        }
    }
}

impl EvalContext {
    /// Create a new context with fresh primitives.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context sharing existing primitives.
    pub fn with_primitives(primitives: Arc<Primitives>) -> Self {
        Self {
            primitives,
            trace: false,
        }
    }

    /// Enable or disable send tracing.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
