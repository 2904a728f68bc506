//! Stack growth for deeply recursive parsing and evaluation
//!
//! Rule invocation and message sends recurse on the host stack. Wrapping the
//! recursive step in [`ensure_sufficient_stack`] grows the stack on demand,
//! so depth is bounded by memory rather than by the initial thread stack.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn depth(n: u64) -> u64 {
        if n == 0 {
            0
        } else {
            ensure_sufficient_stack(|| 1 + depth(n - 1))
        }
    }

    #[test]
    fn test_deep_recursion_completes() {
        assert_eq!(depth(100_000), 100_000);
    }
}
