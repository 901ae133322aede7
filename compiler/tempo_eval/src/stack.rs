//! Stack growth for deeply nested trees.
//!
//! Script trees can nest arbitrarily (long `a + b + c + ...` chains, deep
//! `if` ladders). Evaluation recurses per node, so each node entry checks the
//! remaining stack and grows it through `stacker` when it runs low.
//! WASM manages its own stack; there the closure is called directly.

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Grow when less than 128KB remains.
    const RED_ZONE: usize = 128 * 1024;

    /// Size of each new stack segment (1MB).
    const GROWTH: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
