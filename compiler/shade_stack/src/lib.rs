//! Stack growth for deep recursion.
//!
//! The parser bounds its own recursion with a depth ceiling, but a high
//! ceiling combined with large grammar-rule frames (debug builds in
//! particular) can still exceed a small thread stack. Grammar rules that
//! recurse run their body through [`ensure_sufficient_stack`], which grows
//! the stack on native targets and is a passthrough on WASM.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
