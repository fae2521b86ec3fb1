// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Stack growth for deeply nested evaluation.

/// Run `f`, growing the stack first when it is close to running out.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    const RED_ZONE: usize = 128 * 1024;
    const GROW_BY: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
