//! Stack growth for recursive descent.
//!
//! The parser recurses once per nested expression and the evaluator once per
//! nested expression, block and call, so deeply nested scripts can exhaust a
//! native thread stack. [`ensure_sufficient_stack`] grows the stack on demand
//! with `stacker`; on WASM it simply calls through.

/// Run `f`, first growing the stack if it is close to exhaustion.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Grow when less than this much stack remains.
    const RED_ZONE: usize = 128 * 1024;
    /// Size of each new stack segment.
    const GROW_BY: usize = 2 * 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, GROW_BY, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nest(depth: u32) -> u32 {
        ensure_sufficient_stack(|| if depth == 0 { 0 } else { nest(depth - 1) + 1 })
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        assert_eq!(nest(200_000), 200_000);
    }

    #[test]
    fn test_passes_through_result() {
        let result: Result<u8, String> = ensure_sufficient_stack(|| Err("boom".to_string()));
        assert_eq!(result, Err("boom".to_string()));
    }
}
