//! The generation marker.

use crate::builtins::Callable;
use crate::error::CallError;

/// Mark a native function for adapter generation.
///
/// `to_callable(my_fn)` is a placeholder so code compiles before the
/// generator has run. The generator scans for calls to this function,
/// derives an adapter from the argument's signature, and substitutes the
/// call with that adapter. If a marker call survives into a running program
/// the returned callable reports the omission instead of crashing the host.
pub fn to_callable<F>(_f: F) -> Callable {
    Box::new(|_args| {
        Err(CallError::Native(
            "adapter not generated; run the tether generator over this crate".to_string(),
        ))
    })
}
