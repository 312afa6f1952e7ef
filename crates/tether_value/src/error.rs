//! Errors surfaced on the dynamic call path.
//!
//! Adapters never panic on bad script input; every failure mode comes back
//! through [`CallError`] so the embedding engine can surface it on its own
//! error channel.

use crate::value::Value;

/// The error type native fallible functions are expected to box into.
///
/// A wrapped native function whose last result is an error returns
/// `Result<T, Error>`; the adapter translates the `Err` branch into
/// [`CallError::Native`].
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Error produced when invoking an adapted native function.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("wrong number of arguments: expected {expected}, got {got}")]
    WrongArity { expected: usize, got: usize },

    #[error("argument {index}: expected {expected}, got {got}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        got: &'static str,
    },

    /// A non-nil error returned by the wrapped native function, carried
    /// across the bridge as its rendered message.
    #[error("{0}")]
    Native(String),

    #[error("unknown builtin `{0}`")]
    UnknownBuiltin(String),
}

impl CallError {
    /// Build a [`CallError::TypeMismatch`] for argument `index`, recording
    /// the dynamic type actually supplied.
    pub fn type_mismatch(index: usize, expected: &'static str, got: &Value) -> Self {
        CallError::TypeMismatch {
            index,
            expected,
            got: got.type_name(),
        }
    }

    /// Wrap a native error into the protocol's error representation.
    pub fn native(err: impl std::fmt::Display) -> Self {
        CallError::Native(err.to_string())
    }
}
