//! Name → callable registry the embedding engine dispatches through.

use std::collections::BTreeMap;

use crate::error::CallError;
use crate::value::Value;

/// The dynamic call convention every adapted native function satisfies.
pub type Callable = Box<dyn Fn(&[Value]) -> Result<Value, CallError> + Send + Sync>;

/// Registry of adapted builtins, keyed by their script-visible name.
///
/// Iteration order is the sorted name order, so engine-side dispatch tables
/// and docs come out deterministic.
#[derive(Default)]
pub struct Builtins {
    entries: BTreeMap<String, Callable>,
}

impl Builtins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callable under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, callable: Callable) {
        self.entries.insert(name.into(), callable);
    }

    pub fn get(&self, name: &str) -> Option<&Callable> {
        self.entries.get(name)
    }

    /// Invoke a registered builtin by name.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, CallError> {
        let callable = self
            .entries
            .get(name)
            .ok_or_else(|| CallError::UnknownBuiltin(name.to_string()))?;
        callable(args)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{FromValue, IntoValue};

    fn double_builtin() -> Callable {
        Box::new(|args: &[Value]| -> Result<Value, CallError> {
            if args.len() != 1 {
                return Err(CallError::WrongArity {
                    expected: 1,
                    got: args.len(),
                });
            }
            let n: i64 = FromValue::from_value(&args[0])
                .ok_or_else(|| CallError::type_mismatch(0, i64::EXPECTED, &args[0]))?;
            Ok((n * 2).into_value())
        })
    }

    #[test]
    fn register_and_call() {
        let mut builtins = Builtins::new();
        builtins.register("double", double_builtin());

        assert_eq!(builtins.call("double", &[Value::Int(21)]).unwrap(), Value::Int(42));
    }

    #[test]
    fn unknown_builtin() {
        let builtins = Builtins::new();
        let err = builtins.call("missing", &[]).unwrap_err();
        assert!(matches!(err, CallError::UnknownBuiltin(name) if name == "missing"));
    }

    #[test]
    fn names_are_sorted() {
        let mut builtins = Builtins::new();
        builtins.register("zeta", double_builtin());
        builtins.register("alpha", double_builtin());
        let names: Vec<_> = builtins.names().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
