//! Conversions between native types and the dynamic [`Value`] protocol.
//!
//! Generated adapters unwrap every argument through [`FromValue`] and wrap
//! every native result through [`IntoValue`]. The impls here cover exactly
//! the native types the generator's type model recognizes; adding a type to
//! the bridge means adding its conversions here and its abbreviation on the
//! generator side.

use crate::value::Value;

/// Unwrap a dynamic [`Value`] into a native type.
///
/// `from_value` returns `None` on a protocol type mismatch (including a
/// 64-bit integer that does not fit the requested width); the adapter turns
/// that into a [`crate::CallError::TypeMismatch`] naming [`Self::EXPECTED`].
pub trait FromValue: Sized {
    /// Protocol-level name of the expected dynamic type, for call errors.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

/// Wrap a native value into the dynamic [`Value`] protocol.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    // Names the width so a range failure reads "expected int (32-bit),
    // got int" rather than "expected int, got int".
    const EXPECTED: &'static str = "int (32-bit)";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => i32::try_from(*n).ok(),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_round_trip() {
        assert_eq!(i64::from_value(&151i64.into_value()), Some(151));
    }

    #[test]
    fn narrow_int_range_checked() {
        assert_eq!(i32::from_value(&Value::Int(1 << 40)), None);
        assert_eq!(i32::from_value(&Value::Int(-7)), Some(-7));
    }

    #[test]
    fn narrow_int_range_failure_is_distinguishable() {
        let oversized = Value::Int(1 << 40);
        let err = crate::CallError::type_mismatch(0, i32::EXPECTED, &oversized);
        assert_eq!(err.to_string(), "argument 0: expected int (32-bit), got int");
    }

    #[test]
    fn mismatched_kind_is_none() {
        assert_eq!(f64::from_value(&Value::Int(3)), None);
        assert_eq!(String::from_value(&Value::Bool(true)), None);
    }

    #[test]
    fn list_of_ints() {
        let v = vec![1i64, 2, 3].into_value();
        assert_eq!(v, Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]));
        assert_eq!(Vec::<i64>::from_value(&v), Some(vec![1, 2, 3]));
    }

    #[test]
    fn heterogeneous_list_fails_typed_unwrap() {
        let v = Value::List(vec![Value::Int(1), Value::Str("x".into())]);
        assert_eq!(Vec::<i64>::from_value(&v), None);
    }
}
