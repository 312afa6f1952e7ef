//! The dynamic value representation exchanged across the bridge.

/// A dynamically-typed script value.
///
/// Integers are always 64-bit on the script side; narrower native integers
/// widen on the way in and range-check on the way out (see
/// [`crate::convert`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value; what a native call with no results produces.
    Unit,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Homogeneous on the native side, but the protocol itself does not
    /// enforce element types.
    List(Vec<Value>),
}

impl Value {
    /// Protocol-level name of this value's type, used in call errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}
