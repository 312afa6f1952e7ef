//! Deterministic short names for signatures.
//!
//! Adapter identifiers are assembled from per-type codes:
//! `"FuncA" + codes(params) + "R" + codes(results)`. The codes are a fixed
//! table keyed on canonical type names; lookup is exact-match and absence is
//! an error, never a fallback. The resulting name is a human-meaningful
//! identifier for emitted code, not the deduplication key — the registry
//! guards against distinct signatures colliding on the same name.

use std::collections::BTreeMap;

use super::signature::{Signature, Tuple};
use super::ty::Type;

/// Pluralization suffix for sequence codes.
const SEQUENCE_SUFFIX: &str = "s";

/// Immutable type-name → code table.
///
/// Passed into the [`Abbreviator`] at construction so runs with different
/// tables can coexist; there is no ambient table state.
#[derive(Debug, Clone)]
pub struct AbbrevTable {
    codes: BTreeMap<String, String>,
}

impl AbbrevTable {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            codes: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn code(&self, name: &str) -> Option<&str> {
        self.codes.get(name).map(String::as_str)
    }
}

impl Default for AbbrevTable {
    /// The stock table covering every type the bridge recognizes.
    fn default() -> Self {
        Self::from_pairs([
            ("bool", "B"),
            ("f64", "F"),
            ("i64", "I64"),
            ("i32", "I"),
            ("String", "S"),
            ("error", "E"),
        ])
    }
}

/// A recognized type with no entry in the abbreviation table.
#[derive(Debug, Clone, thiserror::Error)]
#[error("no abbreviation for type `{ty}`")]
pub struct AbbrevError {
    pub ty: String,
}

/// Maps types and signatures to their short identifier fragments.
#[derive(Debug, Clone, Default)]
pub struct Abbreviator {
    table: AbbrevTable,
}

impl Abbreviator {
    pub fn new(table: AbbrevTable) -> Self {
        Self { table }
    }

    /// Code for a single type. Sequences take the element's code plus the
    /// pluralization suffix; an unrecognized element fails even though
    /// sequences in general are supported.
    pub fn abbreviate(&self, ty: &Type) -> Result<String, AbbrevError> {
        let code = self.table.code(ty.name()).ok_or_else(|| AbbrevError {
            ty: ty.to_string(),
        })?;
        match ty {
            Type::Basic(_) | Type::Named(_) => Ok(code.to_string()),
            Type::Sequence(_) => Ok(format!("{}{}", code, SEQUENCE_SUFFIX)),
        }
    }

    /// Per-element codes concatenated in order with no separator. Order
    /// matters; `(i64, String)` and `(String, i64)` abbreviate differently.
    pub fn abbreviate_tuple(&self, tuple: &Tuple) -> Result<String, AbbrevError> {
        let mut out = String::new();
        for ty in tuple.iter() {
            out.push_str(&self.abbreviate(ty)?);
        }
        Ok(out)
    }

    /// Assemble the canonical adapter name for a signature.
    pub fn canonical_name(&self, sig: &Signature) -> Result<String, AbbrevError> {
        let params = self.abbreviate_tuple(&sig.params)?;
        let results = self.abbreviate_tuple(&sig.results)?;
        Ok(format!("FuncA{}R{}", params, results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(name: &str) -> Type {
        Type::Basic(name.to_string())
    }

    #[test]
    fn stock_table_codes() {
        let abbrev = Abbreviator::default();
        assert_eq!(abbrev.abbreviate(&basic("bool")).unwrap(), "B");
        assert_eq!(abbrev.abbreviate(&basic("f64")).unwrap(), "F");
        assert_eq!(abbrev.abbreviate(&basic("i64")).unwrap(), "I64");
        assert_eq!(abbrev.abbreviate(&basic("i32")).unwrap(), "I");
        assert_eq!(abbrev.abbreviate(&basic("String")).unwrap(), "S");
        assert_eq!(abbrev.abbreviate(&Type::error()).unwrap(), "E");
    }

    #[test]
    fn sequence_pluralizes_element_code() {
        let abbrev = Abbreviator::default();
        assert_eq!(abbrev.abbreviate(&Type::Sequence("i64".to_string())).unwrap(), "I64s");
    }

    #[test]
    fn unknown_type_is_an_error_not_a_fallback() {
        let abbrev = Abbreviator::default();
        let err = abbrev.abbreviate(&basic("u8")).unwrap_err();
        assert_eq!(err.to_string(), "no abbreviation for type `u8`");
    }

    #[test]
    fn unknown_sequence_element_fails() {
        let abbrev = Abbreviator::default();
        let err = abbrev.abbreviate(&Type::Sequence("u8".to_string())).unwrap_err();
        assert!(err.to_string().contains("Vec<u8>"));
    }

    #[test]
    fn tuple_concatenation_is_ordered() {
        let abbrev = Abbreviator::default();
        let ab = Tuple(vec![basic("i64"), basic("String")]);
        let ba = Tuple(vec![basic("String"), basic("i64")]);
        assert_eq!(abbrev.abbreviate_tuple(&ab).unwrap(), "I64S");
        assert_eq!(abbrev.abbreviate_tuple(&ba).unwrap(), "SI64");
    }

    #[test]
    fn canonical_name_template() {
        let abbrev = Abbreviator::default();
        let sig = Signature {
            params: Tuple(vec![basic("i64")]),
            results: Tuple(vec![basic("i64")]),
        };
        assert_eq!(abbrev.canonical_name(&sig).unwrap(), "FuncAI64RI64");
    }

    #[test]
    fn empty_tuples_leave_empty_fragments() {
        let abbrev = Abbreviator::default();
        let sig = Signature {
            params: Tuple(Vec::new()),
            results: Tuple(Vec::new()),
        };
        assert_eq!(abbrev.canonical_name(&sig).unwrap(), "FuncAR");
    }

    #[test]
    fn custom_table_is_honored() {
        let abbrev = Abbreviator::new(AbbrevTable::from_pairs([("i64", "N")]));
        assert_eq!(abbrev.abbreviate(&basic("i64")).unwrap(), "N");
        assert!(abbrev.abbreviate(&basic("bool")).is_err());
    }
}
