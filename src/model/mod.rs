//! The signature data model: types, tuples, signatures, abbreviations.

pub mod abbrev;
pub mod signature;
pub mod ty;

pub use abbrev::{AbbrevError, AbbrevTable, Abbreviator};
pub use signature::{Signature, SignatureError, Tuple, signature_of};
pub use ty::{Type, TypeError, convert_type};
