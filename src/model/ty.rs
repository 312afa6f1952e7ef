//! The native-type model for adaptation.
//!
//! [`Type`] is the tagged-variant view of a native type as far as the bridge
//! cares: a recognized scalar, the distinguished `error` named type, or a
//! homogeneous sequence of a recognized scalar. Everything else is
//! unrepresentable and fails conversion with the offending type's text, so
//! diagnostics can show the user exactly what the bridge rejected.

use quote::ToTokens;

/// Native scalar types the bridge can carry.
///
/// Lookup is exact-match on the bare type name; qualified spellings of these
/// are not recognized.
pub const BASIC_TYPES: &[&str] = &["bool", "i32", "i64", "f64", "String"];

/// Final path segment identifying the distinguished error type.
const ERROR_SEGMENT: &str = "Error";

/// A native type as relevant to adaptation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A recognized scalar (`bool`, `i32`, `i64`, `f64`, `String`).
    Basic(String),
    /// A recognized named type; today only the distinguished `error`.
    Named(String),
    /// `Vec<elem>` where `elem` is itself a recognized scalar. Carries the
    /// element's canonical name.
    Sequence(String),
}

impl Type {
    /// The distinguished error type, as it appears in result position.
    pub fn error() -> Self {
        Type::Named("error".to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Named(name) if name == "error")
    }

    /// Canonical textual identity: the bare name for scalars and named
    /// types, the element's name for sequences.
    pub fn name(&self) -> &str {
        match self {
            Type::Basic(name) | Type::Named(name) | Type::Sequence(name) => name,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Basic(name) | Type::Named(name) => write!(f, "{}", name),
            Type::Sequence(elem) => write!(f, "Vec<{}>", elem),
        }
    }
}

/// Error converting a native type into the bridge's [`Type`] model.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TypeError {
    #[error("unsupported type `{0}`; the bridge carries scalars, Vec<scalar>, and a trailing error")]
    Unsupported(String),

    #[error("unsupported sequence element `{0}`; only scalar element types cross the bridge")]
    NonBasicElement(String),
}

/// Convert a `syn` type into the bridge's [`Type`] model.
///
/// Recognizes exactly three shapes: bare scalar paths, `Vec<scalar>`, and
/// paths whose final segment is `Error`. Pure; no state.
pub fn convert_type(ty: &syn::Type) -> Result<Type, TypeError> {
    let syn::Type::Path(type_path) = ty else {
        return Err(TypeError::Unsupported(type_text(ty)));
    };
    if type_path.qself.is_some() {
        return Err(TypeError::Unsupported(type_text(ty)));
    }
    let path = &type_path.path;
    let last = path
        .segments
        .last()
        .ok_or_else(|| TypeError::Unsupported(type_text(ty)))?;

    // Bare scalar: a single plain segment matching the scalar table.
    if path.segments.len() == 1 && matches!(last.arguments, syn::PathArguments::None) {
        let name = last.ident.to_string();
        if BASIC_TYPES.contains(&name.as_str()) {
            return Ok(Type::Basic(name));
        }
    }

    // Sequence: Vec<elem>, elem itself a scalar.
    if last.ident == "Vec" {
        let elem = sequence_element(&last.arguments)
            .ok_or_else(|| TypeError::Unsupported(type_text(ty)))?;
        return match convert_type(elem)? {
            Type::Basic(name) => Ok(Type::Sequence(name)),
            _ => Err(TypeError::NonBasicElement(type_text(elem))),
        };
    }

    // The distinguished error type, bare or qualified.
    if last.ident == ERROR_SEGMENT && matches!(last.arguments, syn::PathArguments::None) {
        return Ok(Type::error());
    }

    Err(TypeError::Unsupported(type_text(ty)))
}

fn sequence_element(arguments: &syn::PathArguments) -> Option<&syn::Type> {
    let syn::PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first() {
        Some(syn::GenericArgument::Type(ty)) => Some(ty),
        _ => None,
    }
}

/// Render a `syn` type for diagnostics, without token-stream spacing noise.
pub fn type_text(ty: &syn::Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(" < ", "<")
        .replace(" >", ">")
        .replace("& ", "&")
}
