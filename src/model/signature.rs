//! Ordered parameter/result tuples and the structural key.
//!
//! Two signatures are structurally equal iff their rendered string forms are
//! equal; that rendered `"(params) -> (results)"` string is the
//! deduplication key for the whole generator. The short canonical name
//! derived in [`super::abbrev`] is deliberately NOT that key.

use super::ty::{Type, TypeError, convert_type, type_text};

/// Ordered sequence of types. Order is significant; duplicates are legal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tuple(pub Vec<Type>);

impl Tuple {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Type> {
        self.0.iter()
    }
}

impl std::fmt::Display for Tuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, ty) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", ty)?;
        }
        Ok(())
    }
}

/// A callable's shape: ordered parameter types plus ordered result types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Tuple,
    pub results: Tuple,
}

impl Signature {
    /// The full structural rendering, used as the dedup key.
    pub fn structural_key(&self) -> String {
        self.to_string()
    }

    /// Whether the final result is the distinguished error type.
    pub fn has_trailing_error(&self) -> bool {
        self.results.0.last().is_some_and(Type::is_error)
    }

    /// Whether the distinguished error type appears somewhere it cannot be
    /// bridged: a parameter, or a result other than the last.
    pub fn has_misplaced_error(&self) -> bool {
        self.params.iter().any(Type::is_error) || self.normal_results().iter().any(Type::is_error)
    }

    /// Result types excluding a trailing error, in order.
    pub fn normal_results(&self) -> &[Type] {
        let results = &self.results.0;
        if self.has_trailing_error() {
            &results[..results.len() - 1]
        } else {
            results
        }
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}) -> ({})", self.params, self.results)
    }
}

/// Error extracting a [`Signature`] from a native function declaration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SignatureError {
    #[error("methods cannot be wrapped (found a receiver parameter)")]
    Receiver,

    #[error("generic functions cannot be wrapped")]
    Generic,

    #[error("async functions cannot be wrapped")]
    Async,

    #[error(transparent)]
    Type(#[from] TypeError),
}

/// Extract a [`Signature`] from a `syn` function signature.
///
/// Results come from unpacking the return type: `()` or no return is an
/// empty tuple, a tuple return contributes each element, and `Result<T, E>`
/// contributes `T`'s expansion followed by the distinguished error type.
/// The `Err` half is not modelled structurally; any path type is accepted
/// there, because the adapter only ever renders it to a message.
pub fn signature_of(sig: &syn::Signature) -> Result<Signature, SignatureError> {
    if sig.asyncness.is_some() {
        return Err(SignatureError::Async);
    }
    if !sig.generics.params.is_empty() {
        return Err(SignatureError::Generic);
    }

    let mut params = Vec::with_capacity(sig.inputs.len());
    for input in &sig.inputs {
        match input {
            syn::FnArg::Receiver(_) => return Err(SignatureError::Receiver),
            syn::FnArg::Typed(pat) => params.push(convert_type(&pat.ty)?),
        }
    }

    let results = convert_results(&sig.output)?;
    Ok(Signature {
        params: Tuple(params),
        results: Tuple(results),
    })
}

fn convert_results(output: &syn::ReturnType) -> Result<Vec<Type>, SignatureError> {
    let ty = match output {
        syn::ReturnType::Default => return Ok(Vec::new()),
        syn::ReturnType::Type(_, ty) => ty.as_ref(),
    };

    if let syn::Type::Tuple(tuple) = ty {
        return tuple.elems.iter().map(|t| Ok(convert_type(t)?)).collect();
    }

    if let Some(ok_half) = result_ok_half(ty)? {
        let mut results = match ok_half {
            syn::Type::Tuple(tuple) => tuple
                .elems
                .iter()
                .map(|t| Ok(convert_type(t)?))
                .collect::<Result<Vec<_>, SignatureError>>()?,
            other => vec![convert_type(other)?],
        };
        results.push(Type::error());
        return Ok(results);
    }

    Ok(vec![convert_type(ty)?])
}

/// If `ty` is a `Result<T, E>` spelling, return `T`. The error half must be
/// a path type; anything fancier is unsupported.
fn result_ok_half(ty: &syn::Type) -> Result<Option<&syn::Type>, SignatureError> {
    let syn::Type::Path(type_path) = ty else {
        return Ok(None);
    };
    let Some(last) = type_path.path.segments.last() else {
        return Ok(None);
    };
    if last.ident != "Result" {
        return Ok(None);
    }
    let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
        return Ok(None);
    };

    let mut type_args = args.args.iter().filter_map(|arg| match arg {
        syn::GenericArgument::Type(t) => Some(t),
        _ => None,
    });
    let Some(ok_half) = type_args.next() else {
        return Ok(None);
    };
    if let Some(err_half) = type_args.next() {
        if !matches!(err_half, syn::Type::Path(_)) {
            return Err(SignatureError::Type(TypeError::Unsupported(type_text(err_half))));
        }
    }
    Ok(Some(ok_half))
}
