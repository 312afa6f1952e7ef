//! Emit adapter source from registered signatures.
//!
//! Every adapter is a factory: it takes the native function as a plain `fn`
//! pointer of the signature's shape and returns a boxed callable satisfying
//! the dynamic call convention. The body always does the same five things:
//! validate arity, unwrap each argument through `FromValue`, invoke the
//! native function positionally, wrap the results back through `IntoValue`,
//! and route a trailing error result onto the protocol's error channel.
//!
//! Emission produces a `syn` file from `quote!` tokens and formats it with
//! `prettyplease`, so generated output is always valid, readable Rust.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::analysis::SourcePos;
use crate::model::{Signature, Type};
use crate::registry::Registry;

/// Error during adapter emission.
#[derive(Debug)]
pub enum EmitError {
    SynParse(String),
    Unsupported(String),
}

impl std::fmt::Display for EmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmitError::SynParse(msg) => write!(f, "syn parse error: {}", msg),
            EmitError::Unsupported(msg) => write!(f, "unsupported: {}", msg),
        }
    }
}

impl std::error::Error for EmitError {}

/// One adapter ready for emission, with the call sites it serves.
///
/// The external substitution step uses `sites` to rewrite each originating
/// marker call to this adapter's name.
#[derive(Debug, Clone)]
pub struct GeneratedAdapter {
    pub name: String,
    pub signature: Signature,
    pub sites: Vec<SourcePos>,
}

/// Snapshot the registry's adapters in deterministic order.
pub fn adapters(registry: &Registry) -> Vec<GeneratedAdapter> {
    registry
        .entries()
        .map(|(_, function, sites)| GeneratedAdapter {
            name: function.name.clone(),
            signature: function.signature.clone(),
            sites: sites.iter().map(|s| s.location.clone()).collect(),
        })
        .collect()
}

/// Render a complete adapter module for the given adapters.
#[tracing::instrument(skip_all, fields(adapter_count = adapters.len()))]
pub fn render_module(adapters: &[GeneratedAdapter]) -> Result<String, EmitError> {
    let mut items = TokenStream::new();
    let mut needs_error = false;
    for adapter in adapters {
        items.extend(adapter_tokens(adapter)?);
        needs_error |= adapter.signature.has_trailing_error();
    }

    let error_use = needs_error.then(|| quote! { use tether_value::Error; });
    let module = quote! {
        #![doc = " Adapters generated by tether; do not edit."]
        #![allow(unused_imports)]
        use tether_value::{Callable, CallError, FromValue, IntoValue, Value};
        #error_use
        #items
    };

    let file: syn::File = syn::parse2(module).map_err(|e| EmitError::SynParse(e.to_string()))?;
    Ok(prettyplease::unparse(&file))
}

/// Tokens for one adapter function.
pub fn adapter_tokens(adapter: &GeneratedAdapter) -> Result<TokenStream, EmitError> {
    let sig = &adapter.signature;

    // The registry never registers such a signature; this guards direct
    // callers of the emitter.
    if sig.has_misplaced_error() {
        return Err(EmitError::Unsupported(format!(
            "`{}`: the error type is only bridgeable as a trailing result",
            sig
        )));
    }

    let fn_name = format_ident!("{}", adapter.name);
    let doc = format!(" Adapter for natives of shape `{}`.", sig);
    let native_ty = native_fn_tokens(sig);
    let arity = sig.params.len();

    let arg_names: Vec<_> = (0..arity).map(|i| format_ident!("a{}", i)).collect();
    let unwraps = sig.params.iter().zip(&arg_names).enumerate().map(|(i, (ty, var))| {
        let native = type_tokens(ty);
        let idx = syn::Index::from(i);
        quote! {
            let #var: #native = <#native as FromValue>::from_value(&args[#idx])
                .ok_or_else(|| CallError::type_mismatch(#idx, <#native as FromValue>::EXPECTED, &args[#idx]))?;
        }
    });

    let tail = call_and_wrap_tokens(sig, &arg_names);

    Ok(quote! {
        #[doc = #doc]
        #[allow(non_snake_case)]
        pub fn #fn_name(f: #native_ty) -> Callable {
            Box::new(move |args: &[Value]| -> Result<Value, CallError> {
                if args.len() != #arity {
                    return Err(CallError::WrongArity { expected: #arity, got: args.len() });
                }
                #(#unwraps)*
                #tail
            })
        }
    })
}

/// Tokens for the native `fn` pointer type of a signature.
fn native_fn_tokens(sig: &Signature) -> TokenStream {
    let params = sig.params.iter().map(type_tokens);
    let normal: Vec<_> = sig.normal_results().iter().map(type_tokens).collect();

    let base = match normal.len() {
        0 => quote! { () },
        1 => {
            let only = &normal[0];
            quote! { #only }
        }
        _ => quote! { (#(#normal),*) },
    };

    let ret = if sig.has_trailing_error() {
        quote! { -> Result<#base, Error> }
    } else if normal.is_empty() {
        TokenStream::new()
    } else {
        quote! { -> #base }
    };

    quote! { fn(#(#params),*) #ret }
}

/// Tokens for the native call plus result wrapping.
fn call_and_wrap_tokens(sig: &Signature, args: &[proc_macro2::Ident]) -> TokenStream {
    let call = quote! { f(#(#args),*) };
    let results: Vec<_> = (0..sig.normal_results().len())
        .map(|i| format_ident!("r{}", i))
        .collect();

    if sig.has_trailing_error() {
        let ok_arm = match results.len() {
            0 => quote! { Ok(()) => Ok(Value::Unit) },
            1 => {
                let r = &results[0];
                quote! { Ok(#r) => Ok(#r.into_value()) }
            }
            _ => quote! { Ok((#(#results),*)) => Ok(Value::List(vec![#(#results.into_value()),*])) },
        };
        return quote! {
            match #call {
                #ok_arm,
                Err(err) => Err(CallError::Native(err.to_string())),
            }
        };
    }

    match results.len() {
        0 => quote! {
            #call;
            Ok(Value::Unit)
        },
        1 => {
            let r = &results[0];
            quote! {
                let #r = #call;
                Ok(#r.into_value())
            }
        }
        _ => quote! {
            let (#(#results),*) = #call;
            Ok(Value::List(vec![#(#results.into_value()),*]))
        },
    }
}

fn type_tokens(ty: &Type) -> TokenStream {
    match ty {
        Type::Basic(name) => {
            let ident = format_ident!("{}", name);
            quote! { #ident }
        }
        Type::Sequence(elem) => {
            let ident = format_ident!("{}", elem);
            quote! { Vec<#ident> }
        }
        Type::Named(_) => quote! { Error },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::signature::Tuple;

    fn adapter(name: &str, params: Vec<Type>, results: Vec<Type>) -> GeneratedAdapter {
        GeneratedAdapter {
            name: name.to_string(),
            signature: Signature {
                params: Tuple(params),
                results: Tuple(results),
            },
            sites: Vec::new(),
        }
    }

    fn i64_ty() -> Type {
        Type::Basic("i64".to_string())
    }

    fn rendered(adapter: &GeneratedAdapter) -> String {
        render_module(std::slice::from_ref(adapter)).expect("emission should succeed")
    }

    #[test]
    fn simple_adapter_shape() {
        let out = rendered(&adapter("FuncAI64RI64", vec![i64_ty()], vec![i64_ty()]));
        assert!(out.contains("pub fn FuncAI64RI64(f: fn(i64) -> i64) -> Callable"));
        assert!(out.contains("if args.len() != 1usize"));
        assert!(out.contains("from_value(&args[0])"));
        assert!(out.contains("Ok(r0.into_value())"));
    }

    #[test]
    fn trailing_error_routes_to_the_error_channel() {
        let out = rendered(&adapter("FuncARI64E", vec![], vec![i64_ty(), Type::error()]));
        assert!(out.contains("fn() -> Result<i64, Error>"));
        assert!(out.contains("Ok(r0) => Ok(r0.into_value())"));
        assert!(out.contains("Err(err) => Err(CallError::Native(err.to_string()))"));
        assert!(out.contains("use tether_value::Error;"));
    }

    #[test]
    fn error_only_result_returns_unit() {
        let out = rendered(&adapter("FuncARE", vec![], vec![Type::error()]));
        assert!(out.contains("fn() -> Result<(), Error>"));
        assert!(out.contains("Ok(()) => Ok(Value::Unit)"));
    }

    #[test]
    fn multiple_results_wrap_as_a_list() {
        let out = rendered(&adapter(
            "FuncARI64S",
            vec![],
            vec![i64_ty(), Type::Basic("String".to_string())],
        ));
        assert!(out.contains("fn() -> (i64, String)"));
        assert!(out.contains("let (r0, r1) = f();"));
        assert!(out.contains("Value::List(vec![r0.into_value(), r1.into_value()])"));
    }

    #[test]
    fn no_results_wrap_as_unit() {
        let out = rendered(&adapter("FuncAI64R", vec![i64_ty()], vec![]));
        assert!(out.contains("fn(i64)) -> Callable") || out.contains("f: fn(i64)"));
        assert!(out.contains("Ok(Value::Unit)"));
    }

    #[test]
    fn sequence_params_use_vec() {
        let out = rendered(&adapter("FuncAI64sRI64", vec![Type::Sequence("i64".to_string())], vec![i64_ty()]));
        assert!(out.contains("fn(Vec<i64>) -> i64"));
    }

    #[test]
    fn error_outside_trailing_position_is_unsupported() {
        let bad = adapter("FuncAER", vec![Type::error()], vec![]);
        let err = adapter_tokens(&bad).unwrap_err();
        assert!(matches!(err, EmitError::Unsupported(_)));
    }

    #[test]
    fn rendered_module_is_valid_rust() {
        let out = render_module(&[
            adapter("FuncAI64RI64", vec![i64_ty()], vec![i64_ty()]),
            adapter("FuncARE", vec![], vec![Type::error()]),
        ])
        .unwrap();
        syn::parse_file(&out).expect("generated module should reparse");
    }
}
