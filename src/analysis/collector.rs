//! Marker call-site discovery.
//!
//! Walks every call expression in an [`AnalysisUnit`] looking for calls to
//! the marker function, checks each site's shape, resolves the wrapped
//! identifier to its declared signature, and converts it to the bridge's
//! signature model. Per-site pattern problems accumulate as diagnostics; a
//! failed resolution aborts the run, because it means the unit's declaration
//! index is inconsistent and nothing else extracted from it can be trusted.

use syn::visit::{self, Visit};

use crate::model::signature::{Signature, signature_of};

use super::diagnostics::Diagnostic;
use super::unit::{AnalysisUnit, SourcePos};

/// One textual occurrence of the marker requesting an adapter.
#[derive(Debug, Clone)]
pub struct CallSite {
    pub location: SourcePos,
    /// Name of the wrapped native function, as written at the site.
    pub wrapped: String,
    pub signature: Signature,
}

/// Everything one collection pass produced.
#[derive(Debug, Default)]
pub struct Collection {
    pub call_sites: Vec<CallSite>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Structural inconsistency in the analysis input; aborts the run.
///
/// Diagnostics accumulated before the fatal site ride along so callers can
/// still surface them.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("cannot resolve `{name}` at {location}; the unit declares no such function")]
    Unresolved {
        name: String,
        location: SourcePos,
        diagnostics: Vec<Diagnostic>,
    },
}

impl CollectError {
    /// Diagnostics gathered before the run ended.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            CollectError::Unresolved { diagnostics, .. } => diagnostics,
        }
    }
}

/// Collect every marker call site in `unit`.
#[tracing::instrument(skip_all, fields(file = unit.file_name(), marker))]
pub fn collect(unit: &AnalysisUnit, marker: &str) -> Result<Collection, CollectError> {
    let mut visitor = MarkerVisitor {
        unit,
        marker,
        collection: Collection::default(),
        fatal: None,
    };
    visitor.visit_file(unit.ast());

    if let Some((name, location)) = visitor.fatal {
        return Err(CollectError::Unresolved {
            name,
            location,
            diagnostics: visitor.collection.diagnostics,
        });
    }
    tracing::debug!(
        call_sites = visitor.collection.call_sites.len(),
        diagnostics = visitor.collection.diagnostics.len(),
        "collection pass complete"
    );
    Ok(visitor.collection)
}

struct MarkerVisitor<'u> {
    unit: &'u AnalysisUnit,
    marker: &'u str,
    collection: Collection,
    fatal: Option<(String, SourcePos)>,
}

impl MarkerVisitor<'_> {
    fn inspect_call(&mut self, call: &syn::ExprCall) {
        if !self.is_marker_callee(&call.func) {
            return;
        }
        let location = self.unit.position(call);

        if call.args.len() != 1 {
            self.collection.diagnostics.push(Diagnostic::warning(
                location,
                format!(
                    "call to `{}` takes exactly one argument, found {}",
                    self.marker,
                    call.args.len()
                ),
            ));
            return;
        }

        // The argument must be a bare identifier or a qualified reference
        // to one; closures, calls, and the rest are not supported.
        let Some(arg) = call.args.first() else { return };
        let Some(name) = path_argument_name(arg) else {
            self.collection.diagnostics.push(Diagnostic::warning(
                location,
                format!(
                    "unsupported argument to `{}`; expected a plain function reference",
                    self.marker
                ),
            ));
            return;
        };

        let Some(declared) = self.unit.resolve(&name) else {
            self.fatal = Some((name, self.unit.position(arg)));
            return;
        };

        match signature_of(declared) {
            Ok(signature) => {
                tracing::debug!(wrapped = %name, signature = %signature, "found marker call");
                self.collection.call_sites.push(CallSite {
                    location,
                    wrapped: name,
                    signature,
                });
            }
            Err(err) => {
                self.collection.diagnostics.push(Diagnostic::error(
                    location,
                    format!("cannot wrap `{}`: {}", name, err),
                ));
            }
        }
    }

    /// Marker calls may be bare (`to_callable`) or qualified
    /// (`tether_value::to_callable`); the final segment decides.
    fn is_marker_callee(&self, func: &syn::Expr) -> bool {
        let syn::Expr::Path(path) = func else {
            return false;
        };
        path.qself.is_none()
            && path
                .path
                .segments
                .last()
                .is_some_and(|seg| seg.ident == self.marker && matches!(seg.arguments, syn::PathArguments::None))
    }
}

impl<'ast> Visit<'ast> for MarkerVisitor<'_> {
    fn visit_expr_call(&mut self, node: &'ast syn::ExprCall) {
        if self.fatal.is_none() {
            self.inspect_call(node);
        }
        visit::visit_expr_call(self, node);
    }
}

/// Extract the referenced function name from a marker argument, if the
/// argument is a bare or qualified path without generic arguments.
fn path_argument_name(arg: &syn::Expr) -> Option<String> {
    let syn::Expr::Path(path) = arg else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    if path
        .path
        .segments
        .iter()
        .any(|seg| !matches!(seg.arguments, syn::PathArguments::None))
    {
        return None;
    }
    path.path.segments.last().map(|seg| seg.ident.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::diagnostics::Severity;

    fn unit(source: &str) -> AnalysisUnit {
        AnalysisUnit::parse("lib.rs", source).expect("source should parse")
    }

    #[test]
    fn finds_bare_and_qualified_marker_calls() {
        let unit = unit(
            r#"
fn scale(n: i64) -> i64 { n * 2 }
fn register() {
    let a = to_callable(scale);
    let b = tether_value::to_callable(scale);
}
"#,
        );
        let collection = collect(&unit, "to_callable").unwrap();
        assert_eq!(collection.call_sites.len(), 2);
        assert!(collection.diagnostics.is_empty());
        assert_eq!(collection.call_sites[0].wrapped, "scale");
    }

    #[test]
    fn qualified_argument_resolves_by_final_segment() {
        let unit = unit(
            r#"
mod util {
    pub fn scale(n: i64) -> i64 { n * 2 }
}
fn register() {
    let a = to_callable(util::scale);
}
"#,
        );
        let collection = collect(&unit, "to_callable").unwrap();
        assert_eq!(collection.call_sites.len(), 1);
        assert_eq!(collection.call_sites[0].signature.structural_key(), "(i64) -> (i64)");
    }

    #[test]
    fn wrong_arity_is_a_warning_and_skipped() {
        let unit = unit(
            r#"
fn scale(n: i64) -> i64 { n }
fn register() {
    let a = to_callable();
    let b = to_callable(scale, scale);
}
"#,
        );
        let collection = collect(&unit, "to_callable").unwrap();
        assert!(collection.call_sites.is_empty());
        assert_eq!(collection.diagnostics.len(), 2);
        assert!(collection
            .diagnostics
            .iter()
            .all(|d| d.severity == Severity::Warning && d.message.contains("exactly one argument")));
    }

    #[test]
    fn non_path_argument_is_a_warning_and_skipped() {
        let unit = unit(
            r#"
fn register() {
    let a = to_callable(|n: i64| n);
    let b = to_callable(make_fn());
}
fn make_fn() -> i64 { 0 }
"#,
        );
        let collection = collect(&unit, "to_callable").unwrap();
        assert!(collection.call_sites.is_empty());
        assert_eq!(collection.diagnostics.len(), 2);
        assert!(collection
            .diagnostics
            .iter()
            .all(|d| d.message.contains("plain function reference")));
    }

    #[test]
    fn unresolved_reference_aborts_the_run() {
        let unit = unit(
            r#"
fn scale(n: i64) -> i64 { n }
fn register() {
    let a = to_callable(scale);
    let b = to_callable(phantom);
}
"#,
        );
        let err = collect(&unit, "to_callable").unwrap_err();
        assert!(matches!(err, CollectError::Unresolved { ref name, .. } if name == "phantom"));
    }

    #[test]
    fn fatal_error_carries_prior_diagnostics() {
        let unit = unit(
            r#"
fn scale(n: i64) -> i64 { n }
fn register() {
    let a = to_callable();
    let b = to_callable(phantom);
}
"#,
        );
        let err = collect(&unit, "to_callable").unwrap_err();
        assert_eq!(err.diagnostics().len(), 1);
        assert!(err.diagnostics()[0].message.contains("exactly one argument"));
    }

    #[test]
    fn unconvertible_signature_is_an_error_diagnostic() {
        let unit = unit(
            r#"
fn exotic(s: &str) {}
fn register() {
    let a = to_callable(exotic);
}
"#,
        );
        let collection = collect(&unit, "to_callable").unwrap();
        assert!(collection.call_sites.is_empty());
        assert_eq!(collection.diagnostics.len(), 1);
        assert_eq!(collection.diagnostics[0].severity, Severity::Error);
        assert!(collection.diagnostics[0].message.contains("cannot wrap `exotic`"));
    }

    #[test]
    fn other_calls_are_ignored() {
        let unit = unit(
            r#"
fn scale(n: i64) -> i64 { n }
fn register() {
    let a = something_else(scale);
}
fn something_else(_f: fn(i64) -> i64) {}
"#,
        );
        let collection = collect(&unit, "to_callable").unwrap();
        assert!(collection.call_sites.is_empty());
        assert!(collection.diagnostics.is_empty());
    }

    #[test]
    fn custom_marker_name() {
        let unit = unit(
            r#"
fn scale(n: i64) -> i64 { n }
fn register() {
    let a = wrap_native(scale);
}
"#,
        );
        let collection = collect(&unit, "wrap_native").unwrap();
        assert_eq!(collection.call_sites.len(), 1);
    }
}
