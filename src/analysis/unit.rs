//! The analysis unit: one parsed source file plus its declaration index.
//!
//! Resolution here is deliberately simple: pass one indexes every free `fn`
//! item (nested modules included) by name; pass two — the collector — looks
//! marker arguments up by final path segment. Duplicate names across modules
//! take the lexically last definition. Cross-unit resolution is out of
//! scope.

use std::collections::HashMap;

use syn::spanned::Spanned;
use syn::visit::{self, Visit};

/// A position in the analyzed source, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePos {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for SourcePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Error loading a source file into an [`AnalysisUnit`].
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("failed to parse {file}: {source}")]
    Parse { file: String, source: syn::Error },
}

/// A parsed compilation unit the collector walks.
#[derive(Debug)]
pub struct AnalysisUnit {
    file_name: String,
    ast: syn::File,
    functions: HashMap<String, syn::Signature>,
}

impl AnalysisUnit {
    /// Parse `source` and index its function declarations.
    #[tracing::instrument(skip_all, fields(file = file_name, source_len = source.len()))]
    pub fn parse(file_name: &str, source: &str) -> Result<Self, UnitError> {
        let ast = syn::parse_file(source).map_err(|source| UnitError::Parse {
            file: file_name.to_string(),
            source,
        })?;

        let mut index = FnIndex::default();
        index.visit_file(&ast);
        tracing::debug!(functions = index.functions.len(), "indexed unit");

        Ok(Self {
            file_name: file_name.to_string(),
            ast,
            functions: index.functions,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn ast(&self) -> &syn::File {
        &self.ast
    }

    /// Resolve an identifier to its declared function signature.
    pub fn resolve(&self, name: &str) -> Option<&syn::Signature> {
        self.functions.get(name)
    }

    /// Source position of a spanned node.
    ///
    /// proc-macro2 reports 1-based lines and 0-based columns; we normalize
    /// columns to 1-based for display.
    pub fn position(&self, node: &impl Spanned) -> SourcePos {
        let start = node.span().start();
        SourcePos {
            file: self.file_name.clone(),
            line: start.line,
            column: start.column + 1,
        }
    }
}

/// First pass: free `fn` items by name.
#[derive(Default)]
struct FnIndex {
    functions: HashMap<String, syn::Signature>,
}

impl<'ast> Visit<'ast> for FnIndex {
    fn visit_item_fn(&mut self, node: &'ast syn::ItemFn) {
        self.functions.insert(node.sig.ident.to_string(), node.sig.clone());
        visit::visit_item_fn(self, node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"
fn top(a: i64) -> i64 { a }

mod inner {
    fn nested(s: String) {}
}
"#;

    #[test]
    fn indexes_free_functions() {
        let unit = AnalysisUnit::parse("lib.rs", SOURCE).unwrap();
        assert!(unit.resolve("top").is_some());
        assert!(unit.resolve("nested").is_some(), "nested module fns should be indexed");
        assert!(unit.resolve("absent").is_none());
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = AnalysisUnit::parse("broken.rs", "fn oops(").unwrap_err();
        assert!(err.to_string().contains("broken.rs"));
    }

    #[test]
    fn position_is_one_based() {
        let unit = AnalysisUnit::parse("lib.rs", SOURCE).unwrap();
        let sig = unit.resolve("top").unwrap();
        let pos = unit.position(&sig.ident);
        assert_eq!(pos.line, 2);
        assert!(pos.column >= 1);
        assert_eq!(pos.to_string(), format!("lib.rs:2:{}", pos.column));
    }
}
