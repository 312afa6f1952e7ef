//! One-call pipeline: parse → collect → register → emit.
//!
//! The CLI and tests both drive generation through [`generate`]; the pieces
//! stay independently usable for embedders that want to own part of the
//! pipeline (for example to substitute marker calls themselves).

use crate::analysis::{AnalysisUnit, CollectError, Diagnostic, UnitError, collect};
use crate::emit::{self, EmitError, GeneratedAdapter};
use crate::model::{AbbrevTable, Abbreviator};
use crate::registry::Registry;

/// Configuration for one generation run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the marker function identifying adapter requests.
    pub marker: String,
    /// Abbreviation table used for canonical adapter names.
    pub table: AbbrevTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: "to_callable".to_string(),
            table: AbbrevTable::default(),
        }
    }
}

/// A run-ending failure. Per-site problems are not errors here; they come
/// back as diagnostics on [`Generation`], or ride along on the error when
/// the run ends before producing one.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] UnitError),

    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error("emission failed: {source}")]
    Emit {
        source: EmitError,
        diagnostics: Vec<Diagnostic>,
    },
}

impl GenerateError {
    /// Diagnostics accumulated before the run ended.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            GenerateError::Parse(_) => &[],
            GenerateError::Collect(err) => err.diagnostics(),
            GenerateError::Emit { diagnostics, .. } => diagnostics,
        }
    }
}

/// Everything one generation run produced.
#[derive(Debug)]
pub struct Generation {
    /// Rendered adapter module source.
    pub source: String,
    /// Adapters in deterministic order, with the sites each serves.
    pub adapters: Vec<GeneratedAdapter>,
    /// Accumulated per-site diagnostics, in discovery order.
    pub diagnostics: Vec<Diagnostic>,
    /// Total marker call sites that were served by an adapter.
    pub served_sites: usize,
}

/// Run the full generation pipeline over one source unit.
#[tracing::instrument(skip_all, fields(file = file_name))]
pub fn generate(file_name: &str, source: &str, config: &Config) -> Result<Generation, GenerateError> {
    let unit = AnalysisUnit::parse(file_name, source)?;
    let collection = collect(&unit, &config.marker)?;

    let mut registry = Registry::new(Abbreviator::new(config.table.clone()));
    let mut diagnostics = collection.diagnostics;
    for site in collection.call_sites {
        registry.register(site);
    }
    diagnostics.extend(registry.take_diagnostics());

    let adapters = emit::adapters(&registry);
    let source = match emit::render_module(&adapters) {
        Ok(source) => source,
        Err(source) => return Err(GenerateError::Emit { source, diagnostics }),
    };

    tracing::info!(
        adapters = adapters.len(),
        served_sites = registry.site_count(),
        diagnostics = diagnostics.len(),
        "generation complete"
    );

    Ok(Generation {
        source,
        adapters,
        diagnostics,
        served_sites: registry.site_count(),
    })
}
