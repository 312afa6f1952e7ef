//! The source-analysis front end: parsed units, marker-call collection,
//! and the diagnostics they produce.

pub mod collector;
pub mod diagnostics;
pub mod unit;

pub use collector::{CallSite, CollectError, Collection, collect};
pub use diagnostics::{Diagnostic, Severity, has_errors, print_diagnostic};
pub use unit::{AnalysisUnit, SourcePos, UnitError};
