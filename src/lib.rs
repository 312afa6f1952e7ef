#![forbid(unsafe_code)]
//! tether adapter generator
//!
//! tether scans Rust source for marker calls (`to_callable(native_fn)` by
//! default), extracts each wrapped function's parameter/result signature,
//! deduplicates structurally identical signatures, and emits one adapter
//! function per distinct signature. The adapters bridge the dynamic value
//! protocol in `tether_value` to statically-typed native calls.
//!
//! ## Pipeline
//!
//! ```text
//! source → AnalysisUnit → collect (call sites + diagnostics)
//!        → Registry (dedup + canonical names) → emit (adapter module)
//! ```
//!
//! ## Panic Policy
//!
//! Production code uses `Result` with `?`; the `cli` module enforces
//! `#![deny(clippy::unwrap_used)]`. `.unwrap()` and `.expect()` are
//! acceptable in tests.

pub mod analysis;
pub mod cli;
pub mod emit;
pub mod facade;
pub mod model;
pub mod registry;

pub use analysis::{AnalysisUnit, CallSite, Diagnostic, Severity, SourcePos, collect};
pub use emit::{EmitError, GeneratedAdapter};
pub use facade::{Config, GenerateError, Generation, generate};
pub use model::{AbbrevTable, Abbreviator, Signature, Tuple, Type};
pub use registry::{Function, RegisterOutcome, Registry};
