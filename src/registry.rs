//! Signature deduplication and adapter naming.
//!
//! The registry owns the one guarantee everything else leans on:
//! structurally identical signatures, regardless of how many call sites or
//! distinct wrapped functions produce them, share exactly one generated
//! adapter. The dedup key is the signature's full structural rendering; the
//! short canonical name is only an identifier for emitted code, and the
//! registry disambiguates it with a numeric suffix if two distinct
//! signatures ever collide on it.
//!
//! State lives for one generation run and is discarded after emission.

use std::collections::{BTreeMap, HashMap};

use crate::analysis::{CallSite, Diagnostic};
use crate::model::{Abbreviator, Signature};

/// The generation unit: a named adapter for one distinct signature.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub signature: Signature,
}

/// What [`Registry::register`] did with a call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// First site with this signature; a new adapter was created.
    Registered { name: String },
    /// The signature already had an adapter; the site joined its group.
    Deduplicated { name: String },
    /// The signature could not be named; the site gets no adapter and an
    /// Error diagnostic records why.
    Unserved,
}

/// Per-run store of adapters and the call sites they serve.
pub struct Registry {
    abbrev: Abbreviator,
    /// Structural key → adapter. BTreeMap so iteration (and therefore
    /// emission and reports) is deterministic.
    functions: BTreeMap<String, Function>,
    /// Structural key → every call site sharing that signature. Key sets of
    /// the two maps are always identical, and every list is non-empty.
    call_sites: BTreeMap<String, Vec<CallSite>>,
    /// Canonical name → owning structural key, for collision detection.
    names: HashMap<String, String>,
    diagnostics: Vec<Diagnostic>,
}

impl Registry {
    pub fn new(abbrev: Abbreviator) -> Self {
        Self {
            abbrev,
            functions: BTreeMap::new(),
            call_sites: BTreeMap::new(),
            names: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Register one call site, creating an adapter if its signature is new.
    pub fn register(&mut self, site: CallSite) -> RegisterOutcome {
        // The dynamic protocol has no error value kind, so the distinguished
        // error type is only bridgeable as a trailing result. Rejecting the
        // site here keeps the emitter total over registered signatures.
        if site.signature.has_misplaced_error() {
            self.diagnostics.push(Diagnostic::error(
                site.location.clone(),
                format!(
                    "cannot adapt `{}`: the error type is only bridgeable as a trailing result",
                    site.signature
                ),
            ));
            return RegisterOutcome::Unserved;
        }

        let key = site.signature.structural_key();

        if let Some(existing) = self.functions.get(&key) {
            let name = existing.name.clone();
            tracing::debug!(adapter = %name, call = %site.location, "deduplicated call site");
            // Appending through the entry keeps "add a site to its group"
            // a single update on the owning map.
            self.call_sites.entry(key).or_default().push(site);
            return RegisterOutcome::Deduplicated { name };
        }

        let name = match self.abbrev.canonical_name(&site.signature) {
            Ok(base) => self.claim_name(base, &key, &site),
            Err(err) => {
                self.diagnostics.push(Diagnostic::error(
                    site.location.clone(),
                    format!("cannot name an adapter for `{}`: {}", site.signature, err),
                ));
                return RegisterOutcome::Unserved;
            }
        };

        tracing::debug!(adapter = %name, signature = %site.signature, call = %site.location, "new adapter");
        self.functions.insert(
            key.clone(),
            Function {
                name: name.clone(),
                signature: site.signature.clone(),
            },
        );
        self.call_sites.entry(key).or_default().push(site);
        RegisterOutcome::Registered { name }
    }

    /// Reserve a canonical name for `key`, suffixing on collision so the
    /// emitted identifiers stay unique.
    fn claim_name(&mut self, base: String, key: &str, site: &CallSite) -> String {
        let mut name = base.clone();
        let mut suffix = 1usize;
        while self.names.contains_key(&name) {
            suffix += 1;
            name = format!("{}_{}", base, suffix);
        }
        if name != base {
            let owner = self.names.get(&base).cloned().unwrap_or_default();
            self.diagnostics.push(Diagnostic::warning(
                site.location.clone(),
                format!(
                    "canonical name `{}` already names the adapter for `{}`; using `{}` for `{}`",
                    base, owner, name, site.signature
                ),
            ));
        }
        self.names.insert(name.clone(), key.to_string());
        name
    }

    /// Registered adapters in deterministic (structural-key) order.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.functions.values()
    }

    /// Call sites grouped under a structural key.
    pub fn call_sites(&self, key: &str) -> &[CallSite] {
        self.call_sites.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Structural keys with their adapters and site groups, in order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Function, &[CallSite])> {
        self.functions.iter().map(|(key, function)| {
            let sites = self.call_sites.get(key).map(Vec::as_slice).unwrap_or(&[]);
            (key.as_str(), function, sites)
        })
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Number of distinct adapters.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Total call sites across all groups.
    pub fn site_count(&self) -> usize {
        self.call_sites.values().map(Vec::len).sum()
    }
}
