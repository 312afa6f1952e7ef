//! Command implementations for the tether CLI.

use std::fs;
use std::path::Path;

use crate::analysis::{has_errors, print_diagnostic};
use crate::facade::{Config, Generation, generate as run_generation};

use super::{CliError, CliResult};

/// Run the pipeline over `file` and print its diagnostics.
fn generation_for(file: &Path, marker: &str) -> CliResult<Generation> {
    let source = fs::read_to_string(file)
        .map_err(|e| CliError::failure(format!("cannot read {}: {}", file.display(), e)))?;

    let config = Config {
        marker: marker.to_string(),
        ..Config::default()
    };

    let generation = match run_generation(&file.display().to_string(), &source, &config) {
        Ok(generation) => generation,
        Err(e) => {
            // A run-ending failure still surfaces whatever the run found
            // before it died.
            for diag in e.diagnostics() {
                print_diagnostic(diag);
            }
            return Err(CliError::failure(format!("{}", e)));
        }
    };

    for diag in &generation.diagnostics {
        print_diagnostic(diag);
    }
    Ok(generation)
}

/// `tether generate FILE [-o OUT]`
pub fn generate(file: &Path, out: Option<&Path>, marker: &str) -> CliResult<()> {
    let generation = generation_for(file, marker)?;

    if has_errors(&generation.diagnostics) {
        return Err(CliError::failure(format!(
            "{}: generation aborted; fix the errors above",
            file.display()
        )));
    }

    match out {
        Some(path) => {
            fs::write(path, &generation.source)
                .map_err(|e| CliError::failure(format!("cannot write {}: {}", path.display(), e)))?;
            eprintln!(
                "wrote {} adapter(s) serving {} call site(s) to {}",
                generation.adapters.len(),
                generation.served_sites,
                path.display()
            );
        }
        None => print!("{}", generation.source),
    }
    Ok(())
}

/// `tether scan FILE` - the dedup report, one group per distinct signature.
pub fn scan(file: &Path, marker: &str) -> CliResult<()> {
    let generation = generation_for(file, marker)?;

    print!("{}", scan_report(&generation));

    if has_errors(&generation.diagnostics) {
        return Err(CliError::new("", super::ExitCode::FAILURE));
    }
    Ok(())
}

/// `tether FILE` - check only; succeed iff the file would generate cleanly.
pub fn check(file: &Path, marker: &str) -> CliResult<()> {
    let generation = generation_for(file, marker)?;

    eprintln!(
        "{}: {} adapter(s), {} call site(s), {} diagnostic(s)",
        file.display(),
        generation.adapters.len(),
        generation.served_sites,
        generation.diagnostics.len()
    );

    if has_errors(&generation.diagnostics) {
        return Err(CliError::new("", super::ExitCode::FAILURE));
    }
    Ok(())
}

/// Render the scan listing: each adapter, its signature, and its sites.
pub fn scan_report(generation: &Generation) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    for adapter in &generation.adapters {
        // Writing to String cannot fail.
        let _ = writeln!(
            &mut out,
            "{}  {}  {} call site(s)",
            adapter.name,
            adapter.signature,
            adapter.sites.len()
        );
        for site in &adapter.sites {
            let _ = writeln!(&mut out, "    {}", site);
        }
    }
    out
}
