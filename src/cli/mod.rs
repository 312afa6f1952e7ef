//! CLI for the tether generator.
//!
//! ## Commands
//!
//! - `generate <file>` - Generate the adapter module for a source file
//! - `scan <file>` - List discovered call sites grouped by signature
//! - `<file>` (no subcommand) - Check only: report diagnostics, emit nothing
//!
//! ## Design
//!
//! Argument parsing uses clap derive macros. Command functions return
//! `CliResult<T>` instead of calling `process::exit`; only the top-level
//! `run()` handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The tether adapter generator
#[derive(Parser, Debug)]
#[command(name = "tether")]
#[command(version = VERSION)]
#[command(about = "Generate dynamic-call adapters for marked native functions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Marker function name to scan for
    #[arg(long = "marker", global = true, default_value = "to_callable")]
    pub marker: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the adapter module for a source file
    Generate {
        /// Source file to scan
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Write generated source here instead of stdout
        #[arg(short = 'o', long = "out", value_name = "OUT")]
        out: Option<PathBuf>,
    },
    /// List discovered call sites grouped by signature
    Scan {
        /// Source file to scan
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// CLI entry point: parse arguments, dispatch, exit.
pub fn run() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Generate { file, out }) => commands::generate(&file, out.as_deref(), &cli.marker),
        Some(Command::Scan { file }) => commands::scan(&file, &cli.marker),
        None => match cli.file {
            Some(file) => commands::check(&file, &cli.marker),
            None => Err(CliError::failure("no input file; see `tether --help`")),
        },
    };

    if let Err(err) = result {
        if !err.message.is_empty() {
            eprintln!("{}", err);
        }
        process::exit(err.exit_code.0);
    }
}
