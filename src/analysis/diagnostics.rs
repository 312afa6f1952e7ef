//! Diagnostics for non-conformant call sites.

use super::unit::SourcePos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single user-facing finding, tied to the source location it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: SourcePos,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(location: SourcePos, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location,
            message: message.into(),
        }
    }

    pub fn error(location: SourcePos, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}\n  --> {}", self.severity, self.message, self.location)
    }
}

/// Print a diagnostic to stderr with terminal colors.
pub fn print_diagnostic(diag: &Diagnostic) {
    let red = "\x1b[31m";
    let yellow = "\x1b[33m";
    let cyan = "\x1b[36m";
    let bold = "\x1b[1m";
    let reset = "\x1b[0m";

    let color = match diag.severity {
        Severity::Warning => yellow,
        Severity::Error => red,
    };

    eprintln!(
        "{bold}{color}{severity}{reset}{bold}: {message}{reset}",
        severity = diag.severity,
        message = diag.message,
    );
    eprintln!("  {cyan}-->{reset} {}", diag.location);
}

/// Whether any diagnostic in `diags` is an error.
pub fn has_errors(diags: &[Diagnostic]) -> bool {
    diags.iter().any(|d| d.severity == Severity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> SourcePos {
        SourcePos {
            file: "lib.rs".to_string(),
            line: 4,
            column: 9,
        }
    }

    #[test]
    fn display_includes_location() {
        let diag = Diagnostic::warning(pos(), "wrong argument count");
        assert_eq!(diag.to_string(), "warning: wrong argument count\n  --> lib.rs:4:9");
    }

    #[test]
    fn error_detection() {
        let diags = vec![
            Diagnostic::warning(pos(), "a"),
            Diagnostic::error(pos(), "b"),
        ];
        assert!(has_errors(&diags));
        assert!(!has_errors(&diags[..1]));
    }
}
