//! User-facing diagnostics.
//!
//! A toolchain problem is reported as a headline, the place it came from,
//! some context, and a numbered list of ways to fix it.

use std::fmt::{self, Write as _};
use std::path::PathBuf;

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// ANSI style for the label (bold red or bold yellow).
    fn ansi(self) -> &'static str {
        match self {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related file
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Error, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic::new(Severity::Warning, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for a terminal, with ANSI colors if `color` is set.
    pub fn format(&self, color: bool) -> String {
        let paint = |style: &str, text: &str| {
            if color {
                format!("\x1b[{}m{}\x1b[0m", style, text)
            } else {
                text.to_string()
            }
        };

        // Writing to a String cannot fail
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {}",
            paint(self.severity.ansi(), self.severity.label()),
            self.message
        );

        if let Some(path) = &self.location {
            let _ = writeln!(out, "  --> {}", path.display());
        }
        for line in &self.context {
            let _ = writeln!(out, "  → {}", line);
        }

        if !self.suggestions.is_empty() {
            let _ = writeln!(out, "\n{}: consider:", paint("1;32", "help"));
            for (n, suggestion) in self.suggestions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", n + 1, suggestion);
            }
        }

        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("unsupported linker `ld`, must be tiarmlnk")
            .with_location("toolchain.toml")
            .with_context("TI Arm Clang links through tiarmlnk only")
            .with_suggestion("Set `linker = \"tiarmlnk\"`")
            .with_suggestion("Remove `linker` to infer it");

        let output = diag.format(false);
        assert!(output.starts_with("error: unsupported linker"));
        assert!(output.contains("--> toolchain.toml"));
        assert!(output.contains("→ TI Arm Clang links"));
        assert!(output.contains("\nhelp: consider:\n"));
        assert!(output.contains("1. Set `linker"));
        assert!(output.contains("2. Remove"));
        assert_eq!(diag.to_string(), output);
    }

    #[test]
    fn test_colored_severity() {
        let output = Diagnostic::warning("compiler not found").format(true);
        assert!(output.starts_with("\x1b[1;33mwarning\x1b[0m: compiler not found"));
        assert!(!output.contains("help"));
    }
}
