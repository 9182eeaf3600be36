//! Advisory diagnostics for parsing and shuffling
//!
//! Structural anomalies (an unterminated block at end of input) and
//! constraint-search soft failures are reported as diagnostics rather than
//! errors: they never abort a run. Library code returns them alongside its
//! results; the CLI decides how to present them.

use std::fmt;

/// Diagnostic severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// An advisory message with optional source-line context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// 1-based source line the diagnostic refers to, when known.
    pub line: Option<usize>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            line: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
            line: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}: {} (line {})", self.severity, self.message, line),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_severity_and_line() {
        let diagnostic = Diagnostic::warning("unterminated question block 'Q01'").with_line(12);
        assert_eq!(
            diagnostic.to_string(),
            "warning: unterminated question block 'Q01' (line 12)"
        );
    }

    #[test]
    fn display_without_line() {
        let diagnostic = Diagnostic::info("constraint satisfied on attempt 3");
        assert_eq!(
            diagnostic.to_string(),
            "info: constraint satisfied on attempt 3"
        );
    }
}
