//! Non-fatal diagnostics raised during a compilation.
//!
//! Fatal problems are [`SunderError`](crate::SunderError)s. Everything else
//! is collected as a [`Diagnostic`] and also forwarded to the `log` facade
//! so hosts without a diagnostic renderer still see it.

use std::fmt;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational; never affects the build.
    Note,
    /// Reported, compilation proceeds.
    Warning,
}

/// Diagnostic codes emitted by the engine.
pub mod codes {
    /// A method carries both server and client signals.
    pub const AMBIGUOUS_PLACEMENT: &str = "W0001";
    /// The export-resolution expression was not found in the backend program.
    pub const EXPORT_SCOPE_NOT_FOUND: &str = "W0002";
    /// The same endpoint was registered twice in one pass.
    pub const DUPLICATE_ENDPOINT: &str = "W0003";
    /// A server pass finished without any server-bound method.
    pub const NO_ENDPOINTS: &str = "N0001";
}

/// A single diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Diagnostic code (e.g. "W0001").
    pub code: &'static str,
    pub severity: Severity,
    pub message: String,
    /// Additional notes.
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn warning(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    pub fn note(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Note,
            message: message.into(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    fn log(&self) {
        match self.severity {
            Severity::Warning => log::warn!("[{}] {}", self.code, self.message),
            Severity::Note => log::info!("[{}] {}", self.code, self.message),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Note => "note",
            Severity::Warning => "warning",
        };
        write!(f, "{}[{}]: {}", level, self.code, self.message)
    }
}

/// Ordered collection of diagnostics for one compilation.
#[derive(Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and forward it to the logger.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for d in diagnostics {
            self.push(d);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.items.iter().filter(move |d| d.code == code)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let diag = Diagnostic::warning(codes::AMBIGUOUS_PLACEMENT, "mixed signals");
        assert_eq!(diag.to_string(), "warning[W0001]: mixed signals");
    }

    #[test]
    fn test_with_code_filters() {
        let mut diags = Diagnostics::new();
        diags.push(Diagnostic::warning(codes::AMBIGUOUS_PLACEMENT, "a"));
        diags.push(Diagnostic::warning(codes::DUPLICATE_ENDPOINT, "b"));
        diags.push(Diagnostic::warning(codes::AMBIGUOUS_PLACEMENT, "c"));

        assert_eq!(diags.len(), 3);
        assert_eq!(diags.with_code(codes::AMBIGUOUS_PLACEMENT).count(), 2);
        assert_eq!(diags.with_code(codes::EXPORT_SCOPE_NOT_FOUND).count(), 0);
    }
}
