//! Diagnostic filtering for masked documents.
//!
//! Generic CSS validation does not know Tailwind's directives and reports
//! `@tailwind` and `@apply` as unknown at-rules. Those reports are noise and
//! are dropped before diagnostics reach the editor.

use crate::document::Range;
use once_cell::sync::Lazy;
use regex::Regex;

/// Diagnostic code used by CSS validation for unknown at-rules.
pub const UNKNOWN_AT_RULES: &str = "unknownAtRules";

static IGNORED_AT_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Unknown at rule @(tailwind|apply)").expect("Invalid at-rule regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub code: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(range: Range, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            range,
            severity,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Whether this is an unknown at-rule report for a Tailwind directive.
    pub fn is_ignored(&self) -> bool {
        self.code.as_deref() == Some(UNKNOWN_AT_RULES) && IGNORED_AT_RULE.is_match(&self.message)
    }
}

/// Drops diagnostics for Tailwind directives, keeping the order of the rest.
pub fn filter_diagnostics(diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
    diagnostics
        .into_iter()
        .filter(|diagnostic| {
            let ignored = diagnostic.is_ignored();
            if ignored {
                log::trace!("dropping diagnostic: {}", diagnostic.message);
            }
            !ignored
        })
        .collect()
}
