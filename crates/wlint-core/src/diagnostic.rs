//! Diagnostic reporting for analysis results
//!
//! Every finding the engine emits is a `Diagnostic`: a rule id, a 1-based
//! line number and a message, plus severity/confidence metadata consumed
//! by output formatters.

use serde::Serialize;

use crate::rules::{Confidence, Severity};

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub rule_id: String,
    pub severity: Severity,
    pub confidence: Confidence,
    pub message: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn new(
        rule_id: &str,
        severity: Severity,
        message: impl Into<String>,
        file: &str,
        line: usize,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            confidence: Confidence::default(),
            message: message.into(),
            file: file.to_string(),
            // Findings are always reported on a real line
            line: line.max(1),
            column: 0,
            suggestion: None,
        }
    }

    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_core_fields() {
        let diag = Diagnostic::new("W001", Severity::Warning, "unused", "pkg.wl", 3);

        assert_eq!(diag.rule_id, "W001");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.message, "unused");
        assert_eq!(diag.file, "pkg.wl");
        assert_eq!(diag.line, 3);
        assert!(diag.suggestion.is_none());
    }

    #[test]
    fn line_is_clamped_to_one() {
        let diag = Diagnostic::new("W001", Severity::Warning, "m", "pkg.wl", 0);

        assert_eq!(diag.line, 1);
    }

    #[test]
    fn with_suggestion_attaches_suggestion() {
        let diag = Diagnostic::new("W001", Severity::Warning, "m", "pkg.wl", 1)
            .with_suggestion("remove it");

        assert_eq!(diag.suggestion.as_deref(), Some("remove it"));
    }

    #[test]
    fn with_confidence_overrides_default() {
        let diag = Diagnostic::new("W017", Severity::Info, "m", "pkg.wl", 1)
            .with_confidence(Confidence::Low);

        assert_eq!(diag.confidence, Confidence::Low);
    }
}
