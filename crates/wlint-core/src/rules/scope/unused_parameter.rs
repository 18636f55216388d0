//! unused-parameter rule (W006): Parameter never read in the body
//!
//! Assignments alone do not count as use. A parameter that is only
//! overwritten discards the caller's argument and is still flagged.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Confidence, Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

declare_rule!(
    UnusedParameter,
    id = "W006",
    name = "unused-parameter",
    description = "Disallow function parameters that the body never uses",
    category = Quality,
    severity = Info,
    examples = "(* Bad *)\nf[x_, y_] := x + 1\n\n(* Good *)\nf[x_] := x + 1"
);

impl Rule for UnusedParameter {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            if symbol.is_parameter && symbol.reads.is_empty() {
                diagnostics.push(
                    Diagnostic::new(
                        "W006",
                        Severity::Info,
                        format!(
                            "Parameter '{}' is never used in function body",
                            symbol.name
                        ),
                        file_path,
                        symbol.declaration_line,
                    )
                    // A pattern may exist only to constrain dispatch
                    .with_confidence(Confidence::Medium),
                );
            }
        }

        diagnostics
    }
}
