//! unused-variable rule (W001): Detects variables declared but never used
//!
//! A symbol with no assignments and no reads is dead weight. Parameters
//! are exempt here because a definition may need them to match its call
//! pattern; they have their own rule (W006).

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

declare_rule!(
    UnusedVariable,
    id = "W001",
    name = "unused-variable",
    description = "Disallow variables that are declared but never used",
    category = Quality,
    severity = Warning,
    examples = "(* Bad *)\nModule[{unused, x}, x = 1; x]\n\n(* Good *)\nModule[{x}, x = 1; x]"
);

impl Rule for UnusedVariable {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for symbol in table.unused_symbols() {
            if symbol.is_parameter {
                continue;
            }

            diagnostics.push(
                Diagnostic::new(
                    "W001",
                    Severity::Warning,
                    format!("Variable '{}' is declared but never used", symbol.name),
                    file_path,
                    symbol.declaration_line,
                )
                .with_suggestion(format!("Remove '{}' from the declaration list", symbol.name)),
            );
        }

        diagnostics
    }
}
