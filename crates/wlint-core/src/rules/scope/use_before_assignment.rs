//! use-before-assignment rule (W004): Read precedes the first write
//!
//! Two shapes are reported: a symbol never assigned anywhere, where
//! every read is flagged, and a symbol whose first read comes
//! positionally before its first assignment. Positions compare by line
//! then column, so `Print[z]; z = 5` on one line is still caught.
//! Parameters are initialized by the caller and skipped.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::scope::before;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

declare_rule!(
    UseBeforeAssignment,
    id = "W004",
    name = "use-before-assignment",
    description = "Disallow reading a variable before it is assigned",
    category = Correctness,
    severity = Warning,
    examples = "(* Bad *)\nPrint[z]; z = 5\n\n(* Good *)\nz = 5; Print[z]"
);

impl Rule for UseBeforeAssignment {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            if symbol.is_parameter {
                continue;
            }

            let Some(first_read) = symbol.reads.first() else {
                continue;
            };

            match symbol.assignments.first() {
                None => {
                    for read in &symbol.reads {
                        diagnostics.push(Diagnostic::new(
                            "W004",
                            Severity::Warning,
                            format!("Variable '{}' is used before being assigned", symbol.name),
                            file_path,
                            read.line,
                        ));
                    }
                }
                Some(first_assignment) if before(first_read, first_assignment) => {
                    diagnostics.push(Diagnostic::new(
                        "W004",
                        Severity::Warning,
                        format!(
                            "Variable '{}' is used on line {} before being assigned on line {}",
                            symbol.name, first_read.line, first_assignment.line
                        ),
                        file_path,
                        first_read.line,
                    ));
                }
                Some(_) => {}
            }
        }

        diagnostics
    }
}
