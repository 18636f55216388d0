//! write-only-variable rule (W007): Repeatedly written, never read
//!
//! The single-assignment case belongs to assigned-never-read (W002);
//! this rule takes over at two writes and up, where the symbol looks
//! like state that nothing ever consumes.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

declare_rule!(
    WriteOnlyVariable,
    id = "W007",
    name = "write-only-variable",
    description = "Disallow variables that are repeatedly written but never read",
    category = Quality,
    severity = Info,
    examples = "(* Bad *)\nstate = 1;\nstate = 2;\n\n(* Good *)\nstate = 1;\nPrint[state]"
);

impl Rule for WriteOnlyVariable {
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

            if symbol.assignments.len() >= 2 && symbol.reads.is_empty() {
                diagnostics.push(Diagnostic::new(
                    "W007",
                    Severity::Info,
                    format!("Variable '{}' is only written to, never read", symbol.name),
                    file_path,
                    symbol.declaration_line,
                ));
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::scope::testutil::run_rule;

    fn run(source: &str) -> Vec<Diagnostic> {
        run_rule(&WriteOnlyVariable::new(), source)
    }

    #[test]
    fn detects_repeatedly_written_symbol() {
        let diagnostics = run("state = 1;\nstate = 2;\nstate = 3");

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("state"));
    }

    #[test]
    fn single_write_left_to_other_rule() {
        let diagnostics = run("state = 1;\nother = 2;\nPrint[other]");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_symbol_with_reads() {
        let diagnostics = run("state = 1;\nstate = state + 1;\nPrint[state]");

        assert!(diagnostics.is_empty());
    }
}
