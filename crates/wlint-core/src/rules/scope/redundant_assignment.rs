//! redundant-assignment rule (W008): Same value assigned twice in a row
//!
//! Compares consecutive assignment contexts with whitespace removed.
//! One finding per symbol, on the second assignment.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Confidence, Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

fn squeeze(text: &str) -> String {
    text.split_whitespace().collect()
}

declare_rule!(
    RedundantAssignment,
    id = "W008",
    name = "redundant-assignment",
    description = "Disallow assigning the same value to a variable twice in a row",
    category = Quality,
    severity = Info,
    examples = "(* Bad *)\nmode = 1;\nmode = 1;\n\n(* Good *)\nmode = 1;"
);

impl Rule for RedundantAssignment {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            for pair in symbol.assignments.windows(2) {
                if squeeze(&pair[0].context) == squeeze(&pair[1].context) {
                    diagnostics.push(
                        Diagnostic::new(
                            "W008",
                            Severity::Info,
                            format!("Variable '{}' assigned same value twice", symbol.name),
                            file_path,
                            pair[1].line,
                        )
                        .with_confidence(Confidence::Medium),
                    );
                    break;
                }
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
        run_rule(&RedundantAssignment::new(), source)
    }

    #[test]
    fn detects_identical_consecutive_assignments() {
        let diagnostics = run("mode = 1;\nmode = 1;\nPrint[mode]");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 2);
    }

    #[test]
    fn whitespace_differences_ignored() {
        let diagnostics = run("mode = 1;\nmode  =  1;\nPrint[mode]");

        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn ignores_different_values() {
        let diagnostics = run("mode = 1;\nmode = 2;\nPrint[mode]");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn reports_once_per_symbol() {
        let diagnostics = run("mode = 1;\nmode = 1;\nmode = 1;\nPrint[mode]");

        assert_eq!(diagnostics.len(), 1);
    }
}
