//! variable-reuse rule (W018): One name, two unrelated jobs
//!
//! Compares the first and last assignment contexts; if they share no
//! common fragment, the name is probably being recycled.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Confidence, Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;
use crate::text::shares_substring;

const MIN_COMMON_LEN: usize = 5;

fn squeeze(text: &str) -> String {
    text.split_whitespace().collect()
}

declare_rule!(
    VariableReuse,
    id = "W018",
    name = "variable-reuse",
    description = "Flag variables that are reused for unrelated purposes",
    category = Quality,
    severity = Info
);

impl Rule for VariableReuse {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            if symbol.assignments.len() < 2 {
                continue;
            }

            let first = squeeze(&symbol.assignments[0].context);
            let last = squeeze(&symbol.assignments[symbol.assignments.len() - 1].context);

            if !shares_substring(&first, &last, MIN_COMMON_LEN) {
                diagnostics.push(
                    Diagnostic::new(
                        "W018",
                        Severity::Info,
                        format!(
                            "Variable '{}' appears to be reused for different purposes",
                            symbol.name
                        ),
                        file_path,
                        symbol.assignments[1].line,
                    )
                    .with_confidence(Confidence::Low),
                );
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
        run_rule(&VariableReuse::new(), source)
    }

    #[test]
    fn detects_unrelated_assignments() {
        let diagnostics =
            run("acc = items + totals;\nPrint[acc];\nacc = userName <> suffix;\nPrint[acc]");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 3);
        assert!(diagnostics[0].message.contains("acc"));
    }

    #[test]
    fn ignores_similar_assignments() {
        let diagnostics = run("total = a + 1;\nPrint[total];\ntotal = a + 2;\nPrint[total]");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_single_assignment() {
        let diagnostics = run("acc = items;\nPrint[acc]");

        assert!(diagnostics.is_empty());
    }
}
