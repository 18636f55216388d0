//! modified-in-unexpected-scope rule (W012): Write and read in unrelated scopes
//!
//! A symbol written in one scope and read in a sibling scope couples the
//! two through hidden state. Reported once per symbol.

use std::collections::BTreeSet;

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

declare_rule!(
    ModifiedInUnexpectedScope,
    id = "W012",
    name = "modified-in-unexpected-scope",
    description = "Disallow writing a variable in one scope while reading it in an unrelated scope",
    category = Correctness,
    severity = Warning
);

impl Rule for ModifiedInUnexpectedScope {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let tree = table.scope_tree();
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            let write_lines: BTreeSet<usize> =
                symbol.assignments.iter().map(|r| r.line).collect();
            let read_lines: BTreeSet<usize> = symbol.reads.iter().map(|r| r.line).collect();

            let mut flagged = false;
            for &write_line in &write_lines {
                if flagged {
                    break;
                }
                let Some(write_scope) = tree.scope_at_line(symbol.scope, write_line) else {
                    continue;
                };

                for &read_line in &read_lines {
                    let Some(read_scope) = tree.scope_at_line(symbol.scope, read_line) else {
                        continue;
                    };

                    if write_scope != read_scope && !tree.are_related(write_scope, read_scope) {
                        diagnostics.push(Diagnostic::new(
                            "W012",
                            Severity::Warning,
                            format!(
                                "Variable '{}' modified here but read in unrelated scope (line {})",
                                symbol.name, read_line
                            ),
                            file_path,
                            write_line,
                        ));
                        flagged = true;
                        break;
                    }
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
        run_rule(&ModifiedInUnexpectedScope::new(), source)
    }

    #[test]
    fn detects_write_and_read_in_sibling_scopes() {
        let diagnostics = run(
            "Module[{state},\n  state = 0;\n  Module[{a},\n    state = 1;\n    a = 2\n  ];\n  Module[{b},\n    b = state\n  ]\n]",
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 4);
        assert!(diagnostics[0].message.contains("line 8"));
    }

    #[test]
    fn ignores_write_and_read_in_same_scope() {
        let diagnostics = run("Module[{state},\n  state = 1;\n  Print[state]\n]");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_write_in_ancestor_of_read() {
        let diagnostics = run(
            "Module[{state},\n  state = 1;\n  Module[{a},\n    a = state\n  ]\n]",
        );

        assert!(diagnostics.is_empty());
    }
}
