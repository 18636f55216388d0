//! dead-store rule (W003): Value overwritten before it is read
//!
//! Walks consecutive assignment pairs of each symbol. A read on the
//! second assignment's own line still counts as consuming the earlier
//! value, since `x = x + 1` reads the previous store.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

declare_rule!(
    DeadStore,
    id = "W003",
    name = "dead-store",
    description = "Disallow assignments overwritten before the value is read",
    category = Correctness,
    severity = Warning,
    examples = "(* Bad *)\nx = 1;\nx = 2;\nPrint[x]\n\n(* Good *)\nx = 1;\nPrint[x];\nx = 2;\nPrint[x]"
);

impl Rule for DeadStore {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            for pair in symbol.assignments.windows(2) {
                let first = &pair[0];
                let second = &pair[1];

                let read_between = symbol
                    .reads
                    .iter()
                    .any(|r| r.line > first.line && r.line <= second.line);

                if !read_between {
                    diagnostics.push(Diagnostic::new(
                        "W003",
                        Severity::Warning,
                        format!(
                            "Value assigned to '{}' is overwritten before being read",
                            symbol.name
                        ),
                        file_path,
                        first.line,
                    ));
                }
            }
        }

        diagnostics
    }
}
