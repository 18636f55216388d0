//! circular-dependencies rule (W014): Mutually dependent definitions
//!
//! One finding per cycle, anchored on the first member's definition.
//! Self-recursion is not a cycle.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::{DependencyGraph, SymbolTable};
use crate::source::SourceFile;

declare_rule!(
    CircularDependencies,
    id = "W014",
    name = "circular-dependencies",
    description = "Disallow groups of definitions that depend on each other in a cycle",
    category = Correctness,
    severity = Warning,
    examples = "(* Bad *)\nisEven[n_] := isOdd[n - 1]\nisOdd[n_] := isEven[n - 1]"
);

impl Rule for CircularDependencies {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let graph = DependencyGraph::from_table(table);
        let mut diagnostics = Vec::new();

        for cycle in graph.cycles() {
            let line = table
                .symbol_by_name(&cycle[0])
                .map(|s| s.declaration_line)
                .unwrap_or(1);

            diagnostics.push(Diagnostic::new(
                "W014",
                Severity::Warning,
                format!(
                    "Variables {} form a circular dependency",
                    cycle.join(" -> ")
                ),
                file_path,
                line,
            ));
        }

        diagnostics
    }
}
