//! assigned-never-read rule (W002): Single assignment whose value is dead
//!
//! Flags symbols written exactly once and never read afterwards.
//! Repeatedly overwritten symbols are covered by write-only-variable
//! (W007) instead, so the two rules never report the same symbol.
//! Assignments built from in-place mutation heads such as `AppendTo`
//! are skipped: those lines exist for their side effect.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;
use crate::text::contains_word;

/// Heads that mutate their first argument in place.
pub(crate) const SIDE_EFFECT_HEADS: [&str; 6] = [
    "AppendTo",
    "PrependTo",
    "AssociateTo",
    "AddTo",
    "SubtractFrom",
    "KeyDropFrom",
];

declare_rule!(
    AssignedNeverRead,
    id = "W002",
    name = "assigned-never-read",
    description = "Disallow assignments whose value is never read",
    category = Quality,
    severity = Warning,
    examples = "(* Bad *)\nresult = Compute[];\n\n(* Good *)\nresult = Compute[];\nPrint[result]"
);

impl Rule for AssignedNeverRead {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            if symbol.is_parameter || symbol.assignments.len() != 1 || !symbol.reads.is_empty() {
                continue;
            }

            let side_effect = symbol.assignments.iter().any(|a| {
                SIDE_EFFECT_HEADS
                    .iter()
                    .any(|head| contains_word(&a.context, head))
            });
            if side_effect {
                continue;
            }

            diagnostics.push(Diagnostic::new(
                "W002",
                Severity::Warning,
                format!(
                    "Variable '{}' is assigned but its value is never read",
                    symbol.name
                ),
                file_path,
                symbol.declaration_line,
            ));
        }

        diagnostics
    }
}
