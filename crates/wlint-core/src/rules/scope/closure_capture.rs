//! closure-capture-in-loop rule (W019): Loop iterator captured by a closure
//!
//! Functions defined inside Do/Table see the iterator's final value,
//! not the value at definition time.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::{ScopeKind, SymbolTable};
use crate::source::SourceFile;

declare_rule!(
    ClosureCaptureInLoop,
    id = "W019",
    name = "closure-capture-in-loop",
    description = "Disallow closures that capture a loop iteration variable",
    category = Correctness,
    severity = Warning,
    examples = "(* Bad *)\nDo[\n  g[n_] := n + i,\n  {i, 1, 5}\n]\n\n(* Good *)\nDo[\n  With[{j = i}, g[n_] := n + j],\n  {i, 1, 5}\n]"
);

impl Rule for ClosureCaptureInLoop {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let tree = table.scope_tree();
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            if tree.get(symbol.scope).kind != ScopeKind::Loop {
                continue;
            }

            for function_id in tree.descendant_functions(symbol.scope) {
                let function = tree.get(function_id);
                let captured = symbol
                    .reads
                    .iter()
                    .find(|r| r.line >= function.start_line && r.line <= function.end_line);

                if let Some(read) = captured {
                    diagnostics.push(Diagnostic::new(
                        "W019",
                        Severity::Warning,
                        format!(
                            "Loop variable '{}' captured in closure, will capture final value only. \
                             Use With[] to capture current value.",
                            symbol.name
                        ),
                        file_path,
                        read.line,
                    ));
                    break;
                }
            }
        }

        diagnostics
    }
}
