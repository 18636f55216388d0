//! variable-in-wrong-scope rule (W009): Declaration wider than its uses
//!
//! A Module/Block/With variable whose every reference falls inside one
//! child scope could be declared there instead.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::scope::all_references_sorted;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

declare_rule!(
    VariableInWrongScope,
    id = "W009",
    name = "variable-in-wrong-scope",
    description = "Prefer declaring a variable in the innermost scope that uses it",
    category = Quality,
    severity = Info
);

impl Rule for VariableInWrongScope {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let tree = table.scope_tree();
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            if !symbol.is_module_variable {
                continue;
            }

            let refs = all_references_sorted(symbol);
            if refs.is_empty() {
                continue;
            }

            for child in tree.children(symbol.scope) {
                let all_in_child = refs
                    .iter()
                    .all(|r| r.line >= child.start_line && r.line <= child.end_line);

                if all_in_child {
                    diagnostics.push(Diagnostic::new(
                        "W009",
                        Severity::Info,
                        format!(
                            "Variable '{}' could be declared in inner scope (lines {}-{})",
                            symbol.name, child.start_line, child.end_line
                        ),
                        file_path,
                        symbol.declaration_line,
                    ));
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
        run_rule(&VariableInWrongScope::new(), source)
    }

    #[test]
    fn detects_variable_only_used_in_child_scope() {
        let diagnostics = run(
            "Module[{temp},\n  Module[{inner},\n    inner = 2;\n    temp = inner + 1;\n    Print[temp]\n  ]\n]",
        );

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("temp"));
        assert_eq!(diagnostics[0].line, 1);
    }

    #[test]
    fn ignores_variable_used_in_own_scope() {
        let diagnostics = run(
            "Module[{temp},\n  temp = 1;\n  Module[{inner},\n    inner = temp + 1;\n    Print[inner]\n  ]\n]",
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_scope_without_children() {
        let diagnostics = run("Module[{x},\n  x = 1;\n  Print[x]\n]");

        assert!(diagnostics.is_empty());
    }
}
