//! variable-shadowing rule (W005): Inner binding hides an outer one
//!
//! Reported once per inner symbol against the nearest enclosing binding
//! with the same name.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

declare_rule!(
    VariableShadowing,
    id = "W005",
    name = "variable-shadowing",
    description = "Disallow variables that shadow a binding in an outer scope",
    category = Quality,
    severity = Warning,
    examples = "(* Bad *)\nx = 1;\nModule[{x}, x = 2]\n\n(* Good *)\nx = 1;\nModule[{y}, y = 2]"
);

impl Rule for VariableShadowing {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for issue in table.find_shadowing_issues() {
            let inner = table.get(issue.inner);
            let outer = table.get(issue.outer);

            diagnostics.push(Diagnostic::new(
                "W005",
                Severity::Warning,
                format!(
                    "Variable '{}' shadows outer variable declared on line {}",
                    inner.name, outer.declaration_line
                ),
                file_path,
                inner.declaration_line,
            ));
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::scope::testutil::run_rule;

    fn run(source: &str) -> Vec<Diagnostic> {
        run_rule(&VariableShadowing::new(), source)
    }

    #[test]
    fn detects_module_variable_shadowing_global() {
        let diagnostics = run("x = 1;\nModule[{x},\n  x = 2;\n  Print[x]\n];\nPrint[x]");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 2);
        assert!(diagnostics[0].message.contains("line 1"));
    }

    #[test]
    fn reports_each_nesting_level_once() {
        let diagnostics =
            run("x = 1;\nModule[{x},\n  Module[{x},\n    x = 3;\n    Print[x]\n  ]\n];\nPrint[x]");

        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn ignores_distinct_names() {
        let diagnostics = run("x = 1;\nModule[{y},\n  y = 2;\n  Print[y]\n];\nPrint[x]");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_sibling_scopes() {
        let diagnostics = run(
            "Module[{t},\n  t = 1;\n  Print[t]\n];\nModule[{t},\n  t = 2;\n  Print[t]\n]",
        );

        assert!(diagnostics.is_empty());
    }
}
