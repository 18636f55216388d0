//! dynamic-scope-leak rule (W020): Scoped variable fed to dynamic evaluation
//!
//! ToExpression and friends evaluate outside the lexical scope, so a
//! Module variable reaching them may resolve differently at run time.

use std::sync::LazyLock;

use regex::Regex;

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::scope::all_references_sorted;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;
use crate::text::contains_word;

static META_EVAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(ToExpression|Symbol|Evaluate|ReleaseHold)\s*\[").expect("Invalid regex pattern")
});

declare_rule!(
    DynamicScopeLeak,
    id = "W020",
    name = "dynamic-scope-leak",
    description = "Disallow passing scoped variables into dynamic evaluation constructs",
    category = Correctness,
    severity = Warning,
    examples = "(* Bad *)\nModule[{x},\n  x = 1;\n  ToExpression[\"y = \" <> ToString[x]]\n]"
);

impl Rule for DynamicScopeLeak {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            if !symbol.is_module_variable {
                continue;
            }

            for reference in all_references_sorted(symbol) {
                if META_EVAL.is_match(&reference.context)
                    && contains_word(&reference.context, &symbol.name)
                {
                    diagnostics.push(Diagnostic::new(
                        "W020",
                        Severity::Warning,
                        format!(
                            "Variable '{}' used in dynamic evaluation, may leak scope",
                            symbol.name
                        ),
                        file_path,
                        reference.line,
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
        run_rule(&DynamicScopeLeak::new(), source)
    }

    #[test]
    fn detects_module_variable_in_to_expression() {
        let diagnostics =
            run("Module[{x},\n  x = 1;\n  ToExpression[\"y = \" <> ToString[x]]\n]");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 3);
        assert!(diagnostics[0].message.contains("'x'"));
    }

    #[test]
    fn plain_module_use_is_fine() {
        let diagnostics = run("Module[{x},\n  x = 1;\n  Print[x]\n]");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_global_variables() {
        let diagnostics = run("x = 1;\nToExpression[\"y = \" <> ToString[x]]");

        assert!(diagnostics.is_empty());
    }
}
