//! constant-not-marked rule (W016): Module variable behaving like a constant

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

declare_rule!(
    ConstantNotMarked,
    id = "W016",
    name = "constant-not-marked",
    description = "Suggest With[] for Module variables assigned once and read often",
    category = Quality,
    severity = Info,
    examples = "(* Bad *)\nModule[{rate},\n  rate = 0.05;\n  a = rate; b = rate; c = rate\n]\n\n(* Good *)\nWith[{rate = 0.05},\n  a = rate; b = rate; c = rate\n]"
);

impl Rule for ConstantNotMarked {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            if symbol.is_parameter || !symbol.is_module_variable {
                continue;
            }

            if symbol.assignments.len() == 1 && symbol.reads.len() > 2 {
                diagnostics.push(Diagnostic::new(
                    "W016",
                    Severity::Info,
                    format!(
                        "Variable '{}' is assigned once and read {} times; consider using With[] for constants",
                        symbol.name,
                        symbol.reads.len()
                    ),
                    file_path,
                    symbol.declaration_line,
                ));
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
        run_rule(&ConstantNotMarked::new(), source)
    }

    #[test]
    fn detects_constant_like_module_variable() {
        let diagnostics = run(
            "Module[{rate, a, b, c},\n  rate = 0.05;\n  a = rate;\n  b = rate;\n  c = rate;\n  Print[a + b + c]\n]",
        );

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("rate"));
    }

    #[test]
    fn ignores_reassigned_variable() {
        let diagnostics = run(
            "Module[{rate, a, b, c},\n  rate = 0.05;\n  rate = 0.07;\n  a = rate;\n  b = rate;\n  c = rate;\n  Print[a + b + c]\n]",
        );

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_rarely_read_variable() {
        let diagnostics = run("Module[{rate},\n  rate = 0.05;\n  Print[rate]\n]");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_global_variable() {
        let diagnostics = run("rate = 0.05;\na = rate;\nb = rate;\nc = rate;\nPrint[a + b + c]");

        assert!(diagnostics.is_empty());
    }
}
