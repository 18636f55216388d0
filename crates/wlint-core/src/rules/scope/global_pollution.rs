//! global-variable-pollution rule (W013): Too many globals in one file
//!
//! Emits a single file-level finding once the count of global
//! non-parameter symbols passes the threshold.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

const MAX_GLOBALS: usize = 20;

declare_rule!(
    GlobalVariablePollution,
    id = "W013",
    name = "global-variable-pollution",
    description = "Limit the number of global variables a file may define",
    category = Quality,
    severity = Warning
);

impl Rule for GlobalVariablePollution {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;

        let count = table
            .global_symbols()
            .iter()
            .filter(|s| !s.is_parameter)
            .count();

        if count > MAX_GLOBALS {
            return vec![Diagnostic::new(
                "W013",
                Severity::Warning,
                format!(
                    "File defines {count} global variables, polluting global namespace. \
                     Consider using Package or Context."
                ),
                file_path,
                1,
            )];
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::scope::testutil::run_rule;

    fn run(source: &str) -> Vec<Diagnostic> {
        run_rule(&GlobalVariablePollution::new(), source)
    }

    fn globals(n: usize) -> String {
        (0..n)
            .map(|i| format!("g{i} = {i};"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn detects_excessive_globals() {
        let diagnostics = run(&globals(21));

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 1);
        assert!(diagnostics[0].message.contains("21"));
    }

    #[test]
    fn threshold_is_exclusive() {
        let diagnostics = run(&globals(20));

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_module_variables() {
        let diagnostics = run("Module[{a, b, c},\n  a = 1;\n  b = 2;\n  c = 3\n]");

        assert!(diagnostics.is_empty());
    }
}
