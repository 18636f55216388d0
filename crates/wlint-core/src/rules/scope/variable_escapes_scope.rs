//! variable-escapes-scope rule (W010): Module variable captured by a closure
//!
//! A function defined inside a Module that reads one of the Module's
//! variables holds a reference that outlives the Module body.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

declare_rule!(
    VariableEscapesScope,
    id = "W010",
    name = "variable-escapes-scope",
    description = "Disallow Module variables captured by functions defined inside the Module",
    category = Correctness,
    severity = Warning,
    examples = "(* Bad *)\nf[] := Module[{x},\n  x = 5;\n  g[] := x\n]"
);

impl Rule for VariableEscapesScope {
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

            for function_id in tree.descendant_functions(symbol.scope) {
                let function = tree.get(function_id);
                let captured = symbol
                    .reads
                    .iter()
                    .find(|r| r.line >= function.start_line && r.line <= function.end_line);

                if let Some(read) = captured {
                    diagnostics.push(Diagnostic::new(
                        "W010",
                        Severity::Warning,
                        format!(
                            "Module variable '{}' captured in closure may fail after Module exits",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::scope::testutil::run_rule;

    fn run(source: &str) -> Vec<Diagnostic> {
        run_rule(&VariableEscapesScope::new(), source)
    }

    #[test]
    fn detects_capture_by_inner_function() {
        let diagnostics = run("f[] := Module[{x},\n  x = 5;\n  g[] := x\n]");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 3);
        assert!(diagnostics[0].message.contains("x"));
    }

    #[test]
    fn detects_capture_by_pure_function() {
        let diagnostics =
            run("process[] := Module[{x},\n  x = 5;\n  callback = Function[{y}, x + y]\n]");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 3);
        assert!(diagnostics[0].message.contains("x"));
    }

    #[test]
    fn ignores_reads_in_module_body() {
        let diagnostics = run("f[] := Module[{x},\n  x = 5;\n  Print[x]\n]");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn ignores_inner_function_using_own_parameter() {
        let diagnostics = run("f[] := Module[{x},\n  x = 5;\n  g[n_] := n + 1;\n  Print[x]\n]");

        assert!(diagnostics.is_empty());
    }
}
