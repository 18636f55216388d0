//! lifetime-beyond-usage rule (W011): Variable alive far longer than used
//!
//! Only fires on scopes longer than ten lines where all references
//! cluster in under a fifth of the scope.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::scope::all_references_sorted;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

const MIN_SCOPE_LINES: usize = 10;
const USAGE_FRACTION: f64 = 0.2;

declare_rule!(
    LifetimeBeyondUsage,
    id = "W011",
    name = "lifetime-beyond-usage",
    description = "Flag variables whose scope is much longer than the span of their uses",
    category = Quality,
    severity = Info
);

impl Rule for LifetimeBeyondUsage {
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
            if refs.len() < 2 {
                continue;
            }

            let scope = tree.get(symbol.scope);
            let scope_size = scope.end_line - scope.start_line;
            let usage_range = refs[refs.len() - 1].line - refs[0].line;

            if scope_size > MIN_SCOPE_LINES
                && (usage_range as f64) < scope_size as f64 * USAGE_FRACTION
            {
                diagnostics.push(Diagnostic::new(
                    "W011",
                    Severity::Info,
                    format!(
                        "Variable '{}' is used only on lines {}-{} but lives for the whole scope (lines {}-{})",
                        symbol.name,
                        refs[0].line,
                        refs[refs.len() - 1].line,
                        scope.start_line,
                        scope.end_line
                    ),
                    file_path,
                    symbol.declaration_line,
                ));
            }
        }

        diagnostics
    }
}
