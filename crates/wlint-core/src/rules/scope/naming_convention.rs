//! naming-convention rule (W015): Names that hide intent
//!
//! Flags single-character names, capitalized numbered names, and
//! all-caps names that get reassigned. At most one finding per symbol.

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

declare_rule!(
    NamingConvention,
    id = "W015",
    name = "naming-convention",
    description = "Flag variable names that obscure intent",
    category = Quality,
    severity = Info
);

fn is_all_uppercase(name: &str) -> bool {
    name.len() >= 2 && name.chars().all(|c| c.is_ascii_uppercase())
}

impl Rule for NamingConvention {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            let name = &symbol.name;
            let starts_lowercase = name.chars().next().is_some_and(|c| c.is_ascii_lowercase());

            let message = if name.len() == 1 && !symbol.is_parameter {
                Some(format!(
                    "Single-character variable name '{name}' hurts readability"
                ))
            } else if name.ends_with(|c: char| c.is_ascii_digit()) && !starts_lowercase {
                Some(format!(
                    "Variable '{name}' uses a numbered suffix; prefer a descriptive name"
                ))
            } else if is_all_uppercase(name) && symbol.assignments.len() >= 2 {
                Some(format!(
                    "All-caps name '{name}' suggests a constant but it is reassigned"
                ))
            } else {
                None
            };

            if let Some(message) = message {
                diagnostics.push(Diagnostic::new(
                    "W015",
                    Severity::Info,
                    message,
                    file_path,
                    symbol.declaration_line,
                ));
            }
        }

        diagnostics
    }
}
