//! type-inconsistency rule (W017): Same variable used as different shapes
//!
//! Assignments classify by the shape of the right-hand side; reads
//! classify by how the surrounding expression treats the value. Purely
//! textual, so confidence stays low.

use std::sync::LazyLock;

use regex::Regex;

use crate::declare_rule;
use crate::diagnostic::Diagnostic;
use crate::rules::{Confidence, Rule, RuleMetadata, Severity};
use crate::semantic::SymbolTable;
use crate::source::SourceFile;

static STRING_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"=\s*""#).expect("Invalid regex pattern"));

static LIST_ASSIGN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"=\s*(\{|Table\[|Range\[|Array\[|List\[|Map\[|Select\[|Sort\[|Join\[)")
        .expect("Invalid regex pattern")
});

static NUMBER_ASSIGN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=\s*-?\d").expect("Invalid regex pattern"));

static STRING_USE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\+\s*"|"[^"]*"\s*\+"#).expect("Invalid regex pattern")
});

static LIST_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[|Part\[").expect("Invalid regex pattern"));

static NUMBER_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+\-*/]\s*\d").expect("Invalid regex pattern"));

declare_rule!(
    TypeInconsistency,
    id = "W017",
    name = "type-inconsistency",
    description = "Flag variables used as a string, a list, and a number in different places",
    category = Correctness,
    severity = Info
);

impl Rule for TypeInconsistency {
    fn metadata(&self) -> &RuleMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, table: &SymbolTable) -> Vec<Diagnostic> {
        let file_path = &file.metadata().filename;
        let mut diagnostics = Vec::new();

        for symbol in table.all_symbols() {
            let mut string_use = false;
            let mut list_use = false;
            let mut number_use = false;

            for assignment in &symbol.assignments {
                let context = &assignment.context;
                string_use |= STRING_ASSIGN.is_match(context);
                list_use |= LIST_ASSIGN.is_match(context);
                number_use |= NUMBER_ASSIGN.is_match(context);
            }

            for read in &symbol.reads {
                let context = &read.context;
                string_use |= STRING_USE.is_match(context);
                list_use |= LIST_USE.is_match(context);
                number_use |= NUMBER_USE.is_match(context);
            }

            let mut kinds = Vec::new();
            if string_use {
                kinds.push("string");
            }
            if list_use {
                kinds.push("list");
            }
            if number_use {
                kinds.push("number");
            }

            if kinds.len() > 1 {
                diagnostics.push(
                    Diagnostic::new(
                        "W017",
                        Severity::Info,
                        format!(
                            "Variable '{}' appears to be used as {} in different places",
                            symbol.name,
                            kinds.join(" and ")
                        ),
                        file_path,
                        symbol.declaration_line,
                    )
                    .with_confidence(Confidence::Low),
                );
            }
        }

        diagnostics
    }
}
