//! Scope and symbol lifetime rules
//!
//! Each rule inspects the frozen symbol table of one file. Ids follow
//! the W0xx scheme; `all_rules` registers them in id order so findings
//! come out deterministic.

mod assigned_never_read;
mod circular_dependencies;
mod closure_capture;
mod constant_not_marked;
mod dead_store;
mod dynamic_scope_leak;
mod global_pollution;
mod lifetime_beyond_usage;
mod modified_in_unexpected_scope;
mod naming_convention;
mod redundant_assignment;
mod type_inconsistency;
mod unused_parameter;
mod unused_variable;
mod use_before_assignment;
mod variable_escapes_scope;
mod variable_in_wrong_scope;
mod variable_reuse;
mod variable_shadowing;
mod write_only_variable;

pub use assigned_never_read::AssignedNeverRead;
pub use circular_dependencies::CircularDependencies;
pub use closure_capture::ClosureCaptureInLoop;
pub use constant_not_marked::ConstantNotMarked;
pub use dead_store::DeadStore;
pub use dynamic_scope_leak::DynamicScopeLeak;
pub use global_pollution::GlobalVariablePollution;
pub use lifetime_beyond_usage::LifetimeBeyondUsage;
pub use modified_in_unexpected_scope::ModifiedInUnexpectedScope;
pub use naming_convention::NamingConvention;
pub use redundant_assignment::RedundantAssignment;
pub use type_inconsistency::TypeInconsistency;
pub use unused_parameter::UnusedParameter;
pub use unused_variable::UnusedVariable;
pub use use_before_assignment::UseBeforeAssignment;
pub use variable_escapes_scope::VariableEscapesScope;
pub use variable_in_wrong_scope::VariableInWrongScope;
pub use variable_reuse::VariableReuse;
pub use variable_shadowing::VariableShadowing;
pub use write_only_variable::WriteOnlyVariable;

use crate::rules::Rule;
use crate::semantic::{Symbol, SymbolReference};

/// The full rule set in id order (W001 through W020).
pub fn all_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(UnusedVariable::new()),
        Box::new(AssignedNeverRead::new()),
        Box::new(DeadStore::new()),
        Box::new(UseBeforeAssignment::new()),
        Box::new(VariableShadowing::new()),
        Box::new(UnusedParameter::new()),
        Box::new(WriteOnlyVariable::new()),
        Box::new(RedundantAssignment::new()),
        Box::new(VariableInWrongScope::new()),
        Box::new(VariableEscapesScope::new()),
        Box::new(LifetimeBeyondUsage::new()),
        Box::new(ModifiedInUnexpectedScope::new()),
        Box::new(GlobalVariablePollution::new()),
        Box::new(CircularDependencies::new()),
        Box::new(NamingConvention::new()),
        Box::new(ConstantNotMarked::new()),
        Box::new(TypeInconsistency::new()),
        Box::new(VariableReuse::new()),
        Box::new(ClosureCaptureInLoop::new()),
        Box::new(DynamicScopeLeak::new()),
    ]
}

/// Every reference of a symbol (assignments and reads) ordered by
/// source position.
pub(crate) fn all_references_sorted(symbol: &Symbol) -> Vec<&SymbolReference> {
    let mut refs: Vec<&SymbolReference> = symbol
        .assignments
        .iter()
        .chain(symbol.reads.iter())
        .collect();
    refs.sort_by_key(|r| (r.line, r.column));
    refs
}

/// Positional ordering for references: earlier line wins, column breaks
/// ties on the same line.
pub(crate) fn before(a: &SymbolReference, b: &SymbolReference) -> bool {
    (a.line, a.column) < (b.line, b.column)
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::diagnostic::Diagnostic;
    use crate::rules::Rule;
    use crate::semantic::SymbolTableBuilder;
    use crate::source::SourceFile;

    pub fn run_rule(rule: &dyn Rule, source: &str) -> Vec<Diagnostic> {
        let file = SourceFile::from_source("test.wl", source);
        let table = SymbolTableBuilder::build(&file);
        rule.check(&file, &table)
    }
}
