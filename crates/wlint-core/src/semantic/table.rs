//! Frozen symbol table
//!
//! Once the builder finishes, the scope tree and symbol arena are
//! wrapped in a `SymbolTable` and never mutated again. Every analysis
//! rule works off this read-only view, so one table serves the whole
//! rule suite. All query results follow arena insertion order, which is
//! source declaration order, keeping findings deterministic.

use crate::semantic::scope::{ScopeId, ScopeTree};
use crate::semantic::symbols::{
    Redeclaration, Symbol, SymbolArena, SymbolId, UnresolvedReference,
};

/// An inner binding hiding an outer binding of the same name.
#[derive(Debug, Clone, Copy)]
pub struct ShadowingIssue {
    pub inner: SymbolId,
    pub outer: SymbolId,
}

pub struct SymbolTable {
    tree: ScopeTree,
    symbols: SymbolArena,
    global: ScopeId,
}

impl SymbolTable {
    pub fn new(tree: ScopeTree, symbols: SymbolArena, global: ScopeId) -> Self {
        Self {
            tree,
            symbols,
            global,
        }
    }

    pub fn scope_tree(&self) -> &ScopeTree {
        &self.tree
    }

    pub fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    pub fn global_scope(&self) -> ScopeId {
        self.global
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        self.symbols.get(id)
    }

    /// Symbols in declaration order.
    pub fn all_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// First symbol declared with this name, scanning declaration order.
    pub fn symbol_by_name(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    /// Every symbol with this name, across all scopes.
    pub fn symbols_by_name(&self, name: &str) -> Vec<&Symbol> {
        self.symbols.iter().filter(|s| s.name == name).collect()
    }

    pub fn symbols_in_scope(&self, scope: ScopeId) -> Vec<&Symbol> {
        self.symbols
            .symbols_in_scope(scope)
            .into_iter()
            .map(|id| self.symbols.get(id))
            .collect()
    }

    /// Symbols declared directly in the global scope.
    pub fn global_symbols(&self) -> Vec<&Symbol> {
        self.symbols_in_scope(self.global)
    }

    /// Symbols with neither assignments nor reads.
    pub fn unused_symbols(&self) -> Vec<&Symbol> {
        self.symbols.iter().filter(|s| s.is_unused()).collect()
    }

    /// Symbols written at least once but never read.
    pub fn assigned_but_never_read(&self) -> Vec<&Symbol> {
        self.symbols
            .iter()
            .filter(|s| !s.assignments.is_empty() && s.reads.is_empty())
            .collect()
    }

    /// Symbols read at least once but never written. Parameters are
    /// expected to behave this way and are excluded.
    pub fn read_but_never_assigned(&self) -> Vec<&Symbol> {
        self.symbols
            .iter()
            .filter(|s| !s.is_parameter && s.assignments.is_empty() && !s.reads.is_empty())
            .collect()
    }

    /// Each symbol paired with the nearest enclosing binding it hides,
    /// reported once per inner symbol.
    pub fn find_shadowing_issues(&self) -> Vec<ShadowingIssue> {
        let mut issues = Vec::new();

        for symbol in self.symbols.iter() {
            let Some(parent) = self.tree.get(symbol.scope).parent else {
                continue;
            };
            for ancestor in self.tree.ancestors(parent) {
                if let Some(outer) = self.symbols.lookup_local(ancestor.id, &symbol.name) {
                    issues.push(ShadowingIssue {
                        inner: symbol.id,
                        outer,
                    });
                    break;
                }
            }
        }

        issues
    }

    pub fn redeclarations(&self) -> &[Redeclaration] {
        self.symbols.redeclarations()
    }

    pub fn unresolved(&self) -> &[UnresolvedReference] {
        self.symbols.unresolved()
    }
}
