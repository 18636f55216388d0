//! Symbol arena and scope-chain resolution
//!
//! Symbols live in an arena and are indexed per scope by name. Lookup
//! walks the scope chain from the innermost scope outward, so an inner
//! binding shadows an outer one with the same name. Redeclarations in
//! the same scope and reads of names with no binding anywhere on the
//! chain are recorded instead of silently dropped.

use std::collections::HashMap;

use id_arena::{Arena, Id};

use crate::semantic::scope::{ScopeId, ScopeTree};

pub type SymbolId = Id<Symbol>;

/// A recorded use of a symbol: one assignment or one read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolReference {
    pub line: usize,
    pub column: usize,
    /// Trimmed source line the use appeared on.
    pub context: String,
}

#[derive(Debug)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub scope: ScopeId,
    pub declaration_line: usize,
    pub is_parameter: bool,
    pub is_module_variable: bool,
    pub assignments: Vec<SymbolReference>,
    pub reads: Vec<SymbolReference>,
}

impl Symbol {
    pub fn is_unused(&self) -> bool {
        self.assignments.is_empty() && self.reads.is_empty()
    }
}

/// A redeclaration of a name already bound in the same scope.
#[derive(Debug, Clone)]
pub struct Redeclaration {
    pub name: String,
    pub scope: ScopeId,
    pub original: SymbolId,
    pub line: usize,
}

/// A read of a name with no binding on any enclosing scope.
#[derive(Debug, Clone)]
pub struct UnresolvedReference {
    pub name: String,
    pub scope: ScopeId,
    pub reference: SymbolReference,
}

pub struct SymbolArena {
    arena: Arena<Symbol>,
    by_scope: HashMap<ScopeId, HashMap<String, SymbolId>>,
    redeclarations: Vec<Redeclaration>,
    unresolved: Vec<UnresolvedReference>,
}

impl Default for SymbolArena {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            by_scope: HashMap::new(),
            redeclarations: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    /// Binds a name in a scope. A second binding of the same name in the
    /// same scope is recorded as a redeclaration and the original symbol
    /// is returned.
    pub fn declare(
        &mut self,
        name: &str,
        scope: ScopeId,
        declaration_line: usize,
        is_parameter: bool,
        is_module_variable: bool,
    ) -> SymbolId {
        let scope_symbols = self.by_scope.entry(scope).or_default();

        if let Some(&existing) = scope_symbols.get(name) {
            self.redeclarations.push(Redeclaration {
                name: name.to_string(),
                scope,
                original: existing,
                line: declaration_line,
            });
            return existing;
        }

        let id = self.arena.alloc_with_id(|id| Symbol {
            id,
            name: name.to_string(),
            scope,
            declaration_line,
            is_parameter,
            is_module_variable,
            assignments: Vec::new(),
            reads: Vec::new(),
        });

        self.by_scope.entry(scope).or_default().insert(name.to_string(), id);
        id
    }

    /// Resolves a name from `scope` outward along the ancestor chain.
    pub fn lookup(&self, tree: &ScopeTree, scope: ScopeId, name: &str) -> Option<SymbolId> {
        for ancestor in tree.ancestors(scope) {
            if let Some(symbols) = self.by_scope.get(&ancestor.id) {
                if let Some(&id) = symbols.get(name) {
                    return Some(id);
                }
            }
        }
        None
    }

    /// Resolves a name in `scope` only, without walking the chain.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.by_scope.get(&scope).and_then(|s| s.get(name)).copied()
    }

    pub fn add_assignment(&mut self, id: SymbolId, reference: SymbolReference) {
        self.arena[id].assignments.push(reference);
    }

    pub fn add_read(&mut self, id: SymbolId, reference: SymbolReference) {
        self.arena[id].reads.push(reference);
    }

    pub fn add_unresolved(&mut self, name: &str, scope: ScopeId, reference: SymbolReference) {
        self.unresolved.push(UnresolvedReference {
            name: name.to_string(),
            scope,
            reference,
        });
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.arena[id]
    }

    /// Symbols in arena insertion order, which is source declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.arena.iter().map(|(_, s)| s)
    }

    pub fn symbols_in_scope(&self, scope: ScopeId) -> Vec<SymbolId> {
        let mut ids: Vec<SymbolId> = self
            .by_scope
            .get(&scope)
            .map(|s| s.values().copied().collect())
            .unwrap_or_default();
        // HashMap order is not stable; restore declaration order
        ids.sort_by_key(|&id| id.index());
        ids
    }

    pub fn redeclarations(&self) -> &[Redeclaration] {
        &self.redeclarations
    }

    pub fn unresolved(&self) -> &[UnresolvedReference] {
        &self.unresolved
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }
}
