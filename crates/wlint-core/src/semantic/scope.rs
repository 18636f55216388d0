//! Scope tree for lexical regions of a source file
//!
//! This module provides an arena-backed tree of nested scopes, each
//! covering an inclusive 1-based line range. The Global scope is the
//! root and spans the whole file; children nest within their parent's
//! range in source order.

use id_arena::{Arena, Id};

pub type ScopeId = Id<Scope>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Module,
    Block,
    With,
    Function,
    Loop,
}

#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    pub start_line: usize,
    pub end_line: usize,
    /// Display name, e.g. the function head or the loop construct ("Do").
    pub name: Option<String>,
}

impl Scope {
    pub fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }

    /// Line span of this scope (end - start).
    pub fn span_lines(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }
}

pub struct ScopeTree {
    arena: Arena<Scope>,
    root: Option<ScopeId>,
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn create_scope(
        &mut self,
        kind: ScopeKind,
        parent: Option<ScopeId>,
        start_line: usize,
        end_line: usize,
        name: Option<String>,
    ) -> ScopeId {
        let id = self.arena.alloc_with_id(|id| Scope {
            id,
            kind,
            parent,
            children: Vec::new(),
            start_line,
            end_line,
            name,
        });

        if let Some(parent_id) = parent {
            self.arena[parent_id].children.push(id);
        }

        if self.root.is_none() {
            self.root = Some(id);
        }

        id
    }

    pub fn root(&self) -> Option<ScopeId> {
        self.root
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.arena[id]
    }

    pub fn parent(&self, id: ScopeId) -> Option<&Scope> {
        self.arena[id].parent.map(|p| &self.arena[p])
    }

    pub fn children(&self, id: ScopeId) -> impl Iterator<Item = &Scope> {
        self.arena[id].children.iter().map(|&c| &self.arena[c])
    }

    pub fn ancestors(&self, id: ScopeId) -> AncestorIter<'_> {
        AncestorIter {
            tree: self,
            current: Some(id),
        }
    }

    /// True when `scope` is `ancestor` itself or nested anywhere below it.
    pub fn is_descendant_of(&self, scope: ScopeId, ancestor: ScopeId) -> bool {
        self.ancestors(scope).any(|s| s.id == ancestor)
    }

    /// True when the two scopes are related in either direction.
    pub fn are_related(&self, a: ScopeId, b: ScopeId) -> bool {
        self.is_descendant_of(a, b) || self.is_descendant_of(b, a)
    }

    /// Finds the innermost scope at or below `id` containing the line.
    /// Returns `None` if `id` itself does not contain the line.
    pub fn scope_at_line(&self, id: ScopeId, line: usize) -> Option<ScopeId> {
        if !self.arena[id].contains_line(line) {
            return None;
        }

        for &child in &self.arena[id].children {
            if let Some(found) = self.scope_at_line(child, line) {
                return Some(found);
            }
        }

        Some(id)
    }

    /// Innermost scope containing the line, starting from the root.
    pub fn innermost_at_line(&self, line: usize) -> Option<ScopeId> {
        self.root.and_then(|root| self.scope_at_line(root, line))
    }

    /// All Function-kind scopes nested anywhere below `id` (excluding `id`).
    pub fn descendant_functions(&self, id: ScopeId) -> Vec<ScopeId> {
        let mut found = Vec::new();
        let mut stack: Vec<ScopeId> = self.arena[id].children.clone();
        while let Some(current) = stack.pop() {
            if self.arena[current].kind == ScopeKind::Function {
                found.push(current);
            }
            stack.extend(self.arena[current].children.iter().copied());
        }
        found.sort_by_key(|&s| self.arena[s].start_line);
        found
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.arena.iter().map(|(_, s)| s)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }
}

pub struct AncestorIter<'a> {
    tree: &'a ScopeTree,
    current: Option<ScopeId>,
}

impl<'a> Iterator for AncestorIter<'a> {
    type Item = &'a Scope;

    fn next(&mut self) -> Option<Self::Item> {
        let current_id = self.current?;
        let scope = &self.tree.arena[current_id];
        self.current = scope.parent;
        Some(scope)
    }
}
