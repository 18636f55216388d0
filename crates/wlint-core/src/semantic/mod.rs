//! Scope tree, symbol table and dependency graph construction

pub mod builder;
pub mod depgraph;
pub mod scope;
pub mod symbols;
pub mod table;

pub use builder::{SymbolTableBuilder, is_builtin};
pub use depgraph::DependencyGraph;
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree};
pub use symbols::{
    Redeclaration, Symbol, SymbolArena, SymbolId, SymbolReference, UnresolvedReference,
};
pub use table::{ShadowingIssue, SymbolTable};
