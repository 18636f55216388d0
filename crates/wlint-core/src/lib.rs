//! wlint-core: scope and symbol analysis for Wolfram Language sources
//!
//! The engine builds a lexical scope tree from source text, resolves
//! identifier occurrences into a frozen symbol table, and runs a suite
//! of flow-sensitive rules over it. Consumers drive it through
//! [`analysis::AnalysisEngine`].

pub mod analysis;
pub mod config;
pub mod diagnostic;
pub mod rules;
pub mod semantic;
pub mod source;
pub mod text;

pub use analysis::AnalysisEngine;
pub use diagnostic::Diagnostic;
pub use source::SourceFile;
