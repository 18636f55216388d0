//! Analysis engine for scope analysis and diagnostic generation
//!
//! Provides the core analysis functionality for CLI and other consumers.
//! The symbol table is built once per file and shared by every rule.

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::rules::RuleRegistry;
use crate::semantic::SymbolTableBuilder;
use crate::source::SourceFile;

pub struct AnalysisEngine {
    registry: RuleRegistry,
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self {
            registry: RuleRegistry::with_default_rules(),
        }
    }

    pub fn with_config(config: &Config) -> Self {
        let mut registry = RuleRegistry::with_default_rules();
        registry.configure(&config.rules);
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn analyze(&self, file: &SourceFile) -> Vec<Diagnostic> {
        let table = SymbolTableBuilder::build(file);
        self.registry.run_all(file, &table)
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
