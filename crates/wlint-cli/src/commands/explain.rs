//! Explain command - provides detailed explanation of a rule

use clap::Args;
use colored::Colorize;
use std::env;
use wlint_core::analysis::AnalysisEngine;
use wlint_core::config::load_config_or_default_with_warnings;
use wlint_core::rules::{RuleCategory, Severity};

#[derive(Args, Debug)]
pub struct ExplainArgs {
    #[arg(
        value_name = "RULE_ID",
        help = "Rule ID to explain (e.g., \"W001\", \"unused-variable\")"
    )]
    pub rule_id: String,
}

impl ExplainArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let cwd = env::current_dir()?;
        let config_result = load_config_or_default_with_warnings(&cwd);
        let config = config_result.config;
        let engine = AnalysisEngine::with_config(&config);
        let registry = engine.registry();

        let rule = registry
            .get_rule(&self.rule_id)
            .or_else(|| registry.get_rule_by_name(&self.rule_id));

        match rule {
            Some(rule) => {
                let metadata = rule.metadata();
                let is_enabled = registry.is_rule_enabled(&self.rule_id);

                println!();
                println!("{}", format!("Rule {}", metadata.id).bold());
                println!();
                println!("  {}: {}", "Name".cyan(), metadata.name);
                println!("  {}: {}", "Description".cyan(), metadata.description);
                println!(
                    "  {}: {}",
                    "Category".cyan(),
                    format_category(&metadata.category)
                );
                println!(
                    "  {}: {}",
                    "Severity".cyan(),
                    format_severity(&metadata.severity)
                );

                if let Some(url) = metadata.docs_url {
                    println!("  {}: {}", "Documentation".cyan(), url);
                }

                if let Some(examples) = metadata.examples {
                    println!();
                    println!("  {}:", "Examples".cyan());
                    for line in examples.lines() {
                        println!("    {}", line);
                    }
                }

                println!();
                if is_enabled {
                    println!("  {}: {}", "Status".cyan(), "enabled".green());
                } else {
                    println!("  {}: {}", "Status".cyan(), "disabled".red());
                }
                println!();

                Ok(())
            }
            None => {
                eprintln!(
                    "{} Rule '{}' not found",
                    "error:".red().bold(),
                    self.rule_id
                );
                eprintln!();
                eprintln!("Available rules:");

                for rule in registry.rules() {
                    let meta = rule.metadata();
                    eprintln!("  {} ({})", meta.id, meta.name);
                }

                std::process::exit(1);
            }
        }
    }
}

fn format_category(category: &RuleCategory) -> &'static str {
    match category {
        RuleCategory::Correctness => "Correctness",
        RuleCategory::Quality => "Quality",
    }
}

fn format_severity(severity: &Severity) -> String {
    match severity {
        Severity::Error => "error".red().to_string(),
        Severity::Warning => "warning".yellow().to_string(),
        Severity::Info => "info".blue().to_string(),
        Severity::Hint => "hint".cyan().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use wlint_core::analysis::AnalysisEngine;
    use wlint_core::config::Config;

    #[test]
    fn explain_known_rule_returns_metadata() {
        let config = Config::default();
        let engine = AnalysisEngine::with_config(&config);
        let registry = engine.registry();

        let rule = registry.get_rule("W001");
        assert!(rule.is_some(), "W001 rule should exist");

        let metadata = rule.unwrap().metadata();
        assert_eq!(metadata.id, "W001");
        assert_eq!(metadata.name, "unused-variable");
        assert!(!metadata.description.is_empty());
    }

    #[test]
    fn explain_unknown_rule_returns_none() {
        let config = Config::default();
        let engine = AnalysisEngine::with_config(&config);
        let registry = engine.registry();

        let rule = registry.get_rule("W999");
        assert!(rule.is_none(), "W999 rule should not exist");
    }

    #[test]
    fn explain_rule_by_name() {
        let config = Config::default();
        let engine = AnalysisEngine::with_config(&config);
        let registry = engine.registry();

        let rule = registry.get_rule_by_name("variable-shadowing");
        assert!(rule.is_some(), "variable-shadowing rule should exist");
        assert_eq!(rule.unwrap().metadata().id, "W005");
    }

    #[test]
    fn rule_has_examples() {
        let config = Config::default();
        let engine = AnalysisEngine::with_config(&config);
        let registry = engine.registry();

        let rule = registry.get_rule("W014").expect("W014 should exist");
        let metadata = rule.metadata();

        assert!(
            metadata.examples.is_some(),
            "W014 should have examples defined"
        );
        let examples = metadata.examples.unwrap();
        assert!(examples.contains("isEven"), "Examples should show the cycle");
    }
}
