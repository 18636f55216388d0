//! Init command - initializes wlint configuration in a project

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::fs;
use std::path::Path;
use wlint_core::config::CONFIG_FILENAME;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const DEFAULT_CONFIG: &str = r#"# wlint configuration file
# See https://github.com/kzn-tools/wlint for documentation

# File patterns to include in analysis
# include = ["Kernel/**/*.wl", "Source/**/*.m"]

# File patterns to exclude from analysis
# exclude = ["**/Legacy/**", "**/*Test.wl"]

# Rule configuration
[rules]
# Disable specific rules by id or name
# disabled = ["naming-convention"]

# Drop findings below a confidence level (high, medium, low)
# min_confidence = "medium"

# Override rule severity
# [rules.severity]
# unused-variable = "error"
"#;

const PRE_COMMIT_HOOK: &str = r#"#!/bin/sh
# wlint pre-commit hook - analyzes staged Wolfram Language files

wlint check --staged

exit $?
"#;

#[derive(ValueEnum, Clone, Debug)]
pub enum HookType {
    PreCommit,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Install a git hook (e.g., pre-commit)
    #[arg(long, value_name = "HOOK")]
    pub hook: Option<HookType>,
}

impl InitArgs {
    pub fn run(&self) -> Result<()> {
        if let Some(hook_type) = &self.hook {
            return self.install_hook(hook_type);
        }

        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Config file '{}' already exists. Use --force to overwrite.",
                CONFIG_FILENAME
            );
        }

        fs::write(config_path, DEFAULT_CONFIG)?;
        println!(
            "{} Created {} configuration file",
            "✓".green().bold(),
            CONFIG_FILENAME.cyan()
        );
        Ok(())
    }

    fn install_hook(&self, hook_type: &HookType) -> Result<()> {
        let git_dir = find_git_dir()?;
        let hooks_dir = git_dir.join("hooks");

        if !hooks_dir.exists() {
            fs::create_dir_all(&hooks_dir)?;
        }

        let (hook_name, hook_content) = match hook_type {
            HookType::PreCommit => ("pre-commit", PRE_COMMIT_HOOK),
        };

        let hook_path = hooks_dir.join(hook_name);

        if hook_path.exists() && !self.force {
            anyhow::bail!(
                "Hook '{}' already exists. Use --force to overwrite.",
                hook_name
            );
        }

        fs::write(&hook_path, hook_content)?;

        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&hook_path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&hook_path, perms)?;
        }

        println!(
            "{} Installed {} hook at {}",
            "✓".green().bold(),
            hook_name.cyan(),
            hook_path.display()
        );
        Ok(())
    }
}

fn find_git_dir() -> Result<std::path::PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let git_dir = current.join(".git");
        if git_dir.is_dir() {
            return Ok(git_dir);
        }
        if !current.pop() {
            anyhow::bail!("Not a git repository (or any parent up to mount point)");
        }
    }
}
