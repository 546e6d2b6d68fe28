//! Validate command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use rentstat_changelog::{Changelog, ChangelogAggregator};
use rentstat_core::config::{find_config, load_config, validation::validate_config, Config};

use crate::cli::{Cli, OutputFormat};

/// Validate configuration and changelog
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Changelog file (defaults to the configured one)
    #[arg(long, value_name = "PATH")]
    pub changelog: Option<PathBuf>,

    /// Only validate configuration file
    #[arg(long)]
    pub config_only: bool,

    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Non-fatal findings about a parsed changelog
fn changelog_warnings(changelog: &Changelog) -> Vec<String> {
    let mut warnings = Vec::new();

    for (newer, older) in changelog.out_of_order() {
        warnings.push(format!(
            "Version {} is listed before {} but is lower",
            newer, older
        ));
    }

    for entry in changelog.entries.iter().filter(|e| e.is_empty()) {
        warnings.push(format!("Version {} has no release notes", entry.version));
    }

    warnings
}

/// Error reported when validation fails, keeping the first classified cause
/// in the chain so the exit code reflects it
fn validation_failure(cause: Option<anyhow::Error>, error_count: usize) -> anyhow::Error {
    let message = format!("Validation failed with {} error(s)", error_count);
    match cause {
        Some(cause) => cause.context(message),
        None => anyhow::anyhow!(message),
    }
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            config_only = self.config_only,
            strict = self.strict,
            "executing validate command"
        );
        let cwd = std::env::current_dir()?;

        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();
        // First config or changelog failure, kept for the exit code
        let mut cause: Option<anyhow::Error> = None;

        // Validate configuration
        let config_path = cli.config.clone().or_else(|| find_config(&cwd));
        let config = match &config_path {
            Some(path) => match load_config(path) {
                Ok(config) => Some(config),
                Err(e) => {
                    errors.push(format!("Configuration: {}", e));
                    cause.get_or_insert(e.into());
                    None
                }
            },
            None => {
                warnings.push("No configuration file found, using defaults".to_string());
                Some(Config::default())
            }
        };

        let config = config.map(|c| cli.apply_overrides(c, self.changelog.as_deref()));

        if let Some(ref cfg) = config {
            if let Err(e) = validate_config(cfg) {
                errors.push(format!("Configuration validation: {}", e));
                cause.get_or_insert(e.into());
            }
        }

        let mut versions = 0;
        if !self.config_only {
            if let Some(ref cfg) = config {
                let aggregator = ChangelogAggregator::new(cfg.changelog.clone());
                match aggregator.load(&cfg.changelog.file) {
                    Ok(changelog) => {
                        versions = changelog.entries.len();
                        warnings.extend(changelog_warnings(&changelog));
                    }
                    Err(e) => {
                        errors.push(format!("Changelog: {}", e));
                        cause.get_or_insert(e.into());
                    }
                }
            }
        }

        // If strict, promote warnings to errors
        if self.strict {
            errors.append(&mut warnings);
        }

        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": config_path.map(|p| p.to_string_lossy().to_string()),
                    "changelog": config.as_ref().map(|c| c.changelog.file.to_string_lossy().to_string()),
                    "versions": versions,
                    "errors": errors,
                    "warnings": warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();

                    if let Some(path) = &config_path {
                        println!("Config: {}", style(path.display()).cyan());
                    }
                    if let Some(cfg) = config.as_ref().filter(|_| !self.config_only) {
                        println!(
                            "Changelog: {} ({} version(s))",
                            style(cfg.changelog.file.display()).cyan(),
                            versions
                        );
                    }
                    println!();

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        if warnings.is_empty() {
                            println!("{}", style("✓ All checks passed").green().bold());
                        } else {
                            println!(
                                "{} with {} warning(s)",
                                style("✓ Validation passed").green().bold(),
                                warnings.len()
                            );
                        }
                    }
                }
            }
        }

        if !passed {
            return Err(validation_failure(cause, errors.len()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes::{for_error, CHANGELOG_ERROR, CONFIG_ERROR, ERROR};
    use rentstat_changelog::parse;
    use rentstat_core::{ChangelogError, ConfigError};
    use std::path::PathBuf;

    #[test]
    fn test_failure_keeps_changelog_exit_code() {
        let cause = ChangelogError::NoVersionHeading(PathBuf::from("CHANGELOG.md"));
        let err = validation_failure(Some(cause.into()), 1);

        assert_eq!(for_error(&err), CHANGELOG_ERROR);
        assert!(format!("{:#}", err).starts_with("Validation failed with 1 error(s)"));
    }

    #[test]
    fn test_failure_keeps_config_exit_code() {
        let cause = ConfigError::InvalidValue {
            field: "environment".to_string(),
            message: "environment cannot be empty".to_string(),
        };
        let err = validation_failure(Some(cause.into()), 2);
        assert_eq!(for_error(&err), CONFIG_ERROR);
    }

    #[test]
    fn test_strict_only_failure_is_general_error() {
        assert_eq!(for_error(&validation_failure(None, 1)), ERROR);
    }

    #[test]
    fn test_changelog_warnings() {
        let changelog = parse("## 1.0.0\n\n- a\n\n## 1.2.0\n");
        let warnings = changelog_warnings(&changelog);

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("1.0.0"));
        assert!(warnings[0].contains("1.2.0"));
        assert_eq!(warnings[1], "Version 1.2.0 has no release notes");
    }

    #[test]
    fn test_clean_changelog_has_no_warnings() {
        let changelog = parse("## 2.0.0\n\n- b\n\n## 1.0.0\n\n- a\n");
        assert!(changelog_warnings(&changelog).is_empty());
    }
}
