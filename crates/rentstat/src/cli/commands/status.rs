//! Status command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use crate::cli::output::{key_value, path_style, version_style};
use crate::cli::{Cli, OutputFormat};
use crate::status::{collect, ChangelogStatus, VersionStatus};

/// Show version, environment and changelog status
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Changelog file (defaults to the configured one)
    #[arg(long, value_name = "PATH")]
    pub changelog: Option<PathBuf>,
}

impl StatusCommand {
    /// Execute the status command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(changelog = ?self.changelog, "executing status command");
        let cwd = std::env::current_dir()?;
        let (config, config_path) = cli.load_config(&cwd, self.changelog.as_deref())?;

        let page = collect(&config);

        match cli.format {
            OutputFormat::Json => {
                let mut output = serde_json::to_value(&page)?;
                output["config_path"] = serde_json::json!(
                    config_path.map(|p| p.to_string_lossy().to_string())
                );
                output["version_display"] = serde_json::json!(page.version.display());
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                let env = &page.environment;
                let title = env.app_label.as_deref().unwrap_or("rent-checker");
                println!("{}", style(format!("{} Status", title)).bold());
                println!();

                println!("{}", style("Configuration").underlined());
                if let Some(path) = config_path {
                    println!("{}", key_value("Config file", &path_style().apply_to(path.display()).to_string()));
                } else {
                    println!(
                        "{}",
                        key_value(
                            "Config file",
                            &format!("{} (using defaults)", style("not found").yellow())
                        )
                    );
                }
                println!(
                    "{}",
                    key_value("Changelog", &config.changelog.file.display().to_string())
                );
                println!();

                println!("{}", style("Release").underlined());
                let version = match &page.version {
                    VersionStatus::Known { version } => {
                        version_style().apply_to(version).to_string()
                    }
                    other => style(other.display()).yellow().to_string(),
                };
                println!("{}", key_value("Version", &version));
                if let Some(reason) = page.version.reason() {
                    println!("{}", key_value("Reason", &style(reason).dim().to_string()));
                }
                println!("{}", key_value("Environment", &env.name));
                println!();

                println!("{}", style("Runtime").underlined());
                println!("{}", key_value("rentstat", &page.runtime.tool_version));
                println!(
                    "{}",
                    key_value(
                        "Platform",
                        &format!("{}/{}", page.runtime.os, page.runtime.arch)
                    )
                );
                println!();

                println!("{}", style("Links").underlined());
                if let Some(url) = &env.app_url {
                    println!("{}", key_value("Application", url));
                }
                if let Some(url) = &env.deploy.url {
                    let app = env.deploy.app.as_deref().unwrap_or("-");
                    println!("{}", key_value("Deployment", &format!("{} ({})", url, app)));
                }
                if let Some(docs) = &env.api_docs_url {
                    println!("{}", key_value("API docs", docs));
                }
                println!();

                println!("{}", style("Changelog").underlined());
                match &page.changelog {
                    ChangelogStatus::Rendered { html } => {
                        let sections = html.matches("class=\"changelog-entry\"").count();
                        println!("  {} {} version(s) rendered", style("✓").green(), sections);
                        if cli.verbose {
                            println!();
                            println!("{}", html);
                        }
                    }
                    ChangelogStatus::Unavailable { reason } => {
                        println!("  {} {}", style("✗").red(), reason);
                    }
                }
            }
        }

        Ok(())
    }
}
