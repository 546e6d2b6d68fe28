//! Version command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use rentstat_changelog::ChangelogAggregator;

use crate::cli::output::version_style;
use crate::cli::{Cli, OutputFormat};

/// Print the latest version from the changelog
#[derive(Debug, Args)]
pub struct VersionCommand {
    /// Changelog file (defaults to the configured one)
    #[arg(long, value_name = "PATH")]
    pub changelog: Option<PathBuf>,
}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(changelog = ?self.changelog, "executing version command");
        let cwd = std::env::current_dir()?;
        let (config, _) = cli.load_config(&cwd, self.changelog.as_deref())?;

        let aggregator = ChangelogAggregator::new(config.changelog.clone());
        let version = aggregator.latest_version(&config.changelog.file)?;

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "version": version,
                    "changelog": config.changelog.file.to_string_lossy(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if cli.verbose {
                    println!(
                        "{} (from {})",
                        version_style().apply_to(&version),
                        config.changelog.file.display()
                    );
                } else {
                    println!("{}", version);
                }
            }
        }

        Ok(())
    }
}
