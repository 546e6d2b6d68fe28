//! Changelog command

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use rentstat_changelog::{ChangelogAggregator, FormatterRegistry};
use rentstat_core::ParseFailurePolicy;

use crate::cli::output::{path_style, success};
use crate::cli::{Cli, OutputFormat};

/// Render the changelog
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Changelog file (defaults to the configured one)
    #[arg(long, value_name = "PATH")]
    pub changelog: Option<PathBuf>,

    /// Markup to render
    #[arg(short, long, value_enum, default_value = "html")]
    pub to: Markup,

    /// Only render the newest N versions
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Render the escaped file when it has no version heading
    #[arg(long)]
    pub raw_fallback: bool,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Supported changelog markups
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Markup {
    /// HTML sections, one per version
    Html,
    /// Canonical Markdown
    #[value(name = "md", alias = "markdown")]
    Markdown,
}

impl Markup {
    /// Formatter registry key
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(changelog = ?self.changelog, to = ?self.to, limit = ?self.limit, "executing changelog command");
        let cwd = std::env::current_dir()?;
        let (mut config, _) = cli.load_config(&cwd, self.changelog.as_deref())?;

        if let Some(limit) = self.limit {
            anyhow::ensure!(limit > 0, "--limit must be greater than zero");
            config.changelog.limit = Some(limit);
        }
        if self.raw_fallback {
            config.changelog.on_parse_error = ParseFailurePolicy::Raw;
        }

        let aggregator = ChangelogAggregator::new(config.changelog.clone());
        let path = config.changelog.file.as_path();

        if cli.format == OutputFormat::Json && self.output.is_none() {
            let changelog = aggregator.load(path)?;
            let changelog = match config.changelog.limit {
                Some(limit) => changelog.limit(limit),
                None => changelog,
            };
            println!("{}", serde_json::to_string_pretty(&changelog)?);
            return Ok(());
        }

        let registry = FormatterRegistry::new();
        let formatter = registry
            .get(self.to.extension())
            .ok_or_else(|| anyhow::anyhow!("No formatter for {}", self.to.extension()))?;
        let rendered = aggregator.render(path, formatter.as_ref())?;

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, &rendered)?;
            if !cli.quiet {
                success(&format!(
                    "Changelog written to {}",
                    path_style().apply_to(output_path.display())
                ));
            }
        } else {
            print!("{}", rendered);
        }

        Ok(())
    }
}
