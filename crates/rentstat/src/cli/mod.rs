//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::debug;

use rentstat_core::config::{
    load_config, load_config_or_default, validation::validate_config, Config, ENVIRONMENT_VAR,
};

use commands::{
    ChangelogCommand, CompletionsCommand, InitCommand, PageCommand, StatusCommand,
    ValidateCommand, VersionCommand,
};

/// rentstat - Version and changelog status page
#[derive(Debug, Parser)]
#[command(name = "rentstat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (default: searched from the working directory up)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Environment name shown on the status page
    #[arg(short, long, global = true, env = ENVIRONMENT_VAR)]
    pub environment: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a new rentstat configuration
    Init(InitCommand),

    /// Print the latest version from the changelog
    Version(VersionCommand),

    /// Render the changelog
    Changelog(ChangelogCommand),

    /// Show version, environment and changelog status
    Status(StatusCommand),

    /// Render the full HTML status page
    Page(PageCommand),

    /// Validate configuration and changelog
    Validate(ValidateCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(&self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match &self.command {
            Commands::Init(cmd) => cmd.execute(self),
            Commands::Version(cmd) => cmd.execute(self),
            Commands::Changelog(cmd) => cmd.execute(self),
            Commands::Status(cmd) => cmd.execute(self),
            Commands::Page(cmd) => cmd.execute(self),
            Commands::Validate(cmd) => cmd.execute(self),
            Commands::Completions(cmd) => cmd.execute(self),
        }
    }

    /// Load configuration and apply command-line overrides.
    ///
    /// An explicit `--config` must load; otherwise a discovered file is used
    /// when present and defaults otherwise. The result is validated again
    /// once overrides are applied.
    pub fn load_config(
        &self,
        cwd: &Path,
        changelog: Option<&Path>,
    ) -> anyhow::Result<(Config, Option<PathBuf>)> {
        let (config, path) = match &self.config {
            Some(path) => (load_config(path)?, Some(path.clone())),
            None => load_config_or_default(cwd)?,
        };

        let config = self.apply_overrides(config, changelog);
        validate_config(&config)?;
        Ok((config, path))
    }

    /// Apply `--environment` and an optional changelog path to `config`
    pub fn apply_overrides(&self, config: Config, changelog: Option<&Path>) -> Config {
        let mut config = config;
        if let Some(environment) = &self.environment {
            debug!(environment, "environment overridden");
            config = config.with_environment(environment.clone());
        }
        if let Some(path) = changelog {
            debug!(path = %path.display(), "changelog path overridden");
            config = config.with_changelog_file(path);
        }
        config
    }
}
