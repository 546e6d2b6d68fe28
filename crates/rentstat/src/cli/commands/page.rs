//! Page command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli::output::{path_style, success, warning};
use crate::cli::Cli;
use crate::status::{collect, render_page};

/// Render the full HTML status page
#[derive(Debug, Args)]
pub struct PageCommand {
    /// Changelog file (defaults to the configured one)
    #[arg(long, value_name = "PATH")]
    pub changelog: Option<PathBuf>,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl PageCommand {
    /// Execute the page command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(changelog = ?self.changelog, output = ?self.output, "executing page command");
        let cwd = std::env::current_dir()?;
        let (config, _) = cli.load_config(&cwd, self.changelog.as_deref())?;

        let page = collect(&config);
        let html = render_page(&page);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &html)?;
                if !cli.quiet {
                    if page.is_degraded() {
                        warning("Changelog unavailable, page rendered with placeholders");
                    }
                    success(&format!(
                        "Status page written to {}",
                        path_style().apply_to(path.display())
                    ));
                }
            }
            None => print!("{}", html),
        }

        Ok(())
    }
}
