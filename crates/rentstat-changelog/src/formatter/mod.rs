//! Changelog formatters

mod html;
mod markdown;
mod registry;

pub use html::{render_markdown, render_raw, HtmlFormatter};
pub use markdown::MarkdownFormatter;
pub use registry::FormatterRegistry;

use rentstat_core::config::ChangelogConfig;

use crate::types::Changelog;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a parsed changelog to string
    fn format(&self, changelog: &Changelog, config: &ChangelogConfig) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
