//! Rentstat Changelog - Changelog aggregation for the status page
//!
//! This crate parses hand-written changelogs into structured entries and
//! renders them for display.

pub mod aggregator;
pub mod formatter;
pub mod parser;
pub mod types;

pub use aggregator::{get_changelog_html, get_latest_version, ChangelogAggregator};
pub use formatter::{ChangelogFormatter, FormatterRegistry, HtmlFormatter, MarkdownFormatter};
pub use parser::parse;
pub use types::{Changelog, ChangelogEntry};
