//! Changelog aggregation
//!
//! Reads a changelog file fresh on every call and turns it into either the
//! latest version string or a rendered history. Errors are surfaced to the
//! caller, never swallowed; only the HTML rendering may degrade to escaped
//! source text when configured with [`ParseFailurePolicy::Raw`].

use std::path::Path;

use rentstat_core::config::ChangelogConfig;
use rentstat_core::{ChangelogError, ParseFailurePolicy};
use tracing::{debug, info, instrument, warn};

use crate::formatter::{render_raw, ChangelogFormatter, HtmlFormatter};
use crate::parser::parse;
use crate::types::Changelog;

/// Result type for changelog operations
pub type Result<T> = std::result::Result<T, ChangelogError>;

/// Changelog aggregator
pub struct ChangelogAggregator {
    config: ChangelogConfig,
}

impl ChangelogAggregator {
    /// Create a new aggregator
    pub fn new(config: ChangelogConfig) -> Self {
        Self { config }
    }

    /// Read the changelog as text
    pub fn read(&self, path: &Path) -> Result<String> {
        debug!(path = %path.display(), "reading changelog");
        std::fs::read_to_string(path).map_err(|e| ChangelogError::from_io(path, e))
    }

    /// Read and parse the changelog, failing when it has no version heading
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn load(&self, path: &Path) -> Result<Changelog> {
        let text = self.read(path)?;
        self.parse_document(path, &text)
    }

    fn parse_document(&self, path: &Path, text: &str) -> Result<Changelog> {
        let changelog = parse(text);
        if changelog.is_empty() {
            return Err(ChangelogError::NoVersionHeading(path.to_path_buf()));
        }

        for (newer, older) in changelog.out_of_order() {
            warn!(
                path = %path.display(),
                newer,
                older,
                "changelog entries are not in descending version order"
            );
        }

        Ok(changelog)
    }

    /// Version of the first entry in the changelog
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn latest_version(&self, path: &Path) -> Result<String> {
        let changelog = self.load(path)?;
        let version = changelog
            .latest()
            .map(|e| e.version.clone())
            .ok_or_else(|| ChangelogError::NoVersionHeading(path.to_path_buf()))?;

        info!(version, "latest changelog version");
        Ok(version)
    }

    /// Full changelog history rendered as HTML
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn changelog_html(&self, path: &Path) -> Result<String> {
        self.render(path, &HtmlFormatter::new())
    }

    /// Changelog rendered with any formatter, honoring the configured limit
    /// and parse failure policy
    pub fn render(&self, path: &Path, formatter: &dyn ChangelogFormatter) -> Result<String> {
        let text = self.read(path)?;

        let changelog = match self.parse_document(path, &text) {
            Ok(changelog) => changelog,
            Err(e) if e.is_parse_error() && self.config.on_parse_error == ParseFailurePolicy::Raw => {
                warn!(path = %path.display(), "no version heading, rendering raw changelog");
                return Ok(render_raw(&text));
            }
            Err(e) => return Err(e),
        };

        let changelog = match self.config.limit {
            Some(limit) => changelog.limit(limit),
            None => changelog,
        };

        let output = formatter.format(&changelog, &self.config);
        debug!(
            entry_count = changelog.entries.len(),
            output_len = output.len(),
            format = formatter.extension(),
            "changelog rendered"
        );
        Ok(output)
    }
}

impl Default for ChangelogAggregator {
    fn default() -> Self {
        Self::new(ChangelogConfig::default())
    }
}

/// Latest version in the changelog at `path`, with default settings
pub fn get_latest_version(path: impl AsRef<Path>) -> Result<String> {
    ChangelogAggregator::default().latest_version(path.as_ref())
}

/// Changelog at `path` rendered as HTML, with default settings
pub fn get_changelog_html(path: impl AsRef<Path>) -> Result<String> {
    ChangelogAggregator::default().changelog_html(path.as_ref())
}
