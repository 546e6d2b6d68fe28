//! Markdown changelog formatter
//!
//! Re-emits a parsed changelog with canonical headings
//! (`## [x.y.z] - YYYY-MM-DD`), keeping bodies as written.

use rentstat_core::config::ChangelogConfig;
use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::Changelog;

/// Markdown changelog formatter
pub struct MarkdownFormatter {
    /// Wrap versions in brackets (Keep a Changelog style)
    pub bracket_versions: bool,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self {
            bracket_versions: true,
        }
    }

    /// Emit bare versions instead of `[x.y.z]`
    pub fn with_bare_versions(mut self) -> Self {
        self.bracket_versions = false;
        self
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_block(blocks: &mut Vec<String>, heading: Option<String>, lines: &[String]) {
    let mut block = heading.unwrap_or_default();
    if !lines.is_empty() {
        if !block.is_empty() {
            block.push_str("\n\n");
        }
        block.push_str(&lines.join("\n"));
    }
    if !block.is_empty() {
        blocks.push(block);
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, changelog, _config), fields(entry_count = changelog.entries.len()))]
    fn format(&self, changelog: &Changelog, _config: &ChangelogConfig) -> String {
        let mut blocks = Vec::new();

        push_block(&mut blocks, None, &changelog.preamble);

        let entry_level = changelog.entries.first().map_or(2, |e| e.level) as usize;

        if let Some(unreleased) = &changelog.unreleased {
            let label = if self.bracket_versions {
                "[Unreleased]"
            } else {
                "Unreleased"
            };
            let heading = format!("{} {}", "#".repeat(entry_level), label);
            push_block(&mut blocks, Some(heading), unreleased);
        }

        for entry in &changelog.entries {
            let mut heading = "#".repeat(entry.level as usize);
            if self.bracket_versions {
                heading.push_str(&format!(" [{}]", entry.version));
            } else {
                heading.push_str(&format!(" {}", entry.version));
            }
            if let Some(date) = entry.date {
                heading.push_str(&format!(" - {}", date.format("%Y-%m-%d")));
            }
            if entry.yanked {
                heading.push_str(" [YANKED]");
            }
            push_block(&mut blocks, Some(heading), &entry.body);
        }

        let mut output = blocks.join("\n\n");
        if !output.is_empty() {
            output.push('\n');
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn format(text: &str) -> String {
        MarkdownFormatter::new().format(&parse(text), &ChangelogConfig::default())
    }

    #[test]
    fn test_canonical_headings() {
        let output = format(
            "# Changelog\r\n\r\n## v2.0.0 (2024/01/15)\r\n- Big change   \r\n\r\n## 1.0.0\r\n\r\n- Init\r\n",
        );
        assert_eq!(
            output,
            "# Changelog\n\n## [2.0.0] - 2024-01-15\n\n- Big change\n\n## [1.0.0]\n\n- Init\n"
        );
    }

    #[test]
    fn test_unreleased_and_yanked() {
        let output = format("## Unreleased\n\n- wip\n\n## 0.9.0 - 2023-05-01 [yanked]\n");
        assert_eq!(
            output,
            "## [Unreleased]\n\n- wip\n\n## [0.9.0] - 2023-05-01 [YANKED]\n"
        );
    }

    #[test]
    fn test_bare_versions() {
        let output = MarkdownFormatter::new()
            .with_bare_versions()
            .format(&parse("## [1.0.0]\n- Init\n"), &ChangelogConfig::default());
        assert_eq!(output, "## 1.0.0\n\n- Init\n");
    }

    #[test]
    fn test_reformat_is_stable() {
        let once = format("## [1.1.0] - 2024-02-02\n\n### Fixed\n\n- a\n\n## 1.0.0\n");
        assert_eq!(format(&once), once);
    }

    #[test]
    fn test_empty() {
        assert_eq!(format(""), "");
    }
}
