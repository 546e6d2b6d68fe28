//! HTML changelog formatter
//!
//! Every version becomes one `<section class="changelog-entry">` carrying the
//! version in `data-version`, with its heading at the source heading level.
//! Bodies are rendered as Markdown; raw HTML in the source is escaped rather
//! than passed through, and script URLs in links are neutralized.

use std::collections::HashSet;

use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use rentstat_core::config::ChangelogConfig;
use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{Changelog, ChangelogEntry};

/// HTML changelog formatter
pub struct HtmlFormatter {
    /// Wrap the output in `<div class="changelog">`
    pub wrap: bool,
}

impl HtmlFormatter {
    /// Create a new HTML formatter
    pub fn new() -> Self {
        Self { wrap: true }
    }

    /// Emit the sections without the surrounding container
    pub fn without_wrapper(mut self) -> Self {
        self.wrap = false;
        self
    }

    fn format_entry(
        &self,
        entry: &ChangelogEntry,
        config: &ChangelogConfig,
        used_ids: &mut HashSet<String>,
    ) -> String {
        let mut output = String::from("<section class=\"changelog-entry\"");

        if config.heading_ids {
            let id = unique_id(&entry.version, used_ids);
            output.push_str(&format!(" id=\"{}\"", encode_double_quoted_attribute(&id)));
        }
        output.push_str(&format!(
            " data-version=\"{}\">\n",
            encode_double_quoted_attribute(&entry.version)
        ));

        let level = entry.level.clamp(1, 6);
        output.push_str(&format!(
            "<h{} class=\"changelog-version\">{}",
            level,
            encode_text(&entry.version)
        ));
        if let Some(date) = entry.date {
            let date = date.format("%Y-%m-%d");
            output.push_str(&format!(" <time datetime=\"{0}\">{0}</time>", date));
        }
        if entry.yanked {
            output.push_str(" <span class=\"changelog-yanked\">YANKED</span>");
        }
        output.push_str(&format!("</h{}>\n", level));

        output.push_str(&render_markdown(&entry.body));
        output.push_str("</section>\n");
        output
    }
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogFormatter for HtmlFormatter {
    #[instrument(skip(self, changelog, config), fields(entry_count = changelog.entries.len()))]
    fn format(&self, changelog: &Changelog, config: &ChangelogConfig) -> String {
        let mut output = String::new();

        if self.wrap {
            output.push_str("<div class=\"changelog\">\n");
        }

        output.push_str(&render_markdown(&changelog.preamble));

        if let Some(unreleased) = &changelog.unreleased {
            let level = changelog.entries.first().map_or(2, |e| e.level.clamp(1, 6));
            output.push_str("<section class=\"changelog-unreleased\">\n");
            output.push_str(&format!("<h{0}>Unreleased</h{0}>\n", level));
            output.push_str(&render_markdown(unreleased));
            output.push_str("</section>\n");
        }

        let mut used_ids = HashSet::new();
        for entry in &changelog.entries {
            output.push_str(&self.format_entry(entry, config, &mut used_ids));
        }

        if self.wrap {
            output.push_str("</div>\n");
        }

        debug!(output_len = output.len(), "html changelog formatted");
        output
    }

    fn extension(&self) -> &'static str {
        "html"
    }
}

/// Render the escaped source text when the document could not be parsed
pub fn render_raw(text: &str) -> String {
    format!("<pre class=\"changelog-raw\">{}</pre>\n", encode_text(text))
}

/// Render Markdown lines to HTML with raw HTML escaped
pub fn render_markdown(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let text = lines.join("\n");
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS;
    let events = Parser::new_ext(&text, options).map(sanitize);

    let mut output = String::new();
    html::push_html(&mut output, events);
    output
}

fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        other => other,
    }
}

fn is_script_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("javascript:")
        || lower.starts_with("vbscript:")
        || lower.starts_with("data:text/html")
}

/// `v` followed by the version with separators turned into dashes, deduplicated
fn unique_id(version: &str, used: &mut HashSet<String>) -> String {
    let base: String = std::iter::once('v')
        .chain(version.chars().map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '-'
            }
        }))
        .collect();

    let mut id = base.clone();
    let mut n = 2;
    while used.contains(&id) {
        id = format!("{}-{}", base, n);
        n += 1;
    }
    used.insert(id.clone());
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    const SAMPLE: &str = "\
# Version history

## [Unreleased]

- Upcoming

## [2.1.0] - 2024-03-01

### Added

- Rent comparison endpoint

## [2.0.0] - 2024-01-15 [YANKED]

- Dropped *legacy* API

## 1.9.3

- Fixed rounding
";

    fn render(text: &str) -> String {
        HtmlFormatter::new().format(&parse(text), &ChangelogConfig::default())
    }

    #[test]
    fn test_one_section_per_version() {
        let output = render(SAMPLE);

        assert_eq!(output.matches("class=\"changelog-entry\"").count(), 3);
        for version in ["2.1.0", "2.0.0", "1.9.3"] {
            assert_eq!(
                output.matches(&format!("data-version=\"{}\"", version)).count(),
                1
            );
        }
    }

    #[test]
    fn test_first_section_is_latest() {
        let output = render(SAMPLE);
        let first = output.find("class=\"changelog-entry\"").unwrap();
        assert!(output[first..].contains("data-version=\"2.1.0\""));
        assert!(output.contains(
            "<h2 class=\"changelog-version\">2.1.0 <time datetime=\"2024-03-01\">2024-03-01</time></h2>"
        ));
    }

    #[test]
    fn test_body_markdown_rendered() {
        let output = render(SAMPLE);
        assert!(output.contains("<h1>Version history</h1>"));
        assert!(output.contains("<h3>Added</h3>"));
        assert!(output.contains("<li>Rent comparison endpoint</li>"));
        assert!(output.contains("<em>legacy</em>"));
    }

    #[test]
    fn test_unreleased_and_yanked() {
        let output = render(SAMPLE);
        assert!(output.contains("<section class=\"changelog-unreleased\">\n<h2>Unreleased</h2>"));
        assert!(output.contains("<span class=\"changelog-yanked\">YANKED</span>"));
    }

    #[test]
    fn test_heading_level_preserved() {
        let output = render("### 1.0.0\n\n- init\n");
        assert!(output.contains("<h3 class=\"changelog-version\">1.0.0</h3>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let output = render("## 1.0.0\n\n<script>alert(1)</script>\n\n- a <b>bold</b> claim\n");
        assert!(!output.contains("<script>"));
        assert!(!output.contains("<b>"));
        assert!(output.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_script_links_neutralized() {
        let output = render("## 1.0.0\n\n- [click](javascript:alert(1))\n- [docs](https://example.com)\n");
        assert!(!output.contains("javascript:"));
        assert!(output.contains("href=\"#\""));
        assert!(output.contains("href=\"https://example.com\""));
    }

    #[test]
    fn test_ids() {
        let output = render("## 1.0.0\n\n## 1.0.0+build.1\n\n## 1.0.0\n");
        assert!(output.contains("id=\"v1-0-0\""));
        assert!(output.contains("id=\"v1-0-0-build-1\""));
        assert!(output.contains("id=\"v1-0-0-2\""));

        let config = ChangelogConfig {
            heading_ids: false,
            ..Default::default()
        };
        let output = HtmlFormatter::new().format(&parse("## 1.0.0\n"), &config);
        assert!(!output.contains("id="));
    }

    #[test]
    fn test_without_wrapper() {
        let output = HtmlFormatter::new()
            .without_wrapper()
            .format(&parse("## 1.0.0\n"), &ChangelogConfig::default());
        assert!(output.starts_with("<section"));
        assert!(!output.contains("<div"));
    }

    #[test]
    fn test_render_raw() {
        assert_eq!(
            render_raw("no <versions> & stuff"),
            "<pre class=\"changelog-raw\">no &lt;versions&gt; &amp; stuff</pre>\n"
        );
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(render(SAMPLE), render(SAMPLE));
    }
}
