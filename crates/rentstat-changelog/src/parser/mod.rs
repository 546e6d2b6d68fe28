//! Changelog document parsing

mod heading;

pub use heading::{parse_heading, Heading, HeadingKind};

use tracing::{debug, instrument};

use crate::types::{Changelog, ChangelogEntry};

/// Normalize line endings, drop a leading BOM and trailing whitespace on every line
pub fn normalize(text: &str) -> String {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(unified.len());
    for line in unified.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Where the current line belongs
enum Target {
    Preamble,
    Unreleased,
    Entry,
}

/// Opening fence of a fenced code block
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn open(line: &str) -> Option<Self> {
        let trimmed = line.trim_start_matches(' ');
        if line.len() - trimmed.len() > 3 {
            return None;
        }
        let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = trimmed.chars().take_while(|c| *c == marker).count();
        if len < 3 {
            return None;
        }
        if marker == '`' && trimmed[len..].contains('`') {
            return None;
        }
        Some(Self { marker, len })
    }

    fn closes(&self, line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.len() >= self.len && trimmed.chars().all(|c| c == self.marker)
    }
}

/// Parse a changelog document into its preamble, unreleased section and entries.
///
/// The level of the first version heading fixes the entry level. Later version
/// headings at that level or shallower open new entries; deeper headings stay
/// in the current body. Headings inside fenced code blocks are ignored.
#[instrument(skip(text), fields(len = text.len()))]
pub fn parse(text: &str) -> Changelog {
    let normalized = normalize(text);
    let mut changelog = Changelog::default();
    let mut entry_level: Option<u8> = None;
    let mut target = Target::Preamble;
    let mut fence: Option<Fence> = None;

    for line in normalized.lines() {
        if let Some(open) = &fence {
            if open.closes(line) {
                fence = None;
            }
        } else if let Some(open) = Fence::open(line) {
            fence = Some(open);
        } else if let Some(heading) = parse_heading(line) {
            let opens_section = entry_level.map_or(true, |level| heading.level <= level);

            match heading.kind {
                HeadingKind::Version {
                    version,
                    date,
                    yanked,
                } if opens_section => {
                    entry_level.get_or_insert(heading.level);
                    let mut entry = ChangelogEntry::new(version).with_level(heading.level);
                    entry.date = date;
                    entry.yanked = yanked;
                    changelog.entries.push(entry);
                    target = Target::Entry;
                    continue;
                }
                HeadingKind::Unreleased
                    if opens_section
                        && changelog.entries.is_empty()
                        && changelog.unreleased.is_none() =>
                {
                    changelog.unreleased = Some(Vec::new());
                    target = Target::Unreleased;
                    continue;
                }
                _ => {}
            }
        }

        let lines = match target {
            Target::Preamble => &mut changelog.preamble,
            Target::Unreleased => changelog.unreleased.get_or_insert_with(Vec::new),
            Target::Entry => match changelog.entries.last_mut() {
                Some(entry) => &mut entry.body,
                None => &mut changelog.preamble,
            },
        };
        lines.push(line.to_string());
    }

    trim_blank_lines(&mut changelog.preamble);
    if let Some(unreleased) = changelog.unreleased.as_mut() {
        trim_blank_lines(unreleased);
    }
    for entry in &mut changelog.entries {
        trim_blank_lines(&mut entry.body);
    }

    debug!(
        entry_count = changelog.entries.len(),
        has_unreleased = changelog.unreleased.is_some(),
        "changelog parsed"
    );
    changelog
}

/// Drop blank lines at both ends
fn trim_blank_lines(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.is_empty()).count();
    lines.drain(..leading);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
# Version history

We follow Semantic Versions.

## [Unreleased]

- Work in progress

## [2.1.0] - 2024-03-01

### Added

- Rent comparison endpoint

## [2.0.0] - 2024-01-15

- Dropped legacy API

## 1.9.3

- Fixed rounding
";

    #[test]
    fn test_parse_sample() {
        let changelog = parse(SAMPLE);

        assert_eq!(changelog.versions(), vec!["2.1.0", "2.0.0", "1.9.3"]);
        assert_eq!(
            changelog.preamble,
            vec!["# Version history", "", "We follow Semantic Versions."]
        );
        assert_eq!(
            changelog.unreleased,
            Some(vec!["- Work in progress".to_string()])
        );

        let latest = changelog.latest().unwrap();
        assert_eq!(latest.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(latest.level, 2);
        assert_eq!(latest.body, vec!["### Added", "", "- Rent comparison endpoint"]);
        assert_eq!(changelog.entries[2].date, None);
    }

    #[test]
    fn test_parse_empty() {
        let changelog = parse("");
        assert!(changelog.is_empty());
        assert!(changelog.preamble.is_empty());
    }

    #[test]
    fn test_parse_without_versions() {
        let changelog = parse("# Changelog\n\nNothing released yet.\n");
        assert!(changelog.is_empty());
        assert_eq!(changelog.preamble.len(), 3);
    }

    #[test]
    fn test_deeper_version_heading_stays_in_body() {
        let changelog = parse("## 2.0.0\n\n### 1.0.0 compatibility\n\n- note\n\n## 1.0.0\n");
        assert_eq!(changelog.versions(), vec!["2.0.0", "1.0.0"]);
        assert!(changelog.entries[0]
            .body
            .contains(&"### 1.0.0 compatibility".to_string()));
    }

    #[test]
    fn test_shallower_version_heading_opens_entry() {
        let changelog = parse("## 2.0.0\n\n- a\n\n# 1.0.0\n\n- b\n");
        assert_eq!(changelog.versions(), vec!["2.0.0", "1.0.0"]);
        assert_eq!(changelog.entries[1].level, 1);
    }

    #[test]
    fn test_fenced_code_is_not_scanned() {
        let text = "## 1.1.0\n\n```markdown\n## 9.9.9\n```\n\n~~~~\n## 8.8.8\n~~~~\n\n## 1.0.0\n";
        let changelog = parse(text);
        assert_eq!(changelog.versions(), vec!["1.1.0", "1.0.0"]);
        assert!(changelog.entries[0].body.contains(&"## 9.9.9".to_string()));
    }

    #[test]
    fn test_unreleased_after_release_is_body() {
        let changelog = parse("## 1.0.0\n\n## Unreleased\n\n- x\n");
        assert!(changelog.unreleased.is_none());
        assert_eq!(changelog.entries[0].body, vec!["## Unreleased", "", "- x"]);
    }

    #[test]
    fn test_line_ending_tolerance() {
        let canonical = parse(SAMPLE);
        let crlf = parse(&SAMPLE.replace('\n', "\r\n"));
        let cr = parse(&SAMPLE.replace('\n', "\r"));
        let padded = parse(&SAMPLE.replace('\n', "   \t\n"));
        let bom = parse(&format!("\u{feff}{}", SAMPLE));

        assert_eq!(crlf, canonical);
        assert_eq!(cr, canonical);
        assert_eq!(padded, canonical);
        assert_eq!(bom, canonical);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a  \r\nb\rc\t\n"), "a\nb\nc\n");
        assert_eq!(normalize(""), "");
    }
}
