//! Heading recognition
//!
//! Accepts the heading shapes found in hand-written changelogs:
//!
//! ```text
//! ## [1.4.2] - 2024-01-31
//! ## 1.4.2 (2024-01-31)
//! ## v1.4.2
//! ## 1.4.2-2024-01-31
//! # Version 1.4.2 — 2024/01/31
//! ## [1.4.2](https://example.com/compare/v1.4.1...v1.4.2) - 2024-01-31 [YANKED]
//! ## [Unreleased]
//! ```

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// ATX heading: up to three spaces of indent, 1-6 hashes, optional closing hashes
static ATX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(?P<hashes>#{1,6})(?:[ \t]+(?P<text>.*?))?(?:[ \t]+#+)?[ \t]*$")
        .expect("Invalid regex")
});

/// Leading label of a heading: bracketed (optionally linked) or a bare word
static LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i:(?:version|release)[ \t]+)?(?:\[(?P<bracket>[^\]]+)\](?:\([^)]*\))?|(?P<bare>[^\s(]+))(?P<rest>.*)$",
    )
    .expect("Invalid regex")
});

/// Semantic-version-shaped string; the patch component is optional
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\.\d+(?:\.\d+)?(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?$")
        .expect("Invalid regex")
});

/// Version glued to its date by a hyphen, e.g. `1.4.2-2024-01-31`
static GLUED_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<version>.+?)-(?P<date>\d{4}-\d{1,2}-\d{1,2})$").expect("Invalid regex")
});

static DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<y>\d{4})[-/.](?P<m>\d{1,2})[-/.](?P<d>\d{1,2})").expect("Invalid regex")
});

static YANKED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[yanked\]").expect("Invalid regex"));

/// A recognized ATX heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Number of leading hashes
    pub level: u8,
    /// What the heading introduces
    pub kind: HeadingKind,
}

/// Classification of a heading's text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingKind {
    /// Start of a released version
    Version {
        version: String,
        date: Option<NaiveDate>,
        yanked: bool,
    },
    /// Start of the unreleased section
    Unreleased,
    /// Any other heading
    Other,
}

/// Parse a line as an ATX heading
pub fn parse_heading(line: &str) -> Option<Heading> {
    let caps = ATX_REGEX.captures(line)?;
    let level = caps.name("hashes")?.as_str().len() as u8;
    let text = caps.name("text").map(|m| m.as_str().trim()).unwrap_or("");

    Some(Heading {
        level,
        kind: classify(text),
    })
}

fn classify(text: &str) -> HeadingKind {
    let Some(caps) = LABEL_REGEX.captures(text) else {
        return HeadingKind::Other;
    };

    let label = caps
        .name("bracket")
        .or_else(|| caps.name("bare"))
        .map(|m| m.as_str().trim())
        .unwrap_or("");
    let rest = caps.name("rest").map(|m| m.as_str()).unwrap_or("");

    if label.eq_ignore_ascii_case("unreleased") {
        return HeadingKind::Unreleased;
    }

    let candidate = label
        .trim_end_matches([':', ',', ';'])
        .trim_start_matches(['v', 'V']);

    if let Some((version, date)) = split_glued_date(candidate) {
        return HeadingKind::Version {
            version: version.to_string(),
            date: Some(date),
            yanked: YANKED_REGEX.is_match(rest),
        };
    }

    if !VERSION_REGEX.is_match(candidate) {
        return HeadingKind::Other;
    }

    HeadingKind::Version {
        version: candidate.to_string(),
        date: parse_date(rest),
        yanked: YANKED_REGEX.is_match(rest),
    }
}

/// A trailing `-YYYY-MM-DD` is read as the release date, not a prerelease tag
fn split_glued_date(candidate: &str) -> Option<(&str, NaiveDate)> {
    let caps = GLUED_DATE_REGEX.captures(candidate)?;
    let version = caps.name("version")?.as_str();
    if !VERSION_REGEX.is_match(version) {
        return None;
    }
    let date = parse_date(caps.name("date")?.as_str())?;
    Some((version, date))
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let caps = DATE_REGEX.captures(text)?;
    let year = caps.name("y")?.as_str().parse().ok()?;
    let month = caps.name("m")?.as_str().parse().ok()?;
    let day = caps.name("d")?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version_of(line: &str) -> Option<(String, Option<NaiveDate>)> {
        match parse_heading(line)?.kind {
            HeadingKind::Version { version, date, .. } => Some((version, date)),
            _ => None,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_keep_a_changelog_heading() {
        assert_eq!(
            version_of("## [1.4.2] - 2024-01-31"),
            Some(("1.4.2".to_string(), ymd(2024, 1, 31)))
        );
    }

    #[test]
    fn test_parenthesized_date() {
        assert_eq!(
            version_of("## 1.4.2 (2024-01-31)"),
            Some(("1.4.2".to_string(), ymd(2024, 1, 31)))
        );
    }

    #[test]
    fn test_bare_version_with_prefix() {
        assert_eq!(version_of("## v1.4.2"), Some(("1.4.2".to_string(), None)));
        assert_eq!(
            version_of("# Version 2.0 — 2023/12/01"),
            Some(("2.0".to_string(), ymd(2023, 12, 1)))
        );
    }

    #[test]
    fn test_linked_version() {
        assert_eq!(
            version_of("## [1.4.2](https://example.com/compare/v1.4.1...v1.4.2) - 2024-01-31"),
            Some(("1.4.2".to_string(), ymd(2024, 1, 31)))
        );
    }

    #[test]
    fn test_extra_whitespace() {
        assert_eq!(
            version_of("  ##   [1.4.2]   -   2024-01-31  "),
            Some(("1.4.2".to_string(), ymd(2024, 1, 31)))
        );
        assert_eq!(
            version_of("## 1.4.2 ##"),
            Some(("1.4.2".to_string(), None))
        );
    }

    #[test]
    fn test_prerelease_version() {
        assert_eq!(
            version_of("## [2.0.0-rc.1+build.5]"),
            Some(("2.0.0-rc.1+build.5".to_string(), None))
        );
    }

    #[test]
    fn test_invalid_date_ignored() {
        assert_eq!(
            version_of("## 1.0.0 - 2024-13-45"),
            Some(("1.0.0".to_string(), None))
        );
    }

    #[test]
    fn test_date_glued_to_version() {
        assert_eq!(
            version_of("## 1.4.2-2024-01-31"),
            Some(("1.4.2".to_string(), ymd(2024, 1, 31)))
        );
        assert_eq!(
            version_of("## v2.0.0-rc.1-2024-02-03"),
            Some(("2.0.0-rc.1".to_string(), ymd(2024, 2, 3)))
        );
        // not a real date, so it stays part of the prerelease
        assert_eq!(
            version_of("## 1.4.2-2024-13-40"),
            Some(("1.4.2-2024-13-40".to_string(), None))
        );
    }

    #[test]
    fn test_yanked() {
        let heading = parse_heading("## [0.9.0] - 2023-05-01 [YANKED]").unwrap();
        assert!(matches!(heading.kind, HeadingKind::Version { yanked: true, .. }));
    }

    #[test]
    fn test_unreleased() {
        assert_eq!(parse_heading("## [Unreleased]").unwrap().kind, HeadingKind::Unreleased);
        assert_eq!(parse_heading("## unreleased").unwrap().kind, HeadingKind::Unreleased);
    }

    #[test]
    fn test_other_headings() {
        assert_eq!(parse_heading("# Changelog").unwrap().kind, HeadingKind::Other);
        assert_eq!(parse_heading("### Added").unwrap().kind, HeadingKind::Other);
        assert_eq!(parse_heading("## 2024 roadmap").unwrap().kind, HeadingKind::Other);
        assert_eq!(parse_heading("#").unwrap().level, 1);
    }

    #[test]
    fn test_not_headings() {
        assert!(parse_heading("#hashtag").is_none());
        assert!(parse_heading("    ## indented code").is_none());
        assert!(parse_heading("####### seven").is_none());
        assert!(parse_heading("- ## in a list").is_none());
    }

    #[test]
    fn test_level() {
        assert_eq!(parse_heading("### [1.0.0]").unwrap().level, 3);
    }
}
