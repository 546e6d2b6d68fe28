//! Changelog types

use chrono::NaiveDate;
use semver::Version;
use serde::{Deserialize, Serialize};

/// A changelog entry for a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Version string as written in the heading
    pub version: String,
    /// Release date, if the heading carries one
    pub date: Option<NaiveDate>,
    /// Heading depth of the version heading (1-6)
    pub level: u8,
    /// Whether the release is marked as yanked
    pub yanked: bool,
    /// Lines between this heading and the next version heading
    pub body: Vec<String>,
}

impl ChangelogEntry {
    /// Create a new changelog entry
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            date: None,
            level: 2,
            yanked: false,
            body: Vec::new(),
        }
    }

    /// Set the date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the heading level
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level.clamp(1, 6);
        self
    }

    /// Add a body line
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.body.push(line.into());
    }

    /// Body joined into a single Markdown string
    pub fn body_text(&self) -> String {
        self.body.join("\n")
    }

    /// Check if entry has any content
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(|l| l.trim().is_empty())
    }

    /// Version as semver, padding two-part versions with a zero patch
    pub fn semver(&self) -> Option<Version> {
        Version::parse(&self.version).ok().or_else(|| {
            let (core, suffix) = match self.version.find(['-', '+']) {
                Some(i) => self.version.split_at(i),
                None => (self.version.as_str(), ""),
            };
            if core.split('.').count() == 2 {
                Version::parse(&format!("{}.0{}", core, suffix)).ok()
            } else {
                None
            }
        })
    }
}

/// A parsed changelog document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changelog {
    /// Lines before the first version heading
    pub preamble: Vec<String>,
    /// Body of the `Unreleased` section, if present
    pub unreleased: Option<Vec<String>>,
    /// Entries in document order
    pub entries: Vec<ChangelogEntry>,
}

impl Changelog {
    /// The first entry in the document
    pub fn latest(&self) -> Option<&ChangelogEntry> {
        self.entries.first()
    }

    /// Find an entry by exact version string, ignoring a leading `v`
    pub fn find(&self, version: &str) -> Option<&ChangelogEntry> {
        let wanted = version.trim_start_matches(['v', 'V']);
        self.entries.iter().find(|e| e.version == wanted)
    }

    /// All version strings in document order
    pub fn versions(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.version.as_str()).collect()
    }

    /// Copy keeping only the first `n` entries
    pub fn limit(&self, n: usize) -> Self {
        Self {
            preamble: self.preamble.clone(),
            unreleased: self.unreleased.clone(),
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }

    /// Check if the document has no version entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adjacent pairs `(newer, older)` where the older entry has the higher version.
    ///
    /// Only checked when every version parses as semver; otherwise empty.
    pub fn out_of_order(&self) -> Vec<(String, String)> {
        let Some(versioned) = self
            .entries
            .iter()
            .map(|e| e.semver().map(|v| (e.version.as_str(), v)))
            .collect::<Option<Vec<(&str, Version)>>>()
        else {
            return Vec::new();
        };

        versioned
            .windows(2)
            .filter(|pair| pair[0].1 < pair[1].1)
            .map(|pair| (pair[0].0.to_string(), pair[1].0.to_string()))
            .collect()
    }
}
