//! Error types for rentstat

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using RentstatError
pub type Result<T> = std::result::Result<T, RentstatError>;

/// Main error type for rentstat operations
#[derive(Debug, Error)]
pub enum RentstatError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Changelog-related errors
///
/// `FileNotFound` and `Unreadable` both mean the changelog is absent from the
/// caller's point of view; `NoVersionHeading` means the file was read but no
/// version could be located in it.
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Changelog file not found
    #[error("Changelog file not found at {0}")]
    FileNotFound(PathBuf),

    /// Changelog exists but could not be read as text
    #[error("Changelog at {path} could not be read: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No version heading in the document
    #[error("No version heading found in {0}")]
    NoVersionHeading(PathBuf),
}

impl ChangelogError {
    /// Build the error for a failed read of `path`
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path)
        } else {
            Self::Unreadable { path, source: err }
        }
    }

    /// True when the changelog itself is absent or unreadable
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::Unreadable { .. })
    }

    /// True when the file was read but holds no recognizable version heading
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::NoVersionHeading(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_not_found_maps_to_file_not_found() {
        let err = ChangelogError::from_io("CHANGELOG.md", Error::from(ErrorKind::NotFound));
        assert!(matches!(err, ChangelogError::FileNotFound(_)));
        assert!(err.is_missing());
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_other_io_maps_to_unreadable() {
        let err = ChangelogError::from_io(
            "CHANGELOG.md",
            Error::from(ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, ChangelogError::Unreadable { .. }));
        assert!(err.is_missing());
    }

    #[test]
    fn test_no_heading_is_parse_error() {
        let err = ChangelogError::NoVersionHeading(PathBuf::from("CHANGELOG.md"));
        assert!(err.is_parse_error());
        assert!(!err.is_missing());
        assert_eq!(
            err.to_string(),
            "No version heading found in CHANGELOG.md"
        );
    }

    #[test]
    fn test_wraps_into_rentstat_error() {
        let err: RentstatError = ChangelogError::FileNotFound(PathBuf::from("x.md")).into();
        assert_eq!(err.to_string(), "Changelog file not found at x.md");
    }
}
