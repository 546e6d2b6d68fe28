//! Exit codes for the CLI

use rentstat_core::{ChangelogError, ConfigError, RentstatError};

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Changelog missing, unreadable or without a version heading
pub const CHANGELOG_ERROR: u8 = 6;

/// Map an error to the exit code reported for it
pub fn for_error(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
        if cause.is::<ChangelogError>() {
            return CHANGELOG_ERROR;
        }
        if let Some(inner) = cause.downcast_ref::<RentstatError>() {
            return match inner {
                RentstatError::Config(_) => CONFIG_ERROR,
                RentstatError::Changelog(_) => CHANGELOG_ERROR,
                RentstatError::Io(_) => ERROR,
            };
        }
    }
    ERROR
}
