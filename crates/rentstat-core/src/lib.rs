//! Rentstat Core - Shared foundation for the rentstat status page
//!
//! This crate provides the error taxonomy, configuration loading and the
//! environment types used by the changelog aggregator and the CLI.

pub mod config;
pub mod error;
pub mod types;

pub use error::{ChangelogError, ConfigError, RentstatError, Result};
pub use types::{DeployTarget, EnvironmentSettings, ParseFailurePolicy};
