//! Status page assembly
//!
//! The page is composed from independent providers: the changelog version,
//! the rendered changelog, runtime metadata and environment settings. Each
//! provider's result is passed to [`assemble`] as a plain value. Changelog
//! failures are recorded as visible states, never propagated, so the page is
//! always available.

mod template;

pub use template::render_page;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};

use rentstat_changelog::ChangelogAggregator;
use rentstat_core::config::Config;
use rentstat_core::{ChangelogError, EnvironmentSettings};

/// Latest version as shown on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VersionStatus {
    /// Version read from the changelog
    Known { version: String },
    /// Changelog present but without a version heading
    Unknown { reason: String },
    /// Changelog absent or unreadable
    Missing { reason: String },
}

impl VersionStatus {
    /// Classify the outcome of a version lookup
    pub fn from_result(result: Result<String, ChangelogError>) -> Self {
        match result {
            Ok(version) => Self::Known { version },
            Err(e) if e.is_missing() => Self::Missing {
                reason: e.to_string(),
            },
            Err(e) => Self::Unknown {
                reason: e.to_string(),
            },
        }
    }

    /// Value shown in the version badge
    pub fn display(&self) -> &str {
        match self {
            Self::Known { version } => version,
            Self::Unknown { .. } => "unknown",
            Self::Missing { .. } => "n/a",
        }
    }

    /// Failure reason, if the version is not known
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Known { .. } => None,
            Self::Unknown { reason } | Self::Missing { reason } => Some(reason),
        }
    }
}

/// Rendered changelog or the reason it is unavailable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChangelogStatus {
    /// Changelog HTML
    Rendered { html: String },
    /// Changelog could not be rendered
    Unavailable { reason: String },
}

impl ChangelogStatus {
    /// Classify the outcome of a changelog render
    pub fn from_result(result: Result<String, ChangelogError>) -> Self {
        match result {
            Ok(html) => Self::Rendered { html },
            Err(e) => Self::Unavailable {
                reason: e.to_string(),
            },
        }
    }
}

/// Metadata about the running tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInfo {
    /// Version of rentstat
    pub tool_version: String,
    /// Operating system
    pub os: String,
    /// CPU architecture
    pub arch: String,
}

impl RuntimeInfo {
    /// Metadata for the current process
    pub fn current() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

/// Everything shown on the status page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusPage {
    /// Environment name and links
    pub environment: EnvironmentSettings,
    /// Latest changelog version
    pub version: VersionStatus,
    /// Runtime metadata
    pub runtime: RuntimeInfo,
    /// Rendered changelog
    pub changelog: ChangelogStatus,
    /// When the page was assembled
    pub generated_at: DateTime<Utc>,
}

impl StatusPage {
    /// Whether any part of the page is degraded
    pub fn is_degraded(&self) -> bool {
        !matches!(self.version, VersionStatus::Known { .. })
            || matches!(self.changelog, ChangelogStatus::Unavailable { .. })
    }
}

/// Merge the providers' outputs into one page
pub fn assemble(
    version: VersionStatus,
    changelog: ChangelogStatus,
    runtime: RuntimeInfo,
    environment: EnvironmentSettings,
) -> StatusPage {
    StatusPage {
        environment,
        version,
        runtime,
        changelog,
        generated_at: Utc::now(),
    }
}

/// Read the changelog and assemble the page for `config`
#[instrument(skip(config), fields(environment = %config.environment, changelog = %config.changelog.file.display()))]
pub fn collect(config: &Config) -> StatusPage {
    let aggregator = ChangelogAggregator::new(config.changelog.clone());
    let path = config.changelog.file.as_path();

    let version = aggregator.latest_version(path);
    if let Err(e) = &version {
        warn!(error = %e, "changelog version unavailable");
    }

    let changelog = aggregator.changelog_html(path);
    if let Err(e) = &changelog {
        warn!(error = %e, "changelog history unavailable");
    }

    let page = assemble(
        VersionStatus::from_result(version),
        ChangelogStatus::from_result(changelog),
        RuntimeInfo::current(),
        config.environment_settings(),
    );
    info!(
        version = page.version.display(),
        degraded = page.is_degraded(),
        "status page assembled"
    );
    page
}
