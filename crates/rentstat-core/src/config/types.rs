//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::types::{DeployTarget, EnvironmentSettings, ParseFailurePolicy};

/// Main configuration for rentstat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Environment the service runs in
    pub environment: String,

    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Application links
    pub app: AppConfig,

    /// API documentation
    pub api: ApiConfig,

    /// Deployment dashboard configuration
    pub deploy: DeployConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            changelog: ChangelogConfig::default(),
            app: AppConfig::default(),
            api: ApiConfig::default(),
            deploy: DeployConfig::default(),
        }
    }
}

impl Config {
    /// Override the environment name
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Override the changelog path
    pub fn with_changelog_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.changelog.file = file.into();
        self
    }

    /// Resolve the metadata shown on the status page for the configured environment
    pub fn environment_settings(&self) -> EnvironmentSettings {
        EnvironmentSettings {
            name: self.environment.clone(),
            app_url: self.app.url.clone(),
            app_label: self.app.label.clone(),
            deploy: self.deploy.resolve(&self.environment),
            api_title: self.api.title.clone(),
            api_version: self.api.version.clone(),
            api_docs_url: self.api.docs_url.clone(),
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Behavior when the document has no version heading
    pub on_parse_error: ParseFailurePolicy,

    /// Only render the newest N entries
    pub limit: Option<usize>,

    /// Emit `id` attributes on entry sections
    pub heading_ids: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            on_parse_error: ParseFailurePolicy::default(),
            limit: None,
            heading_ids: true,
        }
    }
}

/// Application links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Frontend URL
    pub url: Option<String>,

    /// Application label
    pub label: Option<String>,
}

/// API documentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Title of the API schema
    pub title: Option<String>,

    /// Version of the API schema
    pub version: Option<String>,

    /// Location of the interactive API docs
    pub docs_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            title: None,
            version: None,
            docs_url: Some("/api/schema/ui/".to_string()),
        }
    }
}

/// Deployment dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Environment whose target fills in missing values
    pub default_environment: String,

    /// Dashboard targets keyed by environment name
    pub targets: BTreeMap<String, DeployTarget>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        let mut targets = BTreeMap::new();
        targets.insert(
            "development".to_string(),
            DeployTarget::new("https://deploy.saritasa.rocks/", "rent-checker-dev"),
        );
        targets.insert(
            "prod".to_string(),
            DeployTarget {
                url: None,
                app: Some("rent-checker-prod".to_string()),
            },
        );

        Self {
            default_environment: "development".to_string(),
            targets,
        }
    }
}

impl DeployConfig {
    /// Resolve the dashboard entry for `environment`.
    ///
    /// Unknown environments get the default environment's target; known ones
    /// have their missing fields filled from it.
    pub fn resolve(&self, environment: &str) -> DeployTarget {
        let fallback = self
            .targets
            .get(&self.default_environment)
            .cloned()
            .unwrap_or_default();

        match self.targets.get(environment) {
            Some(target) => target.clone().or(&fallback),
            None => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.environment, "development");
        assert_eq!(config.changelog.file, PathBuf::from("CHANGELOG.md"));
        assert_eq!(config.changelog.on_parse_error, ParseFailurePolicy::Error);
        assert!(config.changelog.heading_ids);
    }

    #[test]
    fn test_resolve_known_environment() {
        let deploy = DeployConfig::default();
        let target = deploy.resolve("development");
        assert_eq!(target.url.as_deref(), Some("https://deploy.saritasa.rocks/"));
        assert_eq!(target.app.as_deref(), Some("rent-checker-dev"));
    }

    #[test]
    fn test_resolve_fills_missing_fields() {
        let deploy = DeployConfig::default();
        let target = deploy.resolve("prod");
        assert_eq!(target.url.as_deref(), Some("https://deploy.saritasa.rocks/"));
        assert_eq!(target.app.as_deref(), Some("rent-checker-prod"));
    }

    #[test]
    fn test_resolve_unknown_environment_uses_default() {
        let deploy = DeployConfig::default();
        let target = deploy.resolve("staging");
        assert_eq!(target.app.as_deref(), Some("rent-checker-dev"));
    }

    #[test]
    fn test_environment_settings() {
        let mut config = Config::default().with_environment("prod");
        config.app.label = Some("Rent Checker".to_string());
        config.api.title = Some("Rent Checker API".to_string());

        let settings = config.environment_settings();
        assert_eq!(settings.name, "prod");
        assert_eq!(settings.app_label.as_deref(), Some("Rent Checker"));
        assert_eq!(settings.deploy.app.as_deref(), Some("rent-checker-prod"));
        assert_eq!(settings.api_docs_url.as_deref(), Some("/api/schema/ui/"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config =
            serde_yaml::from_str("environment: prod\nchangelog:\n  on_parse_error: raw\n").unwrap();
        assert_eq!(config.environment, "prod");
        assert_eq!(config.changelog.on_parse_error, ParseFailurePolicy::Raw);
        assert_eq!(config.changelog.file, PathBuf::from("CHANGELOG.md"));
        assert!(config.deploy.targets.contains_key("development"));
    }
}
