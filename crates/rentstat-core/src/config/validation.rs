//! Configuration validation

use tracing::debug;
use url::Url;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_environment(config)?;
    validate_changelog(config)?;
    validate_links(config)?;
    validate_deploy(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn validate_environment(config: &Config) -> Result<()> {
    if config.environment.trim().is_empty() {
        return Err(invalid("environment", "environment cannot be empty").into());
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.file.as_os_str().is_empty() {
        return Err(invalid("changelog.file", "file cannot be empty").into());
    }

    if config.changelog.limit == Some(0) {
        return Err(invalid("changelog.limit", "limit must be greater than zero").into());
    }

    Ok(())
}

/// Absolute URLs must parse; `allow_path` also accepts site-relative paths
fn validate_url(field: &str, value: &str, allow_path: bool) -> Result<()> {
    if allow_path && value.starts_with('/') {
        return Ok(());
    }

    Url::parse(value).map_err(|e| invalid(field, format!("invalid URL '{}': {}", value, e)))?;
    Ok(())
}

fn validate_links(config: &Config) -> Result<()> {
    if let Some(url) = &config.app.url {
        validate_url("app.url", url, false)?;
    }

    if let Some(url) = &config.api.docs_url {
        validate_url("api.docs_url", url, true)?;
    }

    Ok(())
}

fn validate_deploy(config: &Config) -> Result<()> {
    if !config.deploy.targets.is_empty() {
        debug!(count = config.deploy.targets.len(), "validating deploy targets");
    }

    if !config
        .deploy
        .targets
        .contains_key(&config.deploy.default_environment)
    {
        return Err(invalid(
            "deploy.default_environment",
            format!(
                "no target defined for '{}'",
                config.deploy.default_environment
            ),
        )
        .into());
    }

    for (name, target) in &config.deploy.targets {
        if let Some(url) = &target.url {
            validate_url(&format!("deploy.targets.{}.url", name), url, false)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeployTarget;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_environment() {
        let config = Config::default().with_environment("  ");
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_zero_limit() {
        let mut config = Config::default();
        config.changelog.limit = Some(0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_bad_app_url() {
        let mut config = Config::default();
        config.app.url = Some("not a url".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_docs_path_allowed() {
        let mut config = Config::default();
        config.api.docs_url = Some("/api/schema/ui/".to_string());
        assert!(validate_config(&config).is_ok());

        config.api.docs_url = Some("https://api.example.com/docs".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_missing_default_target() {
        let mut config = Config::default();
        config.deploy.default_environment = "staging".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_bad_target_url() {
        let mut config = Config::default();
        config.deploy.targets.insert(
            "prod".to_string(),
            DeployTarget::new("TODO", "rent-checker-prod"),
        );
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("deploy.targets.prod.url"));
    }
}
