//! Core types for rentstat

use serde::{Deserialize, Serialize};

/// What the changelog renderer does when the document has no version heading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseFailurePolicy {
    /// Surface the parse error to the caller
    #[default]
    Error,
    /// Render the escaped source text instead
    Raw,
}

impl ParseFailurePolicy {
    /// Returns the string representation of the policy
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Raw => "raw",
        }
    }
}

impl std::fmt::Display for ParseFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ParseFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" | "propagate" => Ok(Self::Error),
            "raw" | "degrade" => Ok(Self::Raw),
            _ => Err(format!("Unknown parse failure policy: {}", s)),
        }
    }
}

/// Deployment dashboard entry for one environment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployTarget {
    /// Dashboard URL
    pub url: Option<String>,
    /// Application name on the dashboard
    pub app: Option<String>,
}

impl DeployTarget {
    /// Create a target with both fields set
    pub fn new(url: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            app: Some(app.into()),
        }
    }

    /// Fill every missing field from `fallback`
    pub fn or(self, fallback: &DeployTarget) -> Self {
        Self {
            url: self.url.or_else(|| fallback.url.clone()),
            app: self.app.or_else(|| fallback.app.clone()),
        }
    }
}

/// Environment metadata shown on the status page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSettings {
    /// Environment name (development, prod, ...)
    pub name: String,
    /// Frontend URL of the application
    pub app_url: Option<String>,
    /// Human-readable application label
    pub app_label: Option<String>,
    /// Resolved deployment dashboard entry
    pub deploy: DeployTarget,
    /// API documentation title
    pub api_title: Option<String>,
    /// API schema version
    pub api_version: Option<String>,
    /// API documentation URL
    pub api_docs_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_from_str() {
        assert_eq!("raw".parse::<ParseFailurePolicy>().unwrap(), ParseFailurePolicy::Raw);
        assert_eq!(
            "ERROR".parse::<ParseFailurePolicy>().unwrap(),
            ParseFailurePolicy::Error
        );
        assert!("ignore".parse::<ParseFailurePolicy>().is_err());
    }

    #[test]
    fn test_deploy_target_fallback() {
        let dev = DeployTarget::new("https://deploy.example.com/", "app-dev");
        let prod = DeployTarget {
            url: None,
            app: Some("app-prod".to_string()),
        };

        let resolved = prod.or(&dev);
        assert_eq!(resolved.url.as_deref(), Some("https://deploy.example.com/"));
        assert_eq!(resolved.app.as_deref(), Some("app-prod"));
    }
}
