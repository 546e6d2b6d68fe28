//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "rentstat.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "rentstat.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".rentstat.yaml";

/// Environment variable selecting the environment name
pub const ENVIRONMENT_VAR: &str = "RENTSTAT_ENVIRONMENT";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".rentstat.toml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# rentstat configuration

environment: development

changelog:
  file: CHANGELOG.md
  # error: fail when no version heading is found; raw: show the escaped file
  on_parse_error: error
  heading_ids: true

app:
  url: http://localhost:8000/
  label: Rent Checker

api:
  title: Rent Checker API
  version: 1.0.0
  docs_url: /api/schema/ui/

deploy:
  default_environment: development
  targets:
    development:
      url: https://deploy.saritasa.rocks/
      app: rent-checker-dev
    prod:
      app: rent-checker-prod
"#;
