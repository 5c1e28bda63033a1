//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = parse_file(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Resolve the effective configuration for the server binary.
///
/// File values (when a path is given) are layered under process environment
/// overrides, then the result is validated once more.
pub fn resolve_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(p) => parse_file(p)?,
        None => AppConfig::default(),
    };

    config.apply_env_overrides(|key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "dashboard-frontend-{}-{}.toml",
            name,
            uuid::Uuid::new_v4()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_valid_file() {
        let path = write_temp(
            "valid",
            r#"
            [server]
            bind_address = "127.0.0.1:3100"
            environment = "production"
            "#,
        );
        let config = load_config(&path).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:3100");
        assert!(!config.is_development());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_example_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("dashboard.example.toml");
        let config = load_config(&path).unwrap();
        assert_eq!(config.catalog.entities.len(), 2);
        assert!(config.observability.metrics_enabled);
        let backend = config.catalog.find("backend").unwrap();
        assert_eq!(backend.declared_slsa_level().as_deref(), Some("2"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let path = write_temp("broken", "[server\nbind_address = ");
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_resolve_reports_file_errors() {
        let path = write_temp("resolve-broken", "[backend\nbase_url = ");
        let err = resolve_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        let _ = fs::remove_file(&path);

        let err = resolve_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_validation_error_message_lists_all() {
        let path = write_temp(
            "invalid",
            r#"
            [backend]
            base_url = "not a url"
            proxy_timeout_secs = 0
            "#,
        );
        let err = load_config(&path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Validation failed: "));
        assert!(msg.contains("invalid backend URL 'not a url'"));
        assert!(msg.contains("backend.proxy_timeout_secs must be greater than zero"));
        let _ = fs::remove_file(path);
    }
}
