//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::GateConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a configuration from a TOML file.
///
/// The result is not yet validated; callers overlay CLI flags first and
/// run [`crate::config::validate_config`] on the merged result.
pub fn load_config(path: &Path) -> Result<GateConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GateConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_full_config() {
        let dir = std::env::temp_dir().join("forward-auth-gate-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gate.toml");
        std::fs::write(
            &path,
            r#"
            [listener]
            port = 8080
            listen_ip = "127.0.0.1"

            [trust]
            trusted_proxies = ["10.0.0.1", "10.0.0.2"]

            [authorizer]
            allowed_domains = ["app.example.org", "alt.example.org"]
            resolve_timeout_secs = 3
            "#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.listener.port, Some(8080));
        assert_eq!(config.trust.trusted_proxies.len(), 2);
        assert_eq!(
            config.authorizer.allowed_domains,
            vec!["app.example.org", "alt.example.org"]
        );
        assert_eq!(config.authorizer.resolve_timeout_secs, 3);
    }

    #[test]
    fn test_invalid_proxy_ip_is_a_parse_error() {
        let dir = std::env::temp_dir().join("forward-auth-gate-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[trust]\ntrusted_proxies = [\"not-an-ip\"]\n").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::Parse(_))));
    }
}
