pub mod tracing;

use std::env;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Failed to parse environment variable '{key}': {details}")]
    ParseError { key: String, details: String },
}

/// Runtime environment, selected by `APP_ENV`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development, // Local runs, tests (human-readable logs)
    Production,  // Deployed services (JSON logs)
}

impl Environment {
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        if app_env.eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

/// Trait for configuration that can be loaded from environment variables
pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

/// Helper to load environment variable with a default value
pub fn env_or_default(key: &str, default: &str) -> String {
    env_optional(key).unwrap_or_else(|| default.to_string())
}

/// Helper to load environment variable or return error
pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env_optional(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Helper to load an optional environment variable; empty counts as unset
pub fn env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Helper to parse an environment variable, falling back to `default` when unset
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_optional(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
            key: key.to_string(),
            details: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
            assert_eq!(env.as_str(), "development");
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Production);
            assert_eq!(env.as_str(), "production");
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("GPCORE_TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("GPCORE_TEST_VAR", "default"), "test_value");
        });

        temp_env::with_var_unset("GPCORE_MISSING_VAR", || {
            assert_eq!(env_or_default("GPCORE_MISSING_VAR", "default"), "default");
        });
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        temp_env::with_var("GPCORE_EMPTY_VAR", Some("  "), || {
            assert_eq!(env_optional("GPCORE_EMPTY_VAR"), None);
            assert_eq!(env_or_default("GPCORE_EMPTY_VAR", "fallback"), "fallback");
            assert!(env_required("GPCORE_EMPTY_VAR").is_err());
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("GPCORE_MISSING_REQUIRED", || {
            let err = env_required("GPCORE_MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("GPCORE_MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parse_or() {
        temp_env::with_var("GPCORE_TIMEOUT_MS", Some("2500"), || {
            assert_eq!(env_parse_or("GPCORE_TIMEOUT_MS", 0u64).unwrap(), 2500);
        });

        temp_env::with_var_unset("GPCORE_TIMEOUT_MS", || {
            assert_eq!(env_parse_or("GPCORE_TIMEOUT_MS", 30u64).unwrap(), 30);
        });

        temp_env::with_var("GPCORE_TIMEOUT_MS", Some("soon"), || {
            let err = env_parse_or("GPCORE_TIMEOUT_MS", 0u64).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "GPCORE_TIMEOUT_MS"));
        });
    }
}
