use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse_or};
use grpc_client::{ChannelCredentials, ChannelOptions, DEFAULT_ENDPOINT, create_token_credentials};
use std::fmt;
use std::time::Duration;

/// Client settings loaded from the environment
///
/// Environment variables:
/// - `GPCORE_ENDPOINT`: `host:port` of the API (default: `api.gportal.com:443`)
/// - `GPCORE_API_TOKEN`: bearer token; unset means unauthenticated calls
/// - `GPCORE_KEEPALIVE_TIME_MS`: keepalive ping interval (default: 30000)
/// - `GPCORE_USER_AGENT`: prepended to the gRPC user agent
#[derive(Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_token: Option<String>,
    pub keepalive_time: Duration,
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
            keepalive_time: Duration::from_secs(30),
            user_agent: None,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// TLS credentials, with the bearer token layered on top when one is set
    pub fn credentials(&self) -> ChannelCredentials {
        match &self.api_token {
            Some(token) => create_token_credentials(token.clone()),
            None => ChannelCredentials::ssl(),
        }
    }

    /// Default channel options adjusted by the configured overrides
    pub fn channel_options(&self) -> ChannelOptions {
        let options = ChannelOptions::default().with_keepalive_time(self.keepalive_time);
        match &self.user_agent {
            Some(user_agent) => options.with_user_agent(user_agent.clone()),
            None => options,
        }
    }
}

impl FromEnv for ClientConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let keepalive_ms = env_parse_or("GPCORE_KEEPALIVE_TIME_MS", 30_000u64)?;

        Ok(Self {
            endpoint: env_or_default("GPCORE_ENDPOINT", DEFAULT_ENDPOINT),
            api_token: env_optional("GPCORE_API_TOKEN"),
            keepalive_time: Duration::from_millis(keepalive_ms),
            user_agent: env_optional("GPCORE_USER_AGENT"),
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("keepalive_time", &self.keepalive_time)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grpc_client::channel::options::names;
    use grpc_client::OptionValue;

    const VARS: [&str; 4] = [
        "GPCORE_ENDPOINT",
        "GPCORE_API_TOKEN",
        "GPCORE_KEEPALIVE_TIME_MS",
        "GPCORE_USER_AGENT",
    ];

    #[test]
    fn test_defaults_when_unset() {
        temp_env::with_vars_unset(VARS, || {
            let config = ClientConfig::from_env().unwrap();
            assert_eq!(config.endpoint, "api.gportal.com:443");
            assert!(config.api_token.is_none());
            assert!(!config.credentials().has_call_credentials());
            assert_eq!(config.channel_options(), ChannelOptions::default());
        });
    }

    #[test]
    fn test_values_from_env() {
        temp_env::with_vars(
            [
                ("GPCORE_ENDPOINT", Some("localhost:50051")),
                ("GPCORE_API_TOKEN", Some("abc123")),
                ("GPCORE_KEEPALIVE_TIME_MS", Some("60000")),
                ("GPCORE_USER_AGENT", Some("gpcore-cli/0.1")),
            ],
            || {
                let config = ClientConfig::from_env().unwrap();
                assert_eq!(config.endpoint, "localhost:50051");
                assert_eq!(config.api_token.as_deref(), Some("abc123"));
                assert!(config.credentials().has_call_credentials());

                let options = config.channel_options();
                assert_eq!(options.get(names::KEEPALIVE_TIME_MS), Some(&OptionValue::Int(60_000)));
                assert_eq!(
                    options.get(names::PRIMARY_USER_AGENT),
                    Some(&OptionValue::Str("gpcore-cli/0.1".to_string()))
                );
            },
        );
    }

    #[test]
    fn test_invalid_keepalive_rejected() {
        temp_env::with_var("GPCORE_KEEPALIVE_TIME_MS", Some("soon"), || {
            let err = ClientConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("GPCORE_KEEPALIVE_TIME_MS"));
        });
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("localhost:50051").with_api_token("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }
}
