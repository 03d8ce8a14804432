use std::fmt;
use std::sync::Arc;
use tonic::Status;

use super::{CallContext, CallCredentials, CallMetadata, ChannelCredentials, TlsCredentials};

/// Bearer-token call credentials (OAuth 2.0 / API token)
///
/// Adds `authorization: Bearer <token>` to every outgoing call. The token is
/// never printed by `Debug` and never passed to a log event.
///
/// # Example
/// ```ignore
/// use grpc_client::TokenCredentials;
///
/// let token = TokenCredentials::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...");
/// ```
#[derive(Clone)]
pub struct TokenCredentials {
    token: Arc<str>,
}

impl TokenCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        let token: String = token.into();
        if token.is_empty() {
            tracing::warn!(
                target: "grpc_client",
                "Bearer token is empty; the server will reject authenticated calls"
            );
        }
        Self {
            token: Arc::from(token),
        }
    }

    /// Header value sent on the wire
    fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl CallCredentials for TokenCredentials {
    fn metadata(&self, _context: &CallContext<'_>) -> Result<CallMetadata, Status> {
        Ok(CallMetadata::new().with("authorization", self.header_value()))
    }
}

impl fmt::Debug for TokenCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCredentials")
            .field("token", &"<redacted>")
            .finish()
    }
}

/// TLS transport credentials with a bearer token layered on top
///
/// # Example
/// ```ignore
/// use gpcore_sdk::{GPortalClient, create_token_credentials};
///
/// let client = GPortalClient::new(
///     "api.gportal.com:443",
///     Some(create_token_credentials(std::env::var("GPCORE_API_TOKEN")?)),
///     None,
/// )?;
/// ```
pub fn create_token_credentials(token: impl Into<String>) -> ChannelCredentials {
    ChannelCredentials::composite(TlsCredentials::system(), TokenCredentials::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> CallContext<'static> {
        CallContext::new(
            "api.gportal.com:443",
            Some("gpcore.api.auth.v1.AuthService"),
            Some("GetUser"),
        )
    }

    #[test]
    fn test_bearer_token() {
        let token = TokenCredentials::new("test-token");
        let metadata = token.metadata(&context()).unwrap();
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get("authorization"), Some("Bearer test-token"));
    }

    #[test]
    fn test_token_is_not_mutated_between_calls() {
        let token = TokenCredentials::new("abc123");
        let first = token.metadata(&context()).unwrap();
        let second = token.metadata(&context()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_debug_redacts_token() {
        let token = TokenCredentials::new("super-secret-value");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret-value"));
        assert!(debug.contains("redacted"));

        let credentials = create_token_credentials("super-secret-value");
        assert!(!format!("{credentials:?}").contains("super-secret-value"));
    }

    #[test]
    fn test_create_token_credentials_uses_tls() {
        let credentials = create_token_credentials("abc123");
        assert!(credentials.has_call_credentials());
        assert!(!credentials.tls().has_custom_ca());
    }

    #[test]
    fn test_empty_token_is_accepted() {
        let token = TokenCredentials::new("");
        let metadata = token.metadata(&context()).unwrap();
        assert_eq!(metadata.get("authorization"), Some("Bearer "));
    }
}
