use std::fmt;
use tonic::Status;

use super::{CallContext, CallCredentials, CallMetadata};

/// Call credentials that attach a fixed header to every call
///
/// Covers API keys and pre-formatted authorization values (Basic auth,
/// custom schemes). The value is redacted in `Debug`.
#[derive(Clone)]
pub struct StaticMetadataCredentials {
    key: String,
    value: String,
}

impl StaticMetadataCredentials {
    /// Send `value` as-is in the given header
    ///
    /// # Example
    /// ```ignore
    /// let key = StaticMetadataCredentials::api_key("x-api-key", "my-api-key-12345");
    /// ```
    pub fn api_key(header: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: header.into().to_ascii_lowercase(),
            value: value.into(),
        }
    }

    /// Send a custom `authorization` value
    ///
    /// # Example
    /// ```ignore
    /// let basic = StaticMetadataCredentials::authorization("Basic dXNlcjpwYXNz");
    /// ```
    pub fn authorization(value: impl Into<String>) -> Self {
        Self::api_key("authorization", value)
    }

    pub fn header(&self) -> &str {
        &self.key
    }
}

impl CallCredentials for StaticMetadataCredentials {
    fn metadata(&self, _context: &CallContext<'_>) -> Result<CallMetadata, Status> {
        Ok(CallMetadata::new().with(self.key.clone(), self.value.clone()))
    }
}

impl fmt::Debug for StaticMetadataCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticMetadataCredentials")
            .field("header", &self.key)
            .field("value", &"<redacted>")
            .finish()
    }
}
