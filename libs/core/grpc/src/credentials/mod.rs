//! Transport and per-call credentials
//!
//! A [`ChannelCredentials`] always carries TLS material. Call credentials can
//! only be layered on top of it, so a bearer token never travels over a
//! plaintext connection.

pub mod compose;
pub mod header;
pub mod token;

pub use compose::CompositeCallCredentials;
pub use header::StaticMetadataCredentials;
pub use token::{TokenCredentials, create_token_credentials};

use std::fmt;
use std::sync::Arc;
use tonic::Status;
use tonic::transport::{Certificate, ClientTlsConfig, Identity};

/// Source of per-call authentication metadata
///
/// Called once for every outgoing RPC. Implementations return the metadata
/// to attach, or a `Status` to fail the call before it is sent.
///
/// # Example
/// ```ignore
/// use grpc_client::credentials::{CallContext, CallCredentials, CallMetadata};
///
/// #[derive(Debug)]
/// struct TenantHeader(String);
///
/// impl CallCredentials for TenantHeader {
///     fn metadata(&self, _context: &CallContext<'_>) -> Result<CallMetadata, tonic::Status> {
///         Ok(CallMetadata::new().with("x-tenant", self.0.clone()))
///     }
/// }
/// ```
pub trait CallCredentials: Send + Sync + fmt::Debug {
    fn metadata(&self, context: &CallContext<'_>) -> Result<CallMetadata, Status>;
}

impl<C: CallCredentials + ?Sized> CallCredentials for Arc<C> {
    fn metadata(&self, context: &CallContext<'_>) -> Result<CallMetadata, Status> {
        (**self).metadata(context)
    }
}

/// What a call credential knows about the call it is decorating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext<'a> {
    authority: &'a str,
    service: Option<&'a str>,
    method: Option<&'a str>,
}

impl<'a> CallContext<'a> {
    pub fn new(authority: &'a str, service: Option<&'a str>, method: Option<&'a str>) -> Self {
        Self {
            authority,
            service,
            method,
        }
    }

    /// `host:port` of the channel endpoint
    pub fn authority(&self) -> &'a str {
        self.authority
    }

    /// Fully-qualified service name, e.g. `gpcore.api.auth.v1.AuthService`
    pub fn service(&self) -> Option<&'a str> {
        self.service
    }

    /// Method name, e.g. `GetUser`
    pub fn method(&self) -> Option<&'a str> {
        self.method
    }

    /// `https://{authority}/{service}`, the audience commonly used for JWTs
    pub fn service_url(&self) -> String {
        match self.service {
            Some(service) => format!("https://{}/{}", self.authority, service),
            None => format!("https://{}", self.authority),
        }
    }
}

/// Metadata produced by a call credential
///
/// Keys are unique: inserting an existing key replaces its value. Values are
/// never printed by `Debug` since they usually hold secrets.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CallMetadata {
    entries: Vec<(String, String)>,
}

impl CallMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into().to_ascii_lowercase();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another set of metadata into this one, later values winning
    pub fn merge(&mut self, other: CallMetadata) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }
}

impl fmt::Debug for CallMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallMetadata")
            .field("keys", &self.entries.iter().map(|(k, _)| k).collect::<Vec<_>>())
            .finish()
    }
}

/// TLS material for the channel
///
/// Defaults to the bundled web PKI trust roots with no client identity.
#[derive(Clone, Default)]
pub struct TlsCredentials {
    ca_certificate: Option<Vec<u8>>,
    identity: Option<(Vec<u8>, Vec<u8>)>,
    domain_name: Option<String>,
}

impl TlsCredentials {
    /// Trust the bundled web PKI roots
    pub fn system() -> Self {
        Self::default()
    }

    /// Trust only the given PEM-encoded CA bundle
    pub fn with_ca_certificate(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.ca_certificate = Some(pem.into());
        self
    }

    /// Present a client certificate (mutual TLS)
    pub fn with_identity(mut self, cert_pem: impl Into<Vec<u8>>, key_pem: impl Into<Vec<u8>>) -> Self {
        self.identity = Some((cert_pem.into(), key_pem.into()));
        self
    }

    /// Verify the server certificate against this name instead of the endpoint host
    pub fn with_domain_name(mut self, domain_name: impl Into<String>) -> Self {
        self.domain_name = Some(domain_name.into());
        self
    }

    pub fn domain_name(&self) -> Option<&str> {
        self.domain_name.as_deref()
    }

    pub fn has_custom_ca(&self) -> bool {
        self.ca_certificate.is_some()
    }

    pub fn has_identity(&self) -> bool {
        self.identity.is_some()
    }

    /// Build the tonic TLS config; `domain_override` wins over the configured name
    pub(crate) fn to_client_tls_config(&self, domain_override: Option<&str>) -> ClientTlsConfig {
        let mut config = ClientTlsConfig::new();

        config = match &self.ca_certificate {
            Some(pem) => config.ca_certificate(Certificate::from_pem(pem)),
            None => config.with_enabled_roots(),
        };

        if let Some((cert, key)) = &self.identity {
            config = config.identity(Identity::from_pem(cert, key));
        }

        if let Some(domain) = domain_override.or(self.domain_name.as_deref()) {
            config = config.domain_name(domain);
        }

        config
    }
}

impl fmt::Debug for TlsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsCredentials")
            .field("custom_ca", &self.ca_certificate.is_some())
            .field("identity", &self.identity.is_some())
            .field("domain_name", &self.domain_name)
            .finish()
    }
}

/// Credentials for a secure channel: TLS, optionally with call credentials
///
/// # Example
/// ```ignore
/// use grpc_client::{ChannelCredentials, TlsCredentials, TokenCredentials};
///
/// // TLS only
/// let public = ChannelCredentials::ssl();
///
/// // TLS + bearer token
/// let authed = ChannelCredentials::composite(TlsCredentials::system(), TokenCredentials::new("secret"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ChannelCredentials {
    tls: TlsCredentials,
    call: Option<Arc<dyn CallCredentials>>,
}

impl ChannelCredentials {
    /// Transport-only credentials using the bundled trust roots
    pub fn ssl() -> Self {
        Self::default()
    }

    /// Transport-only credentials with custom TLS material
    pub fn from_tls(tls: TlsCredentials) -> Self {
        Self { tls, call: None }
    }

    /// TLS first, call credentials layered on top
    pub fn composite(tls: TlsCredentials, call: impl CallCredentials + 'static) -> Self {
        Self {
            tls,
            call: Some(Arc::new(call)),
        }
    }

    /// Layer further call credentials; they run after any existing ones
    pub fn with_call_credentials(self, call: impl CallCredentials + 'static) -> Self {
        let call: Arc<dyn CallCredentials> = match self.call {
            Some(existing) => Arc::new(CompositeCallCredentials::new(existing, call)),
            None => Arc::new(call),
        };
        Self {
            tls: self.tls,
            call: Some(call),
        }
    }

    pub fn tls(&self) -> &TlsCredentials {
        &self.tls
    }

    pub fn call_credentials(&self) -> Option<&Arc<dyn CallCredentials>> {
        self.call.as_ref()
    }

    /// Whether calls carry authentication metadata
    pub fn has_call_credentials(&self) -> bool {
        self.call.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_metadata_replaces_existing_key() {
        let metadata = CallMetadata::new()
            .with("Authorization", "Bearer a")
            .with("authorization", "Bearer b");
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get("authorization"), Some("Bearer b"));
    }

    #[test]
    fn test_call_metadata_debug_hides_values() {
        let metadata = CallMetadata::new().with("authorization", "Bearer hunter2");
        let debug = format!("{metadata:?}");
        assert!(debug.contains("authorization"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_call_context_service_url() {
        let context = CallContext::new(
            "api.gportal.com:443",
            Some("gpcore.api.auth.v1.AuthService"),
            Some("GetUser"),
        );
        assert_eq!(
            context.service_url(),
            "https://api.gportal.com:443/gpcore.api.auth.v1.AuthService"
        );
        assert_eq!(context.method(), Some("GetUser"));

        let context = CallContext::new("localhost:50051", None, None);
        assert_eq!(context.service_url(), "https://localhost:50051");
    }

    #[test]
    fn test_ssl_has_no_call_credentials() {
        let credentials = ChannelCredentials::ssl();
        assert!(!credentials.has_call_credentials());
        assert!(!credentials.tls().has_custom_ca());
        assert!(!credentials.tls().has_identity());
    }

    #[test]
    fn test_with_call_credentials_composes() {
        let credentials = create_token_credentials("abc")
            .with_call_credentials(StaticMetadataCredentials::api_key("x-api-key", "k-1"));

        let call = credentials.call_credentials().unwrap();
        let metadata = call
            .metadata(&CallContext::new("localhost:443", None, None))
            .unwrap();
        assert_eq!(metadata.get("authorization"), Some("Bearer abc"));
        assert_eq!(metadata.get("x-api-key"), Some("k-1"));
    }

    #[test]
    fn test_tls_debug_hides_key_material() {
        let tls = TlsCredentials::system()
            .with_identity("-----CERT-----", "-----PRIVATE KEY-----")
            .with_domain_name("api.gportal.com");
        let debug = format!("{tls:?}");
        assert!(!debug.contains("PRIVATE KEY"));
        assert!(debug.contains("api.gportal.com"));
        assert_eq!(tls.domain_name(), Some("api.gportal.com"));
    }
}
