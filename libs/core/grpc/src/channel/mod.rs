pub mod options;
pub mod shared;

pub use options::{ChannelOptions, OptionValue, ResolvedOptions};
pub use shared::SharedChannel;

use crate::credentials::ChannelCredentials;
use crate::error::{GrpcError, GrpcResult};
use tonic::transport::{Channel, Endpoint};

/// Production GPCore API endpoint
pub const DEFAULT_ENDPOINT: &str = "api.gportal.com:443";

/// Turn `host:port` or `https://host:port` into a TLS endpoint
///
/// Plaintext `http://` endpoints are rejected: credentials are only ever sent
/// over TLS.
///
/// ## Example
/// ```ignore
/// use grpc_client::channel::resolve_endpoint;
///
/// let endpoint = resolve_endpoint("api.gportal.com:443")?;
/// assert_eq!(endpoint.uri().scheme_str(), Some("https"));
/// ```
pub fn resolve_endpoint(addr: &str) -> GrpcResult<Endpoint> {
  let addr = addr.trim();
  if addr.is_empty() {
    return Err(invalid_endpoint(addr, "endpoint is empty"));
  }

  let uri = match addr.split_once("://") {
    None => format!("https://{addr}"),
    Some(("https", _)) => addr.to_string(),
    Some(("http", _)) => {
      tracing::error!(target: "grpc_client", addr = %addr, "Refusing plaintext endpoint");
      return Err(GrpcError::InsecureEndpoint(addr.to_string()));
    }
    Some((scheme, _)) => {
      return Err(invalid_endpoint(addr, format!("unsupported scheme '{scheme}'")));
    }
  };

  let endpoint = Endpoint::from_shared(uri).map_err(|e| {
    tracing::error!(target: "grpc_client", addr = %addr, error = ?e, "Invalid URI");
    invalid_endpoint(addr, e.to_string())
  })?;

  if endpoint.uri().host().is_none_or(str::is_empty) {
    return Err(invalid_endpoint(addr, "missing host"));
  }
  if !matches!(endpoint.uri().path(), "" | "/") {
    return Err(invalid_endpoint(addr, "endpoint must not contain a path"));
  }

  Ok(endpoint)
}

/// `host:port` of a resolved endpoint
pub fn endpoint_authority(endpoint: &Endpoint) -> String {
  endpoint
    .uri()
    .authority()
    .map(|authority| authority.as_str().to_string())
    .unwrap_or_default()
}

/// Validate options and apply TLS plus transport tuning to an endpoint
///
/// TLS is configured before anything else so call credentials are always
/// layered on an encrypted transport.
pub fn configure_endpoint(
  addr: &str,
  credentials: &ChannelCredentials,
  options: &ChannelOptions,
) -> GrpcResult<Endpoint> {
  let resolved = options.resolve()?;
  let endpoint = resolve_endpoint(addr)?;

  let tls = credentials
    .tls()
    .to_client_tls_config(resolved.tls_domain_override.as_deref());
  let endpoint = endpoint.tls_config(tls).map_err(|e| {
    tracing::error!(target: "grpc_client", addr = %addr, error = ?e, "Invalid TLS configuration");
    GrpcError::TlsConfig(e)
  })?;

  resolved.apply_to_endpoint(endpoint)
}

/// Creates a lazy secure channel that connects on first request
///
/// Returns immediately without establishing a connection; the TLS handshake
/// happens when the first RPC is invoked. Outside a tokio runtime this
/// returns `GrpcError::NoRuntime`.
///
/// ## Example
/// ```ignore
/// use grpc_client::{ChannelCredentials, ChannelOptions, create_channel_lazy};
/// use protos::gpcore::api::cloud::v2::cloud_service_client::CloudServiceClient;
///
/// // Returns immediately, no connection attempt yet
/// let channel = create_channel_lazy("api.gportal.com:443", &ChannelCredentials::ssl(), &ChannelOptions::default())?;
/// let client = CloudServiceClient::new(channel);
///
/// // Connection is established here on first RPC call
/// let response = client.readiness_check(request).await?;
/// ```
pub fn create_channel_lazy(
  addr: &str,
  credentials: &ChannelCredentials,
  options: &ChannelOptions,
) -> GrpcResult<Channel> {
  let endpoint = configure_endpoint(addr, credentials, options)?;

  // connect_lazy spawns the connection task on the current runtime
  if tokio::runtime::Handle::try_current().is_err() {
    tracing::error!(target: "grpc_client", addr = %addr, "No tokio runtime for lazy channel");
    return Err(GrpcError::NoRuntime);
  }

  tracing::debug!(
    target: "grpc_client",
    addr = %addr,
    options = options.len(),
    call_credentials = credentials.has_call_credentials(),
    "Creating lazy gRPC channel (connects on first request)"
  );

  Ok(endpoint.connect_lazy())
}

/// Creates a secure channel and waits for the connection to be established
///
/// ## Example
/// ```ignore
/// use grpc_client::{ChannelCredentials, ChannelOptions, create_channel};
///
/// let channel = create_channel("api.gportal.com:443", &ChannelCredentials::ssl(), &ChannelOptions::default()).await?;
/// ```
pub async fn create_channel(
  addr: &str,
  credentials: &ChannelCredentials,
  options: &ChannelOptions,
) -> GrpcResult<Channel> {
  let endpoint = configure_endpoint(addr, credentials, options)?;

  tracing::debug!(
    target: "grpc_client",
    addr = %addr,
    options = options.len(),
    call_credentials = credentials.has_call_credentials(),
    "Creating gRPC channel"
  );

  endpoint.connect().await.map_err(|e| {
    tracing::error!(
      target: "grpc_client",
      addr = %addr,
      error = ?e,
      "Failed to connect to gRPC service"
    );
    GrpcError::ConnectionFailed(e)
  })
}

fn invalid_endpoint(addr: &str, reason: impl Into<String>) -> GrpcError {
  GrpcError::InvalidEndpoint {
    endpoint: addr.to_string(),
    reason: reason.into(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::credentials::{TlsCredentials, create_token_credentials};
  use crate::channel::options::names;

  #[test]
  fn test_host_port_becomes_https() {
    let endpoint = resolve_endpoint(DEFAULT_ENDPOINT).unwrap();
    assert_eq!(endpoint.uri().scheme_str(), Some("https"));
    assert_eq!(endpoint_authority(&endpoint), "api.gportal.com:443");
  }

  #[test]
  fn test_https_accepted() {
    let endpoint = resolve_endpoint("https://localhost:50051").unwrap();
    assert_eq!(endpoint_authority(&endpoint), "localhost:50051");
  }

  #[test]
  fn test_plaintext_rejected() {
    let result = resolve_endpoint("http://[::1]:50051");
    assert!(matches!(result, Err(GrpcError::InsecureEndpoint(_))));
  }

  #[test]
  fn test_invalid_endpoints() {
    for addr in ["", "   ", "not a valid uri", "unix:///tmp/sock", "localhost:443/api"] {
      let result = resolve_endpoint(addr);
      assert!(
        matches!(result, Err(GrpcError::InvalidEndpoint { .. })),
        "expected rejection for {addr:?}"
      );
    }
  }

  #[tokio::test]
  async fn test_lazy_channel_does_not_connect() {
    // Nothing listens here; a lazy channel must still be created
    let result = create_channel_lazy(
      "localhost:9",
      &create_token_credentials("abc123"),
      &ChannelOptions::default(),
    );
    assert!(result.is_ok());
  }

  #[test]
  fn test_lazy_channel_without_runtime() {
    let result = create_channel_lazy(DEFAULT_ENDPOINT, &ChannelCredentials::ssl(), &ChannelOptions::default());
    assert!(matches!(result, Err(GrpcError::NoRuntime)));
  }

  #[tokio::test]
  async fn test_lazy_channel_rejects_bad_options() {
    let options = ChannelOptions::empty().with("retries", 1);
    let result = create_channel_lazy(DEFAULT_ENDPOINT, &ChannelCredentials::ssl(), &options);
    assert!(matches!(result, Err(GrpcError::UnsupportedOption(_))));

    let options = ChannelOptions::empty().with(names::KEEPALIVE_TIME_MS, "30s");
    let result = create_channel_lazy(DEFAULT_ENDPOINT, &ChannelCredentials::ssl(), &options);
    assert!(matches!(result, Err(GrpcError::InvalidOption { .. })));
  }

  #[tokio::test]
  async fn test_lazy_channel_keeps_unknown_grpc_options() {
    let options = ChannelOptions::default().with("grpc.max_reconnect_backoff_ms", 5_000);
    let result = create_channel_lazy(DEFAULT_ENDPOINT, &ChannelCredentials::ssl(), &options);
    assert!(result.is_ok());
  }

  #[test]
  fn test_configure_endpoint_with_overrides() {
    let credentials = ChannelCredentials::from_tls(TlsCredentials::system().with_domain_name("gportal.internal"));
    let options = ChannelOptions::default()
      .with(names::SSL_TARGET_NAME_OVERRIDE, "api.gportal.com")
      .with(names::LOOKAHEAD_BYTES, 1024 * 1024)
      .with_user_agent("gpcore-tests/1.0");

    assert!(configure_endpoint("10.0.0.1:443", &credentials, &options).is_ok());
  }

  #[tokio::test]
  async fn test_connection_failed() {
    // Try to connect to a port that's definitely not listening
    let result = create_channel("127.0.0.1:9", &ChannelCredentials::ssl(), &ChannelOptions::default()).await;
    assert!(matches!(result, Err(GrpcError::ConnectionFailed(_))));
  }
}
