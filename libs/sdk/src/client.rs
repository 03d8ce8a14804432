use core_config::FromEnv;
use grpc_client::channel::{configure_endpoint, endpoint_authority, resolve_endpoint};
use grpc_client::{
    CallCredentialsInterceptor, ChannelCredentials, ChannelOptions, GrpcResult, SharedChannel,
    create_channel, create_channel_lazy,
};
use std::fmt;
use tonic::body::Body;
use tonic::service::interceptor::InterceptedService;
use tower::BoxError;

use crate::config::ClientConfig;
use crate::error::SdkResult;
use crate::stubs::{
    AdminClient, AuthClient, CloudClient, GatewayClient, MetadataClient, NetworkClient,
    PaymentClient, configure_stub,
};

/// Client for the GPortal GPCore API
///
/// Owns one secure channel and one stub per service, all multiplexed over
/// that channel. Stubs are plain tonic clients: clone one to issue calls
/// (`client.cloud.clone().readiness_check(..)`), clones share the channel.
///
/// The channel is released by [`GPortalClient::close`], at the end of
/// [`GPortalClient::scope`], or when the client is dropped, whichever comes
/// first. Calls made after that fail with `Code::Unavailable`.
///
/// # Example
/// ```ignore
/// use gpcore_sdk::{GPortalClient, create_token_credentials};
/// use gpcore_sdk::api::cloud::v2::ReadinessCheckRequest;
///
/// let client = GPortalClient::new(
///     "api.gportal.com:443",
///     Some(create_token_credentials("my-token")),
///     None,
/// )?;
///
/// let response = client
///     .cloud
///     .clone()
///     .readiness_check(ReadinessCheckRequest {})
///     .await?;
/// println!("API version {}", response.into_inner().version);
///
/// client.close()?;
/// ```
pub struct GPortalClient {
    pub auth: AuthClient,
    pub cloud: CloudClient,
    pub payment: PaymentClient,
    pub metadata: MetadataClient,
    pub admin: AdminClient,
    pub network: NetworkClient,
    pub gateway: GatewayClient,
    endpoint: String,
    credentials: ChannelCredentials,
    options: ChannelOptions,
    channel: SharedChannel,
}

impl GPortalClient {
    /// Create a client over a lazily connected secure channel
    ///
    /// `None` credentials means TLS only; `None` options means the default
    /// keepalive table. Supplied options replace the defaults entirely.
    /// Outside a tokio runtime this returns `GrpcError::NoRuntime`.
    pub fn new(
        endpoint: impl Into<String>,
        credentials: Option<ChannelCredentials>,
        options: Option<ChannelOptions>,
    ) -> GrpcResult<Self> {
        let endpoint = endpoint.into();
        let credentials = credentials.unwrap_or_default();
        let options = options.unwrap_or_default();

        let channel = create_channel_lazy(&endpoint, &credentials, &options)?;
        Self::bind(endpoint, SharedChannel::from(channel), credentials, options)
    }

    /// Create a client and wait for the connection to be established
    ///
    /// Unlike [`GPortalClient::new`], connection and TLS failures surface
    /// here as `GrpcError::ConnectionFailed`.
    pub async fn connect(
        endpoint: impl Into<String>,
        credentials: Option<ChannelCredentials>,
        options: Option<ChannelOptions>,
    ) -> GrpcResult<Self> {
        let endpoint = endpoint.into();
        let credentials = credentials.unwrap_or_default();
        let options = options.unwrap_or_default();

        let channel = create_channel(&endpoint, &credentials, &options).await?;
        Self::bind(endpoint, SharedChannel::from(channel), credentials, options)
    }

    /// Create a client over a caller-supplied transport
    ///
    /// The endpoint, TLS material and options are still validated so the
    /// client behaves exactly as one built by [`GPortalClient::new`]; only
    /// the network connection is replaced.
    ///
    /// ## Example
    /// ```ignore
    /// let transport = InMemoryTransport::new(Routes::new(CloudServiceServer::new(MockCloud)));
    /// let client = GPortalClient::with_transport("localhost:50051", transport, None, None)?;
    /// ```
    pub fn with_transport<S>(
        endpoint: impl Into<String>,
        transport: S,
        credentials: Option<ChannelCredentials>,
        options: Option<ChannelOptions>,
    ) -> GrpcResult<Self>
    where
        S: tower::Service<http::Request<Body>, Response = http::Response<Body>>
            + Clone
            + Send
            + 'static,
        S::Future: Send + 'static,
        S::Error: Into<BoxError>,
    {
        let endpoint = endpoint.into();
        let credentials = credentials.unwrap_or_default();
        let options = options.unwrap_or_default();

        configure_endpoint(&endpoint, &credentials, &options)?;
        Self::bind(endpoint, SharedChannel::new(transport), credentials, options)
    }

    /// Create a client from `GPCORE_*` environment variables
    pub fn from_env() -> SdkResult<Self> {
        let config = ClientConfig::from_env()?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &ClientConfig) -> SdkResult<Self> {
        let client = Self::new(
            config.endpoint.clone(),
            Some(config.credentials()),
            Some(config.channel_options()),
        )?;
        Ok(client)
    }

    fn bind(
        endpoint: String,
        channel: SharedChannel,
        credentials: ChannelCredentials,
        options: ChannelOptions,
    ) -> GrpcResult<Self> {
        let stub_config = options.resolve()?.stub_config();
        let authority = endpoint_authority(&resolve_endpoint(&endpoint)?);
        let interceptor =
            CallCredentialsInterceptor::new(authority, credentials.call_credentials().cloned());
        let transport = InterceptedService::new(channel.clone(), interceptor);

        tracing::debug!(
            target: "gpcore_sdk",
            endpoint = %endpoint,
            options = options.len(),
            call_credentials = credentials.has_call_credentials(),
            "GPortal client ready"
        );

        Ok(Self {
            auth: configure_stub(transport.clone(), &stub_config),
            cloud: configure_stub(transport.clone(), &stub_config),
            payment: configure_stub(transport.clone(), &stub_config),
            metadata: configure_stub(transport.clone(), &stub_config),
            admin: configure_stub(transport.clone(), &stub_config),
            network: configure_stub(transport.clone(), &stub_config),
            gateway: configure_stub(transport, &stub_config),
            endpoint,
            credentials,
            options,
            channel,
        })
    }

    /// Endpoint as supplied at construction
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Channel options in effect: the supplied list, or the defaults
    pub fn options(&self) -> &ChannelOptions {
        &self.options
    }

    pub fn credentials(&self) -> &ChannelCredentials {
        &self.credentials
    }

    /// Handle to the channel every stub is bound to
    pub fn channel(&self) -> &SharedChannel {
        &self.channel
    }

    pub fn is_closed(&self) -> bool {
        self.channel.is_closed()
    }

    /// Release the channel
    ///
    /// Calling this on an already closed client returns
    /// `GrpcError::AlreadyClosed`.
    pub fn close(&self) -> GrpcResult<()> {
        self.channel.close()?;
        tracing::debug!(target: "gpcore_sdk", endpoint = %self.endpoint, "GPortal client closed");
        Ok(())
    }

    /// Run `f` with the client, then close it
    ///
    /// The channel is closed exactly once whatever `f` returns; if `f`
    /// panics, `Drop` closes it instead.
    ///
    /// ## Example
    /// ```ignore
    /// let version = client
    ///     .scope(async |client| {
    ///         client.cloud.clone().readiness_check(ReadinessCheckRequest {}).await
    ///     })
    ///     .await??;
    /// ```
    pub async fn scope<F, R>(self, f: F) -> GrpcResult<R>
    where
        F: AsyncFnOnce(&GPortalClient) -> R,
    {
        let output = f(&self).await;
        self.close()?;
        Ok(output)
    }
}

impl Drop for GPortalClient {
    fn drop(&mut self) {
        if !self.channel.is_closed() && self.channel.close().is_ok() {
            tracing::debug!(target: "gpcore_sdk", endpoint = %self.endpoint, "GPortal client dropped");
        }
    }
}

impl fmt::Debug for GPortalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GPortalClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("options", &self.options)
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}
