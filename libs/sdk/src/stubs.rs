use grpc_client::{CallCredentialsInterceptor, SharedChannel, StubConfig};
use protos::gpcore::api;
use tonic::codec::CompressionEncoding;
use tonic::service::interceptor::InterceptedService;

/// Transport every stub is bound to: the shared channel behind the call
/// credentials interceptor
pub type Transport = InterceptedService<SharedChannel, CallCredentialsInterceptor>;

pub type AuthClient = api::auth::v1::auth_service_client::AuthServiceClient<Transport>;
pub type CloudClient = api::cloud::v2::cloud_service_client::CloudServiceClient<Transport>;
pub type PaymentClient = api::payment::v1::payment_service_client::PaymentServiceClient<Transport>;
pub type MetadataClient =
    api::metadata::v1::metadata_service_client::MetadataServiceClient<Transport>;
pub type AdminClient = api::admin::v1::admin_service_client::AdminServiceClient<Transport>;
pub type NetworkClient = api::network::v1::network_service_client::NetworkServiceClient<Transport>;
pub type GatewayClient = api::gateway::v1::gateway_service_client::GatewayServiceClient<Transport>;

/// Trait for configurable gRPC stubs
///
/// Every tonic-generated client has these builder methods, but as inherent
/// methods. This trait names them so message limits and compression can be
/// applied uniformly to each stub.
pub trait ConfigurableClient: Sized {
    /// Bind a new stub to the transport
    fn bind(transport: Transport) -> Self;

    /// Accept compressed responses
    fn accept_compressed(self, encoding: CompressionEncoding) -> Self;

    /// Send compressed requests
    fn send_compressed(self, encoding: CompressionEncoding) -> Self;

    /// Set maximum size for incoming messages
    fn max_decoding_message_size(self, limit: usize) -> Self;

    /// Set maximum size for outgoing messages
    fn max_encoding_message_size(self, limit: usize) -> Self;
}

macro_rules! configurable_client {
    ($($client:ty),+ $(,)?) => {
        $(
            impl ConfigurableClient for $client {
                fn bind(transport: Transport) -> Self {
                    <$client>::new(transport)
                }

                fn accept_compressed(self, encoding: CompressionEncoding) -> Self {
                    <$client>::accept_compressed(self, encoding)
                }

                fn send_compressed(self, encoding: CompressionEncoding) -> Self {
                    <$client>::send_compressed(self, encoding)
                }

                fn max_decoding_message_size(self, limit: usize) -> Self {
                    <$client>::max_decoding_message_size(self, limit)
                }

                fn max_encoding_message_size(self, limit: usize) -> Self {
                    <$client>::max_encoding_message_size(self, limit)
                }
            }
        )+
    };
}

configurable_client!(
    AuthClient,
    CloudClient,
    PaymentClient,
    MetadataClient,
    AdminClient,
    NetworkClient,
    GatewayClient,
);

/// Bind a stub to the transport and apply the per-stub settings
///
/// ## Example
/// ```ignore
/// let config = ChannelOptions::default().resolve()?.stub_config();
/// let cloud: CloudClient = configure_stub(transport.clone(), &config);
/// ```
pub fn configure_stub<C>(transport: Transport, config: &StubConfig) -> C
where
    C: ConfigurableClient,
{
    let client = C::bind(transport)
        .max_decoding_message_size(config.max_decoding_message_size)
        .max_encoding_message_size(config.max_encoding_message_size);

    match config.compression {
        Some(encoding) => client.send_compressed(encoding).accept_compressed(encoding),
        None => client,
    }
}
