//! # gRPC Client Library
//!
//! Secure gRPC channel creation with TLS transport credentials, per-call
//! credentials (bearer tokens, API keys) and gRPC-core style channel options.
//!
//! ## Features
//!
//! - **Credentials**: TLS with bundled trust roots, custom CA or mTLS, plus
//!   call credentials layered on top as a tonic interceptor
//! - **Channel options**: keepalive, flow control, user agent and message
//!   limits expressed as `grpc.*` option names, validated before connecting
//! - **Shared channel**: one closable transport multiplexed by many stubs
//!
//! ## Quick Start
//!
//! ### Basic Usage
//! ```ignore
//! use grpc_client::{ChannelCredentials, ChannelOptions, SharedChannel, create_channel_lazy};
//! use protos::gpcore::api::cloud::v2::cloud_service_client::CloudServiceClient;
//!
//! let channel = create_channel_lazy("api.gportal.com:443", &ChannelCredentials::ssl(), &ChannelOptions::default())?;
//! let client = CloudServiceClient::new(SharedChannel::from(channel));
//! ```
//!
//! ### With a Bearer Token
//! ```ignore
//! use grpc_client::{ChannelOptions, SharedChannel, create_channel_lazy, create_token_credentials};
//! use grpc_client::interceptors::CallCredentialsInterceptor;
//!
//! let credentials = create_token_credentials("my-token");
//! let channel = SharedChannel::from(create_channel_lazy(addr, &credentials, &ChannelOptions::default())?);
//! let interceptor = CallCredentialsInterceptor::new(addr, credentials.call_credentials().cloned());
//! let client = AuthServiceClient::with_interceptor(channel, interceptor);
//! ```

pub mod channel;
pub mod client;
pub mod credentials;
pub mod error;
pub mod interceptors;

// Re-export main types and functions for convenience
pub use channel::{
    ChannelOptions, DEFAULT_ENDPOINT, OptionValue, ResolvedOptions, SharedChannel,
    create_channel, create_channel_lazy, resolve_endpoint,
};
pub use client::StubConfig;
pub use credentials::{
    CallContext, CallCredentials, CallMetadata, ChannelCredentials, CompositeCallCredentials,
    StaticMetadataCredentials, TlsCredentials, TokenCredentials, create_token_credentials,
};
pub use error::{GrpcError, GrpcResult};
pub use interceptors::CallCredentialsInterceptor;
