//! # GPCore SDK
//!
//! Client for the GPortal GPCore API: one TLS channel, optional bearer-token
//! call credentials, and one generated stub per service.
//!
//! ## Quick Start
//!
//! ```ignore
//! use gpcore_sdk::{GPortalClient, create_token_credentials};
//! use gpcore_sdk::api::auth::v1::GetUserRequest;
//!
//! let client = GPortalClient::new(
//!     "api.gportal.com:443",
//!     Some(create_token_credentials(token)),
//!     None,
//! )?;
//!
//! let user = client.auth.clone().get_user(GetUserRequest {}).await?.into_inner().user;
//! ```
//!
//! ### From the environment
//! ```ignore
//! // GPCORE_ENDPOINT, GPCORE_API_TOKEN, GPCORE_KEEPALIVE_TIME_MS, GPCORE_USER_AGENT
//! let client = gpcore_sdk::GPortalClient::from_env()?;
//! ```
//!
//! ### Scoped use
//! ```ignore
//! let nodes = client
//!     .scope(async |client| {
//!         client.cloud.clone().list_nodes(ListNodesRequest { project_uuid }).await
//!     })
//!     .await??;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod stubs;

pub use client::GPortalClient;
pub use config::ClientConfig;
pub use error::{SdkError, SdkResult};
pub use stubs::{ConfigurableClient, Transport, configure_stub};

// Re-export the credential and channel building blocks
pub use grpc_client::{
    CallCredentials, ChannelCredentials, ChannelOptions, DEFAULT_ENDPOINT, GrpcError, GrpcResult,
    OptionValue, SharedChannel, TlsCredentials, TokenCredentials, create_token_credentials,
};

/// Generated GPCore messages and service stubs
pub use protos::gpcore::api;
