//! Integration tests for the GPortal client
//!
//! These tests serve mock GPCore services over an in-memory transport to
//! ensure:
//! - Calls reach the right service and responses are forwarded untouched
//! - Bearer tokens are attached exactly once per call
//! - All stubs share one channel and fail once it is closed
//! - Scoped use and drop release the channel exactly once

mod common;

use futures::FutureExt;
use std::panic::AssertUnwindSafe;

use common::{API_VERSION, ENDPOINT, MockCloud, mock_transport};
use gpcore_sdk::api::{admin, auth, cloud, gateway, metadata, network, payment};
use gpcore_sdk::{
    ChannelCredentials, ChannelOptions, DEFAULT_ENDPOINT, GPortalClient, GrpcError, SdkError,
    create_token_credentials,
};
use grpc_client::channel::options::names;
use test_utils::{InMemoryTransport, MetadataRecorder, assertions::*};
use tonic::Code;
use tonic::codec::CompressionEncoding;
use tonic::service::Routes;
use tonic::service::interceptor::InterceptedService;

fn mock_client(
    credentials: Option<ChannelCredentials>,
) -> (GPortalClient, InMemoryTransport, MetadataRecorder) {
    let recorder = MetadataRecorder::new();
    let transport = mock_transport(&recorder);
    let client = GPortalClient::with_transport(ENDPOINT, transport.clone(), credentials, None)
        .expect("client should build");
    (client, transport, recorder)
}

// ============================================================================
// Calls
// ============================================================================

#[tokio::test]
async fn test_readiness_check_forwards_version() {
    let (client, transport, _) = mock_client(None);

    let response = client
        .cloud
        .clone()
        .readiness_check(cloud::v2::ReadinessCheckRequest {})
        .await
        .unwrap();

    assert_eq!(response.into_inner().version, API_VERSION);
    assert_eq!(
        transport.paths(),
        vec!["/gpcore.api.cloud.v2.CloudService/ReadinessCheck".to_string()]
    );
}

#[tokio::test]
async fn test_get_user_with_token() {
    let (client, _, recorder) = mock_client(Some(create_token_credentials("abc123")));

    let response = client
        .auth
        .clone()
        .get_user(auth::v1::GetUserRequest {})
        .await
        .unwrap();

    let user = assert_some(response.into_inner().user, "user should be returned");
    assert_eq!(user.id, "u-1");
    assert_eq!(recorder.values("authorization"), vec!["Bearer abc123".to_string()]);
}

#[tokio::test]
async fn test_token_attached_once_per_call() {
    let (client, _, recorder) = mock_client(Some(create_token_credentials("abc123")));

    client
        .auth
        .clone()
        .get_user(auth::v1::GetUserRequest {})
        .await
        .unwrap();
    client
        .cloud
        .clone()
        .list_nodes(cloud::v2::ListNodesRequest {
            project_uuid: "p-1".to_string(),
        })
        .await
        .unwrap();
    client
        .metadata
        .clone()
        .list_datacenters(metadata::v1::ListDatacentersRequest {})
        .await
        .unwrap();

    let per_request = recorder.values_per_request("authorization");
    assert_eq!(per_request.len(), 3);
    for values in per_request {
        assert_eq!(values, vec!["Bearer abc123".to_string()]);
    }
}

#[tokio::test]
async fn test_without_token_server_rejection_passes_through() {
    let (client, _, recorder) = mock_client(None);

    let result = client
        .auth
        .clone()
        .get_user(auth::v1::GetUserRequest {})
        .await;

    let status = assert_status_code(result, Code::Unauthenticated, "get_user without token");
    assert_eq!(status.message(), "missing bearer token");
    assert!(recorder.values("authorization").is_empty());
}

#[tokio::test]
async fn test_server_errors_are_not_wrapped() {
    let (client, _, _) = mock_client(None);

    let result = client
        .cloud
        .clone()
        .get_node(cloud::v2::GetNodeRequest {
            id: "n-404".to_string(),
        })
        .await;

    let status = assert_status_code(result, Code::NotFound, "get_node");
    assert_eq!(status.message(), "node n-404 not found");
}

// ============================================================================
// Channel sharing and lifecycle
// ============================================================================

#[tokio::test]
async fn test_all_stubs_share_one_channel() {
    let (client, transport, _) = mock_client(Some(create_token_credentials("abc123")));

    client.auth.clone().list_clients(auth::v1::ListClientsRequest {}).await.unwrap();
    client.cloud.clone().readiness_check(cloud::v2::ReadinessCheckRequest {}).await.unwrap();
    client
        .payment
        .clone()
        .list_invoices(payment::v1::ListInvoicesRequest::default())
        .await
        .unwrap();
    client
        .metadata
        .clone()
        .list_datacenters(metadata::v1::ListDatacentersRequest {})
        .await
        .unwrap();
    client
        .admin
        .clone()
        .list_projects(admin::v1::ListProjectsRequest::default())
        .await
        .unwrap();
    client
        .network
        .clone()
        .list_subnets(network::v1::ListSubnetsRequest::default())
        .await
        .unwrap();
    client
        .gateway
        .clone()
        .list_gateways(gateway::v1::ListGatewaysRequest::default())
        .await
        .unwrap();

    assert_eq!(
        transport.paths(),
        vec![
            "/gpcore.api.auth.v1.AuthService/ListClients",
            "/gpcore.api.cloud.v2.CloudService/ReadinessCheck",
            "/gpcore.api.payment.v1.PaymentService/ListInvoices",
            "/gpcore.api.metadata.v1.MetadataService/ListDatacenters",
            "/gpcore.api.admin.v1.AdminService/ListProjects",
            "/gpcore.api.network.v1.NetworkService/ListSubnets",
            "/gpcore.api.gateway.v1.GatewayService/ListGateways",
        ]
    );
}

#[tokio::test]
async fn test_closed_client_fails_every_stub() {
    let (client, transport, _) = mock_client(Some(create_token_credentials("abc123")));
    client.close().unwrap();
    assert!(client.is_closed());

    let context = "call after close";
    assert_status_code(
        client.auth.clone().get_user(auth::v1::GetUserRequest {}).await,
        Code::Unavailable,
        context,
    );
    assert_status_code(
        client.cloud.clone().readiness_check(cloud::v2::ReadinessCheckRequest {}).await,
        Code::Unavailable,
        context,
    );
    assert_status_code(
        client
            .payment
            .clone()
            .list_invoices(payment::v1::ListInvoicesRequest::default())
            .await,
        Code::Unavailable,
        context,
    );
    assert_status_code(
        client
            .metadata
            .clone()
            .list_datacenters(metadata::v1::ListDatacentersRequest {})
            .await,
        Code::Unavailable,
        context,
    );
    assert_status_code(
        client
            .admin
            .clone()
            .list_projects(admin::v1::ListProjectsRequest::default())
            .await,
        Code::Unavailable,
        context,
    );
    assert_status_code(
        client
            .network
            .clone()
            .list_subnets(network::v1::ListSubnetsRequest::default())
            .await,
        Code::Unavailable,
        context,
    );
    assert_status_code(
        client
            .gateway
            .clone()
            .list_gateways(gateway::v1::ListGatewaysRequest::default())
            .await,
        Code::Unavailable,
        context,
    );

    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_double_close_is_reported() {
    let (client, _, _) = mock_client(None);

    assert!(client.close().is_ok());
    assert!(matches!(client.close(), Err(GrpcError::AlreadyClosed)));
}

#[tokio::test]
async fn test_scope_closes_channel() {
    let (client, _, _) = mock_client(None);
    let channel = client.channel().clone();

    let version = client
        .scope(async |client| {
            client
                .cloud
                .clone()
                .readiness_check(cloud::v2::ReadinessCheckRequest {})
                .await
                .map(|response| response.into_inner().version)
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(version, API_VERSION);
    assert!(channel.is_closed());
    assert!(matches!(channel.close(), Err(GrpcError::AlreadyClosed)));
}

#[tokio::test]
async fn test_scope_closes_channel_on_error() {
    let (client, _, _) = mock_client(None);
    let channel = client.channel().clone();

    let result = client
        .scope(async |client| client.auth.clone().get_user(auth::v1::GetUserRequest {}).await)
        .await
        .unwrap();

    assert_status_code(result, Code::Unauthenticated, "get_user inside scope");
    assert!(channel.is_closed());
}

#[tokio::test]
async fn test_scope_closes_channel_on_panic() {
    let (client, _, _) = mock_client(None);
    let channel = client.channel().clone();

    let result = AssertUnwindSafe(client.scope::<_, ()>(async |_client| panic!("scope body failed")))
        .catch_unwind()
        .await;

    assert!(result.is_err());
    assert!(channel.is_closed());
}

#[tokio::test]
async fn test_drop_closes_channel() {
    let (client, _, _) = mock_client(None);
    let channel = client.channel().clone();

    drop(client);
    assert!(channel.is_closed());
}

#[tokio::test]
async fn test_drop_after_close_does_not_close_again() {
    let (client, _, _) = mock_client(None);
    let channel = client.channel().clone();

    client.close().unwrap();
    drop(client);

    // Drop must not close again
    assert!(matches!(channel.close(), Err(GrpcError::AlreadyClosed)));
}

// ============================================================================
// Options
// ============================================================================

#[tokio::test]
async fn test_default_options_when_none_supplied() {
    let (client, _, _) = mock_client(None);
    assert_eq!(client.options(), &ChannelOptions::default());
    assert_eq!(client.options().len(), 6);
}

#[tokio::test]
async fn test_supplied_options_replace_defaults() {
    let options = ChannelOptions::empty()
        .with(names::KEEPALIVE_TIME_MS, 60_000)
        .with(names::PRIMARY_USER_AGENT, "gpcore-tests/1.0");

    let recorder = MetadataRecorder::new();
    let client = GPortalClient::with_transport(
        ENDPOINT,
        mock_transport(&recorder),
        None,
        Some(options.clone()),
    )
    .unwrap();

    assert_eq!(client.options(), &options);
    assert!(!client.options().contains(names::KEEPALIVE_TIMEOUT_MS));
}

#[tokio::test]
async fn test_invalid_options_rejected_at_construction() {
    let recorder = MetadataRecorder::new();

    let result = GPortalClient::with_transport(
        ENDPOINT,
        mock_transport(&recorder),
        None,
        Some(ChannelOptions::empty().with("enable_retries", 1)),
    );
    assert!(matches!(result, Err(GrpcError::UnsupportedOption(_))));

    let result = GPortalClient::with_transport(
        ENDPOINT,
        mock_transport(&recorder),
        None,
        Some(ChannelOptions::empty().with(names::KEEPALIVE_TIME_MS, -5)),
    );
    assert!(matches!(result, Err(GrpcError::InvalidOption { .. })));
}

#[tokio::test]
async fn test_unknown_grpc_options_accepted() {
    let options = ChannelOptions::default().with("grpc.max_reconnect_backoff_ms", 5_000);

    let client = GPortalClient::new(DEFAULT_ENDPOINT, None, Some(options.clone())).unwrap();
    assert_eq!(client.options(), &options);
}

#[tokio::test]
async fn test_repeated_option_names_kept_verbatim() {
    let options: ChannelOptions = vec![
        (names::KEEPALIVE_TIME_MS, 20_000),
        (names::KEEPALIVE_TIME_MS, 40_000),
    ]
    .into_iter()
    .collect();

    let recorder = MetadataRecorder::new();
    let client = GPortalClient::with_transport(
        ENDPOINT,
        mock_transport(&recorder),
        None,
        Some(options.clone()),
    )
    .unwrap();
    assert_eq!(client.options().len(), 2);
    assert_eq!(client.options(), &options);
}

#[tokio::test]
async fn test_message_limit_applied_to_stubs() {
    let options = ChannelOptions::default().with(names::MAX_RECEIVE_MESSAGE_LENGTH, 4);

    let recorder = MetadataRecorder::new();
    let client =
        GPortalClient::with_transport(ENDPOINT, mock_transport(&recorder), None, Some(options))
            .unwrap();

    let result = client
        .cloud
        .clone()
        .readiness_check(cloud::v2::ReadinessCheckRequest {})
        .await;
    assert!(result.is_err(), "response larger than the limit must be rejected");
}

#[tokio::test]
async fn test_compression_option_applied_to_stubs() {
    use cloud::v2::cloud_service_server::CloudServiceServer;

    let recorder = MetadataRecorder::new();
    let server = CloudServiceServer::new(MockCloud)
        .accept_compressed(CompressionEncoding::Gzip)
        .send_compressed(CompressionEncoding::Gzip);
    let transport = InMemoryTransport::new(Routes::new(InterceptedService::new(
        server,
        recorder.clone(),
    )));
    let options = ChannelOptions::default().with(names::DEFAULT_COMPRESSION_ALGORITHM, 2);

    let client = GPortalClient::with_transport(ENDPOINT, transport, None, Some(options)).unwrap();
    let response = client
        .cloud
        .clone()
        .readiness_check(cloud::v2::ReadinessCheckRequest {})
        .await
        .unwrap();
    assert_eq!(response.into_inner().version, API_VERSION);
    assert_eq!(recorder.values("grpc-encoding"), vec!["gzip".to_string()]);
}

#[tokio::test]
async fn test_compressed_request_rejected_by_identity_server() {
    use cloud::v2::cloud_service_server::CloudServiceServer;

    let transport = InMemoryTransport::new(Routes::new(CloudServiceServer::new(MockCloud)));
    let options = ChannelOptions::default().with(names::DEFAULT_COMPRESSION_ALGORITHM, 2);

    let client = GPortalClient::with_transport(ENDPOINT, transport, None, Some(options)).unwrap();
    let result = client
        .cloud
        .clone()
        .readiness_check(cloud::v2::ReadinessCheckRequest {})
        .await;
    assert_status_code(result, Code::Unimplemented, "gzip request to identity-only server");
}

#[tokio::test]
async fn test_uncompressed_by_default() {
    let (client, _, recorder) = mock_client(None);
    client
        .cloud
        .clone()
        .readiness_check(cloud::v2::ReadinessCheckRequest {})
        .await
        .unwrap();
    assert!(recorder.values("grpc-encoding").is_empty());
}

// ============================================================================
// Construction
// ============================================================================

#[tokio::test]
async fn test_new_with_default_endpoint() {
    let client = GPortalClient::new(
        DEFAULT_ENDPOINT,
        Some(create_token_credentials("abc123")),
        None,
    )
    .unwrap();

    assert_eq!(client.endpoint(), "api.gportal.com:443");
    assert!(client.credentials().has_call_credentials());
    assert_eq!(client.options(), &ChannelOptions::default());
    assert!(!client.is_closed());
    assert!(!format!("{client:?}").contains("abc123"));

    client.close().unwrap();
}

#[tokio::test]
async fn test_new_without_credentials_uses_tls_only() {
    let client = GPortalClient::new(DEFAULT_ENDPOINT, None, None).unwrap();
    assert!(!client.credentials().has_call_credentials());
}

#[test]
fn test_new_outside_runtime_returns_error() {
    let result = GPortalClient::new(DEFAULT_ENDPOINT, None, None);
    assert!(matches!(result, Err(GrpcError::NoRuntime)));
}

#[tokio::test]
async fn test_connect_failure_surfaces_at_construction() {
    // Nothing listens on the discard port
    let result = GPortalClient::connect("127.0.0.1:9", None, None).await;
    assert!(matches!(result, Err(GrpcError::ConnectionFailed(_))));
}

#[tokio::test]
async fn test_invalid_endpoints_rejected() {
    assert!(matches!(
        GPortalClient::new("", None, None),
        Err(GrpcError::InvalidEndpoint { .. })
    ));
    assert!(matches!(
        GPortalClient::new("http://api.gportal.com:80", Some(create_token_credentials("abc123")), None),
        Err(GrpcError::InsecureEndpoint(_))
    ));

    let recorder = MetadataRecorder::new();
    assert!(matches!(
        GPortalClient::with_transport("http://localhost:50051", mock_transport(&recorder), None, None),
        Err(GrpcError::InsecureEndpoint(_))
    ));
}

#[test]
fn test_from_env() {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    temp_env::with_vars(
        [
            ("GPCORE_ENDPOINT", Some("localhost:50051")),
            ("GPCORE_API_TOKEN", Some("abc123")),
            ("GPCORE_KEEPALIVE_TIME_MS", None),
            ("GPCORE_USER_AGENT", None),
        ],
        || {
            let _guard = runtime.enter();
            let client = GPortalClient::from_env().unwrap();
            assert_eq!(client.endpoint(), "localhost:50051");
            assert!(client.credentials().has_call_credentials());
            assert_eq!(client.options(), &ChannelOptions::default());
        },
    );
}

#[test]
fn test_from_env_rejects_plaintext_endpoint() {
    let runtime = tokio::runtime::Runtime::new().unwrap();

    temp_env::with_vars(
        [
            ("GPCORE_ENDPOINT", Some("http://localhost:50051")),
            ("GPCORE_API_TOKEN", None),
        ],
        || {
            let _guard = runtime.enter();
            let result = GPortalClient::from_env();
            assert!(matches!(
                result,
                Err(SdkError::Grpc(GrpcError::InsecureEndpoint(_)))
            ));
        },
    );
}
