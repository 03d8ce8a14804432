//! Mock GPCore services served over an in-memory transport
#![allow(dead_code)]

use gpcore_sdk::api::{admin, auth, cloud, gateway, metadata, network, payment};
use test_utils::{InMemoryTransport, MetadataRecorder};
use tonic::service::Routes;
use tonic::{Request, Response, Status};

use admin::v1::admin_service_server::{AdminService, AdminServiceServer};
use auth::v1::auth_service_server::{AuthService, AuthServiceServer};
use cloud::v2::cloud_service_server::{CloudService, CloudServiceServer};
use gateway::v1::gateway_service_server::{GatewayService, GatewayServiceServer};
use metadata::v1::metadata_service_server::{MetadataService, MetadataServiceServer};
use network::v1::network_service_server::{NetworkService, NetworkServiceServer};
use payment::v1::payment_service_server::{PaymentService, PaymentServiceServer};

pub const ENDPOINT: &str = "localhost:50051";
pub const API_VERSION: &str = "1.2.3";

/// Every mock service behind one recorder
pub fn mock_transport(recorder: &MetadataRecorder) -> InMemoryTransport {
    let routes = Routes::new(AuthServiceServer::with_interceptor(MockAuth, recorder.clone()))
        .add_service(CloudServiceServer::with_interceptor(MockCloud, recorder.clone()))
        .add_service(PaymentServiceServer::with_interceptor(MockPayment, recorder.clone()))
        .add_service(MetadataServiceServer::with_interceptor(MockMetadata, recorder.clone()))
        .add_service(AdminServiceServer::with_interceptor(MockAdmin, recorder.clone()))
        .add_service(NetworkServiceServer::with_interceptor(MockNetwork, recorder.clone()))
        .add_service(GatewayServiceServer::with_interceptor(MockGateway, recorder.clone()));

    InMemoryTransport::new(routes)
}

// ============================================================================
// Mock services
// ============================================================================

pub struct MockAuth;

#[tonic::async_trait]
impl AuthService for MockAuth {
    async fn get_user(
        &self,
        request: Request<auth::v1::GetUserRequest>,
    ) -> Result<Response<auth::v1::GetUserResponse>, Status> {
        if request.metadata().get("authorization").is_none() {
            return Err(Status::unauthenticated("missing bearer token"));
        }

        Ok(Response::new(auth::v1::GetUserResponse {
            user: Some(auth::v1::User {
                id: "u-1".to_string(),
                username: "jdoe".to_string(),
                email: "jdoe@example.com".to_string(),
                full_name: "Jane Doe".to_string(),
                created_at: 1_700_000_000,
            }),
        }))
    }

    async fn list_clients(
        &self,
        _request: Request<auth::v1::ListClientsRequest>,
    ) -> Result<Response<auth::v1::ListClientsResponse>, Status> {
        Ok(Response::new(auth::v1::ListClientsResponse {
            clients: vec![auth::v1::Client {
                id: "c-1".to_string(),
                name: "cli".to_string(),
                redirect_uris: vec!["http://localhost:8080/callback".to_string()],
                confidential: false,
            }],
        }))
    }
}

pub struct MockCloud;

#[tonic::async_trait]
impl CloudService for MockCloud {
    async fn readiness_check(
        &self,
        _request: Request<cloud::v2::ReadinessCheckRequest>,
    ) -> Result<Response<cloud::v2::ReadinessCheckResponse>, Status> {
        Ok(Response::new(cloud::v2::ReadinessCheckResponse {
            version: API_VERSION.to_string(),
        }))
    }

    async fn list_nodes(
        &self,
        request: Request<cloud::v2::ListNodesRequest>,
    ) -> Result<Response<cloud::v2::ListNodesResponse>, Status> {
        let project_uuid = request.into_inner().project_uuid;
        Ok(Response::new(cloud::v2::ListNodesResponse {
            nodes: vec![cloud::v2::Node {
                id: "n-1".to_string(),
                fqdn: "n-1.fra.gportal.net".to_string(),
                state: cloud::v2::NodeState::Running as i32,
                datacenter_id: "fra-1".to_string(),
                project_uuid,
            }],
        }))
    }

    async fn get_node(
        &self,
        request: Request<cloud::v2::GetNodeRequest>,
    ) -> Result<Response<cloud::v2::GetNodeResponse>, Status> {
        let id = request.into_inner().id;
        Err(Status::not_found(format!("node {id} not found")))
    }
}

pub struct MockPayment;

#[tonic::async_trait]
impl PaymentService for MockPayment {
    async fn list_invoices(
        &self,
        _request: Request<payment::v1::ListInvoicesRequest>,
    ) -> Result<Response<payment::v1::ListInvoicesResponse>, Status> {
        Ok(Response::new(payment::v1::ListInvoicesResponse { invoices: vec![] }))
    }
}

pub struct MockMetadata;

#[tonic::async_trait]
impl MetadataService for MockMetadata {
    async fn list_datacenters(
        &self,
        _request: Request<metadata::v1::ListDatacentersRequest>,
    ) -> Result<Response<metadata::v1::ListDatacentersResponse>, Status> {
        Ok(Response::new(metadata::v1::ListDatacentersResponse {
            datacenters: vec![metadata::v1::Datacenter {
                id: "fra-1".to_string(),
                name: "Frankfurt 1".to_string(),
                country_code: "DE".to_string(),
                city: "Frankfurt".to_string(),
            }],
        }))
    }
}

pub struct MockAdmin;

#[tonic::async_trait]
impl AdminService for MockAdmin {
    async fn list_projects(
        &self,
        _request: Request<admin::v1::ListProjectsRequest>,
    ) -> Result<Response<admin::v1::ListProjectsResponse>, Status> {
        Ok(Response::new(admin::v1::ListProjectsResponse {
            projects: vec![],
            total: 0,
        }))
    }
}

pub struct MockNetwork;

#[tonic::async_trait]
impl NetworkService for MockNetwork {
    async fn list_subnets(
        &self,
        _request: Request<network::v1::ListSubnetsRequest>,
    ) -> Result<Response<network::v1::ListSubnetsResponse>, Status> {
        Ok(Response::new(network::v1::ListSubnetsResponse { subnets: vec![] }))
    }
}

pub struct MockGateway;

#[tonic::async_trait]
impl GatewayService for MockGateway {
    async fn list_gateways(
        &self,
        _request: Request<gateway::v1::ListGatewaysRequest>,
    ) -> Result<Response<gateway::v1::ListGatewaysResponse>, Status> {
        Ok(Response::new(gateway::v1::ListGatewaysResponse { gateways: vec![] }))
    }
}
