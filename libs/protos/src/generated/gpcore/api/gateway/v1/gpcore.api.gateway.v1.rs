// @generated
// This file is @generated by prost-build.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ListGatewaysRequest {
    #[prost(string, tag = "1")]
    pub project_uuid: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ListGatewaysResponse {
    #[prost(message, repeated, tag = "1")]
    pub gateways: ::prost::alloc::vec::Vec<Gateway>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Gateway {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub public_ip: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub subnet_id: ::prost::alloc::string::String,
}
include!("gpcore.api.gateway.v1.tonic.rs");
// @@protoc_insertion_point(module)
