// @generated
// This file is @generated by prost-build.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ListSubnetsRequest {
    #[prost(string, tag = "1")]
    pub project_uuid: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ListSubnetsResponse {
    #[prost(message, repeated, tag = "1")]
    pub subnets: ::prost::alloc::vec::Vec<Subnet>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Subnet {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub cidr: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub gateway_ip: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub datacenter_id: ::prost::alloc::string::String,
    #[prost(bool, tag = "5")]
    pub ipv6: bool,
}
include!("gpcore.api.network.v1.tonic.rs");
// @@protoc_insertion_point(module)
