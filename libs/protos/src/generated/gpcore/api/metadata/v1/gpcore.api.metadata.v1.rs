// @generated
// This file is @generated by prost-build.
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ListDatacentersRequest {}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ListDatacentersResponse {
    #[prost(message, repeated, tag = "1")]
    pub datacenters: ::prost::alloc::vec::Vec<Datacenter>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Datacenter {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub country_code: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub city: ::prost::alloc::string::String,
}
include!("gpcore.api.metadata.v1.tonic.rs");
// @@protoc_insertion_point(module)
