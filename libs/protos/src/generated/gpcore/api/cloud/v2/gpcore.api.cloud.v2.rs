// @generated
// This file is @generated by prost-build.
#[derive(Clone, Copy, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ReadinessCheckRequest {}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ReadinessCheckResponse {
    #[prost(string, tag = "1")]
    pub version: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ListNodesRequest {
    #[prost(string, tag = "1")]
    pub project_uuid: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ListNodesResponse {
    #[prost(message, repeated, tag = "1")]
    pub nodes: ::prost::alloc::vec::Vec<Node>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetNodeRequest {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct GetNodeResponse {
    #[prost(message, optional, tag = "1")]
    pub node: ::core::option::Option<Node>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Node {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub fqdn: ::prost::alloc::string::String,
    #[prost(enumeration = "NodeState", tag = "3")]
    pub state: i32,
    #[prost(string, tag = "4")]
    pub datacenter_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub project_uuid: ::prost::alloc::string::String,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum NodeState {
    Unspecified = 0,
    Provisioning = 1,
    Running = 2,
    Stopped = 3,
    Error = 4,
}
impl NodeState {
    /// String value of the enum field names used in the ProtoBuf definition.
    ///
    /// The values are not transformed in any way and thus are considered stable
    /// (if the ProtoBuf definition does not change) and safe for programmatic use.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "NODE_STATE_UNSPECIFIED",
            Self::Provisioning => "NODE_STATE_PROVISIONING",
            Self::Running => "NODE_STATE_RUNNING",
            Self::Stopped => "NODE_STATE_STOPPED",
            Self::Error => "NODE_STATE_ERROR",
        }
    }
    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "NODE_STATE_UNSPECIFIED" => Some(Self::Unspecified),
            "NODE_STATE_PROVISIONING" => Some(Self::Provisioning),
            "NODE_STATE_RUNNING" => Some(Self::Running),
            "NODE_STATE_STOPPED" => Some(Self::Stopped),
            "NODE_STATE_ERROR" => Some(Self::Error),
            _ => None,
        }
    }
}
include!("gpcore.api.cloud.v2.tonic.rs");
// @@protoc_insertion_point(module)
