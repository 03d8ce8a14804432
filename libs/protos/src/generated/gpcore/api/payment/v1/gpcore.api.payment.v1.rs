// @generated
// This file is @generated by prost-build.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ListInvoicesRequest {
    #[prost(string, tag = "1")]
    pub project_uuid: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ListInvoicesResponse {
    #[prost(message, repeated, tag = "1")]
    pub invoices: ::prost::alloc::vec::Vec<Invoice>,
}
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct Invoice {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub number: ::prost::alloc::string::String,
    #[prost(int64, tag = "3")]
    pub amount_cents: i64,
    #[prost(string, tag = "4")]
    pub currency: ::prost::alloc::string::String,
    #[prost(int64, tag = "5")]
    pub issued_at: i64,
    #[prost(bool, tag = "6")]
    pub paid: bool,
}
include!("gpcore.api.payment.v1.tonic.rs");
// @@protoc_insertion_point(module)
