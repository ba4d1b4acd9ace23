//! Address book transaction bodies.

use super::basic::{AccountId, BoolValue, BytesValue, Key, ServiceEndpoint, StringValue};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeCreateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub account_id: ::core::option::Option<AccountId>,
    #[prost(string, tag = "2")]
    pub description: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub gossip_endpoint: ::prost::alloc::vec::Vec<ServiceEndpoint>,
    #[prost(message, repeated, tag = "4")]
    pub service_endpoint: ::prost::alloc::vec::Vec<ServiceEndpoint>,
    #[prost(bytes, tag = "5")]
    pub gossip_ca_certificate: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes, tag = "6")]
    pub grpc_certificate_hash: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag = "7")]
    pub admin_key: ::core::option::Option<Key>,
    #[prost(bool, tag = "8")]
    pub decline_reward: bool,
    #[prost(message, optional, tag = "9")]
    pub grpc_proxy_endpoint: ::core::option::Option<ServiceEndpoint>,
}

/// Empty endpoint lists leave the current lists unchanged.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeUpdateTransactionBody {
    #[prost(uint64, tag = "1")]
    pub node_id: u64,
    #[prost(message, optional, tag = "2")]
    pub account_id: ::core::option::Option<AccountId>,
    #[prost(message, optional, tag = "3")]
    pub description: ::core::option::Option<StringValue>,
    #[prost(message, repeated, tag = "4")]
    pub gossip_endpoint: ::prost::alloc::vec::Vec<ServiceEndpoint>,
    #[prost(message, repeated, tag = "5")]
    pub service_endpoint: ::prost::alloc::vec::Vec<ServiceEndpoint>,
    #[prost(message, optional, tag = "6")]
    pub gossip_ca_certificate: ::core::option::Option<BytesValue>,
    #[prost(message, optional, tag = "7")]
    pub grpc_certificate_hash: ::core::option::Option<BytesValue>,
    #[prost(message, optional, tag = "8")]
    pub admin_key: ::core::option::Option<Key>,
    #[prost(message, optional, tag = "9")]
    pub decline_reward: ::core::option::Option<BoolValue>,
    /// An empty endpoint (no address, port 0) removes the proxy.
    #[prost(message, optional, tag = "10")]
    pub grpc_proxy_endpoint: ::core::option::Option<ServiceEndpoint>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct NodeDeleteTransactionBody {
    #[prost(uint64, tag = "1")]
    pub node_id: u64,
}
