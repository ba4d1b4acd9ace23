//! Receipt and record queries.

use super::{
    basic::{
        AccountId, ContractId, FileId, PendingAirdropRecord, ScheduleId, Timestamp,
        TokenId, TokenTransferList, TopicId, TransactionId, TransferList,
    },
    transaction::{ResponseCodeEnum, ResponseType, Transaction},
};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct QueryHeader {
    #[prost(message, optional, tag = "1")]
    pub payment: ::core::option::Option<Transaction>,
    #[prost(enumeration = "ResponseType", tag = "2")]
    pub response_type: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResponseHeader {
    #[prost(enumeration = "ResponseCodeEnum", tag = "1")]
    pub node_transaction_precheck_code: i32,
    #[prost(enumeration = "ResponseType", tag = "2")]
    pub response_type: i32,
    #[prost(uint64, tag = "3")]
    pub cost: u64,
}

/// Receipts are free; the header carries no payment.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionGetReceiptQuery {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<QueryHeader>,
    #[prost(message, optional, tag = "2")]
    pub transaction_id: ::core::option::Option<TransactionId>,
    #[prost(bool, tag = "3")]
    pub include_duplicates: bool,
    #[prost(bool, tag = "4")]
    pub include_child_receipts: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionGetRecordQuery {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<QueryHeader>,
    #[prost(message, optional, tag = "2")]
    pub transaction_id: ::core::option::Option<TransactionId>,
    #[prost(bool, tag = "3")]
    pub include_duplicates: bool,
    #[prost(bool, tag = "4")]
    pub include_child_records: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Query {
    #[prost(oneof = "query::Query", tags = "14, 15")]
    pub query: ::core::option::Option<query::Query>,
}

pub mod query {
    use super::*;

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Query {
        #[prost(message, tag = "14")]
        TransactionGetReceipt(TransactionGetReceiptQuery),
        #[prost(message, tag = "15")]
        TransactionGetRecord(TransactionGetRecordQuery),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionReceipt {
    #[prost(enumeration = "ResponseCodeEnum", tag = "1")]
    pub status: i32,
    #[prost(message, optional, tag = "2")]
    pub account_id: ::core::option::Option<AccountId>,
    #[prost(message, optional, tag = "3")]
    pub file_id: ::core::option::Option<FileId>,
    #[prost(message, optional, tag = "4")]
    pub contract_id: ::core::option::Option<ContractId>,
    #[prost(message, optional, tag = "6")]
    pub topic_id: ::core::option::Option<TopicId>,
    #[prost(message, optional, tag = "10")]
    pub token_id: ::core::option::Option<TokenId>,
    #[prost(uint64, tag = "11")]
    pub new_total_supply: u64,
    #[prost(message, optional, tag = "12")]
    pub schedule_id: ::core::option::Option<ScheduleId>,
    #[prost(int64, repeated, tag = "14")]
    pub serial_numbers: ::prost::alloc::vec::Vec<i64>,
    #[prost(uint64, tag = "15")]
    pub node_id: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionRecord {
    #[prost(message, optional, tag = "1")]
    pub receipt: ::core::option::Option<TransactionReceipt>,
    #[prost(bytes = "vec", tag = "2")]
    pub transaction_hash: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag = "3")]
    pub consensus_timestamp: ::core::option::Option<Timestamp>,
    #[prost(message, optional, tag = "4")]
    pub transaction_id: ::core::option::Option<TransactionId>,
    #[prost(string, tag = "5")]
    pub memo: ::prost::alloc::string::String,
    #[prost(uint64, tag = "6")]
    pub transaction_fee: u64,
    #[prost(message, optional, tag = "10")]
    pub transfer_list: ::core::option::Option<TransferList>,
    #[prost(message, repeated, tag = "11")]
    pub token_transfer_lists: ::prost::alloc::vec::Vec<TokenTransferList>,
    #[prost(message, repeated, tag = "22")]
    pub new_pending_airdrops: ::prost::alloc::vec::Vec<PendingAirdropRecord>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionGetReceiptResponse {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<ResponseHeader>,
    #[prost(message, optional, tag = "2")]
    pub receipt: ::core::option::Option<TransactionReceipt>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionGetRecordResponse {
    #[prost(message, optional, tag = "1")]
    pub header: ::core::option::Option<ResponseHeader>,
    #[prost(message, optional, tag = "3")]
    pub transaction_record: ::core::option::Option<TransactionRecord>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Response {
    #[prost(oneof = "response::Response", tags = "14, 15")]
    pub response: ::core::option::Option<response::Response>,
}

pub mod response {
    use super::*;

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Response {
        #[prost(message, tag = "14")]
        TransactionGetReceipt(TransactionGetReceiptResponse),
        #[prost(message, tag = "15")]
        TransactionGetRecord(TransactionGetRecordResponse),
    }
}
