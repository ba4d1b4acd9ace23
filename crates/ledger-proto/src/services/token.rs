//! Token service transaction bodies.

use super::basic::{
    AccountId, BytesValue, CustomFee, Duration, Key, PendingAirdropId, StringValue, Timestamp,
    TokenId, TokenReference, TokenTransferList,
};

/// Empty `symbol`/`name` and absent messages leave the current value unchanged.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenUpdateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token: ::core::option::Option<TokenId>,
    #[prost(string, tag = "2")]
    pub symbol: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "4")]
    pub treasury: ::core::option::Option<AccountId>,
    #[prost(message, optional, tag = "5")]
    pub admin_key: ::core::option::Option<Key>,
    #[prost(message, optional, tag = "10")]
    pub auto_renew_account: ::core::option::Option<AccountId>,
    #[prost(message, optional, tag = "11")]
    pub auto_renew_period: ::core::option::Option<Duration>,
    #[prost(message, optional, tag = "12")]
    pub expiry: ::core::option::Option<Timestamp>,
    #[prost(message, optional, tag = "13")]
    pub memo: ::core::option::Option<StringValue>,
    #[prost(message, optional, tag = "16")]
    pub metadata: ::core::option::Option<BytesValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenMintTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token: ::core::option::Option<TokenId>,
    #[prost(uint64, tag = "2")]
    pub amount: u64,
    #[prost(bytes = "vec", repeated, tag = "3")]
    pub metadata: ::prost::alloc::vec::Vec<::prost::alloc::vec::Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenBurnTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token: ::core::option::Option<TokenId>,
    #[prost(uint64, tag = "2")]
    pub amount: u64,
    #[prost(int64, repeated, tag = "3")]
    pub serial_numbers: ::prost::alloc::vec::Vec<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenFeeScheduleUpdateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token_id: ::core::option::Option<TokenId>,
    #[prost(message, repeated, tag = "2")]
    pub custom_fees: ::prost::alloc::vec::Vec<CustomFee>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenAirdropTransactionBody {
    #[prost(message, repeated, tag = "1")]
    pub token_transfers: ::prost::alloc::vec::Vec<TokenTransferList>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenClaimAirdropTransactionBody {
    #[prost(message, repeated, tag = "1")]
    pub pending_airdrops: ::prost::alloc::vec::Vec<PendingAirdropId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenCancelAirdropTransactionBody {
    #[prost(message, repeated, tag = "1")]
    pub pending_airdrops: ::prost::alloc::vec::Vec<PendingAirdropId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenRejectTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub owner: ::core::option::Option<AccountId>,
    #[prost(message, repeated, tag = "2")]
    pub rejections: ::prost::alloc::vec::Vec<TokenReference>,
}
