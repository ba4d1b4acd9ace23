//! Account, allowance and transfer transaction bodies.

use super::basic::{
    AccountId, BoolValue, Duration, HookCreationDetails, Int32Value, Key, StringValue, Timestamp,
    TokenId, TokenTransferList, TransferList,
};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoCreateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub key: ::core::option::Option<Key>,
    #[prost(uint64, tag = "2")]
    pub initial_balance: u64,
    #[prost(bool, tag = "8")]
    pub receiver_sig_required: bool,
    #[prost(message, optional, tag = "9")]
    pub auto_renew_period: ::core::option::Option<Duration>,
    #[prost(string, tag = "13")]
    pub memo: ::prost::alloc::string::String,
    #[prost(int32, tag = "14")]
    pub max_automatic_token_associations: i32,
    #[prost(bool, tag = "17")]
    pub decline_reward: bool,
    #[prost(bytes, tag = "18")]
    pub alias: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, repeated, tag = "19")]
    pub hook_creation_details: ::prost::alloc::vec::Vec<HookCreationDetails>,
    #[prost(oneof = "StakedId", tags = "15, 16")]
    pub staked_id: ::core::option::Option<StakedId>,
}

/// Stake target of a new account.
#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum StakedId {
    #[prost(message, tag = "15")]
    StakedAccountId(AccountId),
    #[prost(int64, tag = "16")]
    StakedNodeId(i64),
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoUpdateTransactionBody {
    #[prost(message, optional, tag = "2")]
    pub account_id_to_update: ::core::option::Option<AccountId>,
    #[prost(message, optional, tag = "3")]
    pub key: ::core::option::Option<Key>,
    #[prost(message, optional, tag = "8")]
    pub auto_renew_period: ::core::option::Option<Duration>,
    #[prost(message, optional, tag = "9")]
    pub expiration_time: ::core::option::Option<Timestamp>,
    #[prost(message, optional, tag = "14")]
    pub memo: ::core::option::Option<StringValue>,
    #[prost(message, optional, tag = "15")]
    pub receiver_sig_required_wrapper: ::core::option::Option<BoolValue>,
    #[prost(message, optional, tag = "16")]
    pub max_automatic_token_associations: ::core::option::Option<Int32Value>,
    #[prost(oneof = "UpdateStakedId", tags = "17, 18")]
    pub staked_id: ::core::option::Option<UpdateStakedId>,
    #[prost(message, optional, tag = "19")]
    pub decline_reward: ::core::option::Option<BoolValue>,
    #[prost(int64, repeated, tag = "20")]
    pub hook_ids_to_delete: ::prost::alloc::vec::Vec<i64>,
    #[prost(message, repeated, tag = "21")]
    pub hook_creation_details: ::prost::alloc::vec::Vec<HookCreationDetails>,
}

#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum UpdateStakedId {
    /// `0.0.0` clears an account stake target.
    #[prost(message, tag = "17")]
    StakedAccountId(AccountId),
    /// `-1` clears a node stake target.
    #[prost(int64, tag = "18")]
    StakedNodeId(i64),
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoAllowance {
    #[prost(message, optional, tag = "1")]
    pub owner: ::core::option::Option<AccountId>,
    #[prost(message, optional, tag = "2")]
    pub spender: ::core::option::Option<AccountId>,
    #[prost(int64, tag = "3")]
    pub amount: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenAllowance {
    #[prost(message, optional, tag = "1")]
    pub token_id: ::core::option::Option<TokenId>,
    #[prost(message, optional, tag = "2")]
    pub owner: ::core::option::Option<AccountId>,
    #[prost(message, optional, tag = "3")]
    pub spender: ::core::option::Option<AccountId>,
    #[prost(int64, tag = "4")]
    pub amount: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NftAllowance {
    #[prost(message, optional, tag = "1")]
    pub token_id: ::core::option::Option<TokenId>,
    #[prost(message, optional, tag = "2")]
    pub owner: ::core::option::Option<AccountId>,
    #[prost(message, optional, tag = "3")]
    pub spender: ::core::option::Option<AccountId>,
    #[prost(int64, repeated, tag = "4")]
    pub serial_numbers: ::prost::alloc::vec::Vec<i64>,
    #[prost(message, optional, tag = "5")]
    pub approved_for_all: ::core::option::Option<BoolValue>,
    #[prost(message, optional, tag = "6")]
    pub delegating_spender: ::core::option::Option<AccountId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NftRemoveAllowance {
    #[prost(message, optional, tag = "1")]
    pub token_id: ::core::option::Option<TokenId>,
    #[prost(message, optional, tag = "2")]
    pub owner: ::core::option::Option<AccountId>,
    #[prost(int64, repeated, tag = "3")]
    pub serial_numbers: ::prost::alloc::vec::Vec<i64>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoApproveAllowanceTransactionBody {
    #[prost(message, repeated, tag = "1")]
    pub crypto_allowances: ::prost::alloc::vec::Vec<CryptoAllowance>,
    #[prost(message, repeated, tag = "2")]
    pub nft_allowances: ::prost::alloc::vec::Vec<NftAllowance>,
    #[prost(message, repeated, tag = "3")]
    pub token_allowances: ::prost::alloc::vec::Vec<TokenAllowance>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoDeleteAllowanceTransactionBody {
    #[prost(message, repeated, tag = "2")]
    pub nft_allowances: ::prost::alloc::vec::Vec<NftRemoveAllowance>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoTransferTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub transfers: ::core::option::Option<TransferList>,
    #[prost(message, repeated, tag = "2")]
    pub token_transfers: ::prost::alloc::vec::Vec<TokenTransferList>,
}

/// Deprecated live-hash bodies; still present on the wire schema but never
/// reconstructed by the client.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoAddLiveHashTransactionBody {
    #[prost(bytes, tag = "1")]
    pub live_hash: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoDeleteLiveHashTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub account_of_live_hash: ::core::option::Option<AccountId>,
    #[prost(bytes, tag = "2")]
    pub live_hash_to_delete: ::prost::alloc::vec::Vec<u8>,
}
