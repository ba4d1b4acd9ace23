//! Identifiers, keys, time, and transfer building blocks shared by every body.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(oneof = "account_id::Account", tags = "3, 4")]
    pub account: ::core::option::Option<account_id::Account>,
}

pub mod account_id {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Account {
        #[prost(int64, tag = "3")]
        AccountNum(i64),
        /// Serialized `Key` for key aliases, raw 20 bytes for EVM addresses.
        #[prost(bytes, tag = "4")]
        Alias(::prost::alloc::vec::Vec<u8>),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(int64, tag = "3")]
    pub token_num: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ContractId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(oneof = "contract_id::Contract", tags = "3, 4")]
    pub contract: ::core::option::Option<contract_id::Contract>,
}

pub mod contract_id {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Contract {
        #[prost(int64, tag = "3")]
        ContractNum(i64),
        #[prost(bytes, tag = "4")]
        EvmAddress(::prost::alloc::vec::Vec<u8>),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(int64, tag = "3")]
    pub file_num: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TopicId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(int64, tag = "3")]
    pub topic_num: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ScheduleId {
    #[prost(int64, tag = "1")]
    pub shard_num: i64,
    #[prost(int64, tag = "2")]
    pub realm_num: i64,
    #[prost(int64, tag = "3")]
    pub schedule_num: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NftId {
    #[prost(message, optional, tag = "1")]
    pub token_id: ::core::option::Option<TokenId>,
    #[prost(int64, tag = "2")]
    pub serial_number: i64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Timestamp {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
    #[prost(int32, tag = "2")]
    pub nanos: i32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Duration {
    #[prost(int64, tag = "1")]
    pub seconds: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionId {
    #[prost(message, optional, tag = "1")]
    pub transaction_valid_start: ::core::option::Option<Timestamp>,
    #[prost(message, optional, tag = "2")]
    pub account_id: ::core::option::Option<AccountId>,
    #[prost(bool, tag = "3")]
    pub scheduled: bool,
    #[prost(int32, tag = "4")]
    pub nonce: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Key {
    #[prost(oneof = "key::Key", tags = "1, 2, 5, 6, 7")]
    pub key: ::core::option::Option<key::Key>,
}

pub mod key {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Key {
        #[prost(message, tag = "1")]
        ContractId(super::ContractId),
        #[prost(bytes, tag = "2")]
        Ed25519(::prost::alloc::vec::Vec<u8>),
        #[prost(message, tag = "5")]
        ThresholdKey(super::ThresholdKey),
        #[prost(message, tag = "6")]
        KeyList(super::KeyList),
        #[prost(bytes, tag = "7")]
        EcdsaSecp256k1(::prost::alloc::vec::Vec<u8>),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeyList {
    #[prost(message, repeated, tag = "1")]
    pub keys: ::prost::alloc::vec::Vec<Key>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ThresholdKey {
    #[prost(uint32, tag = "1")]
    pub threshold: u32,
    #[prost(message, optional, tag = "2")]
    pub keys: ::core::option::Option<KeyList>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AccountAmount {
    #[prost(message, optional, tag = "1")]
    pub account_id: ::core::option::Option<AccountId>,
    #[prost(sint64, tag = "2")]
    pub amount: i64,
    #[prost(bool, tag = "3")]
    pub is_approval: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransferList {
    #[prost(message, repeated, tag = "1")]
    pub account_amounts: ::prost::alloc::vec::Vec<AccountAmount>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NftTransfer {
    #[prost(message, optional, tag = "1")]
    pub sender_account_id: ::core::option::Option<AccountId>,
    #[prost(message, optional, tag = "2")]
    pub receiver_account_id: ::core::option::Option<AccountId>,
    #[prost(int64, tag = "3")]
    pub serial_number: i64,
    #[prost(bool, tag = "4")]
    pub is_approval: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenTransferList {
    #[prost(message, optional, tag = "1")]
    pub token: ::core::option::Option<TokenId>,
    #[prost(message, repeated, tag = "2")]
    pub transfers: ::prost::alloc::vec::Vec<AccountAmount>,
    #[prost(message, repeated, tag = "3")]
    pub nft_transfers: ::prost::alloc::vec::Vec<NftTransfer>,
    #[prost(message, optional, tag = "4")]
    pub expected_decimals: ::core::option::Option<UInt32Value>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ServiceEndpoint {
    #[prost(bytes, tag = "1")]
    pub ip_address_v4: ::prost::alloc::vec::Vec<u8>,
    #[prost(int32, tag = "2")]
    pub port: i32,
    #[prost(string, tag = "3")]
    pub domain_name: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PendingAirdropId {
    #[prost(message, optional, tag = "1")]
    pub sender_id: ::core::option::Option<AccountId>,
    #[prost(message, optional, tag = "2")]
    pub receiver_id: ::core::option::Option<AccountId>,
    #[prost(oneof = "pending_airdrop_id::TokenReference", tags = "3, 4")]
    pub token_reference: ::core::option::Option<pending_airdrop_id::TokenReference>,
}

pub mod pending_airdrop_id {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum TokenReference {
        #[prost(message, tag = "3")]
        FungibleTokenType(super::TokenId),
        #[prost(message, tag = "4")]
        NonFungibleToken(super::NftId),
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct PendingAirdropValue {
    #[prost(uint64, tag = "1")]
    pub amount: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PendingAirdropRecord {
    #[prost(message, optional, tag = "1")]
    pub pending_airdrop_id: ::core::option::Option<PendingAirdropId>,
    #[prost(message, optional, tag = "2")]
    pub pending_airdrop_value: ::core::option::Option<PendingAirdropValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenReference {
    #[prost(oneof = "token_reference::TokenIdentifier", tags = "1, 2")]
    pub token_identifier: ::core::option::Option<token_reference::TokenIdentifier>,
}

pub mod token_reference {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum TokenIdentifier {
        #[prost(message, tag = "1")]
        FungibleToken(super::TokenId),
        #[prost(message, tag = "2")]
        Nft(super::NftId),
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Fraction {
    #[prost(int64, tag = "1")]
    pub numerator: i64,
    #[prost(int64, tag = "2")]
    pub denominator: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FixedFee {
    #[prost(int64, tag = "1")]
    pub amount: i64,
    /// Absent means the fee is charged in hbar.
    #[prost(message, optional, tag = "2")]
    pub denominating_token_id: ::core::option::Option<TokenId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FractionalFee {
    #[prost(message, optional, tag = "1")]
    pub fractional_amount: ::core::option::Option<Fraction>,
    #[prost(int64, tag = "2")]
    pub minimum_amount: i64,
    #[prost(int64, tag = "3")]
    pub maximum_amount: i64,
    #[prost(bool, tag = "4")]
    pub net_of_transfers: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RoyaltyFee {
    #[prost(message, optional, tag = "1")]
    pub exchange_value_fraction: ::core::option::Option<Fraction>,
    #[prost(message, optional, tag = "2")]
    pub fallback_fee: ::core::option::Option<FixedFee>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CustomFee {
    #[prost(oneof = "custom_fee::Fee", tags = "1, 2, 4")]
    pub fee: ::core::option::Option<custom_fee::Fee>,
    #[prost(message, optional, tag = "3")]
    pub fee_collector_account_id: ::core::option::Option<AccountId>,
    #[prost(bool, tag = "5")]
    pub all_collectors_are_exempt: bool,
}

pub mod custom_fee {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Fee {
        #[prost(message, tag = "1")]
        FixedFee(super::FixedFee),
        #[prost(message, tag = "2")]
        FractionalFee(super::FractionalFee),
        #[prost(message, tag = "4")]
        RoyaltyFee(super::RoyaltyFee),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum HookExtensionPoint {
    AccountAllowanceHook = 0,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HookCreationDetails {
    #[prost(enumeration = "HookExtensionPoint", tag = "1")]
    pub extension_point: i32,
    #[prost(int64, tag = "2")]
    pub hook_id: i64,
    #[prost(oneof = "hook_creation_details::Hook", tags = "3")]
    pub hook: ::core::option::Option<hook_creation_details::Hook>,
    #[prost(message, optional, tag = "4")]
    pub admin_key: ::core::option::Option<Key>,
}

pub mod hook_creation_details {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Hook {
        #[prost(message, tag = "3")]
        LambdaEvmHook(super::LambdaEvmHook),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EvmHookSpec {
    #[prost(message, optional, tag = "1")]
    pub contract_id: ::core::option::Option<ContractId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LambdaStorageSlot {
    #[prost(bytes, tag = "1")]
    pub key: ::prost::alloc::vec::Vec<u8>,
    #[prost(bytes, tag = "2")]
    pub value: ::prost::alloc::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LambdaEvmHook {
    #[prost(message, optional, tag = "1")]
    pub spec: ::core::option::Option<EvmHookSpec>,
    #[prost(message, repeated, tag = "2")]
    pub storage_updates: ::prost::alloc::vec::Vec<LambdaStorageSlot>,
}

// google.protobuf wrapper types. Presence of the wrapper is what distinguishes
// "set to the default value" from "leave unchanged" in update bodies.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StringValue {
    #[prost(string, tag = "1")]
    pub value: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct BoolValue {
    #[prost(bool, tag = "1")]
    pub value: bool,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Int32Value {
    #[prost(int32, tag = "1")]
    pub value: i32,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct UInt32Value {
    #[prost(uint32, tag = "1")]
    pub value: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BytesValue {
    #[prost(bytes, tag = "1")]
    pub value: ::prost::alloc::vec::Vec<u8>,
}
