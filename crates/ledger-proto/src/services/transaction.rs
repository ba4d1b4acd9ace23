//! Transaction envelope: body, signatures, and the node's precheck answer.

use super::{
    basic::{AccountId, Duration, TransactionId},
    crypto::{
        CryptoAddLiveHashTransactionBody, CryptoApproveAllowanceTransactionBody,
        CryptoCreateTransactionBody, CryptoDeleteAllowanceTransactionBody,
        CryptoDeleteLiveHashTransactionBody, CryptoTransferTransactionBody,
        CryptoUpdateTransactionBody,
    },
    node::{NodeCreateTransactionBody, NodeDeleteTransactionBody, NodeUpdateTransactionBody},
    token::{
        TokenAirdropTransactionBody, TokenBurnTransactionBody, TokenCancelAirdropTransactionBody,
        TokenClaimAirdropTransactionBody, TokenFeeScheduleUpdateTransactionBody,
        TokenMintTransactionBody, TokenRejectTransactionBody, TokenUpdateTransactionBody,
    },
};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionBody {
    #[prost(message, optional, tag = "1")]
    pub transaction_id: ::core::option::Option<TransactionId>,
    #[prost(message, optional, tag = "2")]
    pub node_account_id: ::core::option::Option<AccountId>,
    #[prost(uint64, tag = "3")]
    pub transaction_fee: u64,
    #[prost(message, optional, tag = "4")]
    pub transaction_valid_duration: ::core::option::Option<Duration>,
    #[prost(string, tag = "6")]
    pub memo: ::prost::alloc::string::String,
    #[prost(
        oneof = "transaction_body::Data",
        tags = "10, 11, 13, 14, 15, 36, 37, 38, 45, 48, 49, 54, 55, 56, 57, 58, 59, 60"
    )]
    pub data: ::core::option::Option<transaction_body::Data>,
}

pub mod transaction_body {
    use super::*;

    #[allow(clippy::large_enum_variant)]
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "10")]
        CryptoAddLiveHash(CryptoAddLiveHashTransactionBody),
        #[prost(message, tag = "11")]
        CryptoCreateAccount(CryptoCreateTransactionBody),
        #[prost(message, tag = "13")]
        CryptoDeleteLiveHash(CryptoDeleteLiveHashTransactionBody),
        #[prost(message, tag = "14")]
        CryptoTransfer(CryptoTransferTransactionBody),
        #[prost(message, tag = "15")]
        CryptoUpdateAccount(CryptoUpdateTransactionBody),
        #[prost(message, tag = "36")]
        TokenUpdate(TokenUpdateTransactionBody),
        #[prost(message, tag = "37")]
        TokenMint(TokenMintTransactionBody),
        #[prost(message, tag = "38")]
        TokenBurn(TokenBurnTransactionBody),
        #[prost(message, tag = "45")]
        TokenFeeScheduleUpdate(TokenFeeScheduleUpdateTransactionBody),
        #[prost(message, tag = "48")]
        CryptoApproveAllowance(CryptoApproveAllowanceTransactionBody),
        #[prost(message, tag = "49")]
        CryptoDeleteAllowance(CryptoDeleteAllowanceTransactionBody),
        #[prost(message, tag = "54")]
        NodeCreate(NodeCreateTransactionBody),
        #[prost(message, tag = "55")]
        NodeUpdate(NodeUpdateTransactionBody),
        #[prost(message, tag = "56")]
        NodeDelete(NodeDeleteTransactionBody),
        #[prost(message, tag = "57")]
        TokenReject(TokenRejectTransactionBody),
        #[prost(message, tag = "58")]
        TokenAirdrop(TokenAirdropTransactionBody),
        #[prost(message, tag = "59")]
        TokenCancelAirdrop(TokenCancelAirdropTransactionBody),
        #[prost(message, tag = "60")]
        TokenClaimAirdrop(TokenClaimAirdropTransactionBody),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignaturePair {
    #[prost(bytes = "vec", tag = "1")]
    pub pub_key_prefix: ::prost::alloc::vec::Vec<u8>,
    #[prost(oneof = "signature_pair::Signature", tags = "3, 6")]
    pub signature: ::core::option::Option<signature_pair::Signature>,
}

pub mod signature_pair {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Signature {
        #[prost(bytes, tag = "3")]
        Ed25519(::prost::alloc::vec::Vec<u8>),
        #[prost(bytes, tag = "6")]
        EcdsaSecp256k1(::prost::alloc::vec::Vec<u8>),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignatureMap {
    #[prost(message, repeated, tag = "1")]
    pub sig_pair: ::prost::alloc::vec::Vec<SignaturePair>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignedTransaction {
    #[prost(bytes = "vec", tag = "1")]
    pub body_bytes: ::prost::alloc::vec::Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub sig_map: ::core::option::Option<SignatureMap>,
}

/// What a node receives: one signed body.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    #[prost(bytes = "vec", tag = "5")]
    pub signed_transaction_bytes: ::prost::alloc::vec::Vec<u8>,
}

/// Serialized form of a frozen transaction: one entry per target node.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionList {
    #[prost(message, repeated, tag = "1")]
    pub transaction_list: ::prost::alloc::vec::Vec<Transaction>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TransactionResponse {
    #[prost(enumeration = "ResponseCodeEnum", tag = "1")]
    pub node_transaction_precheck_code: i32,
    #[prost(uint64, tag = "2")]
    pub cost: u64,
}

/// Precheck and receipt status codes. Codes outside this set are carried as raw
/// integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ResponseCodeEnum {
    Ok = 0,
    InvalidTransaction = 1,
    PayerAccountNotFound = 2,
    InvalidNodeAccount = 3,
    TransactionExpired = 4,
    InvalidTransactionStart = 5,
    InvalidTransactionDuration = 6,
    InvalidSignature = 7,
    MemoTooLong = 8,
    InsufficientTxFee = 9,
    InsufficientPayerBalance = 10,
    DuplicateTransaction = 11,
    Busy = 12,
    NotSupported = 13,
    InvalidFileId = 14,
    InvalidAccountId = 15,
    InvalidContractId = 16,
    InvalidTransactionId = 17,
    ReceiptNotFound = 18,
    RecordNotFound = 19,
    InvalidSolidityId = 20,
    Unknown = 21,
    Success = 22,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ResponseType {
    AnswerOnly = 0,
    AnswerStateProof = 1,
    CostAnswer = 2,
    CostAnswerStateProof = 3,
}
