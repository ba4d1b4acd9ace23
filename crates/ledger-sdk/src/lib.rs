//! Client SDK core for the ledger.
//!
//! This crate exposes:
//! - typed transaction builders with a freeze/sign contract (`transaction`),
//! - the allowance index that backs approve/delete allowance bodies (`allowance`),
//! - patch semantics for update transactions (`Patch`),
//! - the client context and its serde config (`Client`, `ClientConfig`),
//! - node transports (`MockTransport`, `GrpcTransport`) with retry/backoff,
//! - receipt and record polling (`TransactionResponse`).

pub mod allowance;
pub mod client;
pub mod custom_fee;
pub mod endpoint;
pub mod error;
pub mod hooks;
pub mod patch;
pub mod pending_airdrop;
pub mod receipt;
pub mod response;
pub mod token_transfers;
pub mod transaction;
pub mod transaction_id;
pub mod transport;

pub use allowance::{
    AllowanceAction, AllowanceGrant, AllowanceIndex, AllowanceResource, NftSerials, OwnerKey,
};
pub use client::{Client, ClientConfig, OperatorConfig};
pub use custom_fee::{CustomFee, Fee, FixedFee, Fraction, FractionalFee, RoyaltyFee};
pub use endpoint::{Endpoint, EndpointAddress};
pub use error::{ClientError, TransactionError};
pub use hooks::{HookCreationDetails, HookExtensionPoint, HookList, LambdaEvmHook, LambdaStorageSlot};
pub use patch::Patch;
pub use pending_airdrop::{PendingAirdropId, PendingAirdropRecord, TokenReference};
pub use receipt::{Status, TransactionReceipt, TransactionRecord};
pub use response::TransactionResponse;
pub use token_transfers::{HbarTransfer, NftTransfer, TokenTransfer, TokenTransferList};
pub use transaction::*;
pub use transaction_id::TransactionId;
pub use transport::{
    retry_with_backoff, GrpcTransport, Method, MockTransport, RetryPolicy, Transport,
    TransportError,
};

pub use ledger_crypto::PrivateKey;
pub use ledger_types::{
    AccountId, EvmAddress, Hbar, Key, LedgerId, NftId, PublicKey, TokenId,
};
