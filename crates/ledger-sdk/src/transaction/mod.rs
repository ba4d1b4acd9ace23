//! Transaction builder and the freeze contract shared by every kind.
//!
//! A [`Transaction`] starts mutable. [`Transaction::freeze`] or
//! [`Transaction::freeze_with`] makes it immutable, and so does the first
//! signature. Every setter on a frozen transaction fails with
//! [`TransactionError::FrozenTransaction`] and leaves the value untouched.
//!
//! Kind-specific fields live in a [`TransactionData`] value. The builder renders
//! one body per target node; each body differs only in `node_account_id`.

mod account_create;
mod account_update;
mod allowance_approve;
mod allowance_delete;
mod any;
mod execute;
mod node_create;
mod node_delete;
mod node_update;
mod token_airdrop;
mod token_burn;
mod token_cancel_airdrop;
mod token_claim_airdrop;
mod token_fee_schedule_update;
mod token_mint;
mod token_reject;
mod token_update;
mod transfer;

use std::{fmt, time::Duration};

use ledger_proto::services as proto;
use ledger_types::{
    AccountId, Hbar, IdError, LedgerId, PublicKey, Signer, TransactionHash, ValidateChecksums,
};
use prost::Message;

pub use account_create::{AccountCreateData, AccountCreateTransaction, StakedId};
pub use account_update::{AccountUpdateData, AccountUpdateTransaction};
pub use allowance_approve::{AccountAllowanceApproveData, AccountAllowanceApproveTransaction};
pub use allowance_delete::{AccountAllowanceDeleteData, AccountAllowanceDeleteTransaction};
pub use any::{AnyTransaction, AnyTransactionData, FromAnyTransactionData};
pub use node_create::{NodeCreateData, NodeCreateTransaction};
pub use node_delete::{NodeDeleteData, NodeDeleteTransaction};
pub use node_update::{NodeUpdateData, NodeUpdateTransaction};
pub use token_airdrop::{TokenAirdropData, TokenAirdropTransaction};
pub use token_burn::{TokenBurnData, TokenBurnTransaction};
pub use token_cancel_airdrop::{TokenCancelAirdropData, TokenCancelAirdropTransaction};
pub use token_claim_airdrop::{TokenClaimAirdropData, TokenClaimAirdropTransaction};
pub use token_fee_schedule_update::{TokenFeeScheduleUpdateData, TokenFeeScheduleUpdateTransaction};
pub use token_mint::{TokenMintData, TokenMintTransaction};
pub use token_reject::{TokenRejectData, TokenRejectTransaction};
pub use token_update::{TokenUpdateData, TokenUpdateTransaction};
pub use transfer::{TransferData, TransferTransaction};

use crate::{client::Client, error::TransactionError, transaction_id::TransactionId, transport::Method};

pub(crate) const DEFAULT_VALID_DURATION: Duration = Duration::from_secs(120);
const MAX_VALID_DURATION: Duration = Duration::from_secs(180);
pub(crate) const MAX_MEMO_BYTES: usize = 100;

/// Capabilities every transaction kind provides to the shared builder.
pub trait TransactionData:
    Clone + fmt::Debug + ValidateChecksums + FromAnyTransactionData + Send + Sync
{
    /// Remote method the body is submitted to.
    fn method(&self) -> Method;

    fn to_body_data(&self) -> proto::transaction_body::Data;

    /// Kind-specific preconditions checked before the transaction can freeze.
    fn check_freeze(&self) -> Result<(), TransactionError> {
        Ok(())
    }

    fn default_max_transaction_fee(&self) -> Hbar {
        Hbar::new(2)
    }
}

/// One signer's signatures, one per node body.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SignatureEntry {
    public_key: PublicKey,
    per_node: Vec<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct Transaction<D> {
    data: D,
    transaction_id: Option<TransactionId>,
    node_account_ids: Option<Vec<AccountId>>,
    max_transaction_fee: Option<Hbar>,
    valid_duration: Option<Duration>,
    memo: String,
    frozen: bool,
    signatures: Vec<SignatureEntry>,
}

impl<D: Default> Default for Transaction<D> {
    fn default() -> Self {
        Self::from_data(D::default())
    }
}

impl<D: Default> Transaction<D> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<D> Transaction<D> {
    pub(crate) fn from_data(data: D) -> Self {
        Self {
            data,
            transaction_id: None,
            node_account_ids: None,
            max_transaction_fee: None,
            valid_duration: None,
            memo: String::new(),
            frozen: false,
            signatures: Vec::new(),
        }
    }

    pub(crate) fn data(&self) -> &D {
        &self.data
    }

    /// Kind fields for mutation; fails once the transaction is frozen.
    pub(crate) fn data_mut(&mut self) -> Result<&mut D, TransactionError> {
        self.require_not_frozen()?;
        Ok(&mut self.data)
    }

    /// Frozen explicitly, or signed at least once.
    pub fn is_frozen(&self) -> bool {
        self.frozen || !self.signatures.is_empty()
    }

    fn require_not_frozen(&self) -> Result<(), TransactionError> {
        if self.is_frozen() {
            return Err(TransactionError::FrozenTransaction);
        }
        Ok(())
    }

    pub fn transaction_id(&self) -> Option<TransactionId> {
        self.transaction_id
    }

    pub fn set_transaction_id(&mut self, id: TransactionId) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        self.transaction_id = Some(id);
        Ok(self)
    }

    pub fn node_account_ids(&self) -> Option<&[AccountId]> {
        self.node_account_ids.as_deref()
    }

    pub fn set_node_account_ids(
        &mut self,
        ids: impl IntoIterator<Item = AccountId>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let ids: Vec<_> = ids.into_iter().collect();
        if ids.is_empty() {
            return Err(TransactionError::invalid_argument(
                "node account ids must not be empty",
            ));
        }
        self.node_account_ids = Some(ids);
        Ok(self)
    }

    pub fn max_transaction_fee(&self) -> Option<Hbar> {
        self.max_transaction_fee
    }

    pub fn set_max_transaction_fee(&mut self, fee: Hbar) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        if fee < Hbar::ZERO {
            return Err(TransactionError::invalid_argument(format!(
                "max transaction fee must not be negative, got {fee}"
            )));
        }
        self.max_transaction_fee = Some(fee);
        Ok(self)
    }

    pub fn transaction_valid_duration(&self) -> Option<Duration> {
        self.valid_duration
    }

    pub fn set_transaction_valid_duration(
        &mut self,
        duration: Duration,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        if duration > MAX_VALID_DURATION {
            return Err(TransactionError::invalid_argument(format!(
                "valid duration is limited to {}s",
                MAX_VALID_DURATION.as_secs()
            )));
        }
        self.valid_duration = Some(duration);
        Ok(self)
    }

    pub fn transaction_memo(&self) -> &str {
        &self.memo
    }

    pub fn set_transaction_memo(
        &mut self,
        memo: impl Into<String>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let memo = memo.into();
        check_max_bytes(&memo, MAX_MEMO_BYTES, "transaction memo")?;
        self.memo = memo;
        Ok(self)
    }

    /// Public keys that have signed, in signing order.
    pub fn signers(&self) -> Vec<PublicKey> {
        self.signatures.iter().map(|entry| entry.public_key).collect()
    }
}

impl<D: TransactionData> Transaction<D> {
    /// Freezes with the transaction id and node ids already set on the builder.
    ///
    /// Freezing a frozen transaction is a no-op.
    pub fn freeze(&mut self) -> Result<&mut Self, TransactionError> {
        if self.is_frozen() {
            return Ok(self);
        }
        self.data.check_freeze()?;
        if self.transaction_id.is_none() {
            return Err(TransactionError::invalid_state(
                "transaction id must be set before freezing without a client",
            ));
        }
        if self.node_account_ids.is_none() {
            return Err(TransactionError::invalid_state(
                "node account ids must be set before freezing without a client",
            ));
        }
        self.frozen = true;
        Ok(self)
    }

    /// Freezes, taking every default the builder lacks from `client`.
    pub fn freeze_with(&mut self, client: &Client) -> Result<&mut Self, TransactionError> {
        if self.is_frozen() {
            return Ok(self);
        }
        self.data.check_freeze()?;

        let transaction_id = match (self.transaction_id, client.operator_account_id()) {
            (Some(id), _) => id,
            (None, Some(operator)) => TransactionId::generate(operator),
            (None, None) => {
                return Err(TransactionError::invalid_state(
                    "transaction id must be set or the client must have an operator",
                ))
            }
        };
        let node_account_ids = match &self.node_account_ids {
            Some(ids) => ids.clone(),
            None => {
                let ids = client.node_account_ids();
                if ids.is_empty() {
                    return Err(TransactionError::invalid_state(
                        "client network has no nodes to submit to",
                    ));
                }
                ids
            }
        };

        let mut frozen = self.clone();
        frozen.transaction_id = Some(transaction_id);
        frozen.node_account_ids = Some(node_account_ids);
        frozen.max_transaction_fee = frozen
            .max_transaction_fee
            .or(client.default_max_transaction_fee());
        frozen.valid_duration = frozen
            .valid_duration
            .or(Some(client.default_valid_duration()));
        if client.auto_validate_checksums() {
            frozen.validate_checksums(client.ledger_id())?;
        }
        frozen.frozen = true;
        *self = frozen;
        Ok(self)
    }

    pub fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.data.validate_checksums(ledger)?;
        self.transaction_id.validate_checksums(ledger)?;
        self.node_account_ids.validate_checksums(ledger)
    }

    pub fn method(&self) -> Method {
        self.data.method()
    }

    /// Body addressed to the first node; pure and repeatable.
    pub fn build(&self) -> proto::TransactionBody {
        let node = self
            .node_account_ids
            .as_ref()
            .and_then(|ids| ids.first().copied());
        self.build_for_node(node)
    }

    pub fn build_for_node(&self, node_account_id: Option<AccountId>) -> proto::TransactionBody {
        let fee = self
            .max_transaction_fee
            .unwrap_or_else(|| self.data.default_max_transaction_fee());
        proto::TransactionBody {
            transaction_id: self.transaction_id.map(Into::into),
            node_account_id: node_account_id.map(Into::into),
            transaction_fee: u64::try_from(fee.to_tinybars()).unwrap_or_default(),
            transaction_valid_duration: Some(
                self.valid_duration.unwrap_or(DEFAULT_VALID_DURATION).into(),
            ),
            memo: self.memo.clone(),
            data: Some(self.data.to_body_data()),
        }
    }

    /// Encoded body bytes per target node, in node order.
    fn body_bytes(&self) -> Vec<Vec<u8>> {
        match &self.node_account_ids {
            Some(ids) => ids
                .iter()
                .map(|id| self.build_for_node(Some(*id)).encode_to_vec())
                .collect(),
            None => vec![self.build_for_node(None).encode_to_vec()],
        }
    }

    /// Signs every node body. Signing twice with the same key is a no-op.
    pub fn sign<S: Signer + ?Sized>(&mut self, signer: &S) -> Result<&mut Self, TransactionError> {
        if !self.is_frozen() {
            return Err(TransactionError::invalid_state(
                "transaction must be frozen before it is signed",
            ));
        }
        let public_key = signer.public_key();
        if self
            .signatures
            .iter()
            .any(|entry| entry.public_key == public_key)
        {
            return Ok(self);
        }
        let per_node = self
            .body_bytes()
            .iter()
            .map(|body| signer.sign(body))
            .collect::<Result<_, _>>()?;
        self.signatures.push(SignatureEntry {
            public_key,
            per_node,
        });
        Ok(self)
    }

    /// Signed envelopes, one per node.
    pub fn to_wire(&self) -> Vec<proto::Transaction> {
        self.body_bytes()
            .into_iter()
            .enumerate()
            .map(|(index, body_bytes)| {
                let sig_pair = self
                    .signatures
                    .iter()
                    .filter_map(|entry| {
                        let signature = entry.per_node.get(index)?.clone();
                        Some(signature_pair(&entry.public_key, signature))
                    })
                    .collect();
                let signed = proto::SignedTransaction {
                    body_bytes,
                    sig_map: Some(proto::SignatureMap { sig_pair }),
                };
                proto::Transaction {
                    signed_transaction_bytes: signed.encode_to_vec(),
                }
            })
            .collect()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        proto::TransactionList {
            transaction_list: self.to_wire(),
        }
        .encode_to_vec()
    }

    /// SHA-384 of the envelope sent to the first node.
    pub fn transaction_hash(&self) -> Result<TransactionHash, TransactionError> {
        if !self.is_frozen() {
            return Err(TransactionError::invalid_state(
                "transaction must be frozen before it can be hashed",
            ));
        }
        let envelope = self.to_wire().into_iter().next().ok_or_else(|| {
            TransactionError::invalid_state("transaction has no node bodies")
        })?;
        Ok(ledger_crypto::transaction_hash(&envelope.encode_to_vec()))
    }

    /// Inverse of [`Transaction::to_bytes`]. The result is not frozen unless it
    /// carries signatures.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        let list = proto::TransactionList::decode(bytes)?;
        if list.transaction_list.is_empty() {
            return Err(TransactionError::invalid_argument(
                "transaction list is empty",
            ));
        }

        let mut bodies = Vec::with_capacity(list.transaction_list.len());
        let mut signatures: Vec<SignatureEntry> = Vec::new();
        for (index, envelope) in list.transaction_list.iter().enumerate() {
            let signed = proto::SignedTransaction::decode(envelope.signed_transaction_bytes.as_slice())?;
            bodies.push(proto::TransactionBody::decode(signed.body_bytes.as_slice())?);
            for pair in signed.sig_map.unwrap_or_default().sig_pair {
                let public_key = PublicKey::from_bytes(&pair.pub_key_prefix)?;
                let signature = match pair.signature {
                    Some(proto::signature_pair::Signature::Ed25519(bytes))
                    | Some(proto::signature_pair::Signature::EcdsaSecp256k1(bytes)) => bytes,
                    None => continue,
                };
                match signatures
                    .iter()
                    .position(|entry| entry.public_key == public_key)
                {
                    Some(at) if signatures[at].per_node.len() == index => {
                        signatures[at].per_node.push(signature)
                    }
                    None if index == 0 => signatures.push(SignatureEntry {
                        public_key,
                        per_node: vec![signature],
                    }),
                    _ => {
                        return Err(TransactionError::invalid_argument(format!(
                            "signature by {public_key} does not cover every node body"
                        )))
                    }
                }
            }
        }
        if signatures
            .iter()
            .any(|entry| entry.per_node.len() != bodies.len())
        {
            return Err(TransactionError::invalid_argument(
                "signatures do not cover every node body",
            ));
        }

        let node_account_ids = bodies
            .iter()
            .map(|body| body.node_account_id.clone().map(AccountId::try_from).transpose())
            .collect::<Result<Option<Vec<_>>, _>>()?;
        let first = bodies.remove(0);
        let differs = bodies.iter().any(|body| {
            proto::TransactionBody {
                node_account_id: first.node_account_id.clone(),
                ..body.clone()
            } != first
        });
        if differs {
            return Err(TransactionError::invalid_argument(
                "transaction bodies differ across nodes",
            ));
        }

        let data = first
            .data
            .ok_or_else(|| TransactionError::invalid_argument("transaction body has no data"))?;
        Ok(Self {
            data: D::from_any(AnyTransactionData::from_body_data(data)?)?,
            transaction_id: first.transaction_id.map(TryInto::try_into).transpose()?,
            node_account_ids,
            max_transaction_fee: Some(Hbar::from_tinybars(
                i64::try_from(first.transaction_fee).unwrap_or(i64::MAX),
            )),
            valid_duration: first.transaction_valid_duration.map(Into::into),
            memo: first.memo,
            frozen: false,
            signatures,
        })
    }
}

fn signature_pair(public_key: &PublicKey, signature: Vec<u8>) -> proto::SignaturePair {
    let signature = match public_key {
        PublicKey::Ed25519(_) => proto::signature_pair::Signature::Ed25519(signature),
        PublicKey::Ecdsa(_) => proto::signature_pair::Signature::EcdsaSecp256k1(signature),
    };
    proto::SignaturePair {
        pub_key_prefix: public_key.to_bytes_raw(),
        signature: Some(signature),
    }
}

/// Fails with `InvalidArgument` when `len` exceeds `max` entries of `field`.
pub(crate) fn check_max_len(len: usize, max: usize, field: &str) -> Result<(), TransactionError> {
    if len > max {
        return Err(TransactionError::invalid_argument(format!(
            "{field} is limited to {max} entries, got {len}"
        )));
    }
    Ok(())
}

/// Fails with `InvalidArgument` when `text` is longer than `max` UTF-8 bytes.
pub(crate) fn check_max_bytes(text: &str, max: usize, field: &str) -> Result<(), TransactionError> {
    if text.len() > max {
        return Err(TransactionError::invalid_argument(format!(
            "{field} is limited to {max} bytes, got {}",
            text.len()
        )));
    }
    Ok(())
}

/// Appends `item` unless the list is already at `max`; the list is untouched on error.
pub(crate) fn push_bounded<T>(
    items: &mut Vec<T>,
    item: T,
    max: usize,
    field: &str,
) -> Result<(), TransactionError> {
    check_max_len(items.len() + 1, max, field)?;
    items.push(item);
    Ok(())
}
