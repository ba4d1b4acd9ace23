use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{IdError, LedgerId, ValidateChecksums};

use super::{
    check_max_len, push_bounded,
    token_claim_airdrop::{pending_airdrops_from_wire, MAX_PENDING_AIRDROPS},
    Transaction, TransactionData,
};
use crate::{error::TransactionError, pending_airdrop::PendingAirdropId, transport::Method};

/// Withdraws airdrops the sender made that are still pending.
pub type TokenCancelAirdropTransaction = Transaction<TokenCancelAirdropData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCancelAirdropData {
    pending_airdrop_ids: Vec<PendingAirdropId>,
}

impl TokenCancelAirdropTransaction {
    pub fn pending_airdrop_ids(&self) -> &[PendingAirdropId] {
        &self.data().pending_airdrop_ids
    }

    pub fn add_pending_airdrop_id(
        &mut self,
        id: PendingAirdropId,
    ) -> Result<&mut Self, TransactionError> {
        push_bounded(
            &mut self.data_mut()?.pending_airdrop_ids,
            id,
            MAX_PENDING_AIRDROPS,
            "pending airdrop ids",
        )?;
        Ok(self)
    }

    pub fn set_pending_airdrop_ids(
        &mut self,
        ids: impl IntoIterator<Item = PendingAirdropId>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let ids: Vec<_> = ids.into_iter().collect();
        check_max_len(ids.len(), MAX_PENDING_AIRDROPS, "pending airdrop ids")?;
        self.data_mut()?.pending_airdrop_ids = ids;
        Ok(self)
    }
}

impl ValidateChecksums for TokenCancelAirdropData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.pending_airdrop_ids.validate_checksums(ledger)
    }
}

impl TransactionData for TokenCancelAirdropData {
    fn method(&self) -> Method {
        Method::token("cancelAirdrop")
    }

    fn to_body_data(&self) -> Data {
        Data::TokenCancelAirdrop(proto::TokenCancelAirdropTransactionBody {
            pending_airdrops: self.pending_airdrop_ids.iter().copied().map(Into::into).collect(),
        })
    }
}

impl TryFrom<proto::TokenCancelAirdropTransactionBody> for TokenCancelAirdropData {
    type Error = TransactionError;

    fn try_from(body: proto::TokenCancelAirdropTransactionBody) -> Result<Self, Self::Error> {
        Ok(Self {
            pending_airdrop_ids: pending_airdrops_from_wire(body.pending_airdrops)?,
        })
    }
}
