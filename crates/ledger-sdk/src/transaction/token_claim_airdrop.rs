use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{IdError, LedgerId, ValidateChecksums, ValidationError};

use super::{check_max_len, push_bounded, Transaction, TransactionData};
use crate::{error::TransactionError, pending_airdrop::PendingAirdropId, transport::Method};

pub(crate) const MAX_PENDING_AIRDROPS: usize = 10;

/// Accepts airdrops held for the receiver.
pub type TokenClaimAirdropTransaction = Transaction<TokenClaimAirdropData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenClaimAirdropData {
    pending_airdrop_ids: Vec<PendingAirdropId>,
}

impl TokenClaimAirdropTransaction {
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

impl ValidateChecksums for TokenClaimAirdropData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.pending_airdrop_ids.validate_checksums(ledger)
    }
}

impl TransactionData for TokenClaimAirdropData {
    fn method(&self) -> Method {
        Method::token("claimAirdrop")
    }

    fn to_body_data(&self) -> Data {
        Data::TokenClaimAirdrop(proto::TokenClaimAirdropTransactionBody {
            pending_airdrops: self.pending_airdrop_ids.iter().copied().map(Into::into).collect(),
        })
    }
}

pub(crate) fn pending_airdrops_from_wire(
    ids: Vec<proto::PendingAirdropId>,
) -> Result<Vec<PendingAirdropId>, TransactionError> {
    check_max_len(ids.len(), MAX_PENDING_AIRDROPS, "pending airdrop ids")?;
    Ok(ids
        .into_iter()
        .map(PendingAirdropId::try_from)
        .collect::<Result<_, ValidationError>>()?)
}

impl TryFrom<proto::TokenClaimAirdropTransactionBody> for TokenClaimAirdropData {
    type Error = TransactionError;

    fn try_from(body: proto::TokenClaimAirdropTransactionBody) -> Result<Self, Self::Error> {
        Ok(Self {
            pending_airdrop_ids: pending_airdrops_from_wire(body.pending_airdrops)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use ledger_types::{AccountId, TokenId};

    use super::{TokenClaimAirdropData, TokenClaimAirdropTransaction};
    use crate::{
        error::TransactionError,
        pending_airdrop::{PendingAirdropId, TokenReference},
        transaction::TransactionData,
    };

    fn airdrop(serial: i64) -> PendingAirdropId {
        PendingAirdropId {
            sender: AccountId::from_num(2),
            receiver: AccountId::from_num(3),
            token: TokenReference::Nft(TokenId::from_num(9).nft(serial)),
        }
    }

    #[test]
    fn eleventh_pending_airdrop_is_rejected() {
        let mut tx = TokenClaimAirdropTransaction::new();
        tx.set_pending_airdrop_ids((1..=10).map(airdrop)).unwrap();
        let err = tx.add_pending_airdrop_id(airdrop(11)).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidArgument(_)));
        assert_eq!(tx.pending_airdrop_ids().len(), 10);

        let err = tx.set_pending_airdrop_ids((1..=11).map(airdrop)).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidArgument(_)));
        assert_eq!(tx.pending_airdrop_ids().len(), 10);
    }

    #[test]
    fn ids_survive_the_wire() {
        let mut tx = TokenClaimAirdropTransaction::new();
        tx.add_pending_airdrop_id(airdrop(1))
            .unwrap()
            .add_pending_airdrop_id(PendingAirdropId {
                token: TokenReference::Fungible(TokenId::from_num(8)),
                ..airdrop(0)
            })
            .unwrap();
        let ledger_proto::services::transaction_body::Data::TokenClaimAirdrop(body) =
            tx.data().to_body_data()
        else {
            panic!("expected a claim body");
        };
        assert_eq!(&TokenClaimAirdropData::try_from(body).unwrap(), tx.data());
    }
}
