use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{AccountId, IdError, LedgerId, NftId, TokenId, ValidateChecksums, ValidationError};

use super::{check_max_len, push_bounded, Transaction, TransactionData};
use crate::{error::TransactionError, pending_airdrop::TokenReference, transport::Method};

const MAX_REJECTIONS: usize = 10;

/// Returns unwanted tokens and NFTs to their treasury.
pub type TokenRejectTransaction = Transaction<TokenRejectData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenRejectData {
    owner: Option<AccountId>,
    rejections: Vec<TokenReference>,
}

impl TokenRejectTransaction {
    /// Account giving the tokens back; the payer when unset.
    pub fn owner(&self) -> Option<AccountId> {
        self.data().owner
    }

    pub fn set_owner(&mut self, owner: AccountId) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.owner = Some(owner);
        Ok(self)
    }

    pub fn rejections(&self) -> &[TokenReference] {
        &self.data().rejections
    }

    pub fn add_token_id(&mut self, token_id: TokenId) -> Result<&mut Self, TransactionError> {
        self.add_rejection(TokenReference::Fungible(token_id))
    }

    pub fn add_nft_id(&mut self, nft_id: NftId) -> Result<&mut Self, TransactionError> {
        self.add_rejection(TokenReference::Nft(nft_id))
    }

    pub fn add_rejection(
        &mut self,
        reference: TokenReference,
    ) -> Result<&mut Self, TransactionError> {
        push_bounded(
            &mut self.data_mut()?.rejections,
            reference,
            MAX_REJECTIONS,
            "token rejections",
        )?;
        Ok(self)
    }

    pub fn set_rejections(
        &mut self,
        references: impl IntoIterator<Item = TokenReference>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let references: Vec<_> = references.into_iter().collect();
        check_max_len(references.len(), MAX_REJECTIONS, "token rejections")?;
        self.data_mut()?.rejections = references;
        Ok(self)
    }
}

impl ValidateChecksums for TokenRejectData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.owner.validate_checksums(ledger)?;
        self.rejections.validate_checksums(ledger)
    }
}

impl TransactionData for TokenRejectData {
    fn method(&self) -> Method {
        Method::token("rejectToken")
    }

    fn to_body_data(&self) -> Data {
        Data::TokenReject(proto::TokenRejectTransactionBody {
            owner: self.owner.map(Into::into),
            rejections: self.rejections.iter().copied().map(Into::into).collect(),
        })
    }
}

impl TryFrom<proto::TokenRejectTransactionBody> for TokenRejectData {
    type Error = TransactionError;

    fn try_from(body: proto::TokenRejectTransactionBody) -> Result<Self, Self::Error> {
        check_max_len(body.rejections.len(), MAX_REJECTIONS, "token rejections")?;
        Ok(Self {
            owner: body.owner.map(AccountId::try_from).transpose()?,
            rejections: body
                .rejections
                .into_iter()
                .map(TokenReference::try_from)
                .collect::<Result<_, ValidationError>>()?,
        })
    }
}
