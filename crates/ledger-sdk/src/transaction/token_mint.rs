use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{IdError, LedgerId, TokenId, ValidateChecksums};

use super::{check_max_len, push_bounded, Transaction, TransactionData};
use crate::{error::TransactionError, transport::Method};

const MAX_MINT_METADATA: usize = 10;

/// Mints fungible supply, or one NFT per metadata entry.
pub type TokenMintTransaction = Transaction<TokenMintData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMintData {
    token_id: Option<TokenId>,
    amount: u64,
    metadata: Vec<Vec<u8>>,
}

impl TokenMintTransaction {
    pub fn token_id(&self) -> Option<TokenId> {
        self.data().token_id
    }

    pub fn set_token_id(&mut self, token_id: TokenId) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.token_id = Some(token_id);
        Ok(self)
    }

    /// Units of a fungible token, in the token's smallest denomination.
    pub fn amount(&self) -> u64 {
        self.data().amount
    }

    pub fn set_amount(&mut self, amount: u64) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.amount = amount;
        Ok(self)
    }

    pub fn metadata(&self) -> &[Vec<u8>] {
        &self.data().metadata
    }

    pub fn add_metadata(&mut self, metadata: Vec<u8>) -> Result<&mut Self, TransactionError> {
        push_bounded(
            &mut self.data_mut()?.metadata,
            metadata,
            MAX_MINT_METADATA,
            "nft metadata",
        )?;
        Ok(self)
    }

    pub fn set_metadata(&mut self, metadata: Vec<Vec<u8>>) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        check_max_len(metadata.len(), MAX_MINT_METADATA, "nft metadata")?;
        self.data_mut()?.metadata = metadata;
        Ok(self)
    }
}

impl ValidateChecksums for TokenMintData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.token_id.validate_checksums(ledger)
    }
}

impl TransactionData for TokenMintData {
    fn method(&self) -> Method {
        Method::token("mintToken")
    }

    fn to_body_data(&self) -> Data {
        Data::TokenMint(proto::TokenMintTransactionBody {
            token: self.token_id.map(Into::into),
            amount: self.amount,
            metadata: self.metadata.clone(),
        })
    }

    fn check_freeze(&self) -> Result<(), TransactionError> {
        if self.amount > 0 && !self.metadata.is_empty() {
            return Err(TransactionError::invalid_state(
                "a mint carries either a fungible amount or nft metadata, not both",
            ));
        }
        Ok(())
    }
}

impl TryFrom<proto::TokenMintTransactionBody> for TokenMintData {
    type Error = TransactionError;

    fn try_from(body: proto::TokenMintTransactionBody) -> Result<Self, Self::Error> {
        check_max_len(body.metadata.len(), MAX_MINT_METADATA, "nft metadata")?;
        Ok(Self {
            token_id: body.token.map(Into::into),
            amount: body.amount,
            metadata: body.metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use ledger_types::{AccountId, TokenId};

    use super::TokenMintTransaction;
    use crate::{error::TransactionError, transaction_id::TransactionId};

    #[test]
    fn metadata_is_capped_at_ten_entries() {
        let mut tx = TokenMintTransaction::new();
        tx.set_metadata(vec![vec![1]; 10]).unwrap();
        let err = tx.add_metadata(vec![2]).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidArgument(_)));
        assert_eq!(tx.metadata().len(), 10);
    }

    #[test]
    fn amount_and_metadata_together_cannot_freeze() {
        let mut tx = TokenMintTransaction::new();
        tx.set_token_id(TokenId::from_num(5))
            .unwrap()
            .set_amount(10)
            .unwrap()
            .add_metadata(b"ipfs://a".to_vec())
            .unwrap()
            .set_transaction_id(TransactionId::generate(AccountId::from_num(2)))
            .unwrap()
            .set_node_account_ids([AccountId::from_num(3)])
            .unwrap();
        assert!(matches!(tx.freeze(), Err(TransactionError::InvalidState(_))));
        tx.set_amount(0).unwrap().freeze().unwrap();
    }
}
