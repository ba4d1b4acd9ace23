use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{AccountId, IdError, LedgerId, NftId, TokenId, ValidateChecksums};

use super::{Transaction, TransactionData};
use crate::{
    error::TransactionError,
    token_transfers::{TokenTransferBook, TokenTransferList},
    transport::Method,
};

/// Sends tokens to receivers that may not be associated with them yet. Transfers
/// the receiver cannot accept are held as pending airdrops.
pub type TokenAirdropTransaction = Transaction<TokenAirdropData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenAirdropData {
    token_transfers: TokenTransferBook,
}

impl TokenAirdropTransaction {
    pub fn token_transfers(&self) -> &[TokenTransferList] {
        self.data().token_transfers.lists()
    }

    pub fn token_transfer(
        &mut self,
        token_id: TokenId,
        account_id: AccountId,
        amount: i64,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?
            .token_transfers
            .add_token_transfer(token_id, account_id, amount, false, None)?;
        Ok(self)
    }

    pub fn approved_token_transfer(
        &mut self,
        token_id: TokenId,
        owner_id: AccountId,
        amount: i64,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?
            .token_transfers
            .add_token_transfer(token_id, owner_id, amount, true, None)?;
        Ok(self)
    }

    pub fn token_transfer_with_decimals(
        &mut self,
        token_id: TokenId,
        account_id: AccountId,
        amount: i64,
        decimals: u32,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.token_transfers.add_token_transfer(
            token_id,
            account_id,
            amount,
            false,
            Some(decimals),
        )?;
        Ok(self)
    }

    pub fn nft_transfer(
        &mut self,
        nft_id: NftId,
        sender: AccountId,
        receiver: AccountId,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?
            .token_transfers
            .add_nft_transfer(nft_id, sender, receiver, false);
        Ok(self)
    }

    pub fn approved_nft_transfer(
        &mut self,
        nft_id: NftId,
        sender: AccountId,
        receiver: AccountId,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?
            .token_transfers
            .add_nft_transfer(nft_id, sender, receiver, true);
        Ok(self)
    }
}

impl ValidateChecksums for TokenAirdropData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.token_transfers.lists().validate_checksums(ledger)
    }
}

impl TransactionData for TokenAirdropData {
    fn method(&self) -> Method {
        Method::token("airdropTokens")
    }

    fn to_body_data(&self) -> Data {
        Data::TokenAirdrop(proto::TokenAirdropTransactionBody {
            token_transfers: self.token_transfers.to_wire(),
        })
    }

    fn check_freeze(&self) -> Result<(), TransactionError> {
        if self.token_transfers.lists().is_empty() {
            return Err(TransactionError::invalid_state(
                "an airdrop needs at least one token transfer",
            ));
        }
        Ok(())
    }
}

impl TryFrom<proto::TokenAirdropTransactionBody> for TokenAirdropData {
    type Error = TransactionError;

    fn try_from(body: proto::TokenAirdropTransactionBody) -> Result<Self, Self::Error> {
        Ok(Self {
            token_transfers: TokenTransferBook::from_wire(body.token_transfers)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use ledger_types::{AccountId, TokenId};

    use super::TokenAirdropTransaction;
    use crate::{error::TransactionError, transaction_id::TransactionId};

    #[test]
    fn empty_airdrop_cannot_freeze() {
        let mut tx = TokenAirdropTransaction::new();
        tx.set_transaction_id(TransactionId::with_valid_start(
            AccountId::from_num(2),
            UNIX_EPOCH + Duration::from_secs(10),
        ))
        .unwrap()
        .set_node_account_ids([AccountId::from_num(3)])
        .unwrap();
        assert!(matches!(tx.freeze(), Err(TransactionError::InvalidState(_))));

        tx.token_transfer(TokenId::from_num(9), AccountId::from_num(2), -5)
            .unwrap()
            .token_transfer(TokenId::from_num(9), AccountId::from_num(4), 5)
            .unwrap();
        tx.freeze().unwrap();
        assert!(tx.is_frozen());
    }

    #[test]
    fn nft_airdrops_group_under_their_token() {
        let token = TokenId::from_num(9);
        let mut tx = TokenAirdropTransaction::new();
        tx.nft_transfer(token.nft(2), AccountId::from_num(2), AccountId::from_num(4))
            .unwrap()
            .nft_transfer(token.nft(1), AccountId::from_num(2), AccountId::from_num(5))
            .unwrap();
        assert_eq!(tx.token_transfers().len(), 1);
        assert_eq!(tx.token_transfers()[0].nft_transfers.len(), 2);
    }
}
