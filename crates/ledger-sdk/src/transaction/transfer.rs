use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{AccountId, Hbar, IdError, LedgerId, NftId, TokenId, ValidateChecksums};

use super::{Transaction, TransactionData};
use crate::{
    error::TransactionError,
    token_transfers::{hbar_transfers_from_wire, HbarTransfer, TokenTransferBook, TokenTransferList},
    transport::Method,
};

/// Moves hbar, fungible tokens and NFTs between accounts.
///
/// An `approved_*` entry debits an owner through an allowance the owner granted
/// to the payer, so the payer itself never appears in the list.
pub type TransferTransaction = Transaction<TransferData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferData {
    hbar_transfers: Vec<HbarTransfer>,
    token_transfers: TokenTransferBook,
}

impl TransferData {
    fn add_hbar_transfer(
        &mut self,
        account_id: AccountId,
        amount: Hbar,
        is_approval: bool,
    ) -> Result<(), TransactionError> {
        let existing = self.hbar_transfers.iter().position(|transfer| {
            transfer.account_id == account_id && transfer.is_approval == is_approval
        });
        match existing {
            Some(index) => {
                let total = self.hbar_transfers[index]
                    .amount
                    .checked_add(amount)
                    .ok_or_else(|| {
                        TransactionError::invalid_argument(format!(
                            "hbar transfer for {account_id} overflows"
                        ))
                    })?;
                self.hbar_transfers[index].amount = total;
            }
            None => self.hbar_transfers.push(HbarTransfer {
                account_id,
                amount,
                is_approval,
            }),
        }
        Ok(())
    }
}

impl TransferTransaction {
    pub fn hbar_transfers(&self) -> &[HbarTransfer] {
        &self.data().hbar_transfers
    }

    pub fn token_transfers(&self) -> &[TokenTransferList] {
        self.data().token_transfers.lists()
    }

    /// Adds `amount` to the account; negative debits, positive credits.
    pub fn hbar_transfer(
        &mut self,
        account_id: AccountId,
        amount: Hbar,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.add_hbar_transfer(account_id, amount, false)?;
        Ok(self)
    }

    pub fn approved_hbar_transfer(
        &mut self,
        owner_id: AccountId,
        amount: Hbar,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.add_hbar_transfer(owner_id, amount, true)?;
        Ok(self)
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

    /// Like [`Self::token_transfer`], and the network rejects the transfer unless
    /// the token has `decimals` decimals.
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

    pub fn approved_token_transfer_with_decimals(
        &mut self,
        token_id: TokenId,
        owner_id: AccountId,
        amount: i64,
        decimals: u32,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.token_transfers.add_token_transfer(
            token_id,
            owner_id,
            amount,
            true,
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

impl ValidateChecksums for TransferData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        for transfer in &self.hbar_transfers {
            transfer.account_id.validate_checksum(ledger)?;
        }
        for list in self.token_transfers.lists() {
            list.validate_checksums(ledger)?;
        }
        Ok(())
    }
}

impl TransactionData for TransferData {
    fn method(&self) -> Method {
        Method::crypto("cryptoTransfer")
    }

    fn to_body_data(&self) -> Data {
        let mut hbar_transfers = self.hbar_transfers.clone();
        hbar_transfers.sort_by_key(|transfer| (transfer.account_id, transfer.is_approval));
        let transfers = (!hbar_transfers.is_empty()).then(|| proto::TransferList {
            account_amounts: hbar_transfers
                .iter()
                .map(|transfer| proto::AccountAmount {
                    account_id: Some(transfer.account_id.into()),
                    amount: transfer.amount.to_tinybars(),
                    is_approval: transfer.is_approval,
                })
                .collect(),
        });
        Data::CryptoTransfer(proto::CryptoTransferTransactionBody {
            transfers,
            token_transfers: self.token_transfers.to_wire(),
        })
    }

    fn default_max_transaction_fee(&self) -> Hbar {
        Hbar::new(1)
    }
}

impl TryFrom<proto::CryptoTransferTransactionBody> for TransferData {
    type Error = TransactionError;

    fn try_from(body: proto::CryptoTransferTransactionBody) -> Result<Self, Self::Error> {
        Ok(Self {
            hbar_transfers: hbar_transfers_from_wire(body.transfers)?,
            token_transfers: TokenTransferBook::from_wire(body.token_transfers)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use ledger_proto::services::transaction_body::Data;
    use ledger_types::{AccountId, Hbar, TokenId};

    use super::TransferTransaction;
    use crate::{
        error::TransactionError,
        transaction::{FromAnyTransactionData, TransactionData},
    };

    fn account(num: u64) -> AccountId {
        AccountId::from_num(num)
    }

    #[test]
    fn same_account_and_approval_flag_merge() {
        let mut tx = TransferTransaction::new();
        tx.hbar_transfer(account(5), Hbar::from_tinybars(-3))
            .unwrap()
            .hbar_transfer(account(5), Hbar::from_tinybars(-2))
            .unwrap()
            .approved_hbar_transfer(account(5), Hbar::from_tinybars(-1))
            .unwrap();
        assert_eq!(tx.hbar_transfers().len(), 2);
        assert_eq!(tx.hbar_transfers()[0].amount, Hbar::from_tinybars(-5));
    }

    #[test]
    fn body_is_sorted_regardless_of_insertion_order() {
        let mut a = TransferTransaction::new();
        a.hbar_transfer(account(9), Hbar::new(1))
            .unwrap()
            .hbar_transfer(account(2), Hbar::new(-1))
            .unwrap();
        let mut b = TransferTransaction::new();
        b.hbar_transfer(account(2), Hbar::new(-1))
            .unwrap()
            .hbar_transfer(account(9), Hbar::new(1))
            .unwrap();
        assert_eq!(a.build(), b.build());
    }

    #[test]
    fn decimals_must_agree_per_token() {
        let token = TokenId::from_num(77);
        let mut tx = TransferTransaction::new();
        tx.token_transfer_with_decimals(token, account(2), -10, 2)
            .unwrap();
        let err = tx
            .token_transfer_with_decimals(token, account(3), 10, 3)
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidArgument(_)));
        assert_eq!(tx.token_transfers()[0].transfers.len(), 1);
    }

    #[test]
    fn nft_transfers_survive_the_wire() {
        let token = TokenId::from_num(77);
        let mut tx = TransferTransaction::new();
        tx.nft_transfer(token.nft(4), account(2), account(3))
            .unwrap()
            .approved_nft_transfer(token.nft(5), account(2), account(3))
            .unwrap();
        let Some(Data::CryptoTransfer(body)) = tx.build().data else {
            panic!("expected a transfer body");
        };
        let data = super::TransferData::try_from(body).unwrap();
        let rebuilt = super::TransferData::from_any(data.clone().into()).unwrap();
        assert_eq!(rebuilt.to_body_data(), tx.data().to_body_data());
        assert_eq!(data.token_transfers.lists()[0].nft_transfers.len(), 2);
    }
}
