//! Token and NFT movements shared by transfers and airdrops.

use ledger_proto::services as proto;
use ledger_types::{AccountId, Hbar, IdError, LedgerId, NftId, TokenId, ValidateChecksums, ValidationError};

use crate::error::TransactionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HbarTransfer {
    pub account_id: AccountId,
    pub amount: Hbar,
    /// Debit spends an allowance the account granted to the payer.
    pub is_approval: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTransfer {
    pub account_id: AccountId,
    pub amount: i64,
    pub is_approval: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NftTransfer {
    pub sender: AccountId,
    pub receiver: AccountId,
    pub serial: i64,
    pub is_approval: bool,
}

/// Every movement of one token within a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransferList {
    pub token_id: TokenId,
    pub transfers: Vec<TokenTransfer>,
    pub nft_transfers: Vec<NftTransfer>,
    pub expected_decimals: Option<u32>,
}

impl TokenTransferList {
    fn new(token_id: TokenId) -> Self {
        Self {
            token_id,
            transfers: Vec::new(),
            nft_transfers: Vec::new(),
            expected_decimals: None,
        }
    }
}

impl ValidateChecksums for TokenTransferList {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.token_id.validate_checksum(ledger)?;
        for transfer in &self.transfers {
            transfer.account_id.validate_checksum(ledger)?;
        }
        for transfer in &self.nft_transfers {
            transfer.sender.validate_checksum(ledger)?;
            transfer.receiver.validate_checksum(ledger)?;
        }
        Ok(())
    }
}

/// Token transfer lists in insertion order; sorted canonically when encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TokenTransferBook {
    lists: Vec<TokenTransferList>,
}

impl TokenTransferBook {
    pub(crate) fn lists(&self) -> &[TokenTransferList] {
        &self.lists
    }

    fn position(&self, token_id: TokenId) -> Option<usize> {
        self.lists.iter().position(|list| list.token_id == token_id)
    }

    fn list_mut(&mut self, token_id: TokenId) -> &mut TokenTransferList {
        let index = match self.position(token_id) {
            Some(index) => index,
            None => {
                self.lists.push(TokenTransferList::new(token_id));
                self.lists.len() - 1
            }
        };
        &mut self.lists[index]
    }

    /// Adds `amount` to the entry for `(account_id, is_approval)`, creating it if needed.
    pub(crate) fn add_token_transfer(
        &mut self,
        token_id: TokenId,
        account_id: AccountId,
        amount: i64,
        is_approval: bool,
        expected_decimals: Option<u32>,
    ) -> Result<(), TransactionError> {
        let mut merged = None;
        if let Some(list) = self.position(token_id).map(|index| &self.lists[index]) {
            if let (Some(current), Some(decimals)) = (list.expected_decimals, expected_decimals) {
                if current != decimals {
                    return Err(TransactionError::invalid_argument(format!(
                        "token {token_id} already expects {current} decimals, got {decimals}"
                    )));
                }
            }
            if let Some(index) = list.transfers.iter().position(|transfer| {
                transfer.account_id == account_id && transfer.is_approval == is_approval
            }) {
                let total = list.transfers[index]
                    .amount
                    .checked_add(amount)
                    .ok_or_else(|| {
                        TransactionError::invalid_argument(format!(
                            "transfer of token {token_id} for {account_id} overflows"
                        ))
                    })?;
                merged = Some((index, total));
            }
        }

        let list = self.list_mut(token_id);
        if expected_decimals.is_some() {
            list.expected_decimals = expected_decimals;
        }
        match merged {
            Some((index, total)) => list.transfers[index].amount = total,
            None => list.transfers.push(TokenTransfer {
                account_id,
                amount,
                is_approval,
            }),
        }
        Ok(())
    }

    pub(crate) fn add_nft_transfer(
        &mut self,
        nft_id: NftId,
        sender: AccountId,
        receiver: AccountId,
        is_approval: bool,
    ) {
        self.list_mut(nft_id.token_id).nft_transfers.push(NftTransfer {
            sender,
            receiver,
            serial: nft_id.serial,
            is_approval,
        });
    }

    pub(crate) fn to_wire(&self) -> Vec<proto::TokenTransferList> {
        let mut lists = self.lists.clone();
        lists.sort_by_key(|list| list.token_id);
        lists
            .into_iter()
            .map(|mut list| {
                list.transfers
                    .sort_by_key(|transfer| (transfer.account_id, transfer.is_approval));
                list.nft_transfers.sort_by_key(|transfer| {
                    (transfer.sender, transfer.receiver, transfer.serial)
                });
                proto::TokenTransferList {
                    token: Some(list.token_id.into()),
                    transfers: list
                        .transfers
                        .iter()
                        .map(|transfer| proto::AccountAmount {
                            account_id: Some(transfer.account_id.into()),
                            amount: transfer.amount,
                            is_approval: transfer.is_approval,
                        })
                        .collect(),
                    nft_transfers: list
                        .nft_transfers
                        .iter()
                        .map(|transfer| proto::NftTransfer {
                            sender_account_id: Some(transfer.sender.into()),
                            receiver_account_id: Some(transfer.receiver.into()),
                            serial_number: transfer.serial,
                            is_approval: transfer.is_approval,
                        })
                        .collect(),
                    expected_decimals: list
                        .expected_decimals
                        .map(|value| proto::UInt32Value { value }),
                }
            })
            .collect()
    }

    pub(crate) fn from_wire(
        lists: Vec<proto::TokenTransferList>,
    ) -> Result<Self, TransactionError> {
        let lists = lists
            .into_iter()
            .map(token_transfer_list_from_wire)
            .collect::<Result<_, _>>()?;
        Ok(Self { lists })
    }
}

pub(crate) fn token_transfer_list_from_wire(
    list: proto::TokenTransferList,
) -> Result<TokenTransferList, ValidationError> {
    let token = list
        .token
        .ok_or(ValidationError::MissingField("token_transfer_list.token"))?;
    Ok(TokenTransferList {
        token_id: token.into(),
        transfers: list
            .transfers
            .into_iter()
            .map(|amount| {
                Ok(TokenTransfer {
                    account_id: account_from_wire(amount.account_id)?,
                    amount: amount.amount,
                    is_approval: amount.is_approval,
                })
            })
            .collect::<Result<_, ValidationError>>()?,
        nft_transfers: list
            .nft_transfers
            .into_iter()
            .map(|transfer| {
                Ok(NftTransfer {
                    sender: account_from_wire(transfer.sender_account_id)?,
                    receiver: account_from_wire(transfer.receiver_account_id)?,
                    serial: transfer.serial_number,
                    is_approval: transfer.is_approval,
                })
            })
            .collect::<Result<_, ValidationError>>()?,
        expected_decimals: list.expected_decimals.map(|wrapper| wrapper.value),
    })
}

pub(crate) fn account_from_wire(
    account_id: Option<proto::AccountId>,
) -> Result<AccountId, ValidationError> {
    account_id
        .ok_or(ValidationError::MissingField("account_id"))?
        .try_into()
}

pub(crate) fn hbar_transfers_from_wire(
    transfers: Option<proto::TransferList>,
) -> Result<Vec<HbarTransfer>, ValidationError> {
    transfers
        .map(|list| list.account_amounts)
        .unwrap_or_default()
        .into_iter()
        .map(|amount| {
            Ok(HbarTransfer {
                account_id: account_from_wire(amount.account_id)?,
                amount: Hbar::from_tinybars(amount.amount),
                is_approval: amount.is_approval,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ledger_types::{AccountId, TokenId};

    use super::TokenTransferBook;
    use crate::error::TransactionError;

    #[test]
    fn same_account_and_approval_merge() {
        let token = TokenId::from_num(5);
        let mut book = TokenTransferBook::default();
        book.add_token_transfer(token, AccountId::from_num(1), -3, false, None)
            .unwrap();
        book.add_token_transfer(token, AccountId::from_num(1), -2, false, None)
            .unwrap();
        book.add_token_transfer(token, AccountId::from_num(1), -1, true, None)
            .unwrap();
        let list = &book.lists()[0];
        assert_eq!(list.transfers.len(), 2);
        assert_eq!(list.transfers[0].amount, -5);
    }

    #[test]
    fn conflicting_decimals_leave_the_book_unchanged() {
        let token = TokenId::from_num(5);
        let mut book = TokenTransferBook::default();
        book.add_token_transfer(token, AccountId::from_num(1), -3, false, Some(2))
            .unwrap();
        let before = book.clone();
        let err = book
            .add_token_transfer(token, AccountId::from_num(2), 3, false, Some(8))
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidArgument(_)));
        assert_eq!(book, before);
    }

    #[test]
    fn wire_form_is_sorted() {
        let mut book = TokenTransferBook::default();
        book.add_token_transfer(TokenId::from_num(9), AccountId::from_num(2), 1, false, None)
            .unwrap();
        book.add_token_transfer(TokenId::from_num(3), AccountId::from_num(7), 1, false, None)
            .unwrap();
        book.add_token_transfer(TokenId::from_num(3), AccountId::from_num(4), -1, false, None)
            .unwrap();
        let wire = book.to_wire();
        assert_eq!(wire[0].token.as_ref().unwrap().token_num, 3);
        assert_eq!(wire[1].token.as_ref().unwrap().token_num, 9);
        assert_eq!(wire[0].transfers[0].amount, -1);
    }
}
