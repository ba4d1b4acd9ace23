use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{AccountId, IdError, LedgerId, NftId, TokenId, ValidateChecksums, ValidationError};

use super::{Transaction, TransactionData};
use crate::{
    allowance::{AllowanceGrant, AllowanceIndex, AllowanceResource, NftSerials},
    error::TransactionError,
    transport::Method,
};

/// Removes NFT serial allowances from every spender at once.
pub type AccountAllowanceDeleteTransaction = Transaction<AccountAllowanceDeleteData>;

#[derive(Debug, Clone, Default)]
pub struct AccountAllowanceDeleteData {
    removals: AllowanceIndex,
}

impl AccountAllowanceDeleteTransaction {
    pub fn allowances(&self) -> Vec<AllowanceGrant> {
        self.data().removals.snapshot()
    }

    /// Revokes every spender's allowance over the serial. Removals for one owner and
    /// token share a single wire entry; `None` names the fee payer as owner.
    pub fn delete_all_token_nft_allowances(
        &mut self,
        nft_id: NftId,
        owner: Option<AccountId>,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.removals.revoke_serial(owner, None, nft_id);
        Ok(self)
    }
}

impl ValidateChecksums for AccountAllowanceDeleteData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.removals.validate_checksums(ledger)
    }
}

impl TransactionData for AccountAllowanceDeleteData {
    fn method(&self) -> Method {
        Method::crypto("deleteAllowances")
    }

    fn to_body_data(&self) -> Data {
        let nft_allowances = self
            .removals
            .snapshot()
            .into_iter()
            .filter_map(|grant| match grant.resource {
                AllowanceResource::Nft {
                    token_id,
                    serials: NftSerials::Serials(serial_numbers),
                } => Some(proto::NftRemoveAllowance {
                    token_id: Some(token_id.into()),
                    owner: grant.owner.map(Into::into),
                    serial_numbers,
                }),
                _ => None,
            })
            .collect();
        Data::CryptoDeleteAllowance(proto::CryptoDeleteAllowanceTransactionBody { nft_allowances })
    }
}

impl TryFrom<proto::CryptoDeleteAllowanceTransactionBody> for AccountAllowanceDeleteData {
    type Error = TransactionError;

    fn try_from(body: proto::CryptoDeleteAllowanceTransactionBody) -> Result<Self, Self::Error> {
        let mut removals = AllowanceIndex::new();
        for removal in body.nft_allowances {
            let token_id: TokenId = removal
                .token_id
                .ok_or(ValidationError::MissingField("nft_remove_allowance.token_id"))?
                .into();
            let owner = removal.owner.map(AccountId::try_from).transpose()?;
            if removal.serial_numbers.is_empty() {
                return Err(
                    ValidationError::InvalidField("nft_remove_allowance.serial_numbers").into(),
                );
            }
            for serial in removal.serial_numbers {
                removals.revoke_serial(owner, None, token_id.nft(serial));
            }
        }
        Ok(Self { removals })
    }
}

#[cfg(test)]
mod tests {
    use ledger_proto::services::{self as proto, transaction_body::Data};
    use ledger_types::{AccountId, TokenId};

    use super::{AccountAllowanceDeleteData, AccountAllowanceDeleteTransaction};
    use crate::{error::TransactionError, transaction::TransactionData};

    #[test]
    fn removals_group_by_owner_and_token() {
        let token = TokenId::from_num(5005);
        let other = TokenId::from_num(5006);
        let owner = AccountId::from_num(1001);
        let mut tx = AccountAllowanceDeleteTransaction::new();
        tx.delete_all_token_nft_allowances(token.nft(1), Some(owner))
            .unwrap()
            .delete_all_token_nft_allowances(other.nft(1), Some(owner))
            .unwrap()
            .delete_all_token_nft_allowances(token.nft(2), Some(owner))
            .unwrap();

        let Data::CryptoDeleteAllowance(body) = tx.data().to_body_data() else {
            panic!("expected a delete allowance body");
        };
        assert_eq!(body.nft_allowances.len(), 2);
        assert_eq!(body.nft_allowances[0].serial_numbers, vec![1, 2]);
        assert_eq!(body.nft_allowances[1].serial_numbers, vec![1]);

        let parsed = AccountAllowanceDeleteData::try_from(body.clone()).unwrap();
        assert_eq!(parsed.to_body_data(), Data::CryptoDeleteAllowance(body));
    }

    #[test]
    fn removal_without_serials_is_rejected() {
        let err = AccountAllowanceDeleteData::try_from(proto::CryptoDeleteAllowanceTransactionBody {
            nft_allowances: vec![proto::NftRemoveAllowance {
                token_id: Some(TokenId::from_num(5005).into()),
                owner: Some(AccountId::from_num(1001).into()),
                serial_numbers: Vec::new(),
            }],
        })
        .unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }
}
