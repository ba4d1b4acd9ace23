use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{AccountId, Hbar, IdError, LedgerId, NftId, TokenId, ValidateChecksums, ValidationError};

use super::{Transaction, TransactionData};
use crate::{
    allowance::{AllowanceGrant, AllowanceIndex, AllowanceResource, NftSerials},
    error::TransactionError,
    transport::Method,
};

/// Grants spenders allowances over an owner's hbar, fungible tokens and NFTs.
///
/// An owner of `None` stands for the transaction's fee payer. Fee-payer grants
/// never share an entry with grants naming the payer explicitly.
pub type AccountAllowanceApproveTransaction = Transaction<AccountAllowanceApproveData>;

#[derive(Debug, Clone, Default)]
pub struct AccountAllowanceApproveData {
    allowances: AllowanceIndex,
}

impl AccountAllowanceApproveTransaction {
    /// Grants in the order they were added; serial grants for one owner, spender,
    /// delegating spender and token share a single entry.
    pub fn allowances(&self) -> Vec<AllowanceGrant> {
        self.data().allowances.snapshot()
    }

    pub fn approve_hbar_allowance(
        &mut self,
        owner: Option<AccountId>,
        spender: AccountId,
        amount: Hbar,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        if amount < Hbar::ZERO {
            return Err(TransactionError::invalid_argument(format!(
                "hbar allowance must not be negative, got {amount}"
            )));
        }
        self.data_mut()?
            .allowances
            .approve_hbar(owner, spender, amount);
        Ok(self)
    }

    pub fn approve_token_allowance(
        &mut self,
        token_id: TokenId,
        owner: Option<AccountId>,
        spender: AccountId,
        amount: u64,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        if i64::try_from(amount).is_err() {
            return Err(TransactionError::invalid_argument(format!(
                "token allowance {amount} does not fit in a signed 64-bit amount"
            )));
        }
        self.data_mut()?
            .allowances
            .approve_token(token_id, owner, spender, amount);
        Ok(self)
    }

    pub fn approve_token_nft_allowance(
        &mut self,
        nft_id: NftId,
        owner: Option<AccountId>,
        spender: AccountId,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?
            .allowances
            .grant_serial(owner, spender, None, nft_id);
        Ok(self)
    }

    /// Grants the serial on the strength of `delegating_spender`'s all-serials
    /// allowance rather than the owner's signature.
    pub fn approve_token_nft_allowance_with_delegating_spender(
        &mut self,
        nft_id: NftId,
        owner: Option<AccountId>,
        spender: AccountId,
        delegating_spender: AccountId,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.allowances.grant_serial(
            owner,
            spender,
            Some(delegating_spender),
            nft_id,
        );
        Ok(self)
    }

    /// Lets `spender` move every serial of the token the owner holds, now or later.
    pub fn approve_token_nft_allowance_all_serials(
        &mut self,
        token_id: TokenId,
        owner: Option<AccountId>,
        spender: AccountId,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?
            .allowances
            .grant_all_serials(owner, spender, token_id, true);
        Ok(self)
    }

    /// Withdraws an all-serials allowance. Single-serial allowances are unaffected.
    pub fn delete_token_nft_allowance_all_serials(
        &mut self,
        token_id: TokenId,
        owner: Option<AccountId>,
        spender: AccountId,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?
            .allowances
            .revoke_all_serials(owner, spender, token_id);
        Ok(self)
    }
}

impl ValidateChecksums for AccountAllowanceApproveData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.allowances.validate_checksums(ledger)
    }
}

impl TransactionData for AccountAllowanceApproveData {
    fn method(&self) -> Method {
        Method::crypto("approveAllowances")
    }

    fn to_body_data(&self) -> Data {
        let mut body = proto::CryptoApproveAllowanceTransactionBody::default();
        for grant in self.allowances.snapshot() {
            let owner = grant.owner.map(Into::into);
            let spender = grant.spender.map(Into::into);
            match grant.resource {
                AllowanceResource::Hbar(amount) => {
                    body.crypto_allowances.push(proto::CryptoAllowance {
                        owner,
                        spender,
                        amount: amount.to_tinybars(),
                    })
                }
                AllowanceResource::Token { token_id, amount } => {
                    body.token_allowances.push(proto::TokenAllowance {
                        token_id: Some(token_id.into()),
                        owner,
                        spender,
                        amount: i64::try_from(amount).unwrap_or(i64::MAX),
                    })
                }
                AllowanceResource::Nft { token_id, serials } => {
                    let (serial_numbers, approved_for_all) = match serials {
                        NftSerials::Serials(serials) => (serials, None),
                        NftSerials::AllSerials(value) => (Vec::new(), Some(proto::BoolValue { value })),
                    };
                    body.nft_allowances.push(proto::NftAllowance {
                        token_id: Some(token_id.into()),
                        owner,
                        spender,
                        serial_numbers,
                        approved_for_all,
                        delegating_spender: grant.delegating_spender.map(Into::into),
                    })
                }
            }
        }
        Data::CryptoApproveAllowance(body)
    }
}

fn optional_account(id: Option<proto::AccountId>) -> Result<Option<AccountId>, ValidationError> {
    id.map(AccountId::try_from).transpose()
}

fn required_account(
    id: Option<proto::AccountId>,
    field: &'static str,
) -> Result<AccountId, ValidationError> {
    optional_account(id)?.ok_or(ValidationError::MissingField(field))
}

impl TryFrom<proto::CryptoApproveAllowanceTransactionBody> for AccountAllowanceApproveData {
    type Error = TransactionError;

    fn try_from(body: proto::CryptoApproveAllowanceTransactionBody) -> Result<Self, Self::Error> {
        let mut allowances = AllowanceIndex::new();
        for allowance in body.crypto_allowances {
            allowances.approve_hbar(
                optional_account(allowance.owner)?,
                required_account(allowance.spender, "crypto_allowance.spender")?,
                Hbar::from_tinybars(allowance.amount),
            );
        }
        for allowance in body.token_allowances {
            let token_id = allowance
                .token_id
                .ok_or(ValidationError::MissingField("token_allowance.token_id"))?;
            let amount = u64::try_from(allowance.amount)
                .map_err(|_| ValidationError::InvalidField("token_allowance.amount"))?;
            allowances.approve_token(
                token_id.into(),
                optional_account(allowance.owner)?,
                required_account(allowance.spender, "token_allowance.spender")?,
                amount,
            );
        }
        for allowance in body.nft_allowances {
            let token_id: TokenId = allowance
                .token_id
                .ok_or(ValidationError::MissingField("nft_allowance.token_id"))?
                .into();
            let owner = optional_account(allowance.owner)?;
            let spender = required_account(allowance.spender, "nft_allowance.spender")?;
            match allowance.approved_for_all {
                Some(proto::BoolValue { value: true }) => {
                    allowances.grant_all_serials(owner, spender, token_id, true)
                }
                Some(proto::BoolValue { value: false }) => {
                    allowances.revoke_all_serials(owner, spender, token_id)
                }
                None if allowance.serial_numbers.is_empty() => {
                    return Err(ValidationError::InvalidField("nft_allowance.serial_numbers").into())
                }
                None => {
                    let delegating_spender = optional_account(allowance.delegating_spender)?;
                    for serial in allowance.serial_numbers {
                        allowances.grant_serial(
                            owner,
                            spender,
                            delegating_spender,
                            token_id.nft(serial),
                        );
                    }
                }
            }
        }
        Ok(Self { allowances })
    }
}

#[cfg(test)]
mod tests {
    use ledger_proto::services::{self as proto, transaction_body::Data};
    use ledger_types::{AccountId, Hbar, TokenId};

    use super::{AccountAllowanceApproveData, AccountAllowanceApproveTransaction};
    use crate::{error::TransactionError, transaction::TransactionData};

    fn owner() -> AccountId {
        AccountId::from_num(1001)
    }

    fn spender() -> AccountId {
        AccountId::from_num(1002)
    }

    fn approve_body(data: &AccountAllowanceApproveData) -> proto::CryptoApproveAllowanceTransactionBody {
        match data.to_body_data() {
            Data::CryptoApproveAllowance(body) => body,
            other => panic!("expected an approve body, got {other:?}"),
        }
    }

    #[test]
    fn serial_grants_for_one_key_become_one_wire_entry() {
        let token = TokenId::from_num(5005);
        let mut tx = AccountAllowanceApproveTransaction::new();
        tx.approve_token_nft_allowance(token.nft(1), Some(owner()), spender())
            .unwrap()
            .approve_token_nft_allowance(token.nft(2), Some(owner()), spender())
            .unwrap();
        let body = approve_body(tx.data());
        assert_eq!(body.nft_allowances.len(), 1);
        assert_eq!(body.nft_allowances[0].serial_numbers, vec![1, 2]);
        assert_eq!(body.nft_allowances[0].approved_for_all, None);
    }

    #[test]
    fn deleting_all_serials_sends_approved_for_all_false() {
        let token = TokenId::from_num(5005);
        let mut tx = AccountAllowanceApproveTransaction::new();
        tx.delete_token_nft_allowance_all_serials(token, Some(owner()), spender())
            .unwrap();
        let body = approve_body(tx.data());
        assert_eq!(
            body.nft_allowances[0].approved_for_all,
            Some(proto::BoolValue { value: false })
        );
        assert!(body.nft_allowances[0].serial_numbers.is_empty());
    }

    #[test]
    fn rejects_negative_hbar_allowance() {
        let mut tx = AccountAllowanceApproveTransaction::new();
        let err = tx
            .approve_hbar_allowance(Some(owner()), spender(), Hbar::from_tinybars(-1))
            .unwrap_err();
        assert!(matches!(err, TransactionError::InvalidArgument(_)));
        assert!(tx.allowances().is_empty());
    }

    #[test]
    fn wire_form_parses_back_to_the_same_body() {
        let token = TokenId::from_num(5005);
        let mut tx = AccountAllowanceApproveTransaction::new();
        tx.approve_hbar_allowance(Some(owner()), spender(), Hbar::new(10))
            .unwrap()
            .approve_token_allowance(token, Some(owner()), spender(), 50)
            .unwrap()
            .approve_token_nft_allowance_all_serials(token, Some(owner()), spender())
            .unwrap()
            .approve_token_nft_allowance_with_delegating_spender(
                token.nft(3),
                Some(owner()),
                spender(),
                AccountId::from_num(1003),
            )
            .unwrap();
        let body = approve_body(tx.data());
        let parsed = AccountAllowanceApproveData::try_from(body.clone()).unwrap();
        assert_eq!(approve_body(&parsed), body);
    }

    #[test]
    fn nft_allowance_without_serials_or_blanket_flag_is_rejected() {
        let err = AccountAllowanceApproveData::try_from(proto::CryptoApproveAllowanceTransactionBody {
            nft_allowances: vec![proto::NftAllowance {
                token_id: Some(TokenId::from_num(5005).into()),
                owner: Some(owner().into()),
                spender: Some(spender().into()),
                ..Default::default()
            }],
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }

    #[test]
    fn missing_spender_is_a_decode_error() {
        let err = AccountAllowanceApproveData::try_from(proto::CryptoApproveAllowanceTransactionBody {
            crypto_allowances: vec![proto::CryptoAllowance {
                owner: Some(owner().into()),
                spender: None,
                amount: 1,
            }],
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, TransactionError::Validation(_)));
    }
}
