use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{IdError, LedgerId, TokenId, ValidateChecksums};

use super::{check_max_len, push_bounded, Transaction, TransactionData};
use crate::{custom_fee::CustomFee, error::TransactionError, transport::Method};

const MAX_CUSTOM_FEES: usize = 10;

/// Replaces a token's custom fee schedule. An empty schedule removes every fee.
pub type TokenFeeScheduleUpdateTransaction = Transaction<TokenFeeScheduleUpdateData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFeeScheduleUpdateData {
    token_id: Option<TokenId>,
    custom_fees: Vec<CustomFee>,
}

impl TokenFeeScheduleUpdateTransaction {
    pub fn token_id(&self) -> Option<TokenId> {
        self.data().token_id
    }

    pub fn set_token_id(&mut self, token_id: TokenId) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.token_id = Some(token_id);
        Ok(self)
    }

    pub fn custom_fees(&self) -> &[CustomFee] {
        &self.data().custom_fees
    }

    pub fn add_custom_fee(&mut self, fee: CustomFee) -> Result<&mut Self, TransactionError> {
        push_bounded(
            &mut self.data_mut()?.custom_fees,
            fee,
            MAX_CUSTOM_FEES,
            "custom fees",
        )?;
        Ok(self)
    }

    pub fn set_custom_fees(&mut self, fees: Vec<CustomFee>) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        check_max_len(fees.len(), MAX_CUSTOM_FEES, "custom fees")?;
        self.data_mut()?.custom_fees = fees;
        Ok(self)
    }
}

impl ValidateChecksums for TokenFeeScheduleUpdateData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.token_id.validate_checksums(ledger)?;
        self.custom_fees.validate_checksums(ledger)
    }
}

impl TransactionData for TokenFeeScheduleUpdateData {
    fn method(&self) -> Method {
        Method::token("updateTokenFeeSchedule")
    }

    fn to_body_data(&self) -> Data {
        Data::TokenFeeScheduleUpdate(proto::TokenFeeScheduleUpdateTransactionBody {
            token_id: self.token_id.map(Into::into),
            custom_fees: self.custom_fees.iter().map(Into::into).collect(),
        })
    }
}

impl TryFrom<proto::TokenFeeScheduleUpdateTransactionBody> for TokenFeeScheduleUpdateData {
    type Error = TransactionError;

    fn try_from(body: proto::TokenFeeScheduleUpdateTransactionBody) -> Result<Self, Self::Error> {
        check_max_len(body.custom_fees.len(), MAX_CUSTOM_FEES, "custom fees")?;
        Ok(Self {
            token_id: body.token_id.map(Into::into),
            custom_fees: body
                .custom_fees
                .into_iter()
                .map(CustomFee::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use ledger_types::{AccountId, TokenId};

    use super::TokenFeeScheduleUpdateTransaction;
    use crate::{
        custom_fee::{CustomFee, Fee, FixedFee},
        error::TransactionError,
    };

    fn fee(amount: i64) -> CustomFee {
        CustomFee::new(
            Fee::Fixed(FixedFee {
                amount,
                denominating_token_id: None,
            }),
            AccountId::from_num(98),
        )
    }

    #[test]
    fn schedule_is_capped_at_ten_fees() {
        let mut tx = TokenFeeScheduleUpdateTransaction::new();
        tx.set_token_id(TokenId::from_num(5))
            .unwrap()
            .set_custom_fees((1..=10).map(fee).collect())
            .unwrap();
        let err = tx.add_custom_fee(fee(11)).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidArgument(_)));
        assert_eq!(tx.custom_fees().len(), 10);
    }

    #[test]
    fn whole_schedule_setter_replaces() {
        let mut tx = TokenFeeScheduleUpdateTransaction::new();
        tx.add_custom_fee(fee(1)).unwrap();
        tx.set_custom_fees(vec![fee(2), fee(3)]).unwrap();
        assert_eq!(tx.custom_fees(), &[fee(2), fee(3)]);
    }
}
