//! Custom fees charged on token transfers.

use ledger_proto::services as proto;
use ledger_types::{AccountId, IdError, LedgerId, TokenId, ValidateChecksums, ValidationError};

use crate::error::TransactionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedFee {
    pub amount: i64,
    /// `None` charges the fee in hbar.
    pub denominating_token_id: Option<TokenId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: i64,
    pub denominator: i64,
}

impl Fraction {
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, TransactionError> {
        if denominator == 0 {
            return Err(TransactionError::invalid_argument(
                "fee fraction denominator must not be zero",
            ));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FractionalFee {
    pub fraction: Fraction,
    pub minimum_amount: i64,
    /// Zero means no upper bound.
    pub maximum_amount: i64,
    pub net_of_transfers: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoyaltyFee {
    pub fraction: Fraction,
    /// Charged to the receiver when an NFT changes hands without fungible value.
    pub fallback_fee: Option<FixedFee>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fee {
    Fixed(FixedFee),
    Fractional(FractionalFee),
    Royalty(RoyaltyFee),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomFee {
    pub fee: Fee,
    pub fee_collector_account_id: Option<AccountId>,
    pub all_collectors_are_exempt: bool,
}

impl CustomFee {
    pub fn new(fee: Fee, fee_collector_account_id: AccountId) -> Self {
        Self {
            fee,
            fee_collector_account_id: Some(fee_collector_account_id),
            all_collectors_are_exempt: false,
        }
    }
}

impl ValidateChecksums for CustomFee {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.fee_collector_account_id.validate_checksums(ledger)?;
        match &self.fee {
            Fee::Fixed(fixed) => fixed.denominating_token_id.validate_checksums(ledger),
            Fee::Royalty(royalty) => royalty
                .fallback_fee
                .as_ref()
                .map_or(Ok(()), |fee| fee.denominating_token_id.validate_checksums(ledger)),
            Fee::Fractional(_) => Ok(()),
        }
    }
}

impl From<&FixedFee> for proto::FixedFee {
    fn from(value: &FixedFee) -> Self {
        Self {
            amount: value.amount,
            denominating_token_id: value.denominating_token_id.map(Into::into),
        }
    }
}

impl From<proto::FixedFee> for FixedFee {
    fn from(value: proto::FixedFee) -> Self {
        Self {
            amount: value.amount,
            denominating_token_id: value.denominating_token_id.map(Into::into),
        }
    }
}

impl From<Fraction> for proto::Fraction {
    fn from(value: Fraction) -> Self {
        Self {
            numerator: value.numerator,
            denominator: value.denominator,
        }
    }
}

fn fraction_from_wire(value: Option<proto::Fraction>) -> Result<Fraction, TransactionError> {
    let value = value.ok_or(ValidationError::MissingField("custom_fee.fraction"))?;
    Fraction::new(value.numerator, value.denominator)
}

impl From<&CustomFee> for proto::CustomFee {
    fn from(value: &CustomFee) -> Self {
        let fee = match &value.fee {
            Fee::Fixed(fixed) => proto::custom_fee::Fee::FixedFee(fixed.into()),
            Fee::Fractional(fractional) => {
                proto::custom_fee::Fee::FractionalFee(proto::FractionalFee {
                    fractional_amount: Some(fractional.fraction.into()),
                    minimum_amount: fractional.minimum_amount,
                    maximum_amount: fractional.maximum_amount,
                    net_of_transfers: fractional.net_of_transfers,
                })
            }
            Fee::Royalty(royalty) => proto::custom_fee::Fee::RoyaltyFee(proto::RoyaltyFee {
                exchange_value_fraction: Some(royalty.fraction.into()),
                fallback_fee: royalty.fallback_fee.as_ref().map(Into::into),
            }),
        };
        Self {
            fee: Some(fee),
            fee_collector_account_id: value.fee_collector_account_id.map(Into::into),
            all_collectors_are_exempt: value.all_collectors_are_exempt,
        }
    }
}

impl TryFrom<proto::CustomFee> for CustomFee {
    type Error = TransactionError;

    fn try_from(value: proto::CustomFee) -> Result<Self, Self::Error> {
        let fee = match value.fee {
            Some(proto::custom_fee::Fee::FixedFee(fixed)) => Fee::Fixed(fixed.into()),
            Some(proto::custom_fee::Fee::FractionalFee(fractional)) => {
                Fee::Fractional(FractionalFee {
                    fraction: fraction_from_wire(fractional.fractional_amount)?,
                    minimum_amount: fractional.minimum_amount,
                    maximum_amount: fractional.maximum_amount,
                    net_of_transfers: fractional.net_of_transfers,
                })
            }
            Some(proto::custom_fee::Fee::RoyaltyFee(royalty)) => Fee::Royalty(RoyaltyFee {
                fraction: fraction_from_wire(royalty.exchange_value_fraction)?,
                fallback_fee: royalty.fallback_fee.map(Into::into),
            }),
            None => return Err(ValidationError::MissingField("custom_fee.fee").into()),
        };
        Ok(Self {
            fee,
            fee_collector_account_id: value
                .fee_collector_account_id
                .map(AccountId::try_from)
                .transpose()?,
            all_collectors_are_exempt: value.all_collectors_are_exempt,
        })
    }
}
