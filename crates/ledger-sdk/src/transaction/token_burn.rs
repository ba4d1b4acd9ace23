use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{IdError, LedgerId, TokenId, ValidateChecksums};

use super::{Transaction, TransactionData};
use crate::{error::TransactionError, transport::Method};

/// Burns fungible supply or specific NFT serials held by the treasury.
pub type TokenBurnTransaction = Transaction<TokenBurnData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBurnData {
    token_id: Option<TokenId>,
    amount: u64,
    serials: Vec<i64>,
}

impl TokenBurnTransaction {
    pub fn token_id(&self) -> Option<TokenId> {
        self.data().token_id
    }

    pub fn set_token_id(&mut self, token_id: TokenId) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.token_id = Some(token_id);
        Ok(self)
    }

    pub fn amount(&self) -> u64 {
        self.data().amount
    }

    pub fn set_amount(&mut self, amount: u64) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.amount = amount;
        Ok(self)
    }

    pub fn serials(&self) -> &[i64] {
        &self.data().serials
    }

    pub fn add_serial(&mut self, serial: i64) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        if serial <= 0 {
            return Err(TransactionError::invalid_argument(format!(
                "nft serial numbers start at 1, got {serial}"
            )));
        }
        self.data_mut()?.serials.push(serial);
        Ok(self)
    }

    pub fn set_serials(
        &mut self,
        serials: impl IntoIterator<Item = i64>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let serials: Vec<_> = serials.into_iter().collect();
        if let Some(serial) = serials.iter().find(|serial| **serial <= 0) {
            return Err(TransactionError::invalid_argument(format!(
                "nft serial numbers start at 1, got {serial}"
            )));
        }
        self.data_mut()?.serials = serials;
        Ok(self)
    }
}

impl ValidateChecksums for TokenBurnData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.token_id.validate_checksums(ledger)
    }
}

impl TransactionData for TokenBurnData {
    fn method(&self) -> Method {
        Method::token("burnToken")
    }

    fn to_body_data(&self) -> Data {
        Data::TokenBurn(proto::TokenBurnTransactionBody {
            token: self.token_id.map(Into::into),
            amount: self.amount,
            serial_numbers: self.serials.clone(),
        })
    }

    fn check_freeze(&self) -> Result<(), TransactionError> {
        if self.amount > 0 && !self.serials.is_empty() {
            return Err(TransactionError::invalid_state(
                "a burn carries either a fungible amount or nft serials, not both",
            ));
        }
        Ok(())
    }
}

impl TryFrom<proto::TokenBurnTransactionBody> for TokenBurnData {
    type Error = TransactionError;

    fn try_from(body: proto::TokenBurnTransactionBody) -> Result<Self, Self::Error> {
        Ok(Self {
            token_id: body.token.map(Into::into),
            amount: body.amount,
            serials: body.serial_numbers,
        })
    }
}

#[cfg(test)]
mod tests {
    use ledger_proto::services::transaction_body::Data;
    use ledger_types::TokenId;

    use super::{TokenBurnData, TokenBurnTransaction};
    use crate::{error::TransactionError, transaction::TransactionData};

    #[test]
    fn serials_must_be_positive() {
        let mut tx = TokenBurnTransaction::new();
        tx.add_serial(3).unwrap();
        assert!(matches!(
            tx.set_serials([1, 0]),
            Err(TransactionError::InvalidArgument(_))
        ));
        assert_eq!(tx.serials(), &[3]);
    }

    #[test]
    fn serial_burn_round_trips() {
        let mut tx = TokenBurnTransaction::new();
        tx.set_token_id(TokenId::from_num(5))
            .unwrap()
            .set_serials([4, 2])
            .unwrap();
        let Data::TokenBurn(body) = tx.data().to_body_data() else {
            panic!("expected a burn body");
        };
        assert_eq!(body.serial_numbers, vec![4, 2]);
        assert_eq!(&TokenBurnData::try_from(body).unwrap(), tx.data());
    }
}
