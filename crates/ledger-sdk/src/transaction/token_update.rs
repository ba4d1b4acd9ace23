use std::time::{Duration, SystemTime};

use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{AccountId, IdError, Key, LedgerId, TokenId, ValidateChecksums};

use super::{check_max_bytes, Transaction, TransactionData, MAX_MEMO_BYTES};
use crate::{error::TransactionError, patch::Patch, transport::Method};

const MAX_NAME_BYTES: usize = 100;
const MAX_SYMBOL_BYTES: usize = 100;
const MAX_METADATA_BYTES: usize = 100;

/// Changes properties of an existing token. Untouched fields keep their value on
/// the ledger.
pub type TokenUpdateTransaction = Transaction<TokenUpdateData>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUpdateData {
    token_id: Option<TokenId>,
    name: Option<String>,
    symbol: Option<String>,
    treasury_account_id: Option<AccountId>,
    admin_key: Option<Key>,
    auto_renew_account_id: Option<AccountId>,
    auto_renew_period: Option<Duration>,
    expiration_time: Option<SystemTime>,
    memo: Patch<String>,
    metadata: Patch<Vec<u8>>,
}

impl TokenUpdateTransaction {
    pub fn token_id(&self) -> Option<TokenId> {
        self.data().token_id
    }

    pub fn set_token_id(&mut self, token_id: TokenId) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.token_id = Some(token_id);
        Ok(self)
    }

    pub fn token_name(&self) -> Option<&str> {
        self.data().name.as_deref()
    }

    pub fn set_token_name(&mut self, name: impl Into<String>) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let name = name.into();
        check_max_bytes(&name, MAX_NAME_BYTES, "token name")?;
        self.data_mut()?.name = Some(name);
        Ok(self)
    }

    pub fn token_symbol(&self) -> Option<&str> {
        self.data().symbol.as_deref()
    }

    pub fn set_token_symbol(
        &mut self,
        symbol: impl Into<String>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let symbol = symbol.into();
        check_max_bytes(&symbol, MAX_SYMBOL_BYTES, "token symbol")?;
        self.data_mut()?.symbol = Some(symbol);
        Ok(self)
    }

    pub fn treasury_account_id(&self) -> Option<AccountId> {
        self.data().treasury_account_id
    }

    pub fn set_treasury_account_id(
        &mut self,
        account_id: AccountId,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.treasury_account_id = Some(account_id);
        Ok(self)
    }

    pub fn admin_key(&self) -> Option<&Key> {
        self.data().admin_key.as_ref()
    }

    pub fn set_admin_key(&mut self, key: impl Into<Key>) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.admin_key = Some(key.into());
        Ok(self)
    }

    pub fn auto_renew_account_id(&self) -> Option<AccountId> {
        self.data().auto_renew_account_id
    }

    pub fn set_auto_renew_account_id(
        &mut self,
        account_id: AccountId,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.auto_renew_account_id = Some(account_id);
        Ok(self)
    }

    pub fn auto_renew_period(&self) -> Option<Duration> {
        self.data().auto_renew_period
    }

    pub fn set_auto_renew_period(
        &mut self,
        period: Duration,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.auto_renew_period = Some(period);
        Ok(self)
    }

    pub fn expiration_time(&self) -> Option<SystemTime> {
        self.data().expiration_time
    }

    pub fn set_expiration_time(
        &mut self,
        expiration: SystemTime,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.expiration_time = Some(expiration);
        Ok(self)
    }

    pub fn token_memo(&self) -> Patch<&String> {
        self.data().memo.as_ref()
    }

    pub fn set_token_memo(&mut self, memo: impl Into<String>) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let memo = memo.into();
        check_max_bytes(&memo, MAX_MEMO_BYTES, "token memo")?;
        self.data_mut()?.memo = Patch::set_or_reset(memo, String::is_empty);
        Ok(self)
    }

    pub fn clear_token_memo(&mut self) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.memo = Patch::Cleared;
        Ok(self)
    }

    pub fn metadata(&self) -> Patch<&Vec<u8>> {
        self.data().metadata.as_ref()
    }

    pub fn set_metadata(&mut self, metadata: Vec<u8>) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        if metadata.len() > MAX_METADATA_BYTES {
            return Err(TransactionError::invalid_argument(format!(
                "token metadata is limited to {MAX_METADATA_BYTES} bytes, got {}",
                metadata.len()
            )));
        }
        self.data_mut()?.metadata = Patch::set_or_reset(metadata, Vec::is_empty);
        Ok(self)
    }

    pub fn clear_metadata(&mut self) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.metadata = Patch::Cleared;
        Ok(self)
    }
}

impl ValidateChecksums for TokenUpdateData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.token_id.validate_checksums(ledger)?;
        self.treasury_account_id.validate_checksums(ledger)?;
        self.auto_renew_account_id.validate_checksums(ledger)
    }
}

impl TransactionData for TokenUpdateData {
    fn method(&self) -> Method {
        Method::token("updateToken")
    }

    fn to_body_data(&self) -> Data {
        Data::TokenUpdate(proto::TokenUpdateTransactionBody {
            token: self.token_id.map(Into::into),
            symbol: self.symbol.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            treasury: self.treasury_account_id.map(Into::into),
            admin_key: self.admin_key.as_ref().map(Into::into),
            auto_renew_account: self.auto_renew_account_id.map(Into::into),
            auto_renew_period: self.auto_renew_period.map(Into::into),
            expiry: self.expiration_time.map(Into::into),
            memo: self.memo.encode(
                || proto::StringValue { value: String::new() },
                |memo| proto::StringValue { value: memo.clone() },
            ),
            metadata: self.metadata.encode(
                || proto::BytesValue { value: Vec::new() },
                |metadata| proto::BytesValue { value: metadata.clone() },
            ),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

impl TryFrom<proto::TokenUpdateTransactionBody> for TokenUpdateData {
    type Error = TransactionError;

    fn try_from(body: proto::TokenUpdateTransactionBody) -> Result<Self, Self::Error> {
        Ok(Self {
            token_id: body.token.map(Into::into),
            name: non_empty(body.name),
            symbol: non_empty(body.symbol),
            treasury_account_id: body.treasury.map(AccountId::try_from).transpose()?,
            admin_key: body.admin_key.map(Key::try_from).transpose()?,
            auto_renew_account_id: body.auto_renew_account.map(AccountId::try_from).transpose()?,
            auto_renew_period: body.auto_renew_period.map(Into::into),
            expiration_time: body.expiry.map(Into::into),
            memo: Patch::decode(body.memo.map(|memo| memo.value), String::is_empty),
            metadata: Patch::decode(body.metadata.map(|metadata| metadata.value), Vec::is_empty),
        })
    }
}
