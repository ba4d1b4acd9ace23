use std::time::Duration;

use ledger_crypto::PrivateKey;
use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{
    AccountId, EvmAddress, Hbar, IdError, Key, LedgerId, ValidateChecksums, ValidationError,
};

use super::{check_max_bytes, Transaction, TransactionData, MAX_MEMO_BYTES};
use crate::{
    error::TransactionError,
    hooks::{HookCreationDetails, HookList},
    transport::Method,
};

const DEFAULT_AUTO_RENEW_PERIOD: Duration = Duration::from_secs(7_776_000);

/// Creates a new account. The receipt carries the new account id.
pub type AccountCreateTransaction = Transaction<AccountCreateData>;

/// Where an account stakes: another account or a consensus node, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StakedId {
    Account(AccountId),
    Node(u64),
}

impl StakedId {
    pub(crate) fn to_wire(self) -> proto::StakedId {
        match self {
            Self::Account(id) => proto::StakedId::StakedAccountId(id.into()),
            Self::Node(node) => {
                proto::StakedId::StakedNodeId(i64::try_from(node).unwrap_or(i64::MAX))
            }
        }
    }

    pub(crate) fn from_wire(value: proto::StakedId) -> Result<Self, ValidationError> {
        match value {
            proto::StakedId::StakedAccountId(id) => Ok(Self::Account(id.try_into()?)),
            proto::StakedId::StakedNodeId(node) => u64::try_from(node)
                .map(Self::Node)
                .map_err(|_| ValidationError::InvalidField("staked_node_id")),
        }
    }
}

impl ValidateChecksums for StakedId {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        match self {
            Self::Account(id) => id.validate_checksum(ledger),
            Self::Node(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCreateData {
    key: Option<Key>,
    initial_balance: Hbar,
    receiver_signature_required: bool,
    auto_renew_period: Duration,
    memo: String,
    max_automatic_token_associations: i32,
    staked_id: Option<StakedId>,
    decline_staking_reward: bool,
    alias: Option<EvmAddress>,
    hooks: HookList,
}

impl Default for AccountCreateData {
    fn default() -> Self {
        Self {
            key: None,
            initial_balance: Hbar::ZERO,
            receiver_signature_required: false,
            auto_renew_period: DEFAULT_AUTO_RENEW_PERIOD,
            memo: String::new(),
            max_automatic_token_associations: 0,
            staked_id: None,
            decline_staking_reward: false,
            alias: None,
            hooks: HookList::default(),
        }
    }
}

impl AccountCreateTransaction {
    pub fn key(&self) -> Option<&Key> {
        self.data().key.as_ref()
    }

    pub fn set_key(&mut self, key: impl Into<Key>) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.key = Some(key.into());
        Ok(self)
    }

    /// Uses the ECDSA key both as the account key and, through its EVM address, as
    /// the account alias. Fails with `BadKey` for any other key type.
    pub fn set_ecdsa_key_with_alias(
        &mut self,
        key: &PrivateKey,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let alias = key.to_evm_address()?;
        let data = self.data_mut()?;
        data.key = Some(key.public_key().into());
        data.alias = Some(alias);
        Ok(self)
    }

    /// Sets `key` as the account key and derives the alias from a separate ECDSA key.
    pub fn set_key_with_alias(
        &mut self,
        key: impl Into<Key>,
        alias_key: &PrivateKey,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let alias = alias_key.to_evm_address()?;
        let data = self.data_mut()?;
        data.key = Some(key.into());
        data.alias = Some(alias);
        Ok(self)
    }

    pub fn initial_balance(&self) -> Hbar {
        self.data().initial_balance
    }

    pub fn set_initial_balance(&mut self, balance: Hbar) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        if balance < Hbar::ZERO {
            return Err(TransactionError::invalid_argument(format!(
                "initial balance must not be negative, got {balance}"
            )));
        }
        self.data_mut()?.initial_balance = balance;
        Ok(self)
    }

    pub fn receiver_signature_required(&self) -> bool {
        self.data().receiver_signature_required
    }

    pub fn set_receiver_signature_required(
        &mut self,
        required: bool,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.receiver_signature_required = required;
        Ok(self)
    }

    pub fn auto_renew_period(&self) -> Duration {
        self.data().auto_renew_period
    }

    pub fn set_auto_renew_period(
        &mut self,
        period: Duration,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.auto_renew_period = period;
        Ok(self)
    }

    pub fn account_memo(&self) -> &str {
        &self.data().memo
    }

    pub fn set_account_memo(
        &mut self,
        memo: impl Into<String>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let memo = memo.into();
        check_max_bytes(&memo, MAX_MEMO_BYTES, "account memo")?;
        self.data_mut()?.memo = memo;
        Ok(self)
    }

    pub fn max_automatic_token_associations(&self) -> i32 {
        self.data().max_automatic_token_associations
    }

    /// `-1` allows unlimited automatic associations.
    pub fn set_max_automatic_token_associations(
        &mut self,
        max: i32,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        if max < -1 {
            return Err(TransactionError::invalid_argument(format!(
                "max automatic token associations must be -1 or more, got {max}"
            )));
        }
        self.data_mut()?.max_automatic_token_associations = max;
        Ok(self)
    }

    pub fn staked_id(&self) -> Option<StakedId> {
        self.data().staked_id
    }

    /// Replaces any staked node id.
    pub fn set_staked_account_id(
        &mut self,
        account_id: AccountId,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.staked_id = Some(StakedId::Account(account_id));
        Ok(self)
    }

    /// Replaces any staked account id.
    pub fn set_staked_node_id(&mut self, node_id: u64) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.staked_id = Some(StakedId::Node(node_id));
        Ok(self)
    }

    pub fn decline_staking_reward(&self) -> bool {
        self.data().decline_staking_reward
    }

    pub fn set_decline_staking_reward(
        &mut self,
        decline: bool,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.decline_staking_reward = decline;
        Ok(self)
    }

    pub fn alias(&self) -> Option<EvmAddress> {
        self.data().alias
    }

    pub fn set_alias(&mut self, alias: EvmAddress) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.alias = Some(alias);
        Ok(self)
    }

    pub fn hooks(&self) -> &[HookCreationDetails] {
        self.data().hooks.as_slice()
    }

    pub fn add_hook(&mut self, hook: HookCreationDetails) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.hooks.push(hook)?;
        Ok(self)
    }

    pub fn set_hooks(
        &mut self,
        hooks: Vec<HookCreationDetails>,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.hooks.replace(hooks)?;
        Ok(self)
    }
}

impl ValidateChecksums for AccountCreateData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.staked_id.validate_checksums(ledger)?;
        self.hooks.validate_checksums(ledger)
    }
}

impl TransactionData for AccountCreateData {
    fn method(&self) -> Method {
        Method::crypto("createAccount")
    }

    fn to_body_data(&self) -> Data {
        Data::CryptoCreateAccount(proto::CryptoCreateTransactionBody {
            key: self.key.as_ref().map(Into::into),
            initial_balance: u64::try_from(self.initial_balance.to_tinybars()).unwrap_or_default(),
            receiver_sig_required: self.receiver_signature_required,
            auto_renew_period: Some(self.auto_renew_period.into()),
            memo: self.memo.clone(),
            max_automatic_token_associations: self.max_automatic_token_associations,
            decline_reward: self.decline_staking_reward,
            alias: self
                .alias
                .map(|alias| alias.as_bytes().to_vec())
                .unwrap_or_default(),
            hook_creation_details: self.hooks.to_wire(),
            staked_id: self.staked_id.map(StakedId::to_wire),
        })
    }

    fn default_max_transaction_fee(&self) -> Hbar {
        Hbar::new(5)
    }
}

impl TryFrom<proto::CryptoCreateTransactionBody> for AccountCreateData {
    type Error = TransactionError;

    fn try_from(body: proto::CryptoCreateTransactionBody) -> Result<Self, Self::Error> {
        let initial_balance = i64::try_from(body.initial_balance)
            .map_err(|_| ValidationError::InvalidField("initial_balance"))?;
        let alias = if body.alias.is_empty() {
            None
        } else {
            Some(EvmAddress::from_slice(&body.alias)?)
        };
        Ok(Self {
            key: body.key.map(Key::try_from).transpose()?,
            initial_balance: Hbar::from_tinybars(initial_balance),
            receiver_signature_required: body.receiver_sig_required,
            auto_renew_period: body
                .auto_renew_period
                .map_or(DEFAULT_AUTO_RENEW_PERIOD, Into::into),
            memo: body.memo,
            max_automatic_token_associations: body.max_automatic_token_associations,
            staked_id: body.staked_id.map(StakedId::from_wire).transpose()?,
            decline_staking_reward: body.decline_reward,
            alias,
            hooks: HookList::from_wire(body.hook_creation_details)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use ledger_crypto::PrivateKey;
    use ledger_proto::services::transaction_body::Data;
    use ledger_types::{AccountId, Hbar, Key, KeyError};

    use super::{AccountCreateData, AccountCreateTransaction, StakedId};
    use crate::{error::TransactionError, transaction::TransactionData};

    #[test]
    fn ecdsa_key_with_alias_sets_both() {
        let key = PrivateKey::generate_ecdsa();
        let mut tx = AccountCreateTransaction::new();
        tx.set_ecdsa_key_with_alias(&key).unwrap();
        assert_eq!(tx.alias(), Some(key.to_evm_address().unwrap()));
        assert_eq!(tx.key(), Some(&Key::from(key.public_key())));
    }

    #[test]
    fn ed25519_key_cannot_provide_an_alias() {
        let mut tx = AccountCreateTransaction::new();
        let err = tx
            .set_ecdsa_key_with_alias(&PrivateKey::generate_ed25519())
            .unwrap_err();
        match err {
            TransactionError::Key(KeyError::BadKey(message)) => {
                assert_eq!(message, "Private key is not ECDSA")
            }
            other => panic!("expected BadKey, got {other:?}"),
        }
        assert_eq!(tx.key(), None);
        assert_eq!(tx.alias(), None);
    }

    #[test]
    fn staked_account_and_node_replace_each_other() {
        let mut tx = AccountCreateTransaction::new();
        tx.set_staked_node_id(3)
            .unwrap()
            .set_staked_account_id(AccountId::from_num(800))
            .unwrap();
        assert_eq!(tx.staked_id(), Some(StakedId::Account(AccountId::from_num(800))));
    }

    #[test]
    fn rejects_out_of_range_values_without_change() {
        let mut tx = AccountCreateTransaction::new();
        assert!(tx.set_max_automatic_token_associations(-2).is_err());
        assert!(tx.set_initial_balance(Hbar::from_tinybars(-1)).is_err());
        assert!(tx.set_account_memo("x".repeat(101)).is_err());
        tx.set_max_automatic_token_associations(-1).unwrap();
        assert_eq!(tx.max_automatic_token_associations(), -1);
        assert_eq!(tx.initial_balance(), Hbar::ZERO);
    }

    #[test]
    fn body_round_trips_through_the_wire_form() {
        let key = PrivateKey::generate_ecdsa();
        let mut tx = AccountCreateTransaction::new();
        tx.set_ecdsa_key_with_alias(&key)
            .unwrap()
            .set_initial_balance(Hbar::new(10))
            .unwrap()
            .set_staked_node_id(2)
            .unwrap()
            .set_account_memo("savings")
            .unwrap();
        let Data::CryptoCreateAccount(body) = tx.data().to_body_data() else {
            panic!("expected a create body");
        };
        assert_eq!(body.alias.len(), 20);
        let parsed = AccountCreateData::try_from(body).unwrap();
        assert_eq!(&parsed, tx.data());
    }
}
