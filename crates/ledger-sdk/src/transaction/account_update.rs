use std::time::{Duration, SystemTime};

use ledger_proto::services::{self as proto, transaction_body::Data};
use ledger_types::{AccountId, IdError, Key, LedgerId, ValidateChecksums, ValidationError};

use super::{check_max_bytes, StakedId, Transaction, TransactionData, MAX_MEMO_BYTES};
use crate::{
    error::TransactionError,
    hooks::{HookCreationDetails, HookList},
    patch::Patch,
    transport::Method,
};

/// Changes properties of an existing account. Only fields touched on the builder
/// reach the wire; everything else stays as it is on the ledger.
pub type AccountUpdateTransaction = Transaction<AccountUpdateData>;

/// Staking to account `0.0.0` is how the network spells "stop staking".
const UNSTAKED_ACCOUNT: AccountId = AccountId::new(0, 0, 0);
const UNSTAKED_NODE: i64 = -1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountUpdateData {
    account_id: Option<AccountId>,
    key: Option<Key>,
    memo: Patch<String>,
    receiver_signature_required: Option<bool>,
    max_automatic_token_associations: Patch<i32>,
    staked_id: Patch<StakedId>,
    decline_staking_reward: Option<bool>,
    auto_renew_period: Option<Duration>,
    expiration_time: Option<SystemTime>,
    hook_ids_to_delete: Vec<i64>,
    hooks: HookList,
}

impl AccountUpdateTransaction {
    pub fn account_id(&self) -> Option<AccountId> {
        self.data().account_id
    }

    pub fn set_account_id(&mut self, account_id: AccountId) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.account_id = Some(account_id);
        Ok(self)
    }

    pub fn key(&self) -> Option<&Key> {
        self.data().key.as_ref()
    }

    pub fn set_key(&mut self, key: impl Into<Key>) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.key = Some(key.into());
        Ok(self)
    }

    pub fn account_memo(&self) -> Patch<&String> {
        self.data().memo.as_ref()
    }

    pub fn set_account_memo(
        &mut self,
        memo: impl Into<String>,
    ) -> Result<&mut Self, TransactionError> {
        self.require_not_frozen()?;
        let memo = memo.into();
        check_max_bytes(&memo, MAX_MEMO_BYTES, "account memo")?;
        self.data_mut()?.memo = Patch::set_or_reset(memo, String::is_empty);
        Ok(self)
    }

    /// Resets the memo to empty.
    pub fn clear_account_memo(&mut self) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.memo = Patch::Cleared;
        Ok(self)
    }

    pub fn receiver_signature_required(&self) -> Option<bool> {
        self.data().receiver_signature_required
    }

    pub fn set_receiver_signature_required(
        &mut self,
        required: bool,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.receiver_signature_required = Some(required);
        Ok(self)
    }

    pub fn max_automatic_token_associations(&self) -> Patch<&i32> {
        self.data().max_automatic_token_associations.as_ref()
    }

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
        self.data_mut()?.max_automatic_token_associations =
            Patch::set_or_reset(max, |max| *max == 0);
        Ok(self)
    }

    /// Resets the limit to zero automatic associations.
    pub fn clear_max_automatic_token_associations(
        &mut self,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.max_automatic_token_associations = Patch::Cleared;
        Ok(self)
    }

    pub fn staked_id(&self) -> Patch<&StakedId> {
        self.data().staked_id.as_ref()
    }

    pub fn set_staked_account_id(
        &mut self,
        account_id: AccountId,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.staked_id = Patch::set_or_reset(StakedId::Account(account_id), |staked| {
            *staked == StakedId::Account(UNSTAKED_ACCOUNT)
        });
        Ok(self)
    }

    pub fn set_staked_node_id(&mut self, node_id: u64) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.staked_id = Patch::Set(StakedId::Node(node_id));
        Ok(self)
    }

    /// Stops staking altogether.
    pub fn clear_staked_id(&mut self) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.staked_id = Patch::Cleared;
        Ok(self)
    }

    pub fn decline_staking_reward(&self) -> Option<bool> {
        self.data().decline_staking_reward
    }

    pub fn set_decline_staking_reward(
        &mut self,
        decline: bool,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.decline_staking_reward = Some(decline);
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

    pub fn hook_ids_to_delete(&self) -> &[i64] {
        &self.data().hook_ids_to_delete
    }

    pub fn add_hook_to_delete(&mut self, hook_id: i64) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.hook_ids_to_delete.push(hook_id);
        Ok(self)
    }

    pub fn set_hook_ids_to_delete(
        &mut self,
        hook_ids: impl IntoIterator<Item = i64>,
    ) -> Result<&mut Self, TransactionError> {
        let hook_ids = hook_ids.into_iter().collect();
        self.data_mut()?.hook_ids_to_delete = hook_ids;
        Ok(self)
    }

    pub fn hooks_to_create(&self) -> &[HookCreationDetails] {
        self.data().hooks.as_slice()
    }

    pub fn add_hook_to_create(
        &mut self,
        hook: HookCreationDetails,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.hooks.push(hook)?;
        Ok(self)
    }

    pub fn set_hooks_to_create(
        &mut self,
        hooks: Vec<HookCreationDetails>,
    ) -> Result<&mut Self, TransactionError> {
        self.data_mut()?.hooks.replace(hooks)?;
        Ok(self)
    }
}

impl ValidateChecksums for AccountUpdateData {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.account_id.validate_checksums(ledger)?;
        if let Some(staked) = self.staked_id.value() {
            staked.validate_checksums(ledger)?;
        }
        self.hooks.validate_checksums(ledger)
    }
}

fn staked_id_to_wire(staked_id: &Patch<StakedId>) -> Option<proto::UpdateStakedId> {
    staked_id.encode(
        || proto::UpdateStakedId::StakedAccountId(UNSTAKED_ACCOUNT.into()),
        |staked| match staked.to_wire() {
            proto::StakedId::StakedAccountId(id) => proto::UpdateStakedId::StakedAccountId(id),
            proto::StakedId::StakedNodeId(node) => proto::UpdateStakedId::StakedNodeId(node),
        },
    )
}

fn staked_id_from_wire(
    staked_id: Option<proto::UpdateStakedId>,
) -> Result<Patch<StakedId>, ValidationError> {
    let staked = match staked_id {
        None => return Ok(Patch::Unset),
        Some(proto::UpdateStakedId::StakedNodeId(UNSTAKED_NODE)) => return Ok(Patch::Cleared),
        Some(proto::UpdateStakedId::StakedAccountId(id)) => {
            StakedId::from_wire(proto::StakedId::StakedAccountId(id))?
        }
        Some(proto::UpdateStakedId::StakedNodeId(node)) => {
            StakedId::from_wire(proto::StakedId::StakedNodeId(node))?
        }
    };
    Ok(Patch::decode(Some(staked), |staked| {
        *staked == StakedId::Account(UNSTAKED_ACCOUNT)
    }))
}

impl TransactionData for AccountUpdateData {
    fn method(&self) -> Method {
        Method::crypto("updateAccount")
    }

    fn to_body_data(&self) -> Data {
        Data::CryptoUpdateAccount(proto::CryptoUpdateTransactionBody {
            account_id_to_update: self.account_id.map(Into::into),
            key: self.key.as_ref().map(Into::into),
            auto_renew_period: self.auto_renew_period.map(Into::into),
            expiration_time: self.expiration_time.map(Into::into),
            memo: self.memo.encode(
                || proto::StringValue { value: String::new() },
                |memo| proto::StringValue { value: memo.clone() },
            ),
            receiver_sig_required_wrapper: self
                .receiver_signature_required
                .map(|value| proto::BoolValue { value }),
            max_automatic_token_associations: self.max_automatic_token_associations.encode(
                || proto::Int32Value { value: 0 },
                |value| proto::Int32Value { value: *value },
            ),
            staked_id: staked_id_to_wire(&self.staked_id),
            decline_reward: self
                .decline_staking_reward
                .map(|value| proto::BoolValue { value }),
            hook_ids_to_delete: self.hook_ids_to_delete.clone(),
            hook_creation_details: self.hooks.to_wire(),
        })
    }
}

impl TryFrom<proto::CryptoUpdateTransactionBody> for AccountUpdateData {
    type Error = TransactionError;

    fn try_from(body: proto::CryptoUpdateTransactionBody) -> Result<Self, Self::Error> {
        Ok(Self {
            account_id: body.account_id_to_update.map(TryInto::try_into).transpose()?,
            key: body.key.map(Key::try_from).transpose()?,
            memo: Patch::decode(body.memo.map(|memo| memo.value), String::is_empty),
            receiver_signature_required: body.receiver_sig_required_wrapper.map(|v| v.value),
            max_automatic_token_associations: Patch::decode(
                body.max_automatic_token_associations.map(|v| v.value),
                |value| *value == 0,
            ),
            staked_id: staked_id_from_wire(body.staked_id)?,
            decline_staking_reward: body.decline_reward.map(|v| v.value),
            auto_renew_period: body.auto_renew_period.map(Into::into),
            expiration_time: body.expiration_time.map(Into::into),
            hook_ids_to_delete: body.hook_ids_to_delete,
            hooks: HookList::from_wire(body.hook_creation_details)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use ledger_proto::services::{self as proto, transaction_body::Data};
    use ledger_types::AccountId;

    use super::{AccountUpdateData, AccountUpdateTransaction};
    use crate::{
        patch::Patch,
        transaction::{StakedId, TransactionData},
    };

    fn body(tx: &AccountUpdateTransaction) -> proto::CryptoUpdateTransactionBody {
        match tx.data().to_body_data() {
            Data::CryptoUpdateAccount(body) => body,
            other => panic!("expected an account update body, got {other:?}"),
        }
    }

    #[test]
    fn cleared_staked_id_uses_the_unstaked_account() {
        let mut tx = AccountUpdateTransaction::new();
        tx.clear_staked_id().unwrap();
        let body = body(&tx);
        assert_eq!(
            body.staked_id,
            Some(proto::UpdateStakedId::StakedAccountId(AccountId::from_num(0).into()))
        );
        let parsed = AccountUpdateData::try_from(body).unwrap();
        assert_eq!(parsed.staked_id, Patch::Cleared);
    }

    #[test]
    fn unstaked_node_sentinel_reads_as_cleared() {
        let parsed = AccountUpdateData::try_from(proto::CryptoUpdateTransactionBody {
            staked_id: Some(proto::UpdateStakedId::StakedNodeId(-1)),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(parsed.staked_id, Patch::Cleared);
    }

    #[test]
    fn clear_and_set_are_distinct_on_the_wire() {
        let mut cleared = AccountUpdateTransaction::new();
        cleared.clear_account_memo().unwrap();
        assert_eq!(body(&cleared).memo, Some(proto::StringValue { value: String::new() }));

        let untouched = AccountUpdateTransaction::new();
        assert_eq!(body(&untouched).memo, None);
    }

    #[test]
    fn reset_values_are_held_as_cleared() {
        let mut tx = AccountUpdateTransaction::new();
        tx.set_account_memo("")
            .unwrap()
            .set_max_automatic_token_associations(0)
            .unwrap()
            .set_staked_account_id(AccountId::from_num(0))
            .unwrap();
        assert_eq!(tx.account_memo(), Patch::Cleared);
        assert_eq!(tx.max_automatic_token_associations(), Patch::Cleared);
        assert_eq!(tx.staked_id(), Patch::Cleared);

        let parsed = AccountUpdateData::try_from(body(&tx)).unwrap();
        assert_eq!(&parsed, tx.data());
    }

    #[test]
    fn touched_fields_round_trip() {
        let mut tx = AccountUpdateTransaction::new();
        tx.set_account_id(AccountId::from_num(1001))
            .unwrap()
            .set_staked_node_id(4)
            .unwrap()
            .set_max_automatic_token_associations(-1)
            .unwrap()
            .set_receiver_signature_required(true)
            .unwrap()
            .add_hook_to_delete(7)
            .unwrap();
        let parsed = AccountUpdateData::try_from(body(&tx)).unwrap();
        assert_eq!(&parsed, tx.data());
        assert_eq!(parsed.staked_id, Patch::Set(StakedId::Node(4)));
    }
}
