use std::time::{Duration, SystemTime, UNIX_EPOCH};

use ledger_types::{
    AccountId, ContractId, EntityForm, EvmAddress, FileId, Key, NftId, PublicKey, ScheduleId,
    TokenId, TopicId, ValidationError,
};
use prost::Message;

use crate::services as proto;

impl From<AccountId> for proto::AccountId {
    fn from(value: AccountId) -> Self {
        let account = match value.form {
            EntityForm::Num(num) => proto::account_id::Account::AccountNum(num as i64),
            EntityForm::AliasKey(key) => {
                proto::account_id::Account::Alias(proto::Key::from(key).encode_to_vec())
            }
            EntityForm::EvmAddress(address) => {
                proto::account_id::Account::Alias(address.as_bytes().to_vec())
            }
        };
        Self {
            shard_num: value.shard as i64,
            realm_num: value.realm as i64,
            account: Some(account),
        }
    }
}

impl TryFrom<proto::AccountId> for AccountId {
    type Error = ValidationError;

    fn try_from(value: proto::AccountId) -> Result<Self, Self::Error> {
        let shard = value.shard_num as u64;
        let realm = value.realm_num as u64;
        match value.account {
            Some(proto::account_id::Account::AccountNum(num)) => {
                Ok(AccountId::new(shard, realm, num as u64))
            }
            // 20 bytes is an EVM address; anything else must decode as a key.
            Some(proto::account_id::Account::Alias(alias)) if alias.len() == EvmAddress::LEN => {
                Ok(AccountId::from_evm_address(
                    EvmAddress::from_slice(&alias)?,
                    shard,
                    realm,
                ))
            }
            Some(proto::account_id::Account::Alias(alias)) => {
                let key = proto::Key::decode(alias.as_slice())
                    .map_err(|err| ValidationError::Message(format!("alias key: {err}")))?;
                match Key::try_from(key)? {
                    Key::Single(key) => Ok(AccountId::from_alias_key(shard, realm, key)),
                    _ => Err(ValidationError::InvalidField("account_id.alias")),
                }
            }
            None => Err(ValidationError::MissingField("account_id.account")),
        }
    }
}

macro_rules! impl_numeric_id_conversions {
    ($domain:ident, $num_field:ident) => {
        impl From<$domain> for proto::$domain {
            fn from(value: $domain) -> Self {
                Self {
                    shard_num: value.shard as i64,
                    realm_num: value.realm as i64,
                    $num_field: value.num as i64,
                }
            }
        }

        impl From<proto::$domain> for $domain {
            fn from(value: proto::$domain) -> Self {
                $domain::new(
                    value.shard_num as u64,
                    value.realm_num as u64,
                    value.$num_field as u64,
                )
            }
        }
    };
}

impl_numeric_id_conversions!(TokenId, token_num);
impl_numeric_id_conversions!(FileId, file_num);
impl_numeric_id_conversions!(TopicId, topic_num);
impl_numeric_id_conversions!(ScheduleId, schedule_num);

impl From<ContractId> for proto::ContractId {
    fn from(value: ContractId) -> Self {
        Self {
            shard_num: value.shard as i64,
            realm_num: value.realm as i64,
            contract: Some(proto::contract_id::Contract::ContractNum(value.num as i64)),
        }
    }
}

impl TryFrom<proto::ContractId> for ContractId {
    type Error = ValidationError;

    fn try_from(value: proto::ContractId) -> Result<Self, Self::Error> {
        let num = match value.contract {
            Some(proto::contract_id::Contract::ContractNum(num)) => num as u64,
            Some(proto::contract_id::Contract::EvmAddress(bytes)) => EvmAddress::from_slice(&bytes)?
                .long_zero_num()
                .ok_or(ValidationError::InvalidField("contract_id.evm_address"))?,
            None => return Err(ValidationError::MissingField("contract_id.contract")),
        };
        Ok(ContractId::new(
            value.shard_num as u64,
            value.realm_num as u64,
            num,
        ))
    }
}

impl From<NftId> for proto::NftId {
    fn from(value: NftId) -> Self {
        Self {
            token_id: Some(value.token_id.into()),
            serial_number: value.serial,
        }
    }
}

impl TryFrom<proto::NftId> for NftId {
    type Error = ValidationError;

    fn try_from(value: proto::NftId) -> Result<Self, Self::Error> {
        let token_id = value
            .token_id
            .ok_or(ValidationError::MissingField("nft_id.token_id"))?;
        Ok(TokenId::from(token_id).nft(value.serial_number))
    }
}

impl From<PublicKey> for proto::Key {
    fn from(value: PublicKey) -> Self {
        let key = match value {
            PublicKey::Ed25519(raw) => proto::key::Key::Ed25519(raw.to_vec()),
            PublicKey::Ecdsa(raw) => proto::key::Key::EcdsaSecp256k1(raw.to_vec()),
        };
        Self { key: Some(key) }
    }
}

impl From<&Key> for proto::Key {
    fn from(value: &Key) -> Self {
        let key = match value {
            Key::Single(key) => return (*key).into(),
            Key::ContractId(id) => proto::key::Key::ContractId((*id).into()),
            Key::KeyList { keys, threshold } => {
                let list = proto::KeyList {
                    keys: keys.iter().map(proto::Key::from).collect(),
                };
                match threshold {
                    Some(threshold) => proto::key::Key::ThresholdKey(proto::ThresholdKey {
                        threshold: *threshold,
                        keys: Some(list),
                    }),
                    None => proto::key::Key::KeyList(list),
                }
            }
        };
        Self { key: Some(key) }
    }
}

impl From<Key> for proto::Key {
    fn from(value: Key) -> Self {
        Self::from(&value)
    }
}

impl TryFrom<proto::Key> for Key {
    type Error = ValidationError;

    fn try_from(value: proto::Key) -> Result<Self, Self::Error> {
        match value.key {
            Some(proto::key::Key::Ed25519(raw)) => {
                Ok(Key::Single(PublicKey::from_bytes_ed25519(&raw)?))
            }
            Some(proto::key::Key::EcdsaSecp256k1(raw)) => {
                Ok(Key::Single(PublicKey::from_bytes_ecdsa(&raw)?))
            }
            Some(proto::key::Key::ContractId(id)) => Ok(Key::ContractId(id.try_into()?)),
            Some(proto::key::Key::KeyList(list)) => Ok(Key::KeyList {
                keys: keys_from_list(list)?,
                threshold: None,
            }),
            Some(proto::key::Key::ThresholdKey(threshold_key)) => Ok(Key::KeyList {
                keys: keys_from_list(threshold_key.keys.unwrap_or_default())?,
                threshold: Some(threshold_key.threshold),
            }),
            None => Err(ValidationError::MissingField("key.key")),
        }
    }
}

fn keys_from_list(list: proto::KeyList) -> Result<Vec<Key>, ValidationError> {
    list.keys.into_iter().map(Key::try_from).collect()
}

impl From<SystemTime> for proto::Timestamp {
    fn from(value: SystemTime) -> Self {
        let since_epoch = value.duration_since(UNIX_EPOCH).unwrap_or_default();
        Self {
            seconds: since_epoch.as_secs() as i64,
            nanos: since_epoch.subsec_nanos() as i32,
        }
    }
}

impl From<proto::Timestamp> for SystemTime {
    /// Times before the epoch clamp to the epoch.
    fn from(value: proto::Timestamp) -> Self {
        let seconds = u64::try_from(value.seconds).unwrap_or(0);
        let nanos = u32::try_from(value.nanos).unwrap_or(0);
        UNIX_EPOCH + Duration::new(seconds, nanos)
    }
}

impl From<Duration> for proto::Duration {
    fn from(value: Duration) -> Self {
        Self {
            seconds: value.as_secs() as i64,
        }
    }
}

impl From<proto::Duration> for Duration {
    fn from(value: proto::Duration) -> Self {
        Duration::from_secs(u64::try_from(value.seconds).unwrap_or(0))
    }
}
