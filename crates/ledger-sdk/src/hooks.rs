//! Hooks attached to accounts at creation or update.

use std::collections::HashSet;

use ledger_proto::services as proto;
use ledger_types::{ContractId, IdError, Key, LedgerId, ValidateChecksums, ValidationError};

use crate::error::TransactionError;

const MAX_SLOT_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookExtensionPoint {
    AccountAllowanceHook,
}

/// One storage slot preloaded into a lambda hook. Both words are at most 32 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaStorageSlot {
    key: Vec<u8>,
    value: Vec<u8>,
}

impl LambdaStorageSlot {
    pub fn new(key: Vec<u8>, value: Vec<u8>) -> Result<Self, TransactionError> {
        if key.len() > MAX_SLOT_BYTES || value.len() > MAX_SLOT_BYTES {
            return Err(TransactionError::invalid_argument(format!(
                "storage slot words are limited to {MAX_SLOT_BYTES} bytes"
            )));
        }
        Ok(Self { key, value })
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaEvmHook {
    pub contract_id: ContractId,
    pub storage_updates: Vec<LambdaStorageSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookCreationDetails {
    pub extension_point: HookExtensionPoint,
    pub hook_id: i64,
    pub hook: LambdaEvmHook,
    pub admin_key: Option<Key>,
}

impl HookCreationDetails {
    pub fn new(hook_id: i64, hook: LambdaEvmHook) -> Self {
        Self {
            extension_point: HookExtensionPoint::AccountAllowanceHook,
            hook_id,
            hook,
            admin_key: None,
        }
    }
}

/// Hooks to create, with hook ids unique within the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookList(Vec<HookCreationDetails>);

impl HookList {
    pub fn as_slice(&self) -> &[HookCreationDetails] {
        &self.0
    }

    pub fn push(&mut self, hook: HookCreationDetails) -> Result<(), TransactionError> {
        if self.0.iter().any(|existing| existing.hook_id == hook.hook_id) {
            return Err(duplicate_hook_id(hook.hook_id));
        }
        self.0.push(hook);
        Ok(())
    }

    /// Replaces the whole list; fails without change if `hooks` repeats an id.
    pub fn replace(&mut self, hooks: Vec<HookCreationDetails>) -> Result<(), TransactionError> {
        let mut seen = HashSet::new();
        if let Some(hook) = hooks.iter().find(|hook| !seen.insert(hook.hook_id)) {
            return Err(duplicate_hook_id(hook.hook_id));
        }
        self.0 = hooks;
        Ok(())
    }

    pub(crate) fn to_wire(&self) -> Vec<proto::HookCreationDetails> {
        self.0.iter().map(Into::into).collect()
    }

    pub(crate) fn from_wire(
        hooks: Vec<proto::HookCreationDetails>,
    ) -> Result<Self, TransactionError> {
        let mut list = Self::default();
        list.replace(
            hooks
                .into_iter()
                .map(HookCreationDetails::try_from)
                .collect::<Result<_, _>>()?,
        )?;
        Ok(list)
    }
}

fn duplicate_hook_id(hook_id: i64) -> TransactionError {
    TransactionError::invalid_argument(format!("hook id {hook_id} appears more than once"))
}

impl ValidateChecksums for HookCreationDetails {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.hook.contract_id.validate_checksum(ledger)
    }
}

impl ValidateChecksums for HookList {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.0.validate_checksums(ledger)
    }
}

impl From<&HookCreationDetails> for proto::HookCreationDetails {
    fn from(value: &HookCreationDetails) -> Self {
        let extension_point = match value.extension_point {
            HookExtensionPoint::AccountAllowanceHook => proto::HookExtensionPoint::AccountAllowanceHook,
        };
        Self {
            extension_point: extension_point as i32,
            hook_id: value.hook_id,
            hook: Some(proto::hook_creation_details::Hook::LambdaEvmHook(
                proto::LambdaEvmHook {
                    spec: Some(proto::EvmHookSpec {
                        contract_id: Some(value.hook.contract_id.into()),
                    }),
                    storage_updates: value
                        .hook
                        .storage_updates
                        .iter()
                        .map(|slot| proto::LambdaStorageSlot {
                            key: slot.key.clone(),
                            value: slot.value.clone(),
                        })
                        .collect(),
                },
            )),
            admin_key: value.admin_key.as_ref().map(Into::into),
        }
    }
}

impl TryFrom<proto::HookCreationDetails> for HookCreationDetails {
    type Error = TransactionError;

    fn try_from(value: proto::HookCreationDetails) -> Result<Self, Self::Error> {
        let extension_point = match proto::HookExtensionPoint::try_from(value.extension_point) {
            Ok(proto::HookExtensionPoint::AccountAllowanceHook) => {
                HookExtensionPoint::AccountAllowanceHook
            }
            Err(_) => {
                return Err(TransactionError::invalid_argument(format!(
                    "unknown hook extension point {}",
                    value.extension_point
                )))
            }
        };
        let Some(proto::hook_creation_details::Hook::LambdaEvmHook(hook)) = value.hook else {
            return Err(ValidationError::MissingField("hook_creation_details.hook").into());
        };
        let contract_id = hook
            .spec
            .and_then(|spec| spec.contract_id)
            .ok_or(ValidationError::MissingField("lambda_evm_hook.spec.contract_id"))?;
        Ok(Self {
            extension_point,
            hook_id: value.hook_id,
            hook: LambdaEvmHook {
                contract_id: contract_id.try_into()?,
                storage_updates: hook
                    .storage_updates
                    .into_iter()
                    .map(|slot| LambdaStorageSlot::new(slot.key, slot.value))
                    .collect::<Result<_, _>>()?,
            },
            admin_key: value.admin_key.map(Key::try_from).transpose()?,
        })
    }
}
