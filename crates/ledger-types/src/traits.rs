//! Seams to collaborators outside this crate: signing and checksum validation.

use crate::{
    entity_id::EntityId,
    error::{IdError, KeyError},
    ids::{ContractId, FileId, NftId, ScheduleId, TokenId, TopicId},
    key::PublicKey,
    ledger::LedgerId,
};

/// Produces signatures over frozen transaction body bytes.
///
/// Implementations own the private key; callers only ever see the public key.
pub trait Signer: Send + Sync {
    fn public_key(&self) -> PublicKey;

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, KeyError>;
}

/// Walks every id a value holds and checks its checksum against `ledger`.
pub trait ValidateChecksums {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError>;
}

impl ValidateChecksums for EntityId {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.validate_checksum(ledger)
    }
}

macro_rules! impl_validate_numeric {
    ($($name:ident),*) => {
        $(
            impl ValidateChecksums for $name {
                fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
                    self.validate_checksum(ledger)
                }
            }
        )*
    };
}

impl_validate_numeric!(TokenId, ContractId, FileId, TopicId, ScheduleId);

impl ValidateChecksums for NftId {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.token_id.validate_checksum(ledger)
    }
}

impl<T: ValidateChecksums> ValidateChecksums for Option<T> {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        match self {
            Some(value) => value.validate_checksums(ledger),
            None => Ok(()),
        }
    }
}

impl<T: ValidateChecksums> ValidateChecksums for [T] {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.iter().try_for_each(|value| value.validate_checksums(ledger))
    }
}

impl<T: ValidateChecksums> ValidateChecksums for Vec<T> {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.as_slice().validate_checksums(ledger)
    }
}
