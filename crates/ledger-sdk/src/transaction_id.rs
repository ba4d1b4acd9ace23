use std::{
    fmt,
    str::FromStr,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use ledger_proto::services as proto;
use ledger_types::{AccountId, IdError, LedgerId, ValidateChecksums, ValidationError};
use rand::Rng;

/// Payer account plus the instant the transaction becomes valid.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId {
    pub account_id: AccountId,
    pub valid_start: SystemTime,
    pub nonce: Option<i32>,
    pub scheduled: bool,
}

impl TransactionId {
    /// Valid start a few seconds in the past, so that modest clock skew against the
    /// node does not reject the transaction as not yet valid.
    pub fn generate(account_id: AccountId) -> Self {
        let backdate = Duration::from_millis(rand::thread_rng().gen_range(5_000..8_000));
        let now = SystemTime::now();
        Self {
            account_id,
            valid_start: now.checked_sub(backdate).unwrap_or(now),
            nonce: None,
            scheduled: false,
        }
    }

    pub fn with_valid_start(account_id: AccountId, valid_start: SystemTime) -> Self {
        Self {
            account_id,
            valid_start,
            nonce: None,
            scheduled: false,
        }
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let since_epoch = self
            .valid_start
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        write!(
            f,
            "{}@{}.{:09}",
            self.account_id,
            since_epoch.as_secs(),
            since_epoch.subsec_nanos()
        )?;
        if self.scheduled {
            f.write_str("?scheduled")?;
        }
        if let Some(nonce) = self.nonce {
            write!(f, "/{nonce}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({self})")
    }
}

impl FromStr for TransactionId {
    type Err = IdError;

    /// `account@seconds.nanos[?scheduled][/nonce]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || IdError::Malformed {
            input: s.to_owned(),
            reason: "expected `account@seconds.nanos`",
        };
        let (rest, nonce) = match s.rsplit_once('/') {
            Some((rest, nonce)) => (rest, Some(nonce.parse().map_err(|_| malformed())?)),
            None => (s, None),
        };
        let (rest, scheduled) = match rest.strip_suffix("?scheduled") {
            Some(rest) => (rest, true),
            None => (rest, false),
        };
        let (account, timestamp) = rest.split_once('@').ok_or_else(malformed)?;
        let (seconds, nanos) = timestamp.split_once('.').ok_or_else(malformed)?;
        let seconds: u64 = seconds.parse().map_err(|_| malformed())?;
        let nanos: u32 = nanos.parse().map_err(|_| malformed())?;
        if nanos >= 1_000_000_000 {
            return Err(malformed());
        }
        Ok(Self {
            account_id: account.parse()?,
            valid_start: UNIX_EPOCH + Duration::new(seconds, nanos),
            nonce,
            scheduled,
        })
    }
}

impl ValidateChecksums for TransactionId {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.account_id.validate_checksum(ledger)
    }
}

impl From<TransactionId> for proto::TransactionId {
    fn from(value: TransactionId) -> Self {
        Self {
            transaction_valid_start: Some(value.valid_start.into()),
            account_id: Some(value.account_id.into()),
            scheduled: value.scheduled,
            nonce: value.nonce.unwrap_or_default(),
        }
    }
}

impl TryFrom<proto::TransactionId> for TransactionId {
    type Error = ValidationError;

    fn try_from(value: proto::TransactionId) -> Result<Self, Self::Error> {
        let account_id = value
            .account_id
            .ok_or(ValidationError::MissingField("transaction_id.account_id"))?;
        let valid_start = value
            .transaction_valid_start
            .ok_or(ValidationError::MissingField("transaction_id.transaction_valid_start"))?;
        Ok(Self {
            account_id: account_id.try_into()?,
            valid_start: valid_start.into(),
            nonce: (value.nonce != 0).then_some(value.nonce),
            scheduled: value.scheduled,
        })
    }
}
