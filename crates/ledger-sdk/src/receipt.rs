//! Consensus outcomes: receipts and records.

use std::{fmt, time::SystemTime};

use ledger_proto::services::{self as proto, ResponseCodeEnum};
use ledger_types::{
    AccountId, ContractId, FileId, Hbar, ScheduleId, TokenId, TopicId, TransactionHash,
    ValidationError,
};

use crate::{
    error::ClientError,
    pending_airdrop::PendingAirdropRecord,
    token_transfers::{hbar_transfers_from_wire, token_transfer_list_from_wire, HbarTransfer, TokenTransferList},
    transaction_id::TransactionId,
};

/// Response code, keeping codes this SDK has no name for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Known(ResponseCodeEnum),
    Other(i32),
}

impl Status {
    pub fn from_code(code: i32) -> Self {
        ResponseCodeEnum::try_from(code).map_or(Self::Other(code), Self::Known)
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Known(code) => *code as i32,
            Self::Other(code) => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Known(ResponseCodeEnum::Success))
    }

    /// The answer is not final yet; asking again later may succeed.
    pub(crate) fn is_retryable_for_receipt(&self) -> bool {
        matches!(
            self,
            Self::Known(
                ResponseCodeEnum::Busy
                    | ResponseCodeEnum::Unknown
                    | ResponseCodeEnum::ReceiptNotFound
                    | ResponseCodeEnum::RecordNotFound
            )
        )
    }
}

impl From<ResponseCodeEnum> for Status {
    fn from(value: ResponseCodeEnum) -> Self {
        Self::Known(value)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(code) => write!(f, "{code:?}"),
            Self::Other(code) => write!(f, "code {code}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub status: Status,
    pub account_id: Option<AccountId>,
    pub file_id: Option<FileId>,
    pub contract_id: Option<ContractId>,
    pub topic_id: Option<TopicId>,
    pub token_id: Option<TokenId>,
    pub schedule_id: Option<ScheduleId>,
    pub total_supply: u64,
    pub serials: Vec<i64>,
    pub node_id: u64,
}

impl TransactionReceipt {
    /// Fails with [`ClientError::ReceiptStatus`] unless the status is `SUCCESS`.
    pub fn validate_status(&self, transaction_id: TransactionId) -> Result<&Self, ClientError> {
        if !self.status.is_success() {
            return Err(ClientError::ReceiptStatus {
                status: self.status,
                transaction_id,
            });
        }
        Ok(self)
    }
}

impl TryFrom<proto::TransactionReceipt> for TransactionReceipt {
    type Error = ValidationError;

    fn try_from(value: proto::TransactionReceipt) -> Result<Self, Self::Error> {
        Ok(Self {
            status: Status::from_code(value.status),
            account_id: value.account_id.map(TryInto::try_into).transpose()?,
            file_id: value.file_id.map(Into::into),
            contract_id: value.contract_id.map(TryInto::try_into).transpose()?,
            topic_id: value.topic_id.map(Into::into),
            token_id: value.token_id.map(Into::into),
            schedule_id: value.schedule_id.map(Into::into),
            total_supply: value.new_total_supply,
            serials: value.serial_numbers,
            node_id: value.node_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub receipt: TransactionReceipt,
    pub transaction_hash: TransactionHash,
    pub consensus_timestamp: Option<SystemTime>,
    pub transaction_id: Option<TransactionId>,
    pub memo: String,
    pub transaction_fee: Hbar,
    pub hbar_transfers: Vec<HbarTransfer>,
    pub token_transfers: Vec<TokenTransferList>,
    pub new_pending_airdrops: Vec<PendingAirdropRecord>,
}

impl TryFrom<proto::TransactionRecord> for TransactionRecord {
    type Error = ValidationError;

    fn try_from(value: proto::TransactionRecord) -> Result<Self, Self::Error> {
        let receipt = value
            .receipt
            .ok_or(ValidationError::MissingField("record.receipt"))?;
        Ok(Self {
            receipt: receipt.try_into()?,
            transaction_hash: TransactionHash::from_slice(&value.transaction_hash)?,
            consensus_timestamp: value.consensus_timestamp.map(Into::into),
            transaction_id: value.transaction_id.map(TryInto::try_into).transpose()?,
            memo: value.memo,
            transaction_fee: Hbar::from_tinybars(
                i64::try_from(value.transaction_fee)
                    .map_err(|_| ValidationError::InvalidField("record.transaction_fee"))?,
            ),
            hbar_transfers: hbar_transfers_from_wire(value.transfer_list)?,
            token_transfers: value
                .token_transfer_lists
                .into_iter()
                .map(token_transfer_list_from_wire)
                .collect::<Result<_, _>>()?,
            new_pending_airdrops: value
                .new_pending_airdrops
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<_, _>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use ledger_proto::services::{self as proto, ResponseCodeEnum};
    use ledger_types::{AccountId, ValidationError};

    use super::{Status, TransactionReceipt, TransactionRecord};

    #[test]
    fn unknown_codes_are_kept() {
        assert_eq!(Status::from_code(22), Status::Known(ResponseCodeEnum::Success));
        let other = Status::from_code(9_999);
        assert_eq!(other, Status::Other(9_999));
        assert_eq!(other.code(), 9_999);
        assert!(!other.is_success());
    }

    #[test]
    fn receipt_carries_created_entities() {
        let receipt = TransactionReceipt::try_from(proto::TransactionReceipt {
            status: ResponseCodeEnum::Success as i32,
            account_id: Some(AccountId::from_num(1234).into()),
            serial_numbers: vec![1, 2],
            ..Default::default()
        })
        .unwrap();
        assert!(receipt.status.is_success());
        assert_eq!(receipt.account_id, Some(AccountId::from_num(1234)));
        assert_eq!(receipt.serials, vec![1, 2]);
    }

    #[test]
    fn record_requires_receipt_and_full_hash() {
        let err = TransactionRecord::try_from(proto::TransactionRecord::default()).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("record.receipt"));

        let err = TransactionRecord::try_from(proto::TransactionRecord {
            receipt: Some(proto::TransactionReceipt::default()),
            transaction_hash: vec![0; 12],
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidLength { .. }));
    }
}
