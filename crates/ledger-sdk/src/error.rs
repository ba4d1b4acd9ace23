use ledger_types::{IdError, KeyError, ValidationError};
use thiserror::Error;

use crate::{receipt::Status, transaction_id::TransactionId, transport::TransportError};

/// Local, synchronous failures raised while shaping a transaction.
///
/// A setter that returns one of these has left the transaction unchanged.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("transaction is immutable; it has at least one signature or has been explicitly frozen")]
    FrozenTransaction,
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("failed to decode transaction bytes: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl TransactionError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }
}

/// Failures of the execute/receipt path.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("transaction {transaction_id} failed precheck with status {status}")]
    Precheck {
        status: Status,
        transaction_id: TransactionId,
    },
    #[error("receipt for transaction {transaction_id} contained error status {status}")]
    ReceiptStatus {
        status: Status,
        transaction_id: TransactionId,
    },
    #[error("client has no operator; set one to pay for transactions")]
    MissingOperator,
    #[error("node returned an unexpected response: {0}")]
    UnexpectedResponse(&'static str),
    #[error("invalid client configuration: {0}")]
    Config(String),
}
