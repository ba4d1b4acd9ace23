//! Error types for identifier parsing, checksum validation, keys, and wire decoding.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid length for {kind}: expected {expected}, got {actual}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("invalid field `{0}`")]
    InvalidField(&'static str),
    #[error(transparent)]
    Id(#[from] IdError),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("{0}")]
    Message(String),
}

/// Identifier parsing and checksum failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("malformed entity id `{input}`: {reason}")]
    Malformed { input: String, reason: &'static str },
    #[error("entity id {id} has checksum {actual}, expected {expected} for this ledger")]
    BadChecksum {
        id: String,
        expected: String,
        actual: String,
    },
    #[error("checksums are only defined for numeric ids, got {0}")]
    ChecksumUnsupported(String),
}

impl IdError {
    pub(crate) fn malformed(input: &str, reason: &'static str) -> Self {
        Self::Malformed {
            input: input.to_owned(),
            reason,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("malformed key: {0}")]
    Malformed(String),
    #[error("{0}")]
    BadKey(&'static str),
}
