use ledger_proto::services as proto;
use ledger_types::{AccountId, IdError, LedgerId, NftId, TokenId, ValidateChecksums, ValidationError};

/// A fungible token type or one NFT serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenReference {
    Fungible(TokenId),
    Nft(NftId),
}

impl ValidateChecksums for TokenReference {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        match self {
            Self::Fungible(token_id) => token_id.validate_checksum(ledger),
            Self::Nft(nft_id) => nft_id.validate_checksums(ledger),
        }
    }
}

impl From<TokenReference> for proto::TokenReference {
    fn from(value: TokenReference) -> Self {
        let token_identifier = match value {
            TokenReference::Fungible(token_id) => {
                proto::token_reference::TokenIdentifier::FungibleToken(token_id.into())
            }
            TokenReference::Nft(nft_id) => proto::token_reference::TokenIdentifier::Nft(nft_id.into()),
        };
        Self {
            token_identifier: Some(token_identifier),
        }
    }
}

impl TryFrom<proto::TokenReference> for TokenReference {
    type Error = ValidationError;

    fn try_from(value: proto::TokenReference) -> Result<Self, Self::Error> {
        match value.token_identifier {
            Some(proto::token_reference::TokenIdentifier::FungibleToken(token_id)) => {
                Ok(Self::Fungible(token_id.into()))
            }
            Some(proto::token_reference::TokenIdentifier::Nft(nft_id)) => {
                Ok(Self::Nft(nft_id.try_into()?))
            }
            None => Err(ValidationError::MissingField("token_reference.token_identifier")),
        }
    }
}

/// Identifies an airdrop held by the network until the receiver claims it or the
/// sender cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PendingAirdropId {
    pub sender: AccountId,
    pub receiver: AccountId,
    pub token: TokenReference,
}

impl ValidateChecksums for PendingAirdropId {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.sender.validate_checksum(ledger)?;
        self.receiver.validate_checksum(ledger)?;
        self.token.validate_checksums(ledger)
    }
}

impl From<PendingAirdropId> for proto::PendingAirdropId {
    fn from(value: PendingAirdropId) -> Self {
        let token_reference = match value.token {
            TokenReference::Fungible(token_id) => {
                proto::pending_airdrop_id::TokenReference::FungibleTokenType(token_id.into())
            }
            TokenReference::Nft(nft_id) => {
                proto::pending_airdrop_id::TokenReference::NonFungibleToken(nft_id.into())
            }
        };
        Self {
            sender_id: Some(value.sender.into()),
            receiver_id: Some(value.receiver.into()),
            token_reference: Some(token_reference),
        }
    }
}

impl TryFrom<proto::PendingAirdropId> for PendingAirdropId {
    type Error = ValidationError;

    fn try_from(value: proto::PendingAirdropId) -> Result<Self, Self::Error> {
        let sender = value
            .sender_id
            .ok_or(ValidationError::MissingField("pending_airdrop_id.sender_id"))?;
        let receiver = value
            .receiver_id
            .ok_or(ValidationError::MissingField("pending_airdrop_id.receiver_id"))?;
        let token = match value.token_reference {
            Some(proto::pending_airdrop_id::TokenReference::FungibleTokenType(token_id)) => {
                TokenReference::Fungible(token_id.into())
            }
            Some(proto::pending_airdrop_id::TokenReference::NonFungibleToken(nft_id)) => {
                TokenReference::Nft(nft_id.try_into()?)
            }
            None => {
                return Err(ValidationError::MissingField(
                    "pending_airdrop_id.token_reference",
                ))
            }
        };
        Ok(Self {
            sender: sender.try_into()?,
            receiver: receiver.try_into()?,
            token,
        })
    }
}

/// Pending airdrop reported in a transaction record, with the amount held for
/// fungible tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAirdropRecord {
    pub id: PendingAirdropId,
    pub amount: u64,
}

impl TryFrom<proto::PendingAirdropRecord> for PendingAirdropRecord {
    type Error = ValidationError;

    fn try_from(value: proto::PendingAirdropRecord) -> Result<Self, Self::Error> {
        let id = value
            .pending_airdrop_id
            .ok_or(ValidationError::MissingField("pending_airdrop_record.pending_airdrop_id"))?;
        Ok(Self {
            id: id.try_into()?,
            amount: value.pending_airdrop_value.map_or(0, |value| value.amount),
        })
    }
}
