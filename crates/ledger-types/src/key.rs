//! Public keys used as account identity (aliases) and as transaction key material.

use std::{fmt, str::FromStr};

use alloy_primitives::keccak256;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{error::KeyError, ids::ContractId, EvmAddress};

/// DER prefix of an Ed25519 `SubjectPublicKeyInfo`.
const ED25519_DER_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// DER prefix of a compressed secp256k1 `SubjectPublicKeyInfo`.
const ECDSA_COMPRESSED_DER_PREFIX: [u8; 14] = [
    0x30, 0x2d, 0x30, 0x07, 0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a, 0x03, 0x22, 0x00,
];

/// DER prefix of an uncompressed secp256k1 `SubjectPublicKeyInfo`.
const ECDSA_UNCOMPRESSED_DER_PREFIX: [u8; 23] = [
    0x30, 0x56, 0x30, 0x10, 0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, 0x06, 0x05,
    0x2b, 0x81, 0x04, 0x00, 0x0a, 0x03, 0x42, 0x00,
];

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PublicKey {
    Ed25519([u8; 32]),
    /// SEC1-compressed secp256k1 point.
    Ecdsa([u8; 33]),
}

impl PublicKey {
    pub fn from_bytes_ed25519(bytes: &[u8]) -> Result<Self, KeyError> {
        let raw = bytes.strip_prefix(&ED25519_DER_PREFIX[..]).unwrap_or(bytes);
        let key: [u8; 32] = raw
            .try_into()
            .map_err(|_| KeyError::Malformed(format!("ed25519 key of {} bytes", raw.len())))?;
        Ok(Self::Ed25519(key))
    }

    pub fn from_bytes_ecdsa(bytes: &[u8]) -> Result<Self, KeyError> {
        let raw = bytes
            .strip_prefix(&ECDSA_COMPRESSED_DER_PREFIX[..])
            .or_else(|| bytes.strip_prefix(&ECDSA_UNCOMPRESSED_DER_PREFIX[..]))
            .unwrap_or(bytes);
        let point = k256::PublicKey::from_sec1_bytes(raw)
            .map_err(|_| KeyError::Malformed("invalid secp256k1 point".to_owned()))?;
        let compressed = point.to_encoded_point(true);
        let out: [u8; 33] = compressed
            .as_bytes()
            .try_into()
            .map_err(|_| KeyError::Malformed("unexpected secp256k1 encoding".to_owned()))?;
        Ok(Self::Ecdsa(out))
    }

    /// Accepts DER or raw encodings of either algorithm. Raw 32 bytes is Ed25519.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.starts_with(&ED25519_DER_PREFIX) || bytes.len() == 32 {
            return Self::from_bytes_ed25519(bytes);
        }
        Self::from_bytes_ecdsa(bytes)
    }

    pub fn to_bytes_raw(&self) -> Vec<u8> {
        match self {
            Self::Ed25519(key) => key.to_vec(),
            Self::Ecdsa(key) => key.to_vec(),
        }
    }

    pub fn to_bytes_der(&self) -> Vec<u8> {
        let (prefix, raw) = match self {
            Self::Ed25519(key) => (ED25519_DER_PREFIX.as_slice(), key.as_slice()),
            Self::Ecdsa(key) => (ECDSA_COMPRESSED_DER_PREFIX.as_slice(), key.as_slice()),
        };
        [prefix, raw].concat()
    }

    pub fn is_ecdsa(&self) -> bool {
        matches!(self, Self::Ecdsa(_))
    }

    /// Ethereum-style address: last 20 bytes of keccak256 over the uncompressed point.
    pub fn to_evm_address(&self) -> Result<EvmAddress, KeyError> {
        let Self::Ecdsa(compressed) = self else {
            return Err(KeyError::BadKey("Public key is not ECDSA"));
        };
        let point = k256::PublicKey::from_sec1_bytes(compressed)
            .map_err(|_| KeyError::Malformed("invalid secp256k1 point".to_owned()))?;
        let uncompressed = point.to_encoded_point(false);
        let hash = keccak256(&uncompressed.as_bytes()[1..]);
        EvmAddress::from_slice(&hash[12..])
            .map_err(|err| KeyError::Malformed(err.to_string()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes_der()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ed25519(_) => write!(f, "PublicKey::Ed25519({self})"),
            Self::Ecdsa(_) => write!(f, "PublicKey::Ecdsa({self})"),
        }
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|err| KeyError::Malformed(err.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Key material attached to accounts, tokens, nodes and hooks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Single(PublicKey),
    ContractId(ContractId),
    /// `threshold: None` means every key must sign.
    KeyList {
        keys: Vec<Key>,
        threshold: Option<u32>,
    },
}

impl From<PublicKey> for Key {
    fn from(value: PublicKey) -> Self {
        Self::Single(value)
    }
}
