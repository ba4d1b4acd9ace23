use std::{fmt, str::FromStr};

use ed25519_dalek::{Signer as DalekSigner, Verifier as DalekVerifier};
use k256::{
    ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier},
    elliptic_curve::sec1::ToEncodedPoint,
};
use ledger_types::{EvmAddress, KeyError, PublicKey, Signer};
use rand::rngs::OsRng;

use crate::hashing::keccak_prehash;

/// Signing key for one of the two supported algorithms.
///
/// ECDSA signatures are over the keccak256 digest of the message and are encoded as
/// 64-byte `r || s`.
#[derive(Clone)]
pub enum PrivateKey {
    Ed25519(ed25519_dalek::SigningKey),
    Ecdsa(k256::ecdsa::SigningKey),
}

impl PrivateKey {
    pub fn generate_ed25519() -> Self {
        Self::Ed25519(ed25519_dalek::SigningKey::generate(&mut OsRng))
    }

    pub fn generate_ecdsa() -> Self {
        Self::Ecdsa(k256::ecdsa::SigningKey::random(&mut OsRng))
    }

    pub fn from_bytes_ed25519(bytes: &[u8]) -> Result<Self, KeyError> {
        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| KeyError::Malformed(format!("ed25519 seed of {} bytes", bytes.len())))?;
        Ok(Self::Ed25519(ed25519_dalek::SigningKey::from_bytes(&seed)))
    }

    pub fn from_bytes_ecdsa(bytes: &[u8]) -> Result<Self, KeyError> {
        k256::ecdsa::SigningKey::from_slice(bytes)
            .map(Self::Ecdsa)
            .map_err(|_| KeyError::Malformed("invalid secp256k1 scalar".to_owned()))
    }

    pub fn to_bytes_raw(&self) -> [u8; 32] {
        match self {
            Self::Ed25519(key) => key.to_bytes(),
            Self::Ecdsa(key) => key.to_bytes().into(),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Ed25519(key) => PublicKey::Ed25519(key.verifying_key().to_bytes()),
            Self::Ecdsa(key) => {
                let point = k256::PublicKey::from(key.verifying_key()).to_encoded_point(true);
                let mut compressed = [0u8; 33];
                compressed.copy_from_slice(point.as_bytes());
                PublicKey::Ecdsa(compressed)
            }
        }
    }

    pub fn is_ecdsa(&self) -> bool {
        matches!(self, Self::Ecdsa(_))
    }

    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, KeyError> {
        match self {
            Self::Ed25519(key) => Ok(key.sign(message).to_bytes().to_vec()),
            Self::Ecdsa(key) => {
                let signature: k256::ecdsa::Signature = key
                    .sign_prehash(&keccak_prehash(message))
                    .map_err(|err| KeyError::Malformed(format!("ecdsa signing: {err}")))?;
                Ok(signature.to_bytes().to_vec())
            }
        }
    }

    pub fn to_evm_address(&self) -> Result<EvmAddress, KeyError> {
        if !self.is_ecdsa() {
            return Err(KeyError::BadKey("Private key is not ECDSA"));
        }
        self.public_key().to_evm_address()
    }
}

/// Checks `signature` over `message` with the scheme `public_key` belongs to.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &[u8]) -> Result<(), KeyError> {
    let invalid = || KeyError::Malformed("signature does not verify".to_owned());
    match public_key {
        PublicKey::Ed25519(raw) => {
            let key = ed25519_dalek::VerifyingKey::from_bytes(raw)
                .map_err(|err| KeyError::Malformed(format!("invalid ed25519 key: {err}")))?;
            let signature =
                ed25519_dalek::Signature::from_slice(signature).map_err(|_| invalid())?;
            key.verify(message, &signature).map_err(|_| invalid())
        }
        PublicKey::Ecdsa(raw) => {
            let key = k256::ecdsa::VerifyingKey::from_sec1_bytes(raw)
                .map_err(|_| KeyError::Malformed("invalid secp256k1 point".to_owned()))?;
            let signature = k256::ecdsa::Signature::from_slice(signature).map_err(|_| invalid())?;
            key.verify_prehash(&keccak_prehash(message), &signature)
                .map_err(|_| invalid())
        }
    }
}

impl Signer for PrivateKey {
    fn public_key(&self) -> PublicKey {
        PrivateKey::public_key(self)
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, KeyError> {
        PrivateKey::sign(self, message)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey")
            .field(&self.public_key())
            .finish()
    }
}

impl FromStr for PrivateKey {
    type Err = KeyError;

    /// `ed25519:<hex>` or `ecdsa:<hex>`; bare hex is read as Ed25519.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (algorithm, digits) = s.split_once(':').unwrap_or(("ed25519", s));
        let digits = digits.strip_prefix("0x").unwrap_or(digits);
        let bytes = hex::decode(digits).map_err(|err| KeyError::Malformed(err.to_string()))?;
        match algorithm {
            "ed25519" => Self::from_bytes_ed25519(&bytes),
            "ecdsa" => Self::from_bytes_ecdsa(&bytes),
            other => Err(KeyError::Malformed(format!("unknown key algorithm `{other}`"))),
        }
    }
}
