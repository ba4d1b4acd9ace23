//! Ledger identity and the address checksum derived from it.
//!
//! A checksum is five lowercase letters computed from the textual `shard.realm.num`
//! form of an id and the bytes of the ledger it belongs to. Ids copied between
//! networks fail validation instead of silently addressing the wrong account.

use std::{fmt, str::FromStr};

use crate::error::IdError;

/// Identifies the network a client talks to; feeds the checksum algorithm.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LedgerId(Vec<u8>);

impl LedgerId {
    pub fn mainnet() -> Self {
        Self(vec![0x00])
    }

    pub fn testnet() -> Self {
        Self(vec![0x01])
    }

    pub fn previewnet() -> Self {
        Self(vec![0x02])
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn known_name(&self) -> Option<&'static str> {
        match self.0.as_slice() {
            [0x00] => Some("mainnet"),
            [0x01] => Some("testnet"),
            [0x02] => Some("previewnet"),
            _ => None,
        }
    }
}

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.known_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{}", hex::encode(&self.0)),
        }
    }
}

impl fmt::Debug for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedgerId({self})")
    }
}

impl FromStr for LedgerId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::mainnet()),
            "testnet" => Ok(Self::testnet()),
            "previewnet" => Ok(Self::previewnet()),
            other => {
                let digits = other.strip_prefix("0x").unwrap_or(other);
                hex::decode(digits)
                    .ok()
                    .filter(|bytes| !bytes.is_empty())
                    .map(Self)
                    .ok_or_else(|| IdError::malformed(s, "unknown ledger name"))
            }
        }
    }
}

/// Five-letter address checksum.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum([u8; 5]);

impl Checksum {
    pub fn as_str(&self) -> &str {
        // Constructed from ASCII lowercase letters only.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Computes the checksum of `address` (the `shard.realm.num` text) on `ledger`.
    pub fn compute(ledger: &LedgerId, address: &str) -> Self {
        const P3: u64 = 26 * 26 * 26;
        const P5: u64 = 26 * 26 * 26 * 26 * 26;
        const M: u64 = 1_000_003;
        const W: u64 = 31;

        let mut s = 0u64;
        let mut s0 = 0u64;
        let mut s1 = 0u64;
        for (i, ch) in address.chars().enumerate() {
            let digit = match ch {
                '.' => 10,
                other => u64::from(other.to_digit(10).unwrap_or(0)),
            };
            s = (W * s + digit) % P3;
            if i % 2 == 0 {
                s0 = (s0 + digit) % 11;
            } else {
                s1 = (s1 + digit) % 11;
            }
        }

        let mut sh = 0u64;
        for byte in ledger.as_bytes().iter().chain([0u8; 6].iter()) {
            sh = (W * sh + u64::from(*byte)) % P5;
        }

        let len = address.chars().count() as u64;
        let c = ((((len % 5) * 11 + s0) * 11 + s1) * P3 + s + sh) % P5;
        let mut cp = (c * M) % P5;

        let mut out = [b'a'; 5];
        for slot in out.iter_mut().rev() {
            *slot = b'a' + (cp % 26) as u8;
            cp /= 26;
        }
        Self(out)
    }
}

impl FromStr for Checksum {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes: [u8; 5] = s
            .as_bytes()
            .try_into()
            .map_err(|_| IdError::malformed(s, "checksum must be five letters"))?;
        if !bytes.iter().all(u8::is_ascii_lowercase) {
            return Err(IdError::malformed(s, "checksum must be lowercase letters"));
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum({})", self.as_str())
    }
}

/// Checks a parsed checksum against the one the ledger would produce.
pub(crate) fn verify_checksum(
    ledger: &LedgerId,
    address: &str,
    present: Option<Checksum>,
) -> Result<(), IdError> {
    let Some(actual) = present else {
        return Ok(());
    };
    let expected = Checksum::compute(ledger, address);
    if expected != actual {
        return Err(IdError::BadChecksum {
            id: address.to_owned(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Checksum, LedgerId};

    #[test]
    fn checksum_is_five_lowercase_letters() {
        let checksum = Checksum::compute(&LedgerId::mainnet(), "0.0.123");
        assert_eq!(checksum.as_str().len(), 5);
        assert!(checksum.as_str().bytes().all(|b| b.is_ascii_lowercase()));
    }

    #[test]
    fn checksum_depends_on_ledger() {
        let mainnet = Checksum::compute(&LedgerId::mainnet(), "0.0.123");
        let testnet = Checksum::compute(&LedgerId::testnet(), "0.0.123");
        assert_ne!(mainnet, testnet);
        assert_eq!(mainnet, Checksum::compute(&LedgerId::mainnet(), "0.0.123"));
    }

    #[test]
    fn parses_ledger_names_and_hex() {
        assert_eq!("mainnet".parse::<LedgerId>().unwrap(), LedgerId::mainnet());
        assert_eq!("previewnet".parse::<LedgerId>().unwrap(), LedgerId::previewnet());
        assert_eq!(
            "0x03".parse::<LedgerId>().unwrap(),
            LedgerId::from_bytes(vec![0x03])
        );
        assert!("nowhere".parse::<LedgerId>().is_err());
    }

    #[test]
    fn rejects_bad_checksum_text() {
        assert!("abcd".parse::<Checksum>().is_err());
        assert!("ABCDE".parse::<Checksum>().is_err());
        assert!("abcde".parse::<Checksum>().is_ok());
    }
}
