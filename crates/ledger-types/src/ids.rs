use std::{cmp::Ordering, fmt, hash::Hash, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::{IdError, ValidationError},
    ledger::{verify_checksum, Checksum, LedgerId},
};

macro_rules! impl_fixed_bytes_id {
    ($name:ident, $len:expr) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn from_slice(bytes: &[u8]) -> Result<Self, ValidationError> {
                if bytes.len() != Self::LEN {
                    return Err(ValidationError::InvalidLength {
                        kind: stringify!($name),
                        expected: Self::LEN,
                        actual: bytes.len(),
                    });
                }
                let mut out = [0u8; Self::LEN];
                out.copy_from_slice(bytes);
                Ok(Self(out))
            }

            pub const fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub const fn into_inner(self) -> [u8; $len] {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                let bytes =
                    hex::decode(digits).map_err(|err| ValidationError::InvalidHex(err.to_string()))?;
                Self::from_slice(&bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(value: [u8; $len]) -> Self {
                Self::new(value)
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = ValidationError;

            fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
                Self::from_slice(value)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(de::Error::custom)
            }
        }
    };
}

impl_fixed_bytes_id!(EvmAddress, 20);
impl_fixed_bytes_id!(TransactionHash, 48);

impl EvmAddress {
    /// The "long-zero" address of a numeric entity: 12 zero bytes then big-endian `num`.
    pub fn long_zero(num: u64) -> Self {
        let mut out = [0u8; 20];
        out[12..].copy_from_slice(&num.to_be_bytes());
        Self(out)
    }

    /// Returns the embedded entity number when this is a long-zero address.
    pub fn long_zero_num(&self) -> Option<u64> {
        if self.0[..12].iter().any(|b| *b != 0) {
            return None;
        }
        let mut num = [0u8; 8];
        num.copy_from_slice(&self.0[12..]);
        Some(u64::from_be_bytes(num))
    }
}

/// `shard.realm.num` with an optional `-checksum` suffix.
pub(crate) fn parse_numeric(input: &str) -> Result<(u64, u64, u64, Option<Checksum>), IdError> {
    let (address, checksum) = match input.split_once('-') {
        Some((address, checksum)) => (address, Some(checksum.parse::<Checksum>()?)),
        None => (input, None),
    };
    let (shard, realm, last) = split_address(input, address)?;
    if last.len() == EvmAddress::LEN * 2 {
        return Err(IdError::malformed(input, "evm address where an entity number is expected"));
    }
    let num = parse_component(input, last)?;
    Ok((shard, realm, num, checksum))
}

/// Splits `shard.realm.rest`, parsing the first two components.
pub(crate) fn split_address<'a>(
    input: &str,
    address: &'a str,
) -> Result<(u64, u64, &'a str), IdError> {
    let mut parts = address.splitn(3, '.');
    let (Some(shard), Some(realm), Some(rest)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(IdError::malformed(input, "expected `shard.realm.num`"));
    };
    Ok((
        parse_component(input, shard)?,
        parse_component(input, realm)?,
        rest,
    ))
}

fn parse_component(input: &str, part: &str) -> Result<u64, IdError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdError::malformed(input, "id components must be decimal"));
    }
    part.parse()
        .map_err(|_| IdError::malformed(input, "id component out of range"))
}

macro_rules! impl_numeric_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name {
            pub shard: u64,
            pub realm: u64,
            pub num: u64,
            checksum: Option<Checksum>,
        }

        impl $name {
            pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
                Self {
                    shard,
                    realm,
                    num,
                    checksum: None,
                }
            }

            pub const fn from_num(num: u64) -> Self {
                Self::new(0, 0, num)
            }

            pub fn checksum(&self) -> Option<Checksum> {
                self.checksum
            }

            pub fn to_evm_address(&self) -> EvmAddress {
                EvmAddress::long_zero(self.num)
            }

            pub fn to_string_with_checksum(&self, ledger: &LedgerId) -> String {
                let address = self.to_string();
                let checksum = Checksum::compute(ledger, &address);
                format!("{address}-{checksum}")
            }

            pub fn validate_checksum(&self, ledger: &LedgerId) -> Result<(), IdError> {
                verify_checksum(ledger, &self.to_string(), self.checksum)
            }

            fn sort_key(&self) -> (u64, u64, u64) {
                (self.shard, self.realm, self.num)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.sort_key() == other.sort_key()
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.sort_key().hash(state);
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.sort_key().cmp(&other.sort_key())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}.{}.{}", self.shard, self.realm, self.num)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let (shard, realm, num, checksum) = parse_numeric(s)?;
                Ok(Self {
                    shard,
                    realm,
                    num,
                    checksum,
                })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                text.parse().map_err(de::Error::custom)
            }
        }
    };
}

impl_numeric_entity_id!(
    /// Fungible or non-fungible token type.
    TokenId
);
impl_numeric_entity_id!(ContractId);
impl_numeric_entity_id!(FileId);
impl_numeric_entity_id!(TopicId);
impl_numeric_entity_id!(ScheduleId);

impl TokenId {
    pub fn nft(self, serial: i64) -> NftId {
        NftId {
            token_id: self,
            serial,
        }
    }
}

/// One serial of a non-fungible token.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NftId {
    pub token_id: TokenId,
    pub serial: i64,
}

impl fmt::Display for NftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token_id, self.serial)
    }
}

impl fmt::Debug for NftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NftId({self})")
    }
}

impl FromStr for NftId {
    type Err = IdError;

    /// Accepts `token/serial` and `serial@token`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (token, serial) = match (s.split_once('/'), s.split_once('@')) {
            (Some((token, serial)), None) => (token, serial),
            (None, Some((serial, token))) => (token, serial),
            _ => return Err(IdError::malformed(s, "expected `token/serial`")),
        };
        let serial = serial
            .parse()
            .map_err(|_| IdError::malformed(s, "serial must be an integer"))?;
        Ok(Self {
            token_id: token.parse()?,
            serial,
        })
    }
}
