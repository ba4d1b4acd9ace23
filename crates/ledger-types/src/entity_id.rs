//! Account identity in its three mutually exclusive forms.
//!
//! An account is addressed by `shard.realm.num`, by an alias public key, or by a
//! 20-byte EVM address. Values of different forms never compare equal, even when the
//! network would resolve them to the same account: resolution happens server side.

use std::{cmp::Ordering, fmt, hash::Hash, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    error::IdError,
    ids::{parse_numeric, split_address, EvmAddress},
    key::PublicKey,
    ledger::{verify_checksum, Checksum, LedgerId},
};

/// Which identity the id carries. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityForm {
    Num(u64),
    AliasKey(PublicKey),
    EvmAddress(EvmAddress),
}

impl EntityForm {
    fn rank(&self) -> u8 {
        match self {
            Self::Num(_) => 0,
            Self::AliasKey(_) => 1,
            Self::EvmAddress(_) => 2,
        }
    }
}

#[derive(Clone, Copy)]
pub struct EntityId {
    pub shard: u64,
    pub realm: u64,
    pub form: EntityForm,
    checksum: Option<Checksum>,
}

/// Accounts are the only entities that carry alias forms.
pub type AccountId = EntityId;

impl EntityId {
    pub const fn new(shard: u64, realm: u64, num: u64) -> Self {
        Self {
            shard,
            realm,
            form: EntityForm::Num(num),
            checksum: None,
        }
    }

    pub const fn from_num(num: u64) -> Self {
        Self::new(0, 0, num)
    }

    pub const fn from_alias_key(shard: u64, realm: u64, key: PublicKey) -> Self {
        Self {
            shard,
            realm,
            form: EntityForm::AliasKey(key),
            checksum: None,
        }
    }

    /// Always produces the EVM-address form; a long-zero address is not folded back
    /// into a numeric id.
    pub const fn from_evm_address(address: EvmAddress, shard: u64, realm: u64) -> Self {
        Self {
            shard,
            realm,
            form: EntityForm::EvmAddress(address),
            checksum: None,
        }
    }

    /// Entity number; 0 for alias and EVM-address forms.
    pub fn num(&self) -> u64 {
        match self.form {
            EntityForm::Num(num) => num,
            _ => 0,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self.form, EntityForm::Num(_))
    }

    pub fn alias_key(&self) -> Option<&PublicKey> {
        match &self.form {
            EntityForm::AliasKey(key) => Some(key),
            _ => None,
        }
    }

    pub fn evm_address(&self) -> Option<EvmAddress> {
        match self.form {
            EntityForm::EvmAddress(address) => Some(address),
            _ => None,
        }
    }

    pub fn checksum(&self) -> Option<Checksum> {
        self.checksum
    }

    /// Stored address for the EVM form, otherwise the long-zero address of `num`.
    pub fn to_evm_address(&self) -> EvmAddress {
        match self.form {
            EntityForm::EvmAddress(address) => address,
            _ => EvmAddress::long_zero(self.num()),
        }
    }

    pub fn to_string_with_checksum(&self, ledger: &LedgerId) -> Result<String, IdError> {
        if !self.is_numeric() {
            return Err(IdError::ChecksumUnsupported(self.to_string()));
        }
        let address = self.to_string();
        let checksum = Checksum::compute(ledger, &address);
        Ok(format!("{address}-{checksum}"))
    }

    /// No-op for alias and EVM-address forms: they have no checksum.
    pub fn validate_checksum(&self, ledger: &LedgerId) -> Result<(), IdError> {
        if !self.is_numeric() {
            return Ok(());
        }
        verify_checksum(ledger, &self.to_string(), self.checksum)
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        self.shard == other.shard && self.realm == other.realm && self.form == other.form
    }
}

impl Eq for EntityId {}

impl Hash for EntityId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.shard.hash(state);
        self.realm.hash(state);
        self.form.hash(state);
    }
}

impl PartialOrd for EntityId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntityId {
    /// Numeric ids sort before alias ids, which sort before EVM addresses.
    fn cmp(&self, other: &Self) -> Ordering {
        self.form
            .rank()
            .cmp(&other.form.rank())
            .then(self.shard.cmp(&other.shard))
            .then(self.realm.cmp(&other.realm))
            .then_with(|| match (&self.form, &other.form) {
                (EntityForm::Num(a), EntityForm::Num(b)) => a.cmp(b),
                (EntityForm::AliasKey(a), EntityForm::AliasKey(b)) => a.cmp(b),
                (EntityForm::EvmAddress(a), EntityForm::EvmAddress(b)) => a.cmp(b),
                _ => Ordering::Equal,
            })
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.form {
            EntityForm::Num(num) => write!(f, "{}.{}.{}", self.shard, self.realm, num),
            EntityForm::AliasKey(key) => write!(f, "{}.{}.{}", self.shard, self.realm, key),
            EntityForm::EvmAddress(address) => write!(
                f,
                "{}.{}.{}",
                self.shard,
                self.realm,
                hex::encode(address.as_bytes())
            ),
        }
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({self})")
    }
}

impl FromStr for EntityId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(address) = bare_evm_address(s) {
            return Ok(Self::from_evm_address(address, 0, 0));
        }

        let (shard, realm, last) = split_address(s, s)?;
        // 40 hex digits is an address even when every digit is decimal.
        if let Some(address) = bare_evm_address(last) {
            return Ok(Self::from_evm_address(address, shard, realm));
        }
        if last.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
            if let Ok((shard, realm, num, checksum)) = parse_numeric(s) {
                return Ok(Self {
                    checksum,
                    ..Self::new(shard, realm, num)
                });
            }
        }

        let bytes = hex::decode(last.strip_prefix("0x").unwrap_or(last))
            .map_err(|_| IdError::malformed(s, "expected a number, alias key or evm address"))?;
        // Length alone decides: 20 bytes is an address, anything else must be a key.
        if bytes.len() == EvmAddress::LEN {
            let address = EvmAddress::from_slice(&bytes)
                .map_err(|_| IdError::malformed(s, "invalid evm address"))?;
            return Ok(Self::from_evm_address(address, shard, realm));
        }
        let key = PublicKey::from_bytes(&bytes)
            .map_err(|_| IdError::malformed(s, "alias is not a valid public key"))?;
        Ok(Self::from_alias_key(shard, realm, key))
    }
}

/// `0x`-prefixed or bare 40-hex-digit address with implicit shard and realm 0.
fn bare_evm_address(s: &str) -> Option<EvmAddress> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.len() != EvmAddress::LEN * 2 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    digits.parse().ok()
}

impl From<EvmAddress> for EntityId {
    fn from(value: EvmAddress) -> Self {
        Self::from_evm_address(value, 0, 0)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityForm, EntityId};
    use crate::{error::IdError, ids::EvmAddress, key::PublicKey, ledger::LedgerId};

    const ECDSA_G: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn numeric_ids_round_trip() {
        for (s, r, n) in [(0, 0, 0), (0, 0, 42), (1, 2, 3), (u64::MAX, 7, u64::MAX)] {
            let id = EntityId::new(s, r, n);
            assert_eq!(id.to_string().parse::<EntityId>().unwrap(), id);
        }
    }

    #[test]
    fn evm_address_round_trips() {
        for bytes in [[0u8; 20], [0xab; 20], [0x11; 20]] {
            let address = EvmAddress::new(bytes);
            assert_eq!(
                EntityId::from_evm_address(address, 0, 0).to_evm_address(),
                address
            );
        }
    }

    #[test]
    fn decimal_looking_evm_address_stays_an_address() {
        let id = EntityId::from_evm_address(EvmAddress::long_zero(16), 0, 0);
        let text = id.to_string();
        assert_eq!(text, "0.0.0000000000000000000000000000000000000010");

        let parsed = text.parse::<EntityId>().unwrap();
        assert!(matches!(parsed.form, EntityForm::EvmAddress(_)));
        assert_eq!(parsed, id);
        assert_ne!(parsed, EntityId::new(0, 0, 10));
        assert_eq!(parsed.to_evm_address(), EvmAddress::long_zero(16));

        let shifted = "1.2.0x0000000000000000000000000000000000000010"
            .parse::<EntityId>()
            .unwrap();
        assert_eq!(shifted, EntityId::from_evm_address(EvmAddress::long_zero(16), 1, 2));
    }

    #[test]
    fn long_zero_synthesis_for_numeric_ids() {
        let address = EntityId::new(0, 0, 42).to_evm_address();
        let mut expected = [0u8; 20];
        expected[19] = 0x2a;
        assert_eq!(address.into_inner(), expected);
    }

    #[test]
    fn parses_every_textual_form() {
        let evm = "0.0.7e5f4552091a69125d5dfcb7b8c2659029395bdf"
            .parse::<EntityId>()
            .unwrap();
        assert!(matches!(evm.form, EntityForm::EvmAddress(_)));
        assert_eq!(evm.num(), 0);

        let bare = "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
            .parse::<EntityId>()
            .unwrap();
        assert_eq!(bare, evm);
        let unprefixed = "7e5f4552091a69125d5dfcb7b8c2659029395bdf"
            .parse::<EntityId>()
            .unwrap();
        assert_eq!(unprefixed, evm);

        let key: PublicKey = ECDSA_G.parse().unwrap();
        let alias_text = format!("0.0.{}", hex::encode(key.to_bytes_der()));
        let alias = alias_text.parse::<EntityId>().unwrap();
        assert_eq!(alias.alias_key(), Some(&key));
        assert_eq!(alias.to_string(), alias_text);
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for input in ["", "0.0", "x.0.1", "0.0.zz", "0.0.abcd", "0x1234"] {
            let err = input.parse::<EntityId>().expect_err(input);
            assert!(matches!(err, IdError::Malformed { .. }), "{input}: {err:?}");
        }
    }

    #[test]
    fn cross_form_values_are_never_equal_and_order_by_form() {
        let numeric = EntityId::from_num(42);
        let evm = EntityId::from_evm_address(EvmAddress::long_zero(42), 0, 0);
        let alias = EntityId::from_alias_key(0, 0, PublicKey::Ed25519([1; 32]));
        assert_ne!(numeric, evm);
        assert_ne!(numeric, alias);

        let mut ids = vec![evm, alias, numeric];
        ids.sort();
        assert_eq!(ids, vec![numeric, alias, evm]);
    }

    #[test]
    fn checksum_validation_only_applies_to_numeric_form() {
        let text = EntityId::from_num(5)
            .to_string_with_checksum(&LedgerId::previewnet())
            .unwrap();
        let id: EntityId = text.parse().unwrap();
        id.validate_checksum(&LedgerId::previewnet()).unwrap();
        assert!(matches!(
            id.validate_checksum(&LedgerId::testnet()),
            Err(IdError::BadChecksum { .. })
        ));

        let evm = EntityId::from_evm_address(EvmAddress::new([3; 20]), 0, 0);
        evm.validate_checksum(&LedgerId::mainnet()).unwrap();
        assert!(evm.to_string_with_checksum(&LedgerId::mainnet()).is_err());
    }

    #[test]
    fn serializes_as_text() {
        let id = EntityId::new(0, 0, 1001);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0.0.1001\"");
        assert_eq!(serde_json::from_str::<EntityId>(&json).unwrap(), id);
    }
}
