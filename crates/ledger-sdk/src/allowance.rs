//! Allowance bookkeeping for the approve and delete allowance transactions.
//!
//! Hbar and fungible-token allowances are plain records. NFT serial grants are
//! accumulated per `(action, owner, spender, delegating spender, token)` so that
//! repeated grants for the same tuple extend one serial list instead of producing
//! one wire entry per call. All-serials grants bypass the accumulator: every call
//! appends a new record, even for a tuple already present.

use std::collections::HashMap;

use ledger_types::{AccountId, Hbar, IdError, LedgerId, NftId, TokenId, ValidateChecksums};

/// Owner component of an accumulator key. `FeePayer` stands for an owner left
/// unset, which the network resolves to the transaction's payer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKey {
    Explicit(AccountId),
    FeePayer,
}

impl OwnerKey {
    pub fn account_id(&self) -> Option<AccountId> {
        match self {
            Self::Explicit(id) => Some(*id),
            Self::FeePayer => None,
        }
    }
}

impl From<Option<AccountId>> for OwnerKey {
    fn from(value: Option<AccountId>) -> Self {
        value.map_or(Self::FeePayer, Self::Explicit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllowanceAction {
    Approve,
    Revoke,
}

/// Which serials of an NFT collection a record covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NftSerials {
    Serials(Vec<i64>),
    /// Every serial, current and future; `false` withdraws a previous blanket grant.
    AllSerials(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowanceResource {
    Hbar(Hbar),
    Token { token_id: TokenId, amount: u64 },
    Nft { token_id: TokenId, serials: NftSerials },
}

/// One entry of an [`AllowanceIndex`] snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowanceGrant {
    pub action: AllowanceAction,
    pub owner: Option<AccountId>,
    /// Absent only on serial revocations, which withdraw the serial from every spender.
    pub spender: Option<AccountId>,
    pub delegating_spender: Option<AccountId>,
    pub resource: AllowanceResource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SerialKey {
    action: AllowanceAction,
    owner: OwnerKey,
    spender: Option<AccountId>,
    delegating_spender: Option<AccountId>,
    token_id: TokenId,
}

#[derive(Debug, Clone)]
enum Slot {
    Record(AllowanceGrant),
    Serials(SerialKey),
}

/// Ordered allowance records with per-key serial accumulators.
#[derive(Debug, Clone, Default)]
pub struct AllowanceIndex {
    slots: Vec<Slot>,
    serials: HashMap<SerialKey, Vec<i64>>,
}

impl AllowanceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records a snapshot would contain.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn approve_hbar(&mut self, owner: Option<AccountId>, spender: AccountId, amount: Hbar) {
        self.slots.push(Slot::Record(AllowanceGrant {
            action: AllowanceAction::Approve,
            owner,
            spender: Some(spender),
            delegating_spender: None,
            resource: AllowanceResource::Hbar(amount),
        }));
    }

    pub fn approve_token(
        &mut self,
        token_id: TokenId,
        owner: Option<AccountId>,
        spender: AccountId,
        amount: u64,
    ) {
        self.slots.push(Slot::Record(AllowanceGrant {
            action: AllowanceAction::Approve,
            owner,
            spender: Some(spender),
            delegating_spender: None,
            resource: AllowanceResource::Token { token_id, amount },
        }));
    }

    /// Appends `nft.serial` to the accumulator for the tuple, creating it on first use.
    pub fn grant_serial(
        &mut self,
        owner: Option<AccountId>,
        spender: AccountId,
        delegating_spender: Option<AccountId>,
        nft: NftId,
    ) {
        let key = SerialKey {
            action: AllowanceAction::Approve,
            owner: owner.into(),
            spender: Some(spender),
            delegating_spender,
            token_id: nft.token_id,
        };
        self.serials_mut(key).push(nft.serial);
    }

    /// Appends a blanket record. Never merged with earlier records for the same tuple.
    pub fn grant_all_serials(
        &mut self,
        owner: Option<AccountId>,
        spender: AccountId,
        token_id: TokenId,
        approved_for_all: bool,
    ) {
        self.slots.push(Slot::Record(AllowanceGrant {
            action: AllowanceAction::Approve,
            owner,
            spender: Some(spender),
            delegating_spender: None,
            resource: AllowanceResource::Nft {
                token_id,
                serials: NftSerials::AllSerials(approved_for_all),
            },
        }));
    }

    /// Revocation counterpart of [`AllowanceIndex::grant_serial`]. Revocations and
    /// grants never share an accumulator.
    pub fn revoke_serial(
        &mut self,
        owner: Option<AccountId>,
        spender: Option<AccountId>,
        nft: NftId,
    ) {
        let key = SerialKey {
            action: AllowanceAction::Revoke,
            owner: owner.into(),
            spender,
            delegating_spender: None,
            token_id: nft.token_id,
        };
        self.serials_mut(key).push(nft.serial);
    }

    pub fn revoke_all_serials(
        &mut self,
        owner: Option<AccountId>,
        spender: AccountId,
        token_id: TokenId,
    ) {
        self.slots.push(Slot::Record(AllowanceGrant {
            action: AllowanceAction::Revoke,
            owner,
            spender: Some(spender),
            delegating_spender: None,
            resource: AllowanceResource::Nft {
                token_id,
                serials: NftSerials::AllSerials(false),
            },
        }));
    }

    fn serials_mut(&mut self, key: SerialKey) -> &mut Vec<i64> {
        if !self.serials.contains_key(&key) {
            self.slots.push(Slot::Serials(key));
        }
        self.serials.entry(key).or_default()
    }

    /// Owned copy of every record, in the order each was first created.
    pub fn snapshot(&self) -> Vec<AllowanceGrant> {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Record(grant) => grant.clone(),
                Slot::Serials(key) => AllowanceGrant {
                    action: key.action,
                    owner: key.owner.account_id(),
                    spender: key.spender,
                    delegating_spender: key.delegating_spender,
                    resource: AllowanceResource::Nft {
                        token_id: key.token_id,
                        serials: NftSerials::Serials(
                            self.serials.get(key).cloned().unwrap_or_default(),
                        ),
                    },
                },
            })
            .collect()
    }
}

impl ValidateChecksums for AllowanceGrant {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.owner.validate_checksums(ledger)?;
        self.spender.validate_checksums(ledger)?;
        self.delegating_spender.validate_checksums(ledger)?;
        match &self.resource {
            AllowanceResource::Hbar(_) => Ok(()),
            AllowanceResource::Token { token_id, .. } | AllowanceResource::Nft { token_id, .. } => {
                token_id.validate_checksums(ledger)
            }
        }
    }
}

impl ValidateChecksums for AllowanceIndex {
    fn validate_checksums(&self, ledger: &LedgerId) -> Result<(), IdError> {
        self.snapshot().validate_checksums(ledger)
    }
}

#[cfg(test)]
mod tests {
    use ledger_types::{AccountId, Hbar, LedgerId, TokenId, ValidateChecksums};

    use super::{AllowanceAction, AllowanceIndex, AllowanceResource, NftSerials};

    fn owner() -> AccountId {
        AccountId::from_num(1001)
    }

    fn spender() -> AccountId {
        AccountId::from_num(1002)
    }

    fn token() -> TokenId {
        TokenId::from_num(5005)
    }

    fn serials_of(resource: &AllowanceResource) -> &NftSerials {
        match resource {
            AllowanceResource::Nft { serials, .. } => serials,
            other => panic!("expected an nft record, got {other:?}"),
        }
    }

    #[test]
    fn repeated_serial_grants_share_one_accumulator() {
        let mut index = AllowanceIndex::new();
        index.grant_serial(Some(owner()), spender(), None, token().nft(1));
        index.grant_serial(Some(owner()), spender(), None, token().nft(2));

        let snapshot = index.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(serials_of(&snapshot[0].resource), &NftSerials::Serials(vec![1, 2]));
    }

    #[test]
    fn all_serials_grants_are_never_merged() {
        let mut index = AllowanceIndex::new();
        index.grant_all_serials(Some(owner()), spender(), token(), true);
        index.grant_all_serials(Some(owner()), spender(), token(), true);

        let snapshot = index.snapshot();
        assert_eq!(snapshot.len(), 2);
        for grant in &snapshot {
            assert_eq!(serials_of(&grant.resource), &NftSerials::AllSerials(true));
        }
    }

    #[test]
    fn revoking_a_serial_after_all_serials_grant_keeps_both_records() {
        let mut index = AllowanceIndex::new();
        index.grant_all_serials(Some(owner()), spender(), token(), true);
        index.revoke_serial(Some(owner()), Some(spender()), token().nft(1));
        index.grant_serial(Some(owner()), spender(), None, token().nft(2));

        let snapshot = index.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].action, AllowanceAction::Approve);
        assert_eq!(serials_of(&snapshot[0].resource), &NftSerials::AllSerials(true));
        assert_eq!(snapshot[1].action, AllowanceAction::Revoke);
        assert_eq!(serials_of(&snapshot[1].resource), &NftSerials::Serials(vec![1]));
        assert_eq!(snapshot[2].action, AllowanceAction::Approve);
        assert_eq!(serials_of(&snapshot[2].resource), &NftSerials::Serials(vec![2]));
    }

    #[test]
    fn fee_payer_owner_is_distinct_from_explicit_owner() {
        let mut index = AllowanceIndex::new();
        index.grant_serial(None, spender(), None, token().nft(1));
        index.grant_serial(Some(owner()), spender(), None, token().nft(2));
        index.grant_serial(None, spender(), None, token().nft(3));

        let snapshot = index.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].owner, None);
        assert_eq!(serials_of(&snapshot[0].resource), &NftSerials::Serials(vec![1, 3]));
        assert_eq!(snapshot[1].owner, Some(owner()));
    }

    #[test]
    fn owners_with_the_same_address_collide_regardless_of_checksum() {
        let plain: AccountId = "0.0.1001".parse().unwrap();
        let with_checksum: AccountId = plain
            .to_string_with_checksum(&LedgerId::testnet())
            .unwrap()
            .parse()
            .unwrap();

        let mut index = AllowanceIndex::new();
        index.grant_serial(Some(plain), spender(), None, token().nft(1));
        index.grant_serial(Some(with_checksum), spender(), None, token().nft(2));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn delegating_spender_is_part_of_the_key() {
        let mut index = AllowanceIndex::new();
        let delegate = AccountId::from_num(1003);
        index.grant_serial(Some(owner()), spender(), None, token().nft(1));
        index.grant_serial(Some(owner()), spender(), Some(delegate), token().nft(2));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn snapshot_is_detached_from_the_index() {
        let mut index = AllowanceIndex::new();
        index.grant_serial(Some(owner()), spender(), None, token().nft(1));
        let before = index.snapshot();
        index.grant_serial(Some(owner()), spender(), None, token().nft(2));
        assert_eq!(serials_of(&before[0].resource), &NftSerials::Serials(vec![1]));
    }

    #[test]
    fn plain_records_keep_insertion_order() {
        let mut index = AllowanceIndex::new();
        index.approve_hbar(Some(owner()), spender(), Hbar::new(10));
        index.approve_token(token(), None, spender(), 7);
        let snapshot = index.snapshot();
        assert_eq!(snapshot[0].resource, AllowanceResource::Hbar(Hbar::new(10)));
        assert_eq!(
            snapshot[1].resource,
            AllowanceResource::Token {
                token_id: token(),
                amount: 7
            }
        );
    }

    #[test]
    fn checksum_validation_reaches_every_id() {
        let bad: AccountId = AccountId::from_num(1002)
            .to_string_with_checksum(&LedgerId::mainnet())
            .unwrap()
            .parse()
            .unwrap();
        let mut index = AllowanceIndex::new();
        index.grant_all_serials(Some(owner()), bad, token(), true);
        assert!(index.validate_checksums(&LedgerId::mainnet()).is_ok());
        assert!(index.validate_checksums(&LedgerId::testnet()).is_err());
    }
}
