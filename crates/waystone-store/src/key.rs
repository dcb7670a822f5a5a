//! Deterministic record addressing.
//!
//! A [`RecordKey`] is derived from a namespace tag, the owning identity,
//! and a numeric discriminator. The key IS the tuple: the same inputs
//! always resolve to the same key across independent callers and across
//! restarts, with no central allocator and no collisions between
//! namespaces or owners.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use waystone_types::{MintId, PlayerId};

/// Namespace tag separating the record classes in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Namespace {
    /// NPC interaction records, one per (owner, `npc_id`).
    Npc,
    /// Currency configs, one per authority.
    Currency,
    /// Balance records, one per (player, mint).
    Balance,
    /// Item collections, one per admin.
    Collection,
    /// Minted items, one per (collection admin, `item_id`).
    Item,
}

impl Namespace {
    /// Stable lowercase tag used in key display output.
    const fn tag(self) -> &'static str {
        match self {
            Self::Npc => "npc",
            Self::Currency => "currency",
            Self::Balance => "balance",
            Self::Collection => "collection",
            Self::Item => "item",
        }
    }
}

/// A deterministic composite key addressing one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    /// The record class.
    pub namespace: Namespace,
    /// The owning identity the key is scoped to.
    pub owner: Uuid,
    /// Numeric discriminator within (namespace, owner).
    pub discriminator: u128,
}

impl RecordKey {
    /// Derive a key from its three components.
    ///
    /// Pure and total: no allocation, no randomness, no global state.
    pub const fn derive(namespace: Namespace, owner: Uuid, discriminator: u128) -> Self {
        Self {
            namespace,
            owner,
            discriminator,
        }
    }

    /// Key for an NPC record.
    pub fn npc(owner: PlayerId, npc_id: u64) -> Self {
        Self::derive(Namespace::Npc, owner.into_inner(), u128::from(npc_id))
    }

    /// Key for a currency config. One per authority.
    pub const fn currency(authority: PlayerId) -> Self {
        Self::derive(Namespace::Currency, authority.into_inner(), 0)
    }

    /// Key for a balance record.
    ///
    /// The mint identity is folded into the discriminator so holdings of
    /// independent currencies never collide.
    pub const fn balance(player: PlayerId, mint: MintId) -> Self {
        Self::derive(
            Namespace::Balance,
            player.into_inner(),
            mint.into_inner().as_u128(),
        )
    }

    /// Key for an item collection. One per admin.
    pub const fn collection(admin: PlayerId) -> Self {
        Self::derive(Namespace::Collection, admin.into_inner(), 0)
    }

    /// Key for a minted item within a collection.
    pub fn item(collection_admin: PlayerId, item_id: u64) -> Self {
        Self::derive(
            Namespace::Item,
            collection_admin.into_inner(),
            u128::from(item_id),
        )
    }
}

impl core::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.namespace.tag(),
            self.owner,
            self.discriminator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_derive_same_key() {
        let owner = PlayerId::new();
        assert_eq!(RecordKey::npc(owner, 7), RecordKey::npc(owner, 7));
    }

    #[test]
    fn namespaces_partition_the_key_space() {
        let id = PlayerId::new();
        // Same owner and discriminator, different namespaces.
        assert_ne!(RecordKey::currency(id), RecordKey::collection(id));
        assert_ne!(RecordKey::npc(id, 0), RecordKey::item(id, 0));
    }

    #[test]
    fn discriminator_separates_records_per_owner() {
        let owner = PlayerId::new();
        assert_ne!(RecordKey::npc(owner, 1), RecordKey::npc(owner, 2));
    }

    #[test]
    fn balance_keys_separate_per_mint() {
        let player = PlayerId::new();
        let gold = MintId::new();
        let silver = MintId::new();
        assert_ne!(
            RecordKey::balance(player, gold),
            RecordKey::balance(player, silver),
        );
    }

    #[test]
    fn display_includes_namespace_tag() {
        let owner = PlayerId::new();
        let rendered = RecordKey::npc(owner, 3).to_string();
        assert!(rendered.starts_with("npc/"));
        assert!(rendered.ends_with("/3"));
    }
}
