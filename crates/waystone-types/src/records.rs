//! Persistent record types owned by the three ledgers.
//!
//! A record is one addressable unit of state: it is created through an
//! explicit initialize operation, resolved through the deterministic keyed
//! store, and mutated only by the named operations of its owning ledger.
//! All records are plain data -- the rules that govern them live in the
//! ledger crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{MintId, PlayerId};

// ---------------------------------------------------------------------------
// Size limits
// ---------------------------------------------------------------------------

/// Maximum number of dialogue lines an NPC record may hold.
pub const MAX_DIALOGUE_LINES: usize = 20;

/// Maximum number of quest ids an NPC record may hold.
pub const MAX_QUEST_IDS: usize = 16;

/// Maximum number of (trait, value) attribute pairs on a single item.
pub const MAX_ITEM_ATTRIBUTES: usize = 12;

// ---------------------------------------------------------------------------
// NPC records
// ---------------------------------------------------------------------------

/// A non-player character owned by a single identity.
///
/// The dialogue sequence and quest set are bounded ([`MAX_DIALOGUE_LINES`],
/// [`MAX_QUEST_IDS`]) and quest ids are unique within the set. Ownership is
/// fixed at creation; only the owner may rewrite dialogue or add quests,
/// while any player may interact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NpcRecord {
    /// The identity that created and owns this NPC.
    pub owner: PlayerId,
    /// Numeric discriminator, unique per owner.
    pub npc_id: u64,
    /// Category tag (e.g. "merchant", "guard").
    pub category: String,
    /// Ordered dialogue lines a player can trigger by index.
    pub dialogue: Vec<String>,
    /// Quest ids attached to this NPC, unique within the vector.
    pub quest_ids: Vec<u64>,
    /// Number of successful interactions since creation.
    pub interaction_count: u64,
    /// Timestamp of the most recent interaction (creation time if none).
    pub last_interaction: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Currency records
// ---------------------------------------------------------------------------

/// Configuration and supply accounting for the fungible in-game currency.
///
/// `total_supply` moves only through checked addition (mint) and checked
/// subtraction (burn); it can never underflow or overflow. While `paused`
/// is set, every supply- or balance-moving operation fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CurrencyConfig {
    /// The identity permitted to mint rewards and flip the pause flag.
    pub authority: PlayerId,
    /// The linked token mint identity, created at initialization.
    pub mint: MintId,
    /// Display name (e.g. "Gold").
    pub name: String,
    /// Display symbol (e.g. "GLD").
    pub symbol: String,
    /// Decimal precision for display purposes only.
    pub decimals: u8,
    /// Total outstanding quantity, in base units.
    pub total_supply: u64,
    /// Whether mint/transfer/burn are currently blocked.
    pub paused: bool,
}

/// An identity's holding of a single currency.
///
/// The authoritative balance lives with the identity, not the config: one
/// record per (player, mint) pair in the keyed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Balance {
    /// The identity holding the balance.
    pub player: PlayerId,
    /// The currency mint this balance belongs to.
    pub mint: MintId,
    /// Quantity held, in base units.
    pub amount: u64,
}

// ---------------------------------------------------------------------------
// Item records
// ---------------------------------------------------------------------------

/// A collection of mintable items administered by a single identity.
///
/// `items_minted` is the sole source of item ids: it increases by exactly
/// one per successful mint and is never rewound, so item ids are strictly
/// increasing and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemCollection {
    /// The identity permitted to change administrative item fields.
    pub admin: PlayerId,
    /// Display name of the collection.
    pub name: String,
    /// Display symbol of the collection.
    pub symbol: String,
    /// Metadata URI (opaque to the ledger).
    pub uri: String,
    /// Count of items minted so far; the next item takes `items_minted + 1`.
    pub items_minted: u64,
}

/// One (trait, value) attribute pair on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ItemAttribute {
    /// The trait being described (e.g. "damage").
    pub trait_name: String,
    /// The trait's value (e.g. "42").
    pub value: String,
}

/// A unique minted item.
///
/// Ownership changes through `transfer_item`; everything else is fixed at
/// mint time except the attribute list (rewritable by the collection admin
/// or the owner) and the transferable flag (admin only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameItem {
    /// The identity currently owning the item.
    pub owner: PlayerId,
    /// The admin of the collection this item was minted from.
    pub collection_admin: PlayerId,
    /// Item id assigned from the collection counter; strictly increasing.
    pub item_id: u64,
    /// Display name.
    pub name: String,
    /// Metadata URI (opaque to the ledger).
    pub uri: String,
    /// Item-type tag interpreted by the game client.
    pub item_type: u8,
    /// Bounded attribute list ([`MAX_ITEM_ATTRIBUTES`]).
    pub attributes: Vec<ItemAttribute>,
    /// The unique mint identity linked to this item.
    pub mint: MintId,
    /// Whether the item can change owners.
    pub transferable: bool,
    /// Timestamp of the mint.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_config_round_trips_through_json() {
        let config = CurrencyConfig {
            authority: PlayerId::new(),
            mint: MintId::new(),
            name: "Gold".to_owned(),
            symbol: "GLD".to_owned(),
            decimals: 0,
            total_supply: 100,
            paused: false,
        };

        let json = serde_json::to_string(&config);
        assert!(json.is_ok());
        if let Ok(s) = json {
            let back: Result<CurrencyConfig, _> = serde_json::from_str(&s);
            assert_eq!(back.ok(), Some(config));
        }
    }

    #[test]
    fn limits_are_nonzero() {
        assert!(MAX_DIALOGUE_LINES > 0);
        assert!(MAX_QUEST_IDS > 0);
        assert!(MAX_ITEM_ATTRIBUTES > 0);
    }
}
