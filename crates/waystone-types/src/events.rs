//! Event types appended by the ledger on every successful mutation.
//!
//! Events are immutable notifications, not state: the game client consumes
//! them to update UI, inventory, or quest progress. An event is appended
//! only after every check and every field update of an operation has
//! committed -- an aborted operation never emits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{EventId, MintId, PlayerId};
use crate::records::ItemAttribute;

/// One immutable entry in the append-only event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GameEvent {
    /// Unique event identifier.
    pub id: EventId,
    /// Position in the log; strictly increasing from 0.
    pub sequence: u64,
    /// Type tag plus type-specific payload.
    pub payload: GameEventPayload,
    /// Real-world timestamp when the event was appended.
    pub created_at: DateTime<Utc>,
}

/// Type-specific payload carried by a [`GameEvent`].
///
/// One variant per mutating operation, carrying the subject identifiers and
/// quantities the client needs to react without a follow-up query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(tag = "type")]
pub enum GameEventPayload {
    // --- NPC ledger ---
    /// A fresh NPC record was created.
    NpcInitialized {
        /// The owning identity.
        owner: PlayerId,
        /// The NPC's per-owner discriminator.
        npc_id: u64,
        /// The NPC's category tag.
        category: String,
    },
    /// A player triggered a dialogue line on an NPC.
    NpcInteraction {
        /// The NPC's owner (part of its address).
        owner: PlayerId,
        /// The NPC interacted with.
        npc_id: u64,
        /// The acting player.
        player: PlayerId,
        /// The dialogue line that was triggered.
        dialogue_index: usize,
    },
    /// The owner replaced an NPC's dialogue sequence.
    DialogueUpdated {
        /// The NPC's owner.
        owner: PlayerId,
        /// The NPC whose dialogue changed.
        npc_id: u64,
        /// New number of dialogue lines.
        line_count: usize,
    },
    /// The owner attached a quest to an NPC.
    QuestAdded {
        /// The NPC's owner.
        owner: PlayerId,
        /// The NPC the quest was attached to.
        npc_id: u64,
        /// The quest that was added.
        quest_id: u64,
    },

    // --- Currency ledger ---
    /// A currency config was created with zero supply.
    CurrencyInitialized {
        /// The currency authority.
        authority: PlayerId,
        /// The linked token mint.
        mint: MintId,
        /// Display symbol.
        symbol: String,
    },
    /// The authority minted new currency to a player.
    RewardMinted {
        /// The currency authority.
        authority: PlayerId,
        /// The credited player.
        player: PlayerId,
        /// Amount minted, in base units.
        amount: u64,
        /// Human-readable reason (e.g. "quest").
        reason: String,
    },
    /// Currency moved between two players.
    TokensTransferred {
        /// The debited player.
        from: PlayerId,
        /// The credited player.
        to: PlayerId,
        /// Amount moved, in base units.
        amount: u64,
    },
    /// A player destroyed currency, shrinking total supply.
    TokensBurned {
        /// The burning player.
        player: PlayerId,
        /// Amount burned, in base units.
        amount: u64,
        /// Related item id for purchase-triggered burns, if any.
        item_id: Option<u64>,
    },
    /// The authority flipped the pause flag.
    PauseStatusChanged {
        /// The currency authority.
        authority: PlayerId,
        /// The new flag value.
        paused: bool,
    },

    // --- Item registry ---
    /// An item collection was created with zero items.
    CollectionInitialized {
        /// The collection admin.
        admin: PlayerId,
        /// Display symbol.
        symbol: String,
    },
    /// A new item was minted into a collection.
    ItemMinted {
        /// The collection admin (part of the item's address).
        collection_admin: PlayerId,
        /// The id assigned from the collection counter.
        item_id: u64,
        /// The initial owner.
        owner: PlayerId,
        /// The item's unique mint identity.
        mint: MintId,
        /// The item-type tag.
        item_type: u8,
    },
    /// An item changed owners.
    ItemTransferred {
        /// The collection admin.
        collection_admin: PlayerId,
        /// The item that moved.
        item_id: u64,
        /// Previous owner.
        from: PlayerId,
        /// New owner.
        to: PlayerId,
    },
    /// An item's attribute list was replaced.
    ItemAttributesUpdated {
        /// The collection admin.
        collection_admin: PlayerId,
        /// The item whose attributes changed.
        item_id: u64,
        /// The new attribute list.
        attributes: Vec<ItemAttribute>,
    },
    /// The collection admin changed an item's transferable flag.
    TransferabilityChanged {
        /// The collection admin.
        collection_admin: PlayerId,
        /// The affected item.
        item_id: u64,
        /// The new flag value.
        transferable: bool,
    },
}
