//! Authoritative state-transition core for the Waystone game ledger.
//!
//! Three ledgers share one deterministic keyed store and one append-only
//! event log: the NPC interaction ledger, the currency ledger, and the
//! item registry. An external caller (the game engine) invokes one named
//! operation at a time, supplying an [`AuthContext`]; the operation
//! resolves its target records, runs the authorization guard, performs the
//! state transition with every invariant checked before any field moves,
//! and appends exactly one event on success.
//!
//! # Atomicity
//!
//! Operations are synchronous and totally ordered by the caller; the
//! ledger takes `&mut self` and performs no locking. Every operation is
//! structured read -> check -> commit -> emit: the first failing check
//! aborts with a typed [`LedgerError`] and no side effect, so a failed
//! operation can always be resubmitted safely.
//!
//! # Modules
//!
//! - [`auth`] -- The authorization guard ([`AuthContext`], [`Capability`])
//! - [`events`] -- The append-only [`EventLog`]
//! - [`ledger`] -- The [`GameLedger`] facade owning all record stores
//! - [`npc`] -- NPC interaction operations
//! - [`currency`] -- Supply and balance operations
//! - [`items`] -- Collection and item operations

pub mod auth;
pub mod currency;
pub mod events;
pub mod items;
pub mod ledger;
pub mod npc;

// Re-export primary types at crate root.
pub use auth::{AuthContext, Capability};
pub use events::EventLog;
pub use ledger::GameLedger;

use waystone_store::{RecordKey, StoreError};
use waystone_types::PlayerId;

/// Errors returned by ledger operations.
///
/// Every check runs before any mutation, so each variant implies the
/// operation left all state unchanged and emitted no event.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The calling identity holds none of the required capabilities.
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    /// No record exists at the derived key.
    #[error("no record found at {key}")]
    NotFound {
        /// The missing key.
        key: RecordKey,
    },

    /// A record already exists at the derived key.
    #[error("record already exists at {key}")]
    AlreadyExists {
        /// The occupied key.
        key: RecordKey,
    },

    /// The requested dialogue index is past the end of the NPC's dialogue.
    #[error("dialogue index {index} out of range ({line_count} lines)")]
    InvalidDialogueIndex {
        /// The requested index.
        index: usize,
        /// The NPC's dialogue length at the time of the call.
        line_count: usize,
    },

    /// The quest id is already a member of the NPC's quest set.
    #[error("quest {quest_id} already attached to npc {npc_id}")]
    QuestAlreadyExists {
        /// The NPC's per-owner discriminator.
        npc_id: u64,
        /// The duplicate quest id.
        quest_id: u64,
    },

    /// The currency is paused; mint, transfer, and burn are blocked.
    #[error("currency is paused")]
    CurrencyPaused,

    /// A supply or balance addition would exceed the numeric range.
    #[error("supply or balance addition overflows u64")]
    Overflow,

    /// A supply subtraction would go below zero.
    #[error("supply subtraction underflows")]
    Underflow,

    /// The debited identity holds less than the requested amount.
    #[error("insufficient balance: wanted {requested} but only have {available}")]
    InsufficientBalance {
        /// The amount requested.
        requested: u64,
        /// The amount actually held.
        available: u64,
    },

    /// The item's transferable flag is false.
    #[error("item {item_id} is not transferable")]
    ItemNotTransferable {
        /// The item's id within its collection.
        item_id: u64,
    },

    /// The claimed sender is not the item's current owner.
    #[error("{claimed} is not the owner of item {item_id}")]
    NotItemOwner {
        /// The item's id within its collection.
        item_id: u64,
        /// The identity that claimed ownership.
        claimed: PlayerId,
    },

    /// A bounded collection would exceed its size limit.
    #[error("{field} exceeds limit: {actual} > {max}")]
    LimitExceeded {
        /// Which bounded field was rejected.
        field: &'static str,
        /// The maximum allowed size.
        max: usize,
        /// The size that was submitted.
        actual: usize,
    },
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists { key } => Self::AlreadyExists { key },
            StoreError::NotFound { key } => Self::NotFound { key },
        }
    }
}
