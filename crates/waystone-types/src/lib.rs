//! Shared type definitions for the Waystone game ledger.
//!
//! This crate is the single source of truth for the types that cross the
//! ledger's boundary: record structs, identifier newtypes, and the event
//! model. Types defined here flow downstream to `TypeScript` via `ts-rs`
//! for the game client.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for identities and mints
//! - [`records`] -- Persistent record structs and their size limits
//! - [`events`] -- The append-only event model

pub mod events;
pub mod ids;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use events::{GameEvent, GameEventPayload};
pub use ids::{EventId, MintId, PlayerId};
pub use records::{
    Balance, CurrencyConfig, GameItem, ItemAttribute, ItemCollection, NpcRecord,
    MAX_DIALOGUE_LINES, MAX_ITEM_ATTRIBUTES, MAX_QUEST_IDS,
};
