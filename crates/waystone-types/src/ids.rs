//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Every identity and linked mint in the ledger has a strongly-typed ID to
//! prevent accidental mixing of identifiers at compile time. All IDs use
//! UUID v7 (time-ordered) so they sort by creation order.
//!
//! Identities are opaque to the ledger: a [`PlayerId`] may belong to a
//! player, an NPC owner, a currency authority, or a collection admin. The
//! ledger only ever compares them for equality.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// An identity that can own records, hold balances, and invoke
    /// operations: a player, an NPC owner, a currency authority, or a
    /// collection admin.
    PlayerId
}

define_id! {
    /// Unique identifier for a token mint linked to a currency config or
    /// an individually minted item.
    MintId
}

define_id! {
    /// Unique identifier for an event in the event log.
    ///
    /// No [`Default`] impl: event ids are only assigned by the event log
    /// when an event is appended.
    EventId
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for MintId {
    fn default() -> Self {
        Self::new()
    }
}
