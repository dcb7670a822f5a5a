//! Deterministic keyed record store for the Waystone game ledger.
//!
//! Every persistent record in the ledger lives in a [`RecordStore`] and is
//! addressed by a [`RecordKey`] derived from a namespace tag, the owning
//! identity, and a numeric discriminator. The derivation is pure: the same
//! tuple always resolves to the same key, for any caller, across restarts.
//!
//! # Contract
//!
//! - `derive(namespace, owner, discriminator) -> key` is deterministic and
//!   collision-free between namespaces and owners.
//! - `create` is idempotent-safe: it fails with
//!   [`StoreError::AlreadyExists`] instead of overwriting.
//! - `get` fails with [`StoreError::NotFound`] if the key is absent.
//! - `mutate` applies a transition atomically: the stored record changes
//!   only if the transition succeeds.

pub mod key;
pub mod store;

// Re-export primary types at crate root.
pub use key::{Namespace, RecordKey};
pub use store::RecordStore;

/// Errors produced by store addressing and creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A record already exists at the derived key.
    #[error("record already exists at {key}")]
    AlreadyExists {
        /// The occupied key.
        key: RecordKey,
    },

    /// No record exists at the derived key.
    #[error("no record found at {key}")]
    NotFound {
        /// The missing key.
        key: RecordKey,
    },
}
