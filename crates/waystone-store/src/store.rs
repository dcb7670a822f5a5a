//! The generic record store.
//!
//! One [`RecordStore`] holds every record of a single class, keyed by
//! [`RecordKey`]. Creation is check-then-insert (never overwrites), and
//! [`RecordStore::mutate`] commits a transition only if it succeeds -- a
//! failing transition leaves the stored record untouched.

use std::collections::BTreeMap;

use crate::key::RecordKey;
use crate::StoreError;

/// Keyed storage for one class of record.
///
/// Backed by a `BTreeMap` for deterministic iteration order. The store
/// knows nothing about record semantics; the ledger crate layers its
/// invariant checks on top through [`RecordStore::mutate`].
#[derive(Debug)]
pub struct RecordStore<R> {
    records: BTreeMap<RecordKey, R>,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RecordStore<R> {
    /// Create a new empty store.
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Return the number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Return whether a record exists at `key`.
    pub fn contains(&self, key: RecordKey) -> bool {
        self.records.contains_key(&key)
    }

    /// Insert a fresh record at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`] if the key is occupied; the
    /// existing record is never overwritten.
    pub fn create(&mut self, key: RecordKey, record: R) -> Result<(), StoreError> {
        if self.records.contains_key(&key) {
            return Err(StoreError::AlreadyExists { key });
        }
        self.records.insert(key, record);
        Ok(())
    }

    /// Resolve the record at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record exists at `key`.
    pub fn get(&self, key: RecordKey) -> Result<&R, StoreError> {
        self.records.get(&key).ok_or(StoreError::NotFound { key })
    }

    /// Apply a transition to the record at `key`, committing only on success.
    ///
    /// The transition runs against a working copy; if it returns an error
    /// the stored record is left byte-identical to its prior state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] (converted into `E`) if no record
    /// exists at `key`, or whatever error the transition itself produces.
    pub fn mutate<E>(
        &mut self,
        key: RecordKey,
        transition: impl FnOnce(&mut R) -> Result<(), E>,
    ) -> Result<(), E>
    where
        R: Clone,
        E: From<StoreError>,
    {
        let current = self
            .records
            .get(&key)
            .ok_or(StoreError::NotFound { key })?;

        let mut draft = current.clone();
        transition(&mut draft)?;
        self.records.insert(key, draft);
        Ok(())
    }

    /// Iterate over all records in key order.
    pub fn records(&self) -> impl Iterator<Item = (RecordKey, &R)> {
        self.records.iter().map(|(key, record)| (*key, record))
    }
}
