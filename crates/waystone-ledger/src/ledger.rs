//! The [`GameLedger`] facade.
//!
//! One struct owns every record store plus the event log, so a single
//! `&mut GameLedger` is the whole authoritative state. The operation sets
//! live in their own modules ([`crate::npc`], [`crate::currency`],
//! [`crate::items`]) as `impl GameLedger` blocks; this module holds the
//! constructor, read-side accessors, and the shared balance plumbing.

use waystone_store::{RecordKey, RecordStore};
use waystone_types::{
    Balance, CurrencyConfig, GameItem, ItemCollection, MintId, NpcRecord, PlayerId,
};

use crate::events::EventLog;
use crate::LedgerError;

/// The authoritative game state: three ledgers over one keyed store
/// family, plus the append-only event log.
///
/// All operations take `&mut self` and execute to completion before the
/// next begins; ordering between callers is imposed externally.
#[derive(Debug, Default)]
pub struct GameLedger {
    pub(crate) npcs: RecordStore<NpcRecord>,
    pub(crate) currencies: RecordStore<CurrencyConfig>,
    pub(crate) balances: RecordStore<Balance>,
    pub(crate) collections: RecordStore<ItemCollection>,
    pub(crate) items: RecordStore<GameItem>,
    pub(crate) events: EventLog,
}

impl GameLedger {
    /// Create an empty ledger.
    pub const fn new() -> Self {
        Self {
            npcs: RecordStore::new(),
            currencies: RecordStore::new(),
            balances: RecordStore::new(),
            collections: RecordStore::new(),
            items: RecordStore::new(),
            events: EventLog::new(),
        }
    }

    /// The event log, for observers to poll.
    pub const fn events(&self) -> &EventLog {
        &self.events
    }

    /// Resolve an NPC record.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the record does not exist.
    pub fn npc(&self, owner: PlayerId, npc_id: u64) -> Result<&NpcRecord, LedgerError> {
        Ok(self.npcs.get(RecordKey::npc(owner, npc_id))?)
    }

    /// Resolve a currency config by its authority.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the record does not exist.
    pub fn currency(&self, authority: PlayerId) -> Result<&CurrencyConfig, LedgerError> {
        Ok(self.currencies.get(RecordKey::currency(authority))?)
    }

    /// A player's balance of the given mint, in base units.
    ///
    /// An identity with no balance record holds zero.
    pub fn balance_of(&self, player: PlayerId, mint: MintId) -> u64 {
        self.balances
            .get(RecordKey::balance(player, mint))
            .map_or(0, |balance| balance.amount)
    }

    /// Resolve an item collection by its admin.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the record does not exist.
    pub fn collection(&self, admin: PlayerId) -> Result<&ItemCollection, LedgerError> {
        Ok(self.collections.get(RecordKey::collection(admin))?)
    }

    /// Resolve a minted item.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the record does not exist.
    pub fn item(&self, collection_admin: PlayerId, item_id: u64) -> Result<&GameItem, LedgerError> {
        Ok(self.items.get(RecordKey::item(collection_admin, item_id))?)
    }

    /// Write a player's balance record, creating it if absent.
    ///
    /// Commit-phase helper: callers have already validated the new amount
    /// with checked arithmetic, so this only moves bytes.
    pub(crate) fn write_balance(
        &mut self,
        player: PlayerId,
        mint: MintId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let key = RecordKey::balance(player, mint);
        if self.balances.contains(key) {
            self.balances.mutate(key, |balance: &mut Balance| {
                balance.amount = amount;
                Ok::<(), LedgerError>(())
            })
        } else {
            Ok(self.balances.create(
                key,
                Balance {
                    player,
                    mint,
                    amount,
                },
            )?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ledger_is_empty() {
        let ledger = GameLedger::new();
        assert!(ledger.events().is_empty());
        assert_eq!(ledger.balance_of(PlayerId::new(), MintId::new()), 0);
    }

    #[test]
    fn unknown_records_resolve_not_found() {
        let ledger = GameLedger::new();
        let id = PlayerId::new();

        assert!(matches!(
            ledger.npc(id, 1),
            Err(LedgerError::NotFound { .. }),
        ));
        assert!(matches!(
            ledger.currency(id),
            Err(LedgerError::NotFound { .. }),
        ));
        assert!(matches!(
            ledger.collection(id),
            Err(LedgerError::NotFound { .. }),
        ));
        assert!(matches!(
            ledger.item(id, 1),
            Err(LedgerError::NotFound { .. }),
        ));
    }

    #[test]
    fn write_balance_creates_then_updates() {
        let mut ledger = GameLedger::new();
        let player = PlayerId::new();
        let mint = MintId::new();

        assert!(ledger.write_balance(player, mint, 50).is_ok());
        assert_eq!(ledger.balance_of(player, mint), 50);

        assert!(ledger.write_balance(player, mint, 30).is_ok());
        assert_eq!(ledger.balance_of(player, mint), 30);
    }
}
