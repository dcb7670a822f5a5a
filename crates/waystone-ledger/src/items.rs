//! Item registry operations: collections and individually minted items.
//!
//! Item ids come from the collection's `items_minted` counter and nowhere
//! else: the counter increment and the item insert commit together, so
//! ids are strictly increasing and a failed mint never consumes one.

use chrono::Utc;

use waystone_store::RecordKey;
use waystone_types::{
    GameEventPayload, GameItem, ItemAttribute, ItemCollection, MintId, PlayerId,
    MAX_ITEM_ATTRIBUTES,
};

use crate::auth::{require, AuthContext, Capability};
use crate::ledger::GameLedger;
use crate::LedgerError;

impl GameLedger {
    /// Create an item collection administered by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AlreadyExists`] if the caller already
    /// initialized a collection.
    pub fn initialize_collection(
        &mut self,
        ctx: &AuthContext,
        name: String,
        symbol: String,
        uri: String,
    ) -> Result<(), LedgerError> {
        let admin = ctx.caller();

        self.collections.create(
            RecordKey::collection(admin),
            ItemCollection {
                admin,
                name,
                symbol: symbol.clone(),
                uri,
                items_minted: 0,
            },
        )?;

        self.events
            .append(GameEventPayload::CollectionInitialized { admin, symbol });
        tracing::debug!(%admin, "Initialized item collection");
        Ok(())
    }

    /// Mint a new item into a collection and return its assigned id.
    ///
    /// The item takes `items_minted + 1`, owned by `player`, transferable,
    /// with a fresh linked mint identity. Metadata behind `uri` is fully
    /// external; the mint succeeds independently of any metadata write.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if no collection exists for `admin`.
    /// - [`LedgerError::LimitExceeded`] if `attributes` is over bound.
    /// - [`LedgerError::Overflow`] if the collection counter would wrap.
    pub fn mint_game_item(
        &mut self,
        admin: PlayerId,
        player: PlayerId,
        name: String,
        uri: String,
        item_type: u8,
        attributes: Vec<ItemAttribute>,
    ) -> Result<u64, LedgerError> {
        let collection_key = RecordKey::collection(admin);
        let collection = self.collections.get(collection_key)?;
        check_attribute_bound(&attributes)?;

        let item_id = collection
            .items_minted
            .checked_add(1)
            .ok_or(LedgerError::Overflow)?;
        let item_key = RecordKey::item(admin, item_id);
        if self.items.contains(item_key) {
            return Err(LedgerError::AlreadyExists { key: item_key });
        }

        let mint = MintId::new();

        // Commit: counter and item move together.
        self.collections
            .mutate(collection_key, |collection: &mut ItemCollection| {
                collection.items_minted = item_id;
                Ok::<(), LedgerError>(())
            })?;
        self.items.create(
            item_key,
            GameItem {
                owner: player,
                collection_admin: admin,
                item_id,
                name,
                uri,
                item_type,
                attributes,
                mint,
                transferable: true,
                created_at: Utc::now(),
            },
        )?;

        self.events.append(GameEventPayload::ItemMinted {
            collection_admin: admin,
            item_id,
            owner: player,
            mint,
            item_type,
        });
        tracing::debug!(%admin, item_id, %player, "Minted game item");
        Ok(item_id)
    }

    /// Move an item to a new owner.
    ///
    /// The context must represent `from`, the current owner.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the item does not exist.
    /// - [`LedgerError::ItemNotTransferable`] if the flag is false.
    /// - [`LedgerError::NotItemOwner`] if `from` is not the owner.
    /// - [`LedgerError::Unauthorized`] if the context does not represent
    ///   `from`.
    pub fn transfer_item(
        &mut self,
        admin: PlayerId,
        item_id: u64,
        ctx: &AuthContext,
        from: PlayerId,
        to: PlayerId,
    ) -> Result<(), LedgerError> {
        let key = RecordKey::item(admin, item_id);
        let item = self.items.get(key)?;
        if !item.transferable {
            return Err(LedgerError::ItemNotTransferable { item_id });
        }
        if item.owner != from {
            return Err(LedgerError::NotItemOwner {
                item_id,
                claimed: from,
            });
        }
        if !ctx.represents(from) {
            return Err(LedgerError::Unauthorized);
        }

        self.items.mutate(key, |item: &mut GameItem| {
            item.owner = to;
            Ok::<(), LedgerError>(())
        })?;

        self.events.append(GameEventPayload::ItemTransferred {
            collection_admin: admin,
            item_id,
            from,
            to,
        });
        tracing::debug!(%admin, item_id, %from, %to, "Transferred game item");
        Ok(())
    }

    /// Replace an item's attribute list. Collection admin or item owner.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the item does not exist.
    /// - [`LedgerError::Unauthorized`] if the caller is neither the
    ///   collection admin nor the item owner.
    /// - [`LedgerError::LimitExceeded`] if `attributes` is over bound.
    pub fn update_item_attributes(
        &mut self,
        admin: PlayerId,
        item_id: u64,
        ctx: &AuthContext,
        attributes: Vec<ItemAttribute>,
    ) -> Result<(), LedgerError> {
        let key = RecordKey::item(admin, item_id);
        let item = self.items.get(key)?;
        require(
            ctx,
            Capability::Either {
                authority: item.collection_admin,
                owner: item.owner,
            },
        )?;
        check_attribute_bound(&attributes)?;

        let emitted = attributes.clone();
        self.items.mutate(key, |item: &mut GameItem| {
            item.attributes = attributes;
            Ok::<(), LedgerError>(())
        })?;

        self.events.append(GameEventPayload::ItemAttributesUpdated {
            collection_admin: admin,
            item_id,
            attributes: emitted,
        });
        tracing::debug!(%admin, item_id, "Updated item attributes");
        Ok(())
    }

    /// Set an item's transferable flag. Collection admin only.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the item does not exist.
    /// - [`LedgerError::Unauthorized`] if the caller is not the admin.
    pub fn set_transferability(
        &mut self,
        admin: PlayerId,
        item_id: u64,
        ctx: &AuthContext,
        transferable: bool,
    ) -> Result<(), LedgerError> {
        let key = RecordKey::item(admin, item_id);
        let item = self.items.get(key)?;
        require(ctx, Capability::Authority(item.collection_admin))?;

        self.items.mutate(key, |item: &mut GameItem| {
            item.transferable = transferable;
            Ok::<(), LedgerError>(())
        })?;

        self.events.append(GameEventPayload::TransferabilityChanged {
            collection_admin: admin,
            item_id,
            transferable,
        });
        tracing::debug!(%admin, item_id, transferable, "Changed item transferability");
        Ok(())
    }
}

/// Reject attribute lists over [`MAX_ITEM_ATTRIBUTES`].
fn check_attribute_bound(attributes: &[ItemAttribute]) -> Result<(), LedgerError> {
    if attributes.len() > MAX_ITEM_ATTRIBUTES {
        return Err(LedgerError::LimitExceeded {
            field: "attributes",
            max: MAX_ITEM_ATTRIBUTES,
            actual: attributes.len(),
        });
    }
    Ok(())
}
