//! Currency ledger operations: supply accounting and balance movements.
//!
//! One [`CurrencyConfig`] per authority holds the supply counter and the
//! pause flag; balances live in their own records with the holding
//! identity. All arithmetic is checked: a detected overflow or underflow
//! aborts the whole operation with no partial effect, so total supply
//! always equals minted minus burned.

use waystone_store::RecordKey;
use waystone_types::{CurrencyConfig, GameEventPayload, MintId, PlayerId};

use crate::auth::{require, AuthContext, Capability};
use crate::ledger::GameLedger;
use crate::LedgerError;

impl GameLedger {
    /// Create the currency config for the calling authority.
    ///
    /// Supply starts at zero, unpaused, with a freshly created linked
    /// mint identity, which is returned for balance queries.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::AlreadyExists`] if the authority already
    /// initialized a currency.
    pub fn initialize_currency(
        &mut self,
        ctx: &AuthContext,
        name: String,
        symbol: String,
        decimals: u8,
    ) -> Result<MintId, LedgerError> {
        let authority = ctx.caller();
        let mint = MintId::new();

        self.currencies.create(
            RecordKey::currency(authority),
            CurrencyConfig {
                authority,
                mint,
                name,
                symbol: symbol.clone(),
                decimals,
                total_supply: 0,
                paused: false,
            },
        )?;

        self.events.append(GameEventPayload::CurrencyInitialized {
            authority,
            mint,
            symbol,
        });
        tracing::debug!(%authority, %mint, "Initialized currency config");
        Ok(mint)
    }

    /// Mint new currency to a player. Authority only.
    ///
    /// Raises total supply and credits the player together; `reason` is
    /// carried verbatim on the emitted event for the client.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if no currency exists for `authority`.
    /// - [`LedgerError::CurrencyPaused`] while paused.
    /// - [`LedgerError::Unauthorized`] if the caller is not the authority.
    /// - [`LedgerError::Overflow`] if supply or the player's balance
    ///   would exceed `u64`.
    pub fn mint_reward(
        &mut self,
        authority: PlayerId,
        ctx: &AuthContext,
        player: PlayerId,
        amount: u64,
        reason: String,
    ) -> Result<(), LedgerError> {
        let key = RecordKey::currency(authority);
        let config = self.currencies.get(key)?;
        if config.paused {
            return Err(LedgerError::CurrencyPaused);
        }
        require(ctx, Capability::Authority(config.authority))?;

        let mint = config.mint;
        let new_supply = config
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let new_balance = self
            .balance_of(player, mint)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        // Commit: every check has passed, nothing below can fail.
        self.currencies.mutate(key, |config: &mut CurrencyConfig| {
            config.total_supply = new_supply;
            Ok::<(), LedgerError>(())
        })?;
        self.write_balance(player, mint, new_balance)?;

        self.events.append(GameEventPayload::RewardMinted {
            authority,
            player,
            amount,
            reason,
        });
        tracing::debug!(%authority, %player, amount, new_supply, "Minted currency reward");
        Ok(())
    }

    /// Move currency between two players.
    ///
    /// The debit and the credit commit together or not at all. The
    /// context must represent `from`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if no currency exists for `authority`.
    /// - [`LedgerError::CurrencyPaused`] while paused.
    /// - [`LedgerError::Unauthorized`] if the context does not represent
    ///   `from`.
    /// - [`LedgerError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    /// - [`LedgerError::Overflow`] if `to`'s balance would exceed `u64`.
    pub fn transfer(
        &mut self,
        authority: PlayerId,
        ctx: &AuthContext,
        from: PlayerId,
        to: PlayerId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let config = self.currencies.get(RecordKey::currency(authority))?;
        if config.paused {
            return Err(LedgerError::CurrencyPaused);
        }
        if !ctx.represents(from) {
            return Err(LedgerError::Unauthorized);
        }

        let mint = config.mint;
        let available = self.balance_of(from, mint);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        let new_from = available.checked_sub(amount).ok_or(LedgerError::Underflow)?;

        // A self-transfer must settle against the already-debited side.
        let to_base = if from == to {
            new_from
        } else {
            self.balance_of(to, mint)
        };
        let new_to = to_base.checked_add(amount).ok_or(LedgerError::Overflow)?;

        self.write_balance(from, mint, new_from)?;
        self.write_balance(to, mint, new_to)?;

        self.events
            .append(GameEventPayload::TokensTransferred { from, to, amount });
        tracing::debug!(%from, %to, amount, "Transferred currency");
        Ok(())
    }

    /// Destroy currency held by a player, shrinking total supply.
    ///
    /// The context must represent `player`. `item_id` tags purchase-
    /// triggered burns on the emitted event.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if no currency exists for `authority`.
    /// - [`LedgerError::CurrencyPaused`] while paused.
    /// - [`LedgerError::Unauthorized`] if the context does not represent
    ///   `player`.
    /// - [`LedgerError::InsufficientBalance`] if the player holds less
    ///   than `amount`.
    /// - [`LedgerError::Underflow`] if supply would go below zero.
    pub fn burn_tokens(
        &mut self,
        authority: PlayerId,
        ctx: &AuthContext,
        player: PlayerId,
        amount: u64,
        item_id: Option<u64>,
    ) -> Result<(), LedgerError> {
        let key = RecordKey::currency(authority);
        let config = self.currencies.get(key)?;
        if config.paused {
            return Err(LedgerError::CurrencyPaused);
        }
        if !ctx.represents(player) {
            return Err(LedgerError::Unauthorized);
        }

        let mint = config.mint;
        let available = self.balance_of(player, mint);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        let new_supply = config
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Underflow)?;
        let new_balance = available.checked_sub(amount).ok_or(LedgerError::Underflow)?;

        self.currencies.mutate(key, |config: &mut CurrencyConfig| {
            config.total_supply = new_supply;
            Ok::<(), LedgerError>(())
        })?;
        self.write_balance(player, mint, new_balance)?;

        self.events.append(GameEventPayload::TokensBurned {
            player,
            amount,
            item_id,
        });
        tracing::debug!(%player, amount, new_supply, "Burned currency");
        Ok(())
    }

    /// Flip the pause flag. Authority only.
    ///
    /// Takes effect for every subsequent mint/transfer/burn immediately;
    /// operations are synchronous, so there is nothing mid-flight to
    /// cancel.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if no currency exists for `authority`.
    /// - [`LedgerError::Unauthorized`] if the caller is not the authority.
    pub fn set_pause_status(
        &mut self,
        authority: PlayerId,
        ctx: &AuthContext,
        paused: bool,
    ) -> Result<(), LedgerError> {
        let key = RecordKey::currency(authority);
        let config = self.currencies.get(key)?;
        require(ctx, Capability::Authority(config.authority))?;

        self.currencies.mutate(key, |config: &mut CurrencyConfig| {
            config.paused = paused;
            Ok::<(), LedgerError>(())
        })?;

        self.events
            .append(GameEventPayload::PauseStatusChanged { authority, paused });
        tracing::debug!(%authority, paused, "Currency pause status changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Initialize a zero-decimal currency and return (authority, mint).
    fn gold(ledger: &mut GameLedger) -> (PlayerId, MintId) {
        let authority = PlayerId::new();
        let mint = ledger.initialize_currency(
            &AuthContext::new(authority),
            "Gold".to_owned(),
            "GLD".to_owned(),
            0,
        );
        assert!(mint.is_ok());
        (authority, mint.unwrap_or_default())
    }

    fn supply(ledger: &GameLedger, authority: PlayerId) -> Option<u64> {
        ledger.currency(authority).ok().map(|c| c.total_supply)
    }

    #[test]
    fn initialize_starts_at_zero_supply_unpaused() {
        let mut ledger = GameLedger::new();
        let (authority, _) = gold(&mut ledger);

        let config = ledger.currency(authority);
        assert!(config.is_ok());
        if let Ok(c) = config {
            assert_eq!(c.total_supply, 0);
            assert!(!c.paused);
            assert_eq!(c.symbol, "GLD");
        }
    }

    #[test]
    fn initialize_twice_fails_already_exists() {
        let mut ledger = GameLedger::new();
        let (authority, _) = gold(&mut ledger);

        let result = ledger.initialize_currency(
            &AuthContext::new(authority),
            "Silver".to_owned(),
            "SLV".to_owned(),
            2,
        );
        assert!(matches!(result, Err(LedgerError::AlreadyExists { .. })));
    }

    #[test]
    fn mint_credits_player_and_raises_supply() {
        let mut ledger = GameLedger::new();
        let (authority, mint) = gold(&mut ledger);
        let alice = PlayerId::new();

        let result = ledger.mint_reward(
            authority,
            &AuthContext::new(authority),
            alice,
            100,
            "quest".to_owned(),
        );
        assert!(result.is_ok());
        assert_eq!(supply(&ledger, authority), Some(100));
        assert_eq!(ledger.balance_of(alice, mint), 100);
        assert!(matches!(
            ledger.events().last().map(|e| &e.payload),
            Some(GameEventPayload::RewardMinted { amount: 100, .. }),
        ));
    }

    #[test]
    fn mint_requires_authority() {
        let mut ledger = GameLedger::new();
        let (authority, mint) = gold(&mut ledger);
        let mallory = PlayerId::new();

        let result = ledger.mint_reward(
            authority,
            &AuthContext::new(mallory),
            mallory,
            100,
            "theft".to_owned(),
        );
        assert!(matches!(result, Err(LedgerError::Unauthorized)));
        assert_eq!(supply(&ledger, authority), Some(0));
        assert_eq!(ledger.balance_of(mallory, mint), 0);
    }

    #[test]
    fn mint_overflow_leaves_state_unchanged() {
        let mut ledger = GameLedger::new();
        let (authority, mint) = gold(&mut ledger);
        let ctx = AuthContext::new(authority);
        let alice = PlayerId::new();

        assert!(ledger
            .mint_reward(authority, &ctx, alice, u64::MAX, "jackpot".to_owned())
            .is_ok());

        let result = ledger.mint_reward(authority, &ctx, alice, 1, "straw".to_owned());
        assert!(matches!(result, Err(LedgerError::Overflow)));
        assert_eq!(supply(&ledger, authority), Some(u64::MAX));
        assert_eq!(ledger.balance_of(alice, mint), u64::MAX);
    }

    #[test]
    fn transfer_debits_and_credits_atomically() {
        let mut ledger = GameLedger::new();
        let (authority, mint) = gold(&mut ledger);
        let alice = PlayerId::new();
        let bob = PlayerId::new();

        let _ = ledger.mint_reward(
            authority,
            &AuthContext::new(authority),
            alice,
            100,
            "quest".to_owned(),
        );

        let result = ledger.transfer(authority, &AuthContext::new(alice), alice, bob, 40);
        assert!(result.is_ok());
        assert_eq!(ledger.balance_of(alice, mint), 60);
        assert_eq!(ledger.balance_of(bob, mint), 40);
        // Supply is untouched by an internal movement.
        assert_eq!(supply(&ledger, authority), Some(100));
    }

    #[test]
    fn transfer_insufficient_balance_fails_cleanly() {
        let mut ledger = GameLedger::new();
        let (authority, mint) = gold(&mut ledger);
        let alice = PlayerId::new();
        let bob = PlayerId::new();

        let result = ledger.transfer(authority, &AuthContext::new(alice), alice, bob, 40);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { requested: 40, available: 0 }),
        ));
        assert_eq!(ledger.balance_of(bob, mint), 0);
        // No event for the failed transfer.
        assert_eq!(ledger.events().len(), 1);
    }

    #[test]
    fn transfer_requires_ctx_to_represent_sender() {
        let mut ledger = GameLedger::new();
        let (authority, mint) = gold(&mut ledger);
        let alice = PlayerId::new();
        let mallory = PlayerId::new();

        let _ = ledger.mint_reward(
            authority,
            &AuthContext::new(authority),
            alice,
            100,
            "quest".to_owned(),
        );

        let result = ledger.transfer(authority, &AuthContext::new(mallory), alice, mallory, 40);
        assert!(matches!(result, Err(LedgerError::Unauthorized)));
        assert_eq!(ledger.balance_of(alice, mint), 100);
    }

    #[test]
    fn self_transfer_is_balance_neutral() {
        let mut ledger = GameLedger::new();
        let (authority, mint) = gold(&mut ledger);
        let alice = PlayerId::new();

        let _ = ledger.mint_reward(
            authority,
            &AuthContext::new(authority),
            alice,
            100,
            "quest".to_owned(),
        );

        assert!(ledger
            .transfer(authority, &AuthContext::new(alice), alice, alice, 40)
            .is_ok());
        assert_eq!(ledger.balance_of(alice, mint), 100);
    }

    #[test]
    fn burn_shrinks_balance_and_supply() {
        let mut ledger = GameLedger::new();
        let (authority, mint) = gold(&mut ledger);
        let bob = PlayerId::new();

        let _ = ledger.mint_reward(
            authority,
            &AuthContext::new(authority),
            bob,
            40,
            "quest".to_owned(),
        );

        let result = ledger.burn_tokens(authority, &AuthContext::new(bob), bob, 10, Some(3));
        assert!(result.is_ok());
        assert_eq!(ledger.balance_of(bob, mint), 30);
        assert_eq!(supply(&ledger, authority), Some(30));
        assert!(matches!(
            ledger.events().last().map(|e| &e.payload),
            Some(GameEventPayload::TokensBurned { amount: 10, item_id: Some(3), .. }),
        ));
    }

    #[test]
    fn burn_insufficient_balance_fails_cleanly() {
        let mut ledger = GameLedger::new();
        let (authority, _) = gold(&mut ledger);
        let bob = PlayerId::new();

        let result = ledger.burn_tokens(authority, &AuthContext::new(bob), bob, 10, None);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. }),
        ));
        assert_eq!(supply(&ledger, authority), Some(0));
    }

    #[test]
    fn pause_blocks_mint_transfer_burn_until_unpaused() {
        let mut ledger = GameLedger::new();
        let (authority, mint) = gold(&mut ledger);
        let auth_ctx = AuthContext::new(authority);
        let alice = PlayerId::new();
        let bob = PlayerId::new();

        let _ = ledger.mint_reward(authority, &auth_ctx, alice, 100, "quest".to_owned());

        assert!(ledger.set_pause_status(authority, &auth_ctx, true).is_ok());

        assert!(matches!(
            ledger.mint_reward(authority, &auth_ctx, alice, 1, "late".to_owned()),
            Err(LedgerError::CurrencyPaused),
        ));
        assert!(matches!(
            ledger.transfer(authority, &AuthContext::new(alice), alice, bob, 10),
            Err(LedgerError::CurrencyPaused),
        ));
        assert!(matches!(
            ledger.burn_tokens(authority, &AuthContext::new(alice), alice, 10, None),
            Err(LedgerError::CurrencyPaused),
        ));
        assert_eq!(ledger.balance_of(alice, mint), 100);
        assert_eq!(supply(&ledger, authority), Some(100));

        assert!(ledger.set_pause_status(authority, &auth_ctx, false).is_ok());

        // Identical calls succeed once unpaused.
        assert!(ledger
            .transfer(authority, &AuthContext::new(alice), alice, bob, 10)
            .is_ok());
        assert_eq!(ledger.balance_of(bob, mint), 10);
    }

    #[test]
    fn pause_requires_authority() {
        let mut ledger = GameLedger::new();
        let (authority, _) = gold(&mut ledger);

        let result = ledger.set_pause_status(authority, &AuthContext::new(PlayerId::new()), true);
        assert!(matches!(result, Err(LedgerError::Unauthorized)));
        assert_eq!(ledger.currency(authority).ok().map(|c| c.paused), Some(false));
    }
}
