//! The authorization guard.
//!
//! Every operation receives an explicit [`AuthContext`] naming the calling
//! identity; nothing in the ledger relies on ambient or global identity
//! state. Administrative mutations, pause flips, and ownership moves run
//! [`require`] against a [`Capability`] built from fields stored on the
//! target record. The context is evaluated and discarded -- it is never
//! persisted.

use waystone_types::PlayerId;

use crate::LedgerError;

/// The identity invoking an operation, plus any identities it claims to
/// act on behalf of.
///
/// Verifying the claim (signatures, sessions) belongs to the transport
/// layer outside this crate; the ledger only compares identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    caller: PlayerId,
    on_behalf_of: Vec<PlayerId>,
}

impl AuthContext {
    /// Context for a caller acting only for itself.
    pub const fn new(caller: PlayerId) -> Self {
        Self {
            caller,
            on_behalf_of: Vec::new(),
        }
    }

    /// Context for a caller acting for itself and the listed delegates.
    pub const fn with_delegates(caller: PlayerId, on_behalf_of: Vec<PlayerId>) -> Self {
        Self {
            caller,
            on_behalf_of,
        }
    }

    /// The identity invoking the operation.
    pub const fn caller(&self) -> PlayerId {
        self.caller
    }

    /// Whether this context speaks for `id`: the caller itself or any
    /// delegate it was built with.
    pub fn represents(&self, id: PlayerId) -> bool {
        self.caller == id || self.on_behalf_of.contains(&id)
    }
}

/// The capability an operation demands before it will mutate a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The context must represent the record's designated authority.
    Authority(PlayerId),
    /// The context must represent the record's current owner.
    Owner(PlayerId),
    /// The context must represent either the authority or the owner.
    Either {
        /// The record's designated authority.
        authority: PlayerId,
        /// The record's current owner.
        owner: PlayerId,
    },
}

/// Check that the context represents an identity satisfying the
/// capability.
///
/// Delegation is honored the same way everywhere: a context built with
/// [`AuthContext::with_delegates`] holds the capability whenever the
/// caller or any delegate does.
///
/// # Errors
///
/// Returns [`LedgerError::Unauthorized`] if the context represents none
/// of the allowed identities.
pub fn require(ctx: &AuthContext, capability: Capability) -> Result<(), LedgerError> {
    let allowed = match capability {
        Capability::Authority(authority) => ctx.represents(authority),
        Capability::Owner(owner) => ctx.represents(owner),
        Capability::Either { authority, owner } => {
            ctx.represents(authority) || ctx.represents(owner)
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(LedgerError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_capability_accepts_the_authority() {
        let authority = PlayerId::new();
        let ctx = AuthContext::new(authority);
        assert!(require(&ctx, Capability::Authority(authority)).is_ok());
    }

    #[test]
    fn authority_capability_rejects_everyone_else() {
        let ctx = AuthContext::new(PlayerId::new());
        let result = require(&ctx, Capability::Authority(PlayerId::new()));
        assert!(matches!(result, Err(LedgerError::Unauthorized)));
    }

    #[test]
    fn either_capability_accepts_both_sides() {
        let authority = PlayerId::new();
        let owner = PlayerId::new();
        let capability = Capability::Either { authority, owner };

        assert!(require(&AuthContext::new(authority), capability).is_ok());
        assert!(require(&AuthContext::new(owner), capability).is_ok());
        assert!(matches!(
            require(&AuthContext::new(PlayerId::new()), capability),
            Err(LedgerError::Unauthorized),
        ));
    }

    #[test]
    fn delegate_context_satisfies_capabilities() {
        let owner = PlayerId::new();
        let agent = PlayerId::new();
        let ctx = AuthContext::with_delegates(agent, vec![owner]);

        // A context acting on behalf of the owner holds the owner's
        // capabilities, exactly as it does for balance movements.
        assert!(require(&ctx, Capability::Owner(owner)).is_ok());
        assert!(require(&ctx, Capability::Authority(owner)).is_ok());
        assert!(matches!(
            require(&ctx, Capability::Owner(PlayerId::new())),
            Err(LedgerError::Unauthorized),
        ));
    }

    #[test]
    fn represents_covers_caller_and_delegates() {
        let caller = PlayerId::new();
        let delegate = PlayerId::new();
        let stranger = PlayerId::new();
        let ctx = AuthContext::with_delegates(caller, vec![delegate]);

        assert!(ctx.represents(caller));
        assert!(ctx.represents(delegate));
        assert!(!ctx.represents(stranger));
    }
}
