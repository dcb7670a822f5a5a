//! NPC interaction ledger operations.
//!
//! NPC records are keyed by (owner, `npc_id`). Ownership is fixed at
//! creation: only the owner rewrites dialogue or attaches quests, while
//! interaction is open to any player holding a valid dialogue index.

use std::collections::BTreeSet;

use chrono::Utc;

use waystone_store::RecordKey;
use waystone_types::{GameEventPayload, NpcRecord, PlayerId, MAX_DIALOGUE_LINES, MAX_QUEST_IDS};

use crate::auth::{require, AuthContext, Capability};
use crate::ledger::GameLedger;
use crate::LedgerError;

impl GameLedger {
    /// Create a fresh NPC record owned by the caller.
    ///
    /// The interaction counter starts at zero and `last_interaction` is
    /// set to the creation time.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AlreadyExists`] if (owner, `npc_id`) is taken.
    /// - [`LedgerError::LimitExceeded`] if the dialogue or quest list is
    ///   over its bound.
    /// - [`LedgerError::QuestAlreadyExists`] if `quest_ids` contains a
    ///   duplicate.
    pub fn initialize_npc(
        &mut self,
        ctx: &AuthContext,
        npc_id: u64,
        category: String,
        dialogue: Vec<String>,
        quest_ids: Vec<u64>,
    ) -> Result<(), LedgerError> {
        let owner = ctx.caller();

        check_dialogue_bound(&dialogue)?;
        check_quest_bound(&quest_ids)?;

        let mut seen = BTreeSet::new();
        for quest_id in &quest_ids {
            if !seen.insert(*quest_id) {
                return Err(LedgerError::QuestAlreadyExists {
                    npc_id,
                    quest_id: *quest_id,
                });
            }
        }

        self.npcs.create(
            RecordKey::npc(owner, npc_id),
            NpcRecord {
                owner,
                npc_id,
                category: category.clone(),
                dialogue,
                quest_ids,
                interaction_count: 0,
                last_interaction: Utc::now(),
            },
        )?;

        self.events.append(GameEventPayload::NpcInitialized {
            owner,
            npc_id,
            category,
        });
        tracing::debug!(%owner, npc_id, "Initialized NPC record");
        Ok(())
    }

    /// Record one player interaction against an NPC's dialogue line.
    ///
    /// No authorization beyond record existence: any player may interact.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the NPC does not exist.
    /// - [`LedgerError::InvalidDialogueIndex`] if the index is past the
    ///   dialogue's end; the counter does not move.
    pub fn interact_with_npc(
        &mut self,
        owner: PlayerId,
        npc_id: u64,
        player: PlayerId,
        dialogue_index: usize,
    ) -> Result<(), LedgerError> {
        self.npcs
            .mutate(RecordKey::npc(owner, npc_id), |npc: &mut NpcRecord| {
                if dialogue_index >= npc.dialogue.len() {
                    return Err(LedgerError::InvalidDialogueIndex {
                        index: dialogue_index,
                        line_count: npc.dialogue.len(),
                    });
                }
                npc.interaction_count = npc.interaction_count.saturating_add(1);
                npc.last_interaction = Utc::now();
                Ok(())
            })?;

        self.events.append(GameEventPayload::NpcInteraction {
            owner,
            npc_id,
            player,
            dialogue_index,
        });
        tracing::debug!(%owner, npc_id, %player, dialogue_index, "NPC interaction recorded");
        Ok(())
    }

    /// Replace an NPC's dialogue sequence wholesale. Owner only.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the NPC does not exist.
    /// - [`LedgerError::Unauthorized`] if the caller is not the owner.
    /// - [`LedgerError::LimitExceeded`] if the new dialogue is over bound.
    pub fn update_dialogue(
        &mut self,
        owner: PlayerId,
        npc_id: u64,
        ctx: &AuthContext,
        dialogue: Vec<String>,
    ) -> Result<(), LedgerError> {
        let key = RecordKey::npc(owner, npc_id);
        let npc = self.npcs.get(key)?;
        require(ctx, Capability::Owner(npc.owner))?;
        check_dialogue_bound(&dialogue)?;

        let line_count = dialogue.len();
        self.npcs.mutate(key, |npc: &mut NpcRecord| {
            npc.dialogue = dialogue;
            Ok::<(), LedgerError>(())
        })?;

        self.events.append(GameEventPayload::DialogueUpdated {
            owner,
            npc_id,
            line_count,
        });
        tracing::debug!(%owner, npc_id, line_count, "Replaced NPC dialogue");
        Ok(())
    }

    /// Attach a quest to an NPC. Owner only; quest ids stay unique.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if the NPC does not exist.
    /// - [`LedgerError::Unauthorized`] if the caller is not the owner.
    /// - [`LedgerError::QuestAlreadyExists`] if the quest is already
    ///   attached; the quest set is left unchanged.
    /// - [`LedgerError::LimitExceeded`] if the quest set is full.
    pub fn add_quest(
        &mut self,
        owner: PlayerId,
        npc_id: u64,
        ctx: &AuthContext,
        quest_id: u64,
    ) -> Result<(), LedgerError> {
        let key = RecordKey::npc(owner, npc_id);
        let npc = self.npcs.get(key)?;
        require(ctx, Capability::Owner(npc.owner))?;

        self.npcs.mutate(key, |npc: &mut NpcRecord| {
            if npc.quest_ids.contains(&quest_id) {
                return Err(LedgerError::QuestAlreadyExists { npc_id, quest_id });
            }
            if npc.quest_ids.len() >= MAX_QUEST_IDS {
                return Err(LedgerError::LimitExceeded {
                    field: "quest_ids",
                    max: MAX_QUEST_IDS,
                    actual: npc.quest_ids.len().saturating_add(1),
                });
            }
            npc.quest_ids.push(quest_id);
            Ok(())
        })?;

        self.events.append(GameEventPayload::QuestAdded {
            owner,
            npc_id,
            quest_id,
        });
        tracing::debug!(%owner, npc_id, quest_id, "Quest attached to NPC");
        Ok(())
    }
}

/// Reject dialogue sequences over [`MAX_DIALOGUE_LINES`].
fn check_dialogue_bound(dialogue: &[String]) -> Result<(), LedgerError> {
    if dialogue.len() > MAX_DIALOGUE_LINES {
        return Err(LedgerError::LimitExceeded {
            field: "dialogue",
            max: MAX_DIALOGUE_LINES,
            actual: dialogue.len(),
        });
    }
    Ok(())
}

/// Reject quest lists over [`MAX_QUEST_IDS`].
fn check_quest_bound(quest_ids: &[u64]) -> Result<(), LedgerError> {
    if quest_ids.len() > MAX_QUEST_IDS {
        return Err(LedgerError::LimitExceeded {
            field: "quest_ids",
            max: MAX_QUEST_IDS,
            actual: quest_ids.len(),
        });
    }
    Ok(())
}
