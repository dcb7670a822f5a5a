//! The append-only event log.
//!
//! Every successful mutating operation appends exactly one [`GameEvent`].
//! Entries are never modified or deleted, and emission happens only after
//! an operation has fully committed -- an aborted operation leaves the log
//! untouched. External observers consume the log by polling
//! [`EventLog::since`] with the last sequence number they saw.

use chrono::Utc;

use waystone_types::{EventId, GameEvent, GameEventPayload};

/// Append-only notification channel for ledger mutations.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
    next_sequence: u64,
}

impl EventLog {
    /// Create a new empty log.
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Return the number of events in the log.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return whether the log has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append an event, stamping it with the next sequence number and the
    /// current time.
    ///
    /// Called by the ledger only after an operation has fully committed.
    pub(crate) fn append(&mut self, payload: GameEventPayload) {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);

        self.events.push(GameEvent {
            id: EventId::new(),
            sequence,
            payload,
            created_at: Utc::now(),
        });
    }

    /// Return all events, in emission order.
    pub fn all(&self) -> &[GameEvent] {
        &self.events
    }

    /// Return the most recent event, if any.
    pub fn last(&self) -> Option<&GameEvent> {
        self.events.last()
    }

    /// Iterate over events with `sequence >= from_sequence`.
    ///
    /// The polling interface for observers: pass the last sequence you
    /// processed plus one.
    pub fn since(&self, from_sequence: u64) -> impl Iterator<Item = &GameEvent> {
        self.events
            .iter()
            .filter(move |event| event.sequence >= from_sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use waystone_types::PlayerId;

    fn pause_event(paused: bool) -> GameEventPayload {
        GameEventPayload::PauseStatusChanged {
            authority: PlayerId::new(),
            paused,
        }
    }

    #[test]
    fn new_log_is_empty() {
        let log = EventLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.last().is_none());
    }

    #[test]
    fn sequences_increase_from_zero() {
        let mut log = EventLog::new();
        log.append(pause_event(true));
        log.append(pause_event(false));

        let sequences: Vec<u64> = log.all().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![0, 1]);
    }

    #[test]
    fn since_filters_by_sequence() {
        let mut log = EventLog::new();
        log.append(pause_event(true));
        log.append(pause_event(false));
        log.append(pause_event(true));

        assert_eq!(log.since(0).count(), 3);
        assert_eq!(log.since(1).count(), 2);
        assert_eq!(log.since(3).count(), 0);
    }

    #[test]
    fn last_returns_newest_event() {
        let mut log = EventLog::new();
        log.append(pause_event(true));
        log.append(pause_event(false));

        let newest = log.last();
        assert!(matches!(
            newest.map(|e| &e.payload),
            Some(GameEventPayload::PauseStatusChanged { paused: false, .. }),
        ));
    }
}
