//! Per-channel read cursors.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::entities::{ChannelId, MessageId, ReadState};

/// Result of hooking a message into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorUpdate {
    /// Cursor after the update.
    pub state: ReadState,
    /// Whether the cursor moved.
    pub changed: bool,
}

/// Holds the last read message and mention count per channel.
#[derive(Debug, Default)]
pub struct ReadStore {
    cursors: Mutex<HashMap<ChannelId, ReadState>>,
}

impl ReadStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites cursors with an authoritative snapshot.
    ///
    /// Every channel in `states` is replaced unconditionally, even when the
    /// local cursor is further ahead. Returns how many cursors existed
    /// before the snapshot was applied.
    pub fn apply_snapshot(&self, states: &[ReadState]) -> usize {
        let mut cursors = self.cursors.lock();
        let previous = cursors.len();

        for state in states {
            cursors.insert(state.channel_id, state.clone());
        }

        debug!(
            previous,
            applied = states.len(),
            total = cursors.len(),
            "Applied read state snapshot"
        );

        previous
    }

    /// Moves a channel's cursor to `message_id`.
    ///
    /// Creates the cursor if the channel is unknown. Delivering the
    /// message the cursor already points at is a no-op.
    pub fn hook_incoming_message(&self, channel_id: ChannelId, message_id: MessageId) -> CursorUpdate {
        self.hook_incoming_message_with(channel_id, message_id, |_| {})
    }

    /// Like [`hook_incoming_message`](Self::hook_incoming_message), calling
    /// `on_change` with the new cursor before the lock is released.
    ///
    /// `on_change` only runs when the cursor moved, so callbacks for one
    /// channel observe cursors in the order they were written. It must not
    /// call back into this store.
    pub fn hook_incoming_message_with<F>(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        on_change: F,
    ) -> CursorUpdate
    where
        F: FnOnce(&ReadState),
    {
        let mut cursors = self.cursors.lock();
        let state = cursors
            .entry(channel_id)
            .or_insert_with(|| ReadState::new(channel_id, None));

        if state.is_at(message_id) {
            return CursorUpdate {
                state: state.clone(),
                changed: false,
            };
        }

        state.last_read_message_id = Some(message_id);
        on_change(state);

        CursorUpdate {
            state: state.clone(),
            changed: true,
        }
    }

    /// Drops a channel's cursor. Returns it if one was tracked.
    pub fn remove(&self, channel_id: ChannelId) -> Option<ReadState> {
        self.cursors.lock().remove(&channel_id)
    }

    /// Returns the cursor for a channel.
    #[must_use]
    pub fn get(&self, channel_id: ChannelId) -> Option<ReadState> {
        self.cursors.lock().get(&channel_id).cloned()
    }

    /// Returns a copy of every cursor, ordered by channel ID.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ReadState> {
        let mut states: Vec<ReadState> = self.cursors.lock().values().cloned().collect();
        states.sort_by_key(|state| state.channel_id);
        states
    }

    /// Returns the number of tracked channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cursors.lock().len()
    }

    /// Returns true if no channel is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
