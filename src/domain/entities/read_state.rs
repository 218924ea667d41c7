//! Read state entity.

use serde::{Deserialize, Serialize};

use super::{ChannelId, MessageId};

/// Read cursor for a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadState {
    /// Channel ID.
    pub channel_id: ChannelId,
    /// ID of the last read message.
    pub last_read_message_id: Option<MessageId>,
    /// Number of unread mentions.
    #[serde(default)]
    pub mention_count: u32,
}

impl ReadState {
    /// Creates a new read state.
    #[must_use]
    pub const fn new(channel_id: ChannelId, last_read_message_id: Option<MessageId>) -> Self {
        Self {
            channel_id,
            last_read_message_id,
            mention_count: 0,
        }
    }

    /// Sets the mention count.
    #[must_use]
    pub const fn with_mention_count(mut self, count: u32) -> Self {
        self.mention_count = count;
        self
    }

    /// Returns true if the cursor points at `message_id`.
    #[must_use]
    pub fn is_at(&self, message_id: MessageId) -> bool {
        self.last_read_message_id == Some(message_id)
    }
}
