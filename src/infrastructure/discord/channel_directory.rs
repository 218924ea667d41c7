//! In-memory channel to guild lookup.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::entities::{ChannelId, GuildId};
use crate::domain::ports::ChannelInfoPort;

/// Channel ownership learned from the gateway.
#[derive(Debug, Default)]
pub struct ChannelDirectory {
    channels: RwLock<HashMap<ChannelId, Option<GuildId>>>,
}

impl ChannelDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ChannelInfoPort for ChannelDirectory {
    fn guild_of(&self, channel_id: ChannelId) -> Option<GuildId> {
        self.channels.read().get(&channel_id).copied().flatten()
    }

    fn record_channel(&self, channel_id: ChannelId, guild_id: Option<GuildId>) {
        self.channels.write().insert(channel_id, guild_id);
    }

    fn remove_channel(&self, channel_id: ChannelId) {
        self.channels.write().remove(&channel_id);
    }
}
