//! Guild and channel mute overrides.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::entities::{ChannelId, GuildId, GuildMuteSettings, MuteEntry};

/// Holds mute overrides for guilds and channels.
///
/// Guild and channel entries are independent: a channel entry replaces
/// the guild's verdict for that channel instead of merging with it.
#[derive(Debug, Default)]
pub struct MuteStore {
    inner: Mutex<MuteStoreInner>,
}

#[derive(Debug, Default)]
struct MuteStoreInner {
    guilds: HashMap<GuildId, MuteEntry>,
    channels: HashMap<ChannelId, MuteEntry>,
}

impl MuteStoreInner {
    fn apply(&mut self, settings: &GuildMuteSettings) {
        if let Some(guild_id) = settings.guild_id {
            settings.apply_to(self.guilds.entry(guild_id).or_default());
        }

        let guild_muted = settings
            .guild_id
            .filter(|id| id.as_u64() != 0)
            .is_some_and(|id| self.guilds.contains_key(&id));

        for channel_override in &settings.channel_overrides {
            // A new entry without `muted` must keep the channel's current verdict.
            let entry = self
                .channels
                .entry(channel_override.channel_id)
                .or_insert_with(|| MuteEntry {
                    muted: guild_muted,
                    ..MuteEntry::default()
                });
            channel_override.apply_to(entry);
        }
    }
}

impl MuteStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the mute settings delivered with READY.
    ///
    /// Guilds missing from `entries` keep whatever is stored for them.
    pub fn apply_settings_snapshot(&self, entries: &[GuildMuteSettings]) {
        let mut inner = self.inner.lock();
        for settings in entries {
            inner.apply(settings);
        }

        debug!(
            guilds = inner.guilds.len(),
            channels = inner.channels.len(),
            "Applied mute settings snapshot"
        );
    }

    /// Applies a single guild's settings update.
    pub fn apply_guild_update(&self, settings: &GuildMuteSettings) {
        self.inner.lock().apply(settings);
    }

    /// Returns whether a channel is effectively muted.
    ///
    /// A channel entry decides on its own; otherwise the channel follows
    /// its guild. `None` or a zero guild ID means a DM channel.
    #[must_use]
    pub fn is_channel_muted(&self, channel_id: ChannelId, guild_id: Option<GuildId>) -> bool {
        let inner = self.inner.lock();

        if let Some(entry) = inner.channels.get(&channel_id) {
            return entry.muted;
        }

        guild_id
            .filter(|id| id.as_u64() != 0)
            .is_some_and(|id| inner.guilds.contains_key(&id))
    }

    /// Drops a channel's override. The channel then follows its guild.
    pub fn remove_channel(&self, channel_id: ChannelId) {
        self.inner.lock().channels.remove(&channel_id);
    }

    /// Returns whether a guild has a stored entry.
    #[must_use]
    pub fn is_guild_muted(&self, guild_id: GuildId) -> bool {
        self.inner.lock().guilds.contains_key(&guild_id)
    }

    /// Returns the stored guild entry.
    #[must_use]
    pub fn guild_entry(&self, guild_id: GuildId) -> Option<MuteEntry> {
        self.inner.lock().guilds.get(&guild_id).copied()
    }

    /// Returns the stored channel override.
    #[must_use]
    pub fn channel_entry(&self, channel_id: ChannelId) -> Option<MuteEntry> {
        self.inner.lock().channels.get(&channel_id).copied()
    }
}
