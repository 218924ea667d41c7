//! Channel metadata lookup port.

use crate::domain::entities::{ChannelId, GuildId};

/// Resolves which guild owns a channel.
#[cfg_attr(test, mockall::automock)]
pub trait ChannelInfoPort: Send + Sync {
    /// Returns the owning guild, or `None` for DMs and unknown channels.
    fn guild_of(&self, channel_id: ChannelId) -> Option<GuildId>;

    /// Records a channel seen on the gateway. Read-only lookups ignore this.
    fn record_channel(&self, _channel_id: ChannelId, _guild_id: Option<GuildId>) {}

    /// Forgets a deleted channel.
    fn remove_channel(&self, _channel_id: ChannelId) {}
}
