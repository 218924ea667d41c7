//! Mute and notification override entities.

use serde::{Deserialize, Serialize};

use super::{ChannelId, GuildId};

/// Message notification level for a guild or channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum NotificationLevel {
    /// Notify on every message.
    All = 0,
    /// Notify only on mentions.
    OnlyMentions = 1,
    /// Never notify.
    Nothing = 2,
    /// Inherit the guild default.
    #[default]
    GuildDefault = 3,
}

impl From<u8> for NotificationLevel {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::All,
            1 => Self::OnlyMentions,
            2 => Self::Nothing,
            _ => Self::GuildDefault,
        }
    }
}

/// Stored mute override for a guild or a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MuteEntry {
    /// Whether everything is muted.
    pub muted: bool,
    /// Message notification level.
    pub notification_level: NotificationLevel,
    /// Suppress `@everyone` and `@here`. Guild scope only.
    pub suppress_everyone: bool,
}

/// Per-channel override carried inside guild settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOverride {
    /// Channel the override applies to.
    pub channel_id: ChannelId,
    /// Muted flag, `None` when the update did not carry it.
    pub muted: Option<bool>,
    /// Notification level, `None` when the update did not carry it.
    pub notification_level: Option<NotificationLevel>,
}

impl ChannelOverride {
    /// Creates an override with every field present.
    #[must_use]
    pub const fn new(channel_id: ChannelId, muted: bool, level: NotificationLevel) -> Self {
        Self {
            channel_id,
            muted: Some(muted),
            notification_level: Some(level),
        }
    }

    /// Applies the fields present in this override onto `entry`.
    pub fn apply_to(&self, entry: &mut MuteEntry) {
        if let Some(muted) = self.muted {
            entry.muted = muted;
        }
        if let Some(level) = self.notification_level {
            entry.notification_level = level;
        }
    }
}

/// Mute settings for one guild, as delivered by READY or a settings update.
///
/// `guild_id` is `None` for the pseudo-guild holding direct message
/// overrides. Absent fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMuteSettings {
    /// Guild the settings belong to.
    pub guild_id: Option<GuildId>,
    /// Muted flag.
    pub muted: Option<bool>,
    /// Message notification level.
    pub notification_level: Option<NotificationLevel>,
    /// Suppress `@everyone` and `@here`.
    pub suppress_everyone: Option<bool>,
    /// Channel overrides nested under this guild.
    #[serde(default)]
    pub channel_overrides: Vec<ChannelOverride>,
}

impl GuildMuteSettings {
    /// Creates fully-populated settings for a guild.
    #[must_use]
    pub const fn for_guild(guild_id: GuildId, muted: bool) -> Self {
        Self {
            guild_id: Some(guild_id),
            muted: Some(muted),
            notification_level: Some(NotificationLevel::All),
            suppress_everyone: Some(false),
            channel_overrides: Vec::new(),
        }
    }

    /// Creates settings for direct message channels.
    #[must_use]
    pub const fn direct_messages() -> Self {
        Self {
            guild_id: None,
            muted: None,
            notification_level: None,
            suppress_everyone: None,
            channel_overrides: Vec::new(),
        }
    }

    /// Sets the notification level.
    #[must_use]
    pub const fn with_notification_level(mut self, level: NotificationLevel) -> Self {
        self.notification_level = Some(level);
        self
    }

    /// Sets the `@everyone` suppression flag.
    #[must_use]
    pub const fn with_suppress_everyone(mut self, suppress: bool) -> Self {
        self.suppress_everyone = Some(suppress);
        self
    }

    /// Adds a channel override.
    #[must_use]
    pub fn with_override(mut self, channel_override: ChannelOverride) -> Self {
        self.channel_overrides.push(channel_override);
        self
    }

    /// Applies the guild-level fields present in these settings onto `entry`.
    pub fn apply_to(&self, entry: &mut MuteEntry) {
        if let Some(muted) = self.muted {
            entry.muted = muted;
        }
        if let Some(level) = self.notification_level {
            entry.notification_level = level;
        }
        if let Some(suppress) = self.suppress_everyone {
            entry.suppress_everyone = suppress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_level_from_u8() {
        assert_eq!(NotificationLevel::from(0), NotificationLevel::All);
        assert_eq!(NotificationLevel::from(1), NotificationLevel::OnlyMentions);
        assert_eq!(NotificationLevel::from(2), NotificationLevel::Nothing);
        assert_eq!(NotificationLevel::from(3), NotificationLevel::GuildDefault);
        assert_eq!(NotificationLevel::from(200), NotificationLevel::GuildDefault);
    }

    #[test]
    fn test_partial_settings_keep_existing_fields() {
        let mut entry = MuteEntry {
            muted: true,
            notification_level: NotificationLevel::OnlyMentions,
            suppress_everyone: true,
        };
        let partial = GuildMuteSettings {
            guild_id: Some(GuildId(1)),
            muted: Some(false),
            ..GuildMuteSettings::default()
        };

        partial.apply_to(&mut entry);

        assert!(!entry.muted);
        assert_eq!(entry.notification_level, NotificationLevel::OnlyMentions);
        assert!(entry.suppress_everyone);
    }

    #[test]
    fn test_channel_override_apply() {
        let mut entry = MuteEntry::default();
        ChannelOverride::new(ChannelId(9), true, NotificationLevel::Nothing).apply_to(&mut entry);

        assert!(entry.muted);
        assert_eq!(entry.notification_level, NotificationLevel::Nothing);
    }
}
