//! Inbound events driving the synchronizer.

use super::entities::{ChannelId, GuildId, GuildMuteSettings, GuildPositions, MessageId, ReadState};

/// Authoritative state delivered when a session starts or resumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadySnapshot {
    /// Mute settings for every guild the server knows settings for.
    pub mute_settings: Vec<GuildMuteSettings>,
    /// Read cursors for every channel with a read state.
    pub read_states: Vec<ReadState>,
    /// Known channels and their owning guild (`None` for DMs).
    pub channels: Vec<(ChannelId, Option<GuildId>)>,
    /// Guild sidebar order, if the session carried user settings.
    pub guild_positions: Option<GuildPositions>,
}

impl ReadySnapshot {
    /// Creates a snapshot from mute settings and read states.
    #[must_use]
    pub fn new(mute_settings: Vec<GuildMuteSettings>, read_states: Vec<ReadState>) -> Self {
        Self {
            mute_settings,
            read_states,
            ..Self::default()
        }
    }

    /// Sets the channel list.
    #[must_use]
    pub fn with_channels(mut self, channels: Vec<(ChannelId, Option<GuildId>)>) -> Self {
        self.channels = channels;
        self
    }
}

/// Events the synchronizer reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SyncEvent {
    Ready(ReadySnapshot),
    MessageCreated {
        channel_id: ChannelId,
        message_id: MessageId,
        guild_id: Option<GuildId>,
    },
    MessageAcknowledged {
        channel_id: ChannelId,
        message_id: MessageId,
    },
    GuildSettingsChanged(GuildMuteSettings),
    UserSettingsChanged(GuildPositions),
    ChannelCreated {
        channel_id: ChannelId,
        guild_id: Option<GuildId>,
    },
    ChannelDeleted {
        channel_id: ChannelId,
    },
}

impl SyncEvent {
    /// Returns the channel this event is scoped to, if any.
    #[must_use]
    pub const fn channel_id(&self) -> Option<ChannelId> {
        match self {
            Self::MessageCreated { channel_id, .. }
            | Self::MessageAcknowledged { channel_id, .. }
            | Self::ChannelCreated { channel_id, .. }
            | Self::ChannelDeleted { channel_id } => Some(*channel_id),
            Self::Ready(_) | Self::GuildSettingsChanged(_) | Self::UserSettingsChanged(_) => None,
        }
    }

    /// Short event name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ready(_) => "READY",
            Self::MessageCreated { .. } => "MESSAGE_CREATE",
            Self::MessageAcknowledged { .. } => "MESSAGE_ACK",
            Self::GuildSettingsChanged(_) => "USER_GUILD_SETTINGS_UPDATE",
            Self::UserSettingsChanged(_) => "USER_SETTINGS_UPDATE",
            Self::ChannelCreated { .. } => "CHANNEL_CREATE",
            Self::ChannelDeleted { .. } => "CHANNEL_DELETE",
        }
    }
}
