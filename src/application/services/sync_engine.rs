//! Routes gateway events into the read and mute stores.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::{Stream, StreamExt};
use tracing::{debug, info, trace, warn};

use super::ack_debouncer::{AckDebouncer, DEFAULT_ACK_COOLDOWN};
use super::mute_store::MuteStore;
use super::read_store::ReadStore;
use crate::domain::entities::{ChannelId, GuildId, GuildMuteSettings, GuildPositions, MessageId, ReadState};
use crate::domain::errors::AckError;
use crate::domain::events::{ReadySnapshot, SyncEvent};
use crate::domain::ports::{AckPort, ChannelInfoPort, GuildPositionsListener, ReadUpdateListener};

/// Result of a user-initiated mark-read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkReadOutcome {
    /// The cursor already pointed at the message; nothing was sent.
    Unchanged,
    /// The cursor moved but an acknowledgement went out recently.
    Debounced,
    /// The cursor moved and Discord was told.
    Sent,
    /// The cursor moved but the acknowledgement failed. Local state is kept.
    Failed(AckError),
}

impl MarkReadOutcome {
    /// Returns true if the local cursor moved.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Counters returned by [`SyncEngine::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Events routed.
    pub events: usize,
    /// Read update notifications fired.
    pub notifications: usize,
}

#[derive(Debug, Clone, Copy)]
struct Hooked {
    changed: bool,
    notified: bool,
}

/// Keeps read and mute state in step with Discord.
///
/// Holds no lock of its own; each store is independently atomic. The
/// read update listener is only called for channels that are not muted
/// when the triggering event is handled.
pub struct SyncEngine {
    mutes: MuteStore,
    reads: ReadStore,
    debouncer: AckDebouncer,
    channels: Arc<dyn ChannelInfoPort>,
    ack_port: Arc<dyn AckPort>,
    listener: Arc<dyn ReadUpdateListener>,
    positions_listener: Option<Arc<dyn GuildPositionsListener>>,
    replay_on_ready: bool,
}

impl SyncEngine {
    /// Creates an engine with empty stores and the default ack cooldown.
    #[must_use]
    pub fn new(
        channels: Arc<dyn ChannelInfoPort>,
        ack_port: Arc<dyn AckPort>,
        listener: Arc<dyn ReadUpdateListener>,
    ) -> Self {
        Self {
            mutes: MuteStore::new(),
            reads: ReadStore::new(),
            debouncer: AckDebouncer::new(DEFAULT_ACK_COOLDOWN),
            channels,
            ack_port,
            listener,
            positions_listener: None,
            replay_on_ready: true,
        }
    }

    /// Sets the minimum interval between acks for one channel.
    #[must_use]
    pub fn with_ack_cooldown(mut self, cooldown: Duration) -> Self {
        self.debouncer = AckDebouncer::new(cooldown);
        self
    }

    /// Registers a listener for guild order changes.
    #[must_use]
    pub fn with_guild_positions_listener(mut self, listener: Arc<dyn GuildPositionsListener>) -> Self {
        self.positions_listener = Some(listener);
        self
    }

    /// Enables or disables replaying every cursor after a reconnect READY.
    #[must_use]
    pub const fn with_ready_replay(mut self, enabled: bool) -> Self {
        self.replay_on_ready = enabled;
        self
    }

    /// Returns the read store.
    #[must_use]
    pub const fn reads(&self) -> &ReadStore {
        &self.reads
    }

    /// Returns the mute store.
    #[must_use]
    pub const fn mutes(&self) -> &MuteStore {
        &self.mutes
    }

    /// Routes one event. Returns how many read notifications fired.
    pub fn handle_event(&self, event: SyncEvent) -> usize {
        trace!(event = event.name(), channel_id = ?event.channel_id(), "Handling event");

        match event {
            SyncEvent::Ready(snapshot) => self.on_ready(&snapshot),
            SyncEvent::MessageCreated {
                channel_id,
                message_id,
                guild_id,
            } => usize::from(self.hook(channel_id, message_id, guild_id).notified),
            SyncEvent::MessageAcknowledged {
                channel_id,
                message_id,
            } => usize::from(self.on_incoming_message(channel_id, message_id)),
            SyncEvent::GuildSettingsChanged(settings) => {
                self.on_guild_settings_update(&settings);
                0
            }
            SyncEvent::UserSettingsChanged(positions) => {
                self.on_guild_positions(&positions);
                0
            }
            SyncEvent::ChannelCreated {
                channel_id,
                guild_id,
            } => {
                self.channels.record_channel(channel_id, guild_id);
                0
            }
            SyncEvent::ChannelDeleted { channel_id } => {
                self.on_channel_deleted(channel_id);
                0
            }
        }
    }

    /// Routes every event from `events` in order until the stream ends.
    pub async fn run<S>(&self, events: S) -> RunSummary
    where
        S: Stream<Item = SyncEvent>,
    {
        let mut events = std::pin::pin!(events);
        let mut summary = RunSummary::default();

        while let Some(event) = events.next().await {
            summary.events += 1;
            summary.notifications += self.handle_event(event);
        }

        info!(
            events = summary.events,
            notifications = summary.notifications,
            "Event stream ended"
        );

        summary
    }

    /// Applies a READY snapshot. Returns how many read notifications fired.
    ///
    /// Mute state is applied before read state. If cursors already existed
    /// (a reconnect), every unmuted cursor is replayed to the listener.
    pub fn on_ready(&self, snapshot: &ReadySnapshot) -> usize {
        for (channel_id, guild_id) in &snapshot.channels {
            self.channels.record_channel(*channel_id, *guild_id);
        }

        self.mutes.apply_settings_snapshot(&snapshot.mute_settings);
        let previous = self.reads.apply_snapshot(&snapshot.read_states);

        info!(
            guild_settings = snapshot.mute_settings.len(),
            read_states = snapshot.read_states.len(),
            channels = snapshot.channels.len(),
            reconnect = previous > 0,
            "Applied READY snapshot"
        );

        if let Some(positions) = &snapshot.guild_positions {
            self.on_guild_positions(positions);
        }

        if previous == 0 || !self.replay_on_ready {
            return 0;
        }

        let mut notified = 0;
        for state in self.reads.snapshot() {
            if self.channel_muted(state.channel_id) {
                continue;
            }
            self.listener.on_read_update(&state);
            notified += 1;
        }

        debug!(notified, "Replayed read states after reconnect");
        notified
    }

    /// Moves a cursor for a new or acknowledged message.
    ///
    /// Returns whether the read update listener was called.
    pub fn on_incoming_message(&self, channel_id: ChannelId, message_id: MessageId) -> bool {
        self.hook(channel_id, message_id, None).notified
    }

    /// Forgets everything held for a deleted channel.
    pub fn on_channel_deleted(&self, channel_id: ChannelId) {
        self.channels.remove_channel(channel_id);
        self.reads.remove(channel_id);
        self.mutes.remove_channel(channel_id);
        self.debouncer.forget(channel_id);
        debug!(%channel_id, "Channel deleted");
    }

    /// Applies one guild's mute settings. Emits no read notification.
    pub fn on_guild_settings_update(&self, settings: &GuildMuteSettings) {
        debug!(
            guild_id = ?settings.guild_id,
            overrides = settings.channel_overrides.len(),
            "Guild settings updated"
        );
        self.mutes.apply_guild_update(settings);
    }

    /// Marks a channel read up to `message_id` as of now.
    pub async fn mark_read(&self, channel_id: ChannelId, message_id: MessageId) -> MarkReadOutcome {
        self.mark_read_at(channel_id, message_id, Instant::now()).await
    }

    /// Marks a channel read, using `now` for the ack cooldown.
    ///
    /// The local cursor moves first. An ack is sent only if the cursor
    /// changed and the channel's cooldown has passed; a failed ack does
    /// not roll the cursor back.
    pub async fn mark_read_at(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        now: Instant,
    ) -> MarkReadOutcome {
        if !self.hook(channel_id, message_id, None).changed {
            return MarkReadOutcome::Unchanged;
        }

        if !self.debouncer.should_send(channel_id, now) {
            debug!(
                %channel_id,
                %message_id,
                cooldown = ?self.debouncer.cooldown(),
                "Ack suppressed by cooldown"
            );
            return MarkReadOutcome::Debounced;
        }

        match self.ack_port.send_ack(channel_id, message_id).await {
            Ok(()) => {
                debug!(%channel_id, %message_id, "Ack sent");
                MarkReadOutcome::Sent
            }
            Err(e) => {
                warn!(%channel_id, %message_id, error = %e, "Failed to ack message");
                MarkReadOutcome::Failed(e)
            }
        }
    }

    /// Returns the cursor for a channel, or `None` if the channel is muted.
    #[must_use]
    pub fn find_last_read(&self, channel_id: ChannelId) -> Option<ReadState> {
        if self.channel_muted(channel_id) {
            return None;
        }
        self.reads.get(channel_id)
    }

    /// Returns whether a channel has messages past its cursor.
    ///
    /// Muted and untracked channels are never unread.
    #[must_use]
    pub fn is_unread(&self, channel_id: ChannelId, latest_message_id: MessageId) -> bool {
        self.find_last_read(channel_id)
            .is_some_and(|state| !state.is_at(latest_message_id))
    }

    /// Returns whether any of the given `(channel, latest message)` pairs is unread.
    pub fn guild_has_unread<I>(&self, channels: I) -> bool
    where
        I: IntoIterator<Item = (ChannelId, MessageId)>,
    {
        channels
            .into_iter()
            .any(|(channel_id, latest)| self.is_unread(channel_id, latest))
    }

    /// Returns whether a channel is effectively muted.
    #[must_use]
    pub fn channel_muted(&self, channel_id: ChannelId) -> bool {
        self.mutes
            .is_channel_muted(channel_id, self.channels.guild_of(channel_id))
    }

    /// Returns whether a guild is muted.
    #[must_use]
    pub fn guild_muted(&self, guild_id: GuildId) -> bool {
        self.mutes.is_guild_muted(guild_id)
    }

    // The listener runs under the read store lock so notifications for a
    // channel arrive in the order its cursor was written.
    fn hook(&self, channel_id: ChannelId, message_id: MessageId, guild_hint: Option<GuildId>) -> Hooked {
        let mut notified = false;
        let update = self
            .reads
            .hook_incoming_message_with(channel_id, message_id, |state| {
                let guild_id = guild_hint.or_else(|| self.channels.guild_of(channel_id));
                if self.mutes.is_channel_muted(channel_id, guild_id) {
                    trace!(%channel_id, %message_id, "Read update suppressed for muted channel");
                    return;
                }
                self.listener.on_read_update(state);
                notified = true;
            });

        if !update.changed {
            trace!(%channel_id, %message_id, "Cursor already at message");
        }

        Hooked {
            changed: update.changed,
            notified,
        }
    }

    fn on_guild_positions(&self, positions: &GuildPositions) {
        match &self.positions_listener {
            Some(listener) => listener.on_guild_positions(positions),
            None => debug!(guilds = positions.as_slice().len(), "Guild positions changed"),
        }
    }
}
