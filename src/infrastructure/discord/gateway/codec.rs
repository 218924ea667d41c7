//! Decoding of gateway dispatch frames into sync events.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use super::constants::DISPATCH_OPCODE;
use super::error::{GatewayError, GatewayResult};
use super::payloads::{
    ChannelOverridePayload, ChannelPayload, GatewayMessage, MessageAckPayload,
    MessageCreatePayload, ReadStatePayload, ReadyGuild, ReadyPayload, UserGuildSettingsPayload,
    UserSettingsPayload,
};
use crate::domain::entities::{
    ChannelId, ChannelOverride, GuildId, GuildMuteSettings, GuildPositions, MessageId,
    NotificationLevel, ReadState,
};
use crate::domain::events::{ReadySnapshot, SyncEvent};
use crate::domain::serde_utils::snowflake;

/// Turns raw gateway frames into [`SyncEvent`]s.
pub struct EventParser;

impl EventParser {
    /// Parses the outer gateway envelope.
    ///
    /// # Errors
    /// Returns error if the frame is not valid JSON.
    pub fn parse_message(json: &str) -> GatewayResult<GatewayMessage> {
        serde_json::from_str(json).map_err(|e| GatewayError::serialization(e.to_string()))
    }

    /// Decodes one raw frame. Non-dispatch frames and events the
    /// synchronizer does not consume yield `None`.
    pub fn parse_frame(json: &str) -> GatewayResult<Option<SyncEvent>> {
        let message = Self::parse_message(json)?;
        if message.op != DISPATCH_OPCODE {
            return Ok(None);
        }

        let event_type = message
            .t
            .ok_or_else(|| GatewayError::protocol("dispatch without event name"))?;

        Self::parse_dispatch(&event_type, message.d)
    }

    /// Decodes the payload of a named dispatch event.
    ///
    /// # Errors
    /// Returns error if a consumed event carries a malformed payload.
    pub fn parse_dispatch(event_type: &str, data: Option<Value>) -> GatewayResult<Option<SyncEvent>> {
        let data = data.ok_or_else(|| GatewayError::protocol("Missing dispatch data"))?;

        match event_type {
            "READY" => Self::parse_ready(data).map(Some),
            "MESSAGE_CREATE" => Self::parse_message_create(data).map(Some),
            "MESSAGE_ACK" => Self::parse_message_ack(data).map(Some),
            "USER_GUILD_SETTINGS_UPDATE" => Self::parse_guild_settings_update(data).map(Some),
            "USER_SETTINGS_UPDATE" => Self::parse_user_settings_update(data),
            "CHANNEL_CREATE" => Self::parse_channel_create(data).map(Some),
            "CHANNEL_DELETE" => Self::parse_channel_delete(data).map(Some),
            _ => Ok(None),
        }
    }

    fn parse_ready(data: Value) -> GatewayResult<SyncEvent> {
        let ready: ReadyPayload = serde_json::from_value(data)
            .map_err(|e| GatewayError::serialization(format!("Failed to parse Ready: {e}")))?;

        let read_states = parse_lenient::<ReadStatePayload>("read_state", ready.read_state.into_entries())
            .into_iter()
            .map(|rs| {
                ReadState::new(ChannelId(rs.id), rs.last_message_id.map(MessageId))
                    .with_mention_count(rs.mention_count)
            })
            .collect();

        let mute_settings = parse_lenient::<UserGuildSettingsPayload>(
            "user_guild_settings",
            ready.user_guild_settings.into_entries(),
        )
        .into_iter()
        .map(convert_guild_settings)
        .collect();

        let mut channels = Vec::new();
        for guild in parse_lenient::<ReadyGuild>("guild", ready.guilds) {
            channels.extend(
                parse_lenient::<ChannelPayload>("guild channel", guild.channels)
                    .into_iter()
                    .map(|ch| (ChannelId(ch.id), Some(GuildId(guild.id)))),
            );
        }
        channels.extend(
            parse_lenient::<ChannelPayload>("private channel", ready.private_channels)
                .into_iter()
                .map(|ch| (ChannelId(ch.id), None)),
        );

        let guild_positions = ready.user_settings.and_then(convert_guild_positions);

        Ok(SyncEvent::Ready(ReadySnapshot {
            mute_settings,
            read_states,
            channels,
            guild_positions,
        }))
    }

    fn parse_message_create(data: Value) -> GatewayResult<SyncEvent> {
        let payload: MessageCreatePayload = serde_json::from_value(data).map_err(|e| {
            GatewayError::serialization(format!("Failed to parse MessageCreate: {e}"))
        })?;

        Ok(SyncEvent::MessageCreated {
            channel_id: ChannelId(payload.channel_id),
            message_id: MessageId(payload.id),
            guild_id: payload.guild_id.map(GuildId),
        })
    }

    fn parse_message_ack(data: Value) -> GatewayResult<SyncEvent> {
        let payload: MessageAckPayload = serde_json::from_value(data)
            .map_err(|e| GatewayError::serialization(format!("Failed to parse MessageAck: {e}")))?;

        Ok(SyncEvent::MessageAcknowledged {
            channel_id: ChannelId(payload.channel_id),
            message_id: MessageId(payload.message_id),
        })
    }

    fn parse_guild_settings_update(data: Value) -> GatewayResult<SyncEvent> {
        let payload: UserGuildSettingsPayload = serde_json::from_value(data).map_err(|e| {
            GatewayError::serialization(format!("Failed to parse UserGuildSettingsUpdate: {e}"))
        })?;

        Ok(SyncEvent::GuildSettingsChanged(convert_guild_settings(payload)))
    }

    fn parse_user_settings_update(data: Value) -> GatewayResult<Option<SyncEvent>> {
        let payload: UserSettingsPayload = serde_json::from_value(data).map_err(|e| {
            GatewayError::serialization(format!("Failed to parse UserSettingsUpdate: {e}"))
        })?;

        Ok(convert_guild_positions(payload).map(SyncEvent::UserSettingsChanged))
    }

    fn parse_channel_create(data: Value) -> GatewayResult<SyncEvent> {
        let payload: ChannelPayload = serde_json::from_value(data).map_err(|e| {
            GatewayError::serialization(format!("Failed to parse ChannelCreate: {e}"))
        })?;

        Ok(SyncEvent::ChannelCreated {
            channel_id: ChannelId(payload.id),
            guild_id: payload.guild_id.map(GuildId),
        })
    }

    fn parse_channel_delete(data: Value) -> GatewayResult<SyncEvent> {
        let payload: ChannelPayload = serde_json::from_value(data).map_err(|e| {
            GatewayError::serialization(format!("Failed to parse ChannelDelete: {e}"))
        })?;

        Ok(SyncEvent::ChannelDeleted {
            channel_id: ChannelId(payload.id),
        })
    }
}

/// Deserializes each entry on its own, skipping the ones that fail.
fn parse_lenient<T: DeserializeOwned>(kind: &'static str, values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(kind, error = %e, "Skipping malformed entry");
                None
            }
        })
        .collect()
}

fn convert_guild_settings(payload: UserGuildSettingsPayload) -> GuildMuteSettings {
    let channel_overrides =
        parse_lenient::<ChannelOverridePayload>("channel override", payload.channel_overrides)
            .into_iter()
            .map(|ov| ChannelOverride {
                channel_id: ChannelId(ov.channel_id),
                muted: ov.muted,
                notification_level: ov.message_notifications.map(NotificationLevel::from),
            })
            .collect();

    GuildMuteSettings {
        guild_id: payload.guild_id.map(GuildId),
        muted: payload.muted,
        notification_level: payload.message_notifications.map(NotificationLevel::from),
        suppress_everyone: payload.suppress_everyone,
        channel_overrides,
    }
}

fn convert_guild_positions(payload: UserSettingsPayload) -> Option<GuildPositions> {
    let positions = payload.guild_positions?;
    let order = positions
        .into_iter()
        .filter_map(|value| match snowflake(value) {
            Ok(id) => Some(GuildId(id)),
            Err(e) => {
                warn!(error = %e, "Skipping malformed guild position");
                None
            }
        })
        .collect();

    Some(GuildPositions::new(order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dispatch(event_type: &str, data: Value) -> Option<SyncEvent> {
        EventParser::parse_dispatch(event_type, Some(data)).unwrap()
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        assert_eq!(dispatch("TYPING_START", json!({})), None);
    }

    #[test]
    fn test_non_dispatch_frame_is_ignored() {
        let frame = r#"{"op":11,"d":null,"s":null,"t":null}"#;

        assert!(EventParser::parse_frame(frame).unwrap().is_none());
    }

    #[test]
    fn test_dispatch_frame_without_name_is_error() {
        let frame = r#"{"op":0,"d":{},"s":1,"t":null}"#;

        assert!(matches!(
            EventParser::parse_frame(frame),
            Err(GatewayError::ProtocolError { .. })
        ));
    }

    #[test]
    fn test_parse_message_create() {
        let event = dispatch(
            "MESSAGE_CREATE",
            json!({"id": "200", "channel_id": "10", "guild_id": "1", "content": "hi"}),
        );

        assert_eq!(
            event,
            Some(SyncEvent::MessageCreated {
                channel_id: ChannelId(10),
                message_id: MessageId(200),
                guild_id: Some(GuildId(1)),
            })
        );
    }

    #[test]
    fn test_parse_message_create_missing_channel_is_error() {
        let result = EventParser::parse_dispatch("MESSAGE_CREATE", Some(json!({"id": "1"})));

        assert!(matches!(result, Err(GatewayError::SerializationError { .. })));
    }

    #[test]
    fn test_parse_message_ack() {
        let event = dispatch(
            "MESSAGE_ACK",
            json!({"channel_id": "10", "message_id": "300", "version": 4}),
        );

        assert_eq!(
            event,
            Some(SyncEvent::MessageAcknowledged {
                channel_id: ChannelId(10),
                message_id: MessageId(300),
            })
        );
    }

    #[test]
    fn test_parse_ready_versioned_lists() {
        let event = dispatch(
            "READY",
            json!({
                "read_state": {
                    "version": 1,
                    "partial": false,
                    "entries": [
                        {"id": "10", "last_message_id": "95", "mention_count": 2},
                        {"id": "bogus"},
                        {"id": "11", "last_message_id": 0}
                    ]
                },
                "user_guild_settings": {
                    "entries": [{
                        "guild_id": "1",
                        "muted": true,
                        "message_notifications": 1,
                        "suppress_everyone": false,
                        "channel_overrides": [
                            {"channel_id": "10", "muted": false, "message_notifications": 3}
                        ]
                    }]
                },
                "guilds": [{"id": "1", "channels": [{"id": "10", "type": 0}]}],
                "private_channels": [{"id": "50", "type": 1}],
                "user_settings": {"guild_positions": ["2", "1"]}
            }),
        );

        let Some(SyncEvent::Ready(snapshot)) = event else {
            panic!("Expected Ready event");
        };

        assert_eq!(
            snapshot.read_states,
            vec![
                ReadState::new(ChannelId(10), Some(MessageId(95))).with_mention_count(2),
                ReadState::new(ChannelId(11), None),
            ]
        );
        assert_eq!(snapshot.mute_settings.len(), 1);
        let settings = &snapshot.mute_settings[0];
        assert_eq!(settings.guild_id, Some(GuildId(1)));
        assert_eq!(settings.muted, Some(true));
        assert_eq!(settings.notification_level, Some(NotificationLevel::OnlyMentions));
        assert_eq!(
            settings.channel_overrides,
            vec![ChannelOverride::new(ChannelId(10), false, NotificationLevel::GuildDefault)]
        );
        assert_eq!(
            snapshot.channels,
            vec![(ChannelId(10), Some(GuildId(1))), (ChannelId(50), None)]
        );
        assert_eq!(
            snapshot.guild_positions,
            Some(GuildPositions::new(vec![GuildId(2), GuildId(1)]))
        );
    }

    #[test]
    fn test_parse_ready_bare_lists() {
        let event = dispatch(
            "READY",
            json!({
                "read_state": [{"id": "10", "last_message_id": "5"}],
                "user_guild_settings": [{"guild_id": null, "channel_overrides": []}]
            }),
        );

        let Some(SyncEvent::Ready(snapshot)) = event else {
            panic!("Expected Ready event");
        };

        assert_eq!(snapshot.read_states.len(), 1);
        assert_eq!(snapshot.mute_settings[0].guild_id, None);
        assert_eq!(snapshot.mute_settings[0].muted, None);
        assert!(snapshot.channels.is_empty());
        assert_eq!(snapshot.guild_positions, None);
    }

    #[test]
    fn test_parse_partial_guild_settings_update() {
        let event = dispatch("USER_GUILD_SETTINGS_UPDATE", json!({"guild_id": "7", "muted": false}));

        assert_eq!(
            event,
            Some(SyncEvent::GuildSettingsChanged(GuildMuteSettings {
                guild_id: Some(GuildId(7)),
                muted: Some(false),
                ..GuildMuteSettings::default()
            }))
        );
    }

    #[test]
    fn test_user_settings_without_positions_is_ignored() {
        assert_eq!(dispatch("USER_SETTINGS_UPDATE", json!({"theme": "dark"})), None);
        assert_eq!(
            dispatch("USER_SETTINGS_UPDATE", json!({"guild_positions": ["3", 4, "x"]})),
            Some(SyncEvent::UserSettingsChanged(GuildPositions::new(vec![
                GuildId(3),
                GuildId(4)
            ])))
        );
    }

    #[test]
    fn test_parse_channel_lifecycle() {
        assert_eq!(
            dispatch("CHANNEL_CREATE", json!({"id": "9", "guild_id": "1", "type": 0})),
            Some(SyncEvent::ChannelCreated {
                channel_id: ChannelId(9),
                guild_id: Some(GuildId(1)),
            })
        );
        assert_eq!(
            dispatch("CHANNEL_DELETE", json!({"id": "9"})),
            Some(SyncEvent::ChannelDeleted {
                channel_id: ChannelId(9)
            })
        );
    }
}
