use serde::Deserialize;
use serde_json::Value;

use crate::domain::serde_utils::{optional_snowflake, snowflake};

#[derive(Debug, Deserialize)]
pub struct GatewayMessage {
    pub op: u8,
    pub d: Option<Value>,
    pub s: Option<u64>,
    pub t: Option<String>,
}

/// List that Discord sends either bare or wrapped in a versioned object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Versioned {
    Entries { entries: Vec<Value> },
    List(Vec<Value>),
}

impl Default for Versioned {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl Versioned {
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            Self::Entries { entries } | Self::List(entries) => entries,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReadyPayload {
    #[serde(default)]
    pub read_state: Versioned,
    #[serde(default)]
    pub user_guild_settings: Versioned,
    #[serde(default)]
    pub guilds: Vec<Value>,
    #[serde(default)]
    pub private_channels: Vec<Value>,
    pub user_settings: Option<UserSettingsPayload>,
}

#[derive(Debug, Deserialize)]
pub struct ReadStatePayload {
    #[serde(deserialize_with = "snowflake")]
    pub id: u64,
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub last_message_id: Option<u64>,
    #[serde(default)]
    pub mention_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct UserGuildSettingsPayload {
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub guild_id: Option<u64>,
    pub muted: Option<bool>,
    pub message_notifications: Option<u8>,
    pub suppress_everyone: Option<bool>,
    #[serde(default)]
    pub channel_overrides: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelOverridePayload {
    #[serde(deserialize_with = "snowflake")]
    pub channel_id: u64,
    pub muted: Option<bool>,
    pub message_notifications: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct ReadyGuild {
    #[serde(deserialize_with = "snowflake")]
    pub id: u64,
    #[serde(default)]
    pub channels: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ChannelPayload {
    #[serde(deserialize_with = "snowflake")]
    pub id: u64,
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub guild_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct UserSettingsPayload {
    pub guild_positions: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct MessageCreatePayload {
    #[serde(deserialize_with = "snowflake")]
    pub id: u64,
    #[serde(deserialize_with = "snowflake")]
    pub channel_id: u64,
    #[serde(default, deserialize_with = "optional_snowflake")]
    pub guild_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct MessageAckPayload {
    #[serde(deserialize_with = "snowflake")]
    pub channel_id: u64,
    #[serde(deserialize_with = "snowflake")]
    pub message_id: u64,
}
