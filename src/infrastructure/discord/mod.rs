//! Discord API adapters.

mod channel_directory;
mod client;
mod dry_run;
mod dto;
pub mod gateway;

pub use channel_directory::ChannelDirectory;
pub use client::{DISCORD_API_BASE, DiscordAckClient};
pub use dry_run::LoggingAckSender;
pub use gateway::{EventParser, GatewayError, GatewayResult};
