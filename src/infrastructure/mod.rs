//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Discord API adapters.
pub mod discord;
/// Recorded gateway event source.
pub mod replay;

pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use discord::{ChannelDirectory, DiscordAckClient, EventParser, LoggingAckSender};
