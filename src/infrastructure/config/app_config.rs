//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::application::services::DEFAULT_ACK_COOLDOWN;
use crate::domain::entities::ChannelId;
use crate::infrastructure::discord::DISCORD_API_BASE;

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, from the config file and CLI.
#[derive(Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path. Logs go to stderr when unset.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Discord token. Never read from or written to the config file.
    #[serde(skip)]
    pub token: Option<String>,

    /// Gateway log to replay. Stdin when unset.
    #[serde(skip)]
    pub input: Option<PathBuf>,

    /// Channel the user is viewing during the replay.
    #[serde(skip)]
    pub focus: Option<ChannelId>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Log acknowledgements instead of sending them.
    #[serde(default)]
    pub dry_run: bool,

    /// Synchronizer configuration.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Discord API configuration.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Synchronizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Minimum seconds between two acks for one channel.
    #[serde(default = "default_ack_cooldown_secs")]
    pub ack_cooldown_secs: u64,

    /// Replay every read state to the UI after a reconnect.
    #[serde(default = "default_true")]
    pub notify_on_ready_replay: bool,
}

impl SyncConfig {
    /// Returns the ack cooldown.
    #[must_use]
    pub const fn ack_cooldown(&self) -> Duration {
        Duration::from_secs(self.ack_cooldown_secs)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            ack_cooldown_secs: default_ack_cooldown_secs(),
            notify_on_ready_replay: true,
        }
    }
}

/// Discord API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// REST API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_ack_cooldown_secs() -> u64 {
    DEFAULT_ACK_COOLDOWN.as_secs()
}

fn default_base_url() -> String {
    DISCORD_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(token) = args.token {
            self.token = Some(token);
        }
        if let Some(input) = args.input {
            self.input = Some(input);
        }
        if let Some(focus) = args.focus {
            self.focus = Some(ChannelId(focus));
        }
        if args.dry_run {
            self.dry_run = true;
        }
        if let Some(cooldown) = args.ack_cooldown {
            self.sync.ack_cooldown_secs = cooldown;
        }
        if let Some(replay) = args.notify_on_ready_replay {
            self.sync.notify_on_ready_replay = replay;
        }
        if let Some(base_url) = args.api_base_url {
            self.api.base_url = base_url;
        }
    }

    /// Returns true if acknowledgements should only be logged.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run || self.token.as_deref().is_none_or(str::is_empty)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            token: None,
            input: None,
            focus: None,
            log_level: LogLevel::Info,
            dry_run: false,
            sync: SyncConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            log_level = "debug"

            [sync]
            ack_cooldown_secs = 3

            [api]
            base_url = "http://localhost:8080/api"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.sync.ack_cooldown(), Duration::from_secs(3));
        assert!(config.sync.notify_on_ready_replay);
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.sync.ack_cooldown(), DEFAULT_ACK_COOLDOWN);
        assert_eq!(config.api.base_url, DISCORD_API_BASE);
        assert!(config.is_dry_run());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config: AppConfig = toml::from_str("[sync]\nack_cooldown_secs = 3").unwrap();
        let args = CliArgs::parse_from([
            "cordsync",
            "--ack-cooldown",
            "20",
            "--token",
            "abc",
            "--notify-on-ready-replay",
            "false",
            "--focus",
            "77",
            "gateway.log",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.sync.ack_cooldown_secs, 20);
        assert!(!config.sync.notify_on_ready_replay);
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.input, Some(PathBuf::from("gateway.log")));
        assert_eq!(config.focus, Some(ChannelId(77)));
        assert!(!config.is_dry_run());
    }

    #[test]
    fn test_token_is_not_serialized() {
        let config = AppConfig {
            token: Some("secret".to_string()),
            ..AppConfig::default()
        };

        let content = toml::to_string(&config).unwrap();

        assert!(!content.contains("secret"));
    }
}
