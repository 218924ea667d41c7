use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "cordsync",
    version,
    about = "Replays Discord gateway events through the read-state synchronizer",
    long_about = None
)]
pub struct CliArgs {
    /// Gateway log to replay, one JSON frame per line. Reads stdin when omitted.
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Discord token used for acknowledgements.
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Log acknowledgements instead of sending them.
    #[arg(long)]
    pub dry_run: bool,

    /// Treat this channel as open: new messages in it are marked read.
    #[arg(long, value_name = "CHANNEL_ID")]
    pub focus: Option<u64>,

    /// Minimum seconds between two acks for one channel.
    #[arg(long, value_name = "SECS")]
    pub ack_cooldown: Option<u64>,

    /// Replay every read state after a reconnect.
    #[arg(long)]
    pub notify_on_ready_replay: Option<bool>,

    /// Discord REST API base URL.
    #[arg(long, value_name = "URL")]
    pub api_base_url: Option<String>,
}
