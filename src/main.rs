use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use futures_util::StreamExt;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cordsync::application::{MarkReadOutcome, SyncEngine};
use cordsync::domain::entities::GuildPositions;
use cordsync::domain::{AckPort, ReadState, SyncEvent};
use cordsync::infrastructure::replay;
use cordsync::infrastructure::{
    AppConfig, ChannelDirectory, CliArgs, DiscordAckClient, LoggingAckSender, StorageManager,
};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let storage = StorageManager::new().wrap_err("Failed to locate config directory")?;
    let mut config = storage
        .load_config(args.config.as_deref())
        .wrap_err("Failed to load config")?;
    config.merge_with_args(args);

    Ok(config)
}

fn create_ack_port(config: &AppConfig) -> Result<Arc<dyn AckPort>> {
    match config.token.as_deref() {
        Some(token) if !config.is_dry_run() => {
            let client =
                DiscordAckClient::with_base_url(token, &config.api.base_url, config.api.timeout())
                    .wrap_err("Failed to create Discord client")?;
            Ok(Arc::new(client))
        }
        _ => {
            info!("No token or dry run requested, acknowledgements will only be logged");
            Ok(Arc::new(LoggingAckSender::new()))
        }
    }
}

fn print_read_update(state: &ReadState) {
    match serde_json::to_string(state) {
        Ok(line) => println!("{line}"),
        Err(e) => warn!(error = %e, "Failed to serialize read state"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = load_config()?;
    init_logging(&config)?;

    info!(version = cordsync::VERSION, "Starting {}", cordsync::NAME);

    let directory = Arc::new(ChannelDirectory::new());
    let engine = SyncEngine::new(
        directory.clone(),
        create_ack_port(&config)?,
        Arc::new(print_read_update),
    )
    .with_ack_cooldown(config.sync.ack_cooldown())
    .with_guild_positions_listener(Arc::new(|positions: &GuildPositions| {
        info!(guilds = positions.as_slice().len(), "Guild order changed");
    }))
    .with_ready_replay(config.sync.notify_on_ready_replay);

    let reader = replay::open_source(config.input.as_deref())
        .await
        .wrap_err("Failed to open gateway log")?;

    let focus = config.focus;
    let engine_ref = &engine;
    let events = replay::decode_lines(reader).then(move |event| async move {
        if let SyncEvent::MessageCreated {
            channel_id,
            message_id,
            ..
        } = &event
            && focus == Some(*channel_id)
            && let MarkReadOutcome::Failed(e) = engine_ref.mark_read(*channel_id, *message_id).await
        {
            if e.is_rate_limit() {
                debug!(error = %e, "Discord is rate limiting acknowledgements");
            } else if !e.is_recoverable() {
                warn!(error = %e, "Acknowledgements are being rejected");
            }
        }
        event
    });

    let summary = engine.run(events).await;

    info!(
        events = summary.events,
        notifications = summary.notifications,
        tracked = engine.reads().len(),
        known_channels = directory.len(),
        "Replay finished"
    );

    if directory.is_empty() {
        warn!("Gateway log carried no channel list, guild mutes only applied to messages tagged with a guild");
    }

    Ok(())
}
