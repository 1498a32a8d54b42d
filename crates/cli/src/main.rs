//! Operator console for the werewolf match service.
//!
//! Reads one command per line from stdin and prints one JSON object per
//! result on stdout. Logs go to stderr.
mod command;
mod dirs;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

use command::{Command, Line};
use werewolf_core::target_payload;
use werewolf_runtime::{FeedEvent, MatchService, RuntimeConfig, ServiceError, Topic};

#[derive(Debug, Parser)]
#[command(name = "werewolf", about = "Werewolf match console")]
struct Args {
    /// Directory for match records (overrides WEREWOLF_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep matches under the platform data directory
    #[arg(long, conflicts_with = "data_dir")]
    persist: bool,

    /// Print lobby and play events as they happen
    #[arg(long)]
    events: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let args = Args::parse();
    let mut config = RuntimeConfig::from_env();
    if let Some(dir) = args.data_dir {
        config = config.with_data_dir(dir);
    } else if args.persist {
        config = config.with_data_dir(dirs::data_dir());
    }

    let service = MatchService::builder().config(config).build()?;
    let mut background = JoinSet::new();

    if args.events {
        for (topic, mut rx) in service.subscribe_multiple(&[Topic::Lobby, Topic::Play]) {
            background.spawn(async move {
                loop {
                    match rx.recv().await {
                        Ok(event) => emit(json!({ "topic": topic, "event": event })),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!(?topic, skipped, "event output fell behind");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            });
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match Line::parse_line(&line) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                emit(json!({ "error": { "code": "BAD_COMMAND", "message": e.to_string() } }));
                continue;
            }
        };

        if let Command::Watch { code, player } = command {
            let mut feed = service.stream(&code, player);
            background.spawn(async move {
                while let Some(event) = feed.recv().await {
                    emit(json!({ "code": code, "feed": feed_json(event) }));
                }
            });
            continue;
        }

        match run(&service, command).await {
            Ok(value) => emit(json!({ "ok": value })),
            Err(e) => emit(json!({ "error": { "code": e.error_code(), "message": e.to_string() } })),
        }
    }

    background.shutdown().await;
    tracing::info!("stdin closed, exiting");
    Ok(())
}

async fn run(service: &MatchService, command: Command) -> Result<Value, ServiceError> {
    let value = match command {
        Command::Create { name } => json!(service.create(&name).await?),
        Command::Join {
            code,
            name,
            identity,
        } => json!(service.join(&code, &name, identity.as_deref()).await?),
        Command::Start { code } => {
            service.start(&code).await?;
            Value::Null
        }
        Command::Act {
            code,
            player,
            target,
            activity,
        } => json!(
            service
                .act(&code, &player, activity, &target_payload(&target))
                .await?
        ),
        Command::Info { code, player } => json!(service.info(&code, player.as_deref()).await?),
        Command::Activity {
            code,
            player,
            activity,
        } => json!(service.activity_info(&code, &player, activity).await?),
        Command::Status => json!(service.status()?),
        Command::Remove { code } => json!(service.remove(&code).await?),
        // Handled by the caller; it never produces a single result.
        Command::Watch { .. } => Value::Null,
    };
    Ok(value)
}

fn feed_json(event: FeedEvent) -> Value {
    match event {
        FeedEvent::Snapshot(view) => json!({ "snapshot": view }),
        FeedEvent::KeepAlive => json!("keepalive"),
        FeedEvent::NotFound => json!("not_found"),
        FeedEvent::Rejected(e) => json!({ "rejected": { "code": e.error_code(), "message": e.to_string() } }),
        FeedEvent::Failed(message) => json!({ "failed": message }),
    }
}

fn emit(value: Value) {
    println!("{value}");
}

/// Logs go to stderr so stdout stays machine-readable.
fn setup_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
