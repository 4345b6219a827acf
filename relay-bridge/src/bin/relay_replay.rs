//! Replays a recorded event log through the bridge and prints the
//! resulting correlation window.
//!
//! Run: cargo run --bin relay-replay -- --config bridge.toml --events events.jsonl

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use relay_bridge::{
    Bridge, BridgeConfig, ConjoinedMessage, LogOnlyModerator, Result, logging, parse_events,
    replay,
};
use tokio::runtime::Handle;
use tracing::error;

#[derive(Debug, Parser)]
#[command(name = "relay-replay", version, about = "Replay bridge events against the correlation cache")]
struct Args {
    /// Bridge config (TOML).
    #[arg(short, long)]
    config: PathBuf,

    /// Event log (JSON lines).
    #[arg(short, long)]
    events: PathBuf,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = logging::init(&args.log) {
        eprintln!("relay-replay: {err}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "replay failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let config = BridgeConfig::load(&args.config)?;
    let events = parse_events(BufReader::new(File::open(&args.events)?))?;

    let moderator = Arc::new(LogOnlyModerator {
        bot_user_id: config.twitch.bot_user_id.clone(),
    });
    let bridge = Bridge::new(&config, moderator, Handle::current());

    let outcome = replay(&bridge, events);
    let pending = outcome.tasks.len();
    for task in outcome.tasks {
        if let Err(err) = task.await {
            error!(%err, "delete task did not complete");
        }
    }

    println!(
        "posted: {} | mirrored: {} | orphaned mirrors: {} | deleted: {} ({} mirror deletes)",
        outcome.posted, outcome.mirrored, outcome.orphaned, outcome.deleted, pending
    );

    let window = bridge.snapshot();
    println!("window: {}/{}", window.len(), config.max_msg_cache);
    for (idx, record) in window.iter().enumerate() {
        println!("{idx:4}  {}", describe(record));
    }
    Ok(())
}

fn describe(record: &ConjoinedMessage) -> String {
    let discord = record
        .discord
        .as_ref()
        .map_or("-", |msg| msg.id.as_str());
    let twitch: Vec<&str> = record.twitch.iter().map(|msg| msg.id.as_str()).collect();
    format!("discord={discord} twitch=[{}]", twitch.join(", "))
}
