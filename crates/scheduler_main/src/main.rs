//! Scheduler - weekly availability bot for Discord

use clap::Parser;
use miette::Result;
use scheduler_core::{AvailabilityStore, CommandDispatcher};
use scheduler_discord::{DiscordBotConfig, run_discord_bot};
use scheduler_main::{
    config::{self, Config, DEFAULT_CONFIG_PATH},
    logging,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the JSON token file (overrides config)
    #[arg(short, long)]
    token_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load environment variables
    dotenvy::dotenv().ok();

    let (config_path, explicit) = match args.config {
        Some(path) => (path, true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    let mut config = Config::load(&config_path, explicit).await?;
    if let Some(token_file) = args.token_file {
        config.discord.token_file = token_file;
    }

    let _guard = logging::init_logging(&config.logging, args.debug);
    info!("Starting scheduler bot");

    let token = config::resolve_token(
        std::env::var("DISCORD_TOKEN").ok(),
        &config.discord.token_file,
    )
    .await?;

    let store = Arc::new(AvailabilityStore::new());
    let dispatcher = CommandDispatcher::new(store).with_prefix(config.discord.prefix.clone());
    let bot_config =
        DiscordBotConfig::new(token).with_channel_name(config.discord.channel_name.clone());

    info!(
        "Listening for '{}' in #{}. Press CTRL-C to exit.",
        config.discord.prefix, config.discord.channel_name
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
    };
    run_discord_bot(bot_config, dispatcher, shutdown).await?;

    info!("Scheduler bot is now closing.");
    Ok(())
}
