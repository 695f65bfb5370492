use clap::Parser;
use tokio::signal::unix::{signal, SignalKind};

mod application;
mod domain;
mod infrastructure;

use application::commands;
use application::router::MessageRouter;
use domain::entities::CommandRegistry;
use domain::traits::ChatPlatform;
use infrastructure::adapters::telegram::TelegramAdapter;

/// Long-poll timeout for the update loop, in seconds.
const POLL_TIMEOUT_SECS: i64 = 30;

#[derive(Parser)]
#[command(name = "c00kie-bot")]
#[command(about = "A prefix-command chat bot", long_about = None)]
struct Cli {
    /// API token (required)
    #[arg(long, default_value = "")]
    token: String,

    /// Name of the bot
    #[arg(long, default_value = "c00kie-bot")]
    name: String,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    if cli.token.is_empty() {
        tracing::error!("API token missing");
        std::process::exit(1);
    }

    tracing::info!("Starting {}...", cli.name);

    let mut registry = CommandRegistry::new();
    commands::register_defaults(&mut registry);
    let router = MessageRouter::new(registry);

    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(run_bot(cli.token, cli.name, router));
}

async fn run_bot(token: String, name: String, router: MessageRouter) {
    let mut platform = TelegramAdapter::new(token, name);

    if let Err(e) = platform.connect().await {
        tracing::error!("Error opening connection: {}", e);
        std::process::exit(1);
    }

    let info = platform.bot_info();
    tracing::info!("Bot started: @{}", info.username);
    tracing::info!("Press Ctrl-C to exit");

    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");

    let mut offset: i64 = 0;
    loop {
        let updates = tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = sigterm.recv() => break,
            result = platform.get_updates(offset, POLL_TIMEOUT_SECS) => match result {
                Ok(updates) => updates,
                Err(e) => {
                    tracing::error!("Failed to get updates: {}", e);
                    tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
                    continue;
                }
            },
        };

        offset = TelegramAdapter::next_offset(&updates, offset);
        for update in &updates {
            if let Some(message) = TelegramAdapter::incoming(update) {
                router.dispatch(&platform, &message).await;
            }
        }
    }

    if let Err(e) = platform.close().await {
        tracing::warn!("Error closing connection: {}", e);
    }
}
