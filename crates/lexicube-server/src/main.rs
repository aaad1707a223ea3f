//! Lexicube multiplayer game server.

use anyhow::Context;
use lexicube_core::WordList;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod protocol;
mod room;
mod server;

use config::ServerConfig;
use server::ServerState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    info!("Starting Lexicube server...");

    let words = WordList::load(&config.words_file)
        .with_context(|| format!("Failed to load words from {}", config.words_file.display()))?;
    info!("Loaded {} words", words.len());

    let state = Arc::new(ServerState::new(config, words));

    server::run_server(state).await
}
