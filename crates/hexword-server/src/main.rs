//! Hexword game server.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod protocol;
mod server;
mod session;

use config::ServerConfig;
use hexword_core::BoardGenerator;
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

    let settings = ServerConfig::from_env()?;
    let generator = BoardGenerator::default();
    let dictionary = settings.load_dictionary(&generator.seeds)?;
    let game_config = settings.load_game_config()?;

    info!(
        words = dictionary.len(),
        radius = game_config.radius,
        "Starting Hexword server..."
    );

    let state = Arc::new(ServerState::new(dictionary, game_config, generator));

    server::run_server(settings.addr, state).await
}
