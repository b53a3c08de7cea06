use anyhow::{Context, Result};
use std::io;
use std::sync::{Arc, Once};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wallet_mcp_server_rs::config::AppConfig;
use wallet_mcp_server_rs::mcp::McpServer;
use wallet_mcp_server_rs::wallet::MemoryWallet;

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "wallet_mcp_server_rs=debug".into());

        // stdout carries the protocol, so logs go to stderr without colors.
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(false);

        let result = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();

        if result.is_err() {
            eprintln!("Failed to initialize tracing subscriber");
        }
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let wallet = match config.root_key {
        Some(key) => MemoryWallet::new(key, config.network.clone())?,
        None => {
            tracing::warn!("WALLET_ROOT_KEY not set; using a random ephemeral root key");
            MemoryWallet::random(config.network.clone())?
        }
    };

    tracing::info!("Starting wallet MCP server on stdio (network: {})", config.network);
    let server = McpServer::new(Arc::new(wallet))?;
    server.run().await.context("Failed to run MCP server")?;

    Ok(())
}
