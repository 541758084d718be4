use anyhow::{Context, Result};
use sentiment_relay::{config, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Builds the log filter from a level or a full directive list such as
/// `sentiment_relay=debug,tower_http=info`.
fn log_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| {
        format!(
            "Invalid log filter: '{}'. Use a level (error, warn, info, debug, trace) or target=level directives",
            directives
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    let filter = match log_filter(&directives) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt().with_env_filter(filter).json().init();

    info!("Starting sentiment relay with log filter: {}", directives);
    info!("Configuration loaded successfully");

    server::run(config).await?;

    Ok(())
}
