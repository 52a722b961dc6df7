use anyhow::Result;
use score_predictor::{config, logging, server};
use tracing::info;

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

    let log_filter = match logging::init(&config.server.logs) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Starting score predictor with log filter: {}", log_filter);
    info!("Configuration loaded successfully");

    server::run(config).await?;

    Ok(())
}
