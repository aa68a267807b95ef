//! Products Server - HTTP REST API over a JSON-file product catalog
//!
//! Reads `.env` if present, loads configuration (`PORT` selects the port,
//! default 4000), and serves until interrupted.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    server::start_server(config).await?;

    Ok(())
}
