use anyhow::Result;
use tracing::{info, Level};
use wallet_monitor::config::Config;
use wallet_monitor::services::ApiService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("🔧 启动钱包监控服务...");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    // Create and start API service
    let api_service = ApiService::new(config).await?;
    api_service.start().await?;

    Ok(())
}
