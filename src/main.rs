use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use slotbook_api::{config::ApiConfig, ApiState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Build the in-memory engine state
    let state = Arc::new(ApiState::new());

    // Start API server
    slotbook_api::start_server(config, state).await?;

    Ok(())
}
