use dotenv::dotenv;
use log::info;
use std::sync::Arc;

mod config;
mod error;
mod formatters;
mod models;
mod services;
mod utils;
mod views;
mod web;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    info!("Starting Golos viewer");
    let config = Arc::new(Config::from_env()?);
    info!(
        "Using node {} ({} operations per page)",
        config.primary_rpc, config.ops_per_page
    );
    if let Some(secondary) = &config.secondary_rpc {
        info!("Fallback node: {}", secondary);
    }

    web::start_web_server(config).await?;
    Ok(())
}
