//! # Loan Applications
//!
//! Application entry point that initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool (connected in the background)
//! - HTTP server

use anyhow::Result;
use tracing::info;

use loan_applications::config::Settings;
use loan_applications::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    loan_applications::telemetry::init_tracing();

    info!("Starting loan applications service...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
