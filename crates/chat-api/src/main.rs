//! Chat API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p chat-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` if present).

use chat_common::{try_init_tracing_with_config, AppConfig, AppResult, Environment, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing; the environment is not known until config loads
    let env = std::env::var("APP_ENV")
        .ok()
        .and_then(|v| Environment::from_name(&v))
        .unwrap_or_default();
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(env)) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, code = e.error_code(), "Server exited with an error");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    info!("Starting Chat API Server...");

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        backend = ?config.storage.backend,
        "Configuration loaded"
    );

    // Run the server
    chat_api::run(config).await
}
