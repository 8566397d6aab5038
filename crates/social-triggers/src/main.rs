//! Trigger worker entry point
//!
//! Run with:
//! ```bash
//! cargo run -p social-triggers
//! ```
//!
//! Configuration is loaded from environment variables.

use social_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        address = %config.triggers.server.address(),
        "Starting trigger worker..."
    );

    if let Err(e) = social_triggers::run(config).await {
        error!(error = %e, "Trigger worker failed");
        std::process::exit(1);
    }
}
