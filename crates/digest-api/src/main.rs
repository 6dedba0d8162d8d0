//! Reaction digest API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p digest-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use digest_common::{try_init_tracing_with_config, AppConfig, AppError, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first; it selects the log format
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", AppError::from(e));
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(&TracingConfig::for_settings(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        port = config.api.port,
        "Configuration loaded"
    );

    if let Err(e) = digest_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
