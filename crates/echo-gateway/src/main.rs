//! Echo Gateway Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p echo-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use echo_common::{try_init_tracing_with_config, AppConfig, AppResult, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Run the server
    if let Err(e) = run().await {
        if e.is_listener_failure() {
            error!(code = e.error_code(), error = %e, "Gateway listener failed");
        } else {
            // Tracing may not be initialized yet
            eprintln!("Gateway failed to start: {e}");
        }
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        address = %config.gateway.address(),
        allowed_origin = %config.websocket.allowed_origin,
        "Configuration loaded"
    );

    // Run the gateway server
    echo_gateway::run(config).await
}
