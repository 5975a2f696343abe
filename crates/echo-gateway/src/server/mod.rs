//! Gateway server setup
//!
//! Provides the WebSocket route, the application builder and the listener loop.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use axum::{routing::get, Router};
use echo_common::{AppConfig, AppError, AppResult};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// The single path that accepts WebSocket upgrades
pub const WS_PATH: &str = "/ws";

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new().route(WS_PATH, get(gateway_handler))
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener and serve forever
///
/// Returns only if binding fails or the bound address cannot be read. axum logs
/// accept errors and keeps accepting; connection errors stay inside their own tasks.
pub async fn run_server(app: Router, addr: &str) -> AppResult<()> {
    tracing::info!("Starting Gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::bind(addr, e))?;

    let local_addr = listener.local_addr().map_err(AppError::Server)?;
    tracing::info!("Gateway listening on ws://{}{}", local_addr, WS_PATH);

    axum::serve(listener, app).await.map_err(AppError::Server)
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.gateway.address();

    let state = GatewayState::new(config.websocket);
    let app = create_app(state);

    run_server(app, &addr).await
}
