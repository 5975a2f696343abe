//! WebSocket handler
//!
//! Checks the origin, upgrades the request and hands the socket to its echo loop.

use crate::echo::Connection;
use crate::server::GatewayState;
use crate::upgrade::UpgradeError;
use axum::{
    extract::{ws::WebSocket, State, WebSocketUpgrade},
    http::HeaderMap,
    response::Response,
};
use uuid::Uuid;

/// WebSocket gateway handler
///
/// Malformed handshakes are rejected by the `WebSocketUpgrade` extractor before this runs.
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Result<Response, UpgradeError> {
    if let Err(e) = state.origin_policy().check(&headers) {
        tracing::warn!(error = %e, "WebSocket upgrade rejected");
        return Err(e);
    }

    let connection_id = Uuid::new_v4();
    let write_buffer_size = state.config().write_buffer_size;

    Ok(ws
        .write_buffer_size(write_buffer_size)
        .on_failed_upgrade(move |e| {
            tracing::warn!(
                connection_id = %connection_id,
                error = %e,
                "WebSocket upgrade failed"
            );
        })
        .on_upgrade(move |socket| handle_socket(state, socket, connection_id)))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket, connection_id: Uuid) {
    let connection = Connection::new(connection_id, socket);
    tracing::info!(connection_id = %connection.id(), "WebSocket connection opened");

    // The loop logs its own exit reason and closes the socket
    connection.run(state.deadlines()).await;
}
