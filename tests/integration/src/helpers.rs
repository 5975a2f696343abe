//! Test helpers for integration tests
//!
//! Provides a gateway bound to an ephemeral port and WebSocket client shortcuts.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use echo_common::WebSocketConfig;
use echo_gateway::{create_app, GatewayState, WS_PATH};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

/// Origin accepted by the default test configuration
pub const TEST_ORIGIN: &str = "http://localhost";

/// How long a test waits for any single frame
pub const RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Client side of a test connection
pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server with the default configuration
    pub async fn start() -> Result<Self> {
        Self::start_with_config(WebSocketConfig::default()).await
    }

    /// Start a test server with custom WebSocket settings
    pub async fn start_with_config(config: WebSocketConfig) -> Result<Self> {
        let _ = echo_common::try_init_tracing();

        let app = create_app(GatewayState::new(config));

        // Bind before spawning so the port is accepting when this returns
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self { addr, handle })
    }

    /// WebSocket URL for an arbitrary path
    pub fn url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    /// WebSocket URL of the echo endpoint
    pub fn ws_url(&self) -> String {
        self.url(WS_PATH)
    }

    /// Connect with the allowed origin
    pub async fn connect(&self) -> Result<WsClient> {
        self.connect_with_origin(Some(TEST_ORIGIN))
            .await
            .context("WebSocket handshake failed")
    }

    /// Attempt a handshake with the given `Origin` header (or none)
    pub async fn connect_with_origin(
        &self,
        origin: Option<&str>,
    ) -> Result<WsClient, tungstenite::Error> {
        self.connect_to(&self.ws_url(), origin).await
    }

    /// Attempt a handshake against any URL
    pub async fn connect_to(
        &self,
        url: &str,
        origin: Option<&str>,
    ) -> Result<WsClient, tungstenite::Error> {
        let mut request = url.into_client_request()?;
        if let Some(origin) = origin {
            let value = HeaderValue::from_str(origin).map_err(tungstenite::http::Error::from)?;
            request.headers_mut().insert("Origin", value);
        }

        let (stream, _response) = tokio_tungstenite::connect_async(request).await?;
        Ok(stream)
    }

    /// Whether the server task is still running
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Wait for the next frame, failing the test on timeout
pub async fn recv(client: &mut WsClient) -> Result<Option<Message>> {
    let next = tokio::time::timeout(RECV_TIMEOUT, client.next())
        .await
        .context("timed out waiting for a frame")?;
    Ok(next.transpose()?)
}

/// Send one message and return the next frame received
pub async fn round_trip(client: &mut WsClient, message: Message) -> Result<Message> {
    client.send(message).await?;
    recv(client)
        .await?
        .context("connection ended before the echo arrived")
}

/// Status code of a refused handshake, if the refusal was an HTTP response
pub fn rejection_status(err: &tungstenite::Error) -> Option<u16> {
    match err {
        tungstenite::Error::Http(response) => Some(response.status().as_u16()),
        _ => None,
    }
}
