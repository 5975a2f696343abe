//! Per-connection echo loop
//!
//! A `Connection` owns its socket for its whole lifetime. `run` consumes it, so no
//! other task can read from or write to the same socket, and the socket is closed
//! on every exit path.

use super::EchoError;
use axum::extract::ws::Message;
use echo_common::WebSocketConfig;
use futures_util::{Sink, SinkExt, Stream, StreamExt};
use std::borrow::Cow;
use std::time::Duration;
use uuid::Uuid;

/// A duplex channel of WebSocket messages
///
/// Implemented by `axum::extract::ws::WebSocket`.
pub trait MessageChannel:
    Stream<Item = Result<Message, axum::Error>> + Sink<Message, Error = axum::Error> + Unpin + Send
{
}

impl<T> MessageChannel for T where
    T: Stream<Item = Result<Message, axum::Error>>
        + Sink<Message, Error = axum::Error>
        + Unpin
        + Send
{
}

/// Optional per-operation deadlines; `None` waits forever
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadlines {
    pub read: Option<Duration>,
    pub write: Option<Duration>,
}

impl From<&WebSocketConfig> for Deadlines {
    fn from(config: &WebSocketConfig) -> Self {
        Self {
            read: config.read_timeout,
            write: config.write_timeout,
        }
    }
}

/// One upgraded connection
pub struct Connection<S> {
    id: Uuid,
    socket: S,
}

impl<S: MessageChannel> Connection<S> {
    pub fn new(id: Uuid, socket: S) -> Self {
        Self { id, socket }
    }

    /// Get the connection ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Echo every text and binary message until a read or write fails
    ///
    /// Reads and writes are strictly sequential. Returns the failure that ended the loop.
    pub async fn run(mut self, deadlines: Deadlines) -> EchoError {
        let reason = loop {
            let message = match self.read_message(deadlines.read).await {
                Ok(message) => message,
                Err(e) => break e,
            };

            match &message {
                Message::Text(_) | Message::Binary(_) => {}
                Message::Ping(_) | Message::Pong(_) => {
                    tracing::trace!(connection_id = %self.id, "Control frame received");
                    continue;
                }
                Message::Close(frame) => {
                    break EchoError::Closed(frame.as_ref().map(|f| f.code));
                }
            }

            tracing::info!(
                connection_id = %self.id,
                kind = message_kind(&message),
                payload = %payload_text(&message),
                "Received message"
            );

            if let Err(e) = self.write_message(message, deadlines.write).await {
                break e;
            }
        };

        tracing::info!(
            connection_id = %self.id,
            side = reason.side(),
            clean_close = reason.is_clean_close(),
            close_code = ?reason.close_code(),
            error = %reason,
            "Echo loop terminated"
        );

        if let Err(e) = self.socket.close().await {
            tracing::debug!(connection_id = %self.id, error = %e, "Error while closing socket");
        }

        reason
    }

    async fn read_message(&mut self, deadline: Option<Duration>) -> Result<Message, EchoError> {
        let next = match deadline {
            Some(limit) => tokio::time::timeout(limit, self.socket.next())
                .await
                .map_err(|_| EchoError::ReadTimeout(limit))?,
            None => self.socket.next().await,
        };

        match next {
            Some(Ok(message)) => Ok(message),
            Some(Err(e)) => Err(EchoError::Read(e)),
            None => Err(EchoError::Closed(None)),
        }
    }

    async fn write_message(
        &mut self,
        message: Message,
        deadline: Option<Duration>,
    ) -> Result<(), EchoError> {
        let send = self.socket.send(message);

        match deadline {
            Some(limit) => tokio::time::timeout(limit, send)
                .await
                .map_err(|_| EchoError::WriteTimeout(limit))?
                .map_err(EchoError::Write),
            None => send.await.map_err(EchoError::Write),
        }
    }
}

fn message_kind(message: &Message) -> &'static str {
    match message {
        Message::Text(_) => "text",
        Message::Binary(_) => "binary",
        Message::Ping(_) => "ping",
        Message::Pong(_) => "pong",
        Message::Close(_) => "close",
    }
}

/// Payload rendered for the log line; binary data is decoded lossily
fn payload_text(message: &Message) -> Cow<'_, str> {
    match message {
        Message::Text(text) => Cow::Borrowed(text.as_str()),
        Message::Binary(bytes) => String::from_utf8_lossy(bytes),
        _ => Cow::Borrowed(""),
    }
}
