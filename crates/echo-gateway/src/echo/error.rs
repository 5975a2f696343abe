//! Echo loop error types

use std::time::Duration;
use thiserror::Error;

/// Why an echo loop stopped
///
/// Every loop ends with exactly one of these; none of them leave the connection's task.
#[derive(Debug, Error)]
pub enum EchoError {
    /// Peer sent a close frame or the stream ended
    #[error("Connection closed by peer")]
    Closed(Option<u16>),

    /// Reading the next message failed
    #[error("Read error: {0}")]
    Read(#[source] axum::Error),

    /// Writing the echo failed
    #[error("Write error: {0}")]
    Write(#[source] axum::Error),

    #[error("Read timed out after {0:?}")]
    ReadTimeout(Duration),

    #[error("Write timed out after {0:?}")]
    WriteTimeout(Duration),
}

impl EchoError {
    /// The peer ended the session itself
    #[must_use]
    pub fn is_clean_close(&self) -> bool {
        matches!(self, Self::Closed(_))
    }

    #[must_use]
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::Closed(_) | Self::Read(_) | Self::ReadTimeout(_))
    }

    /// Which half of the cycle failed, for log output
    #[must_use]
    pub fn side(&self) -> &'static str {
        if self.is_read_failure() {
            "read"
        } else {
            "write"
        }
    }

    /// Close code sent by the peer, if any
    #[must_use]
    pub fn close_code(&self) -> Option<u16> {
        match self {
            Self::Closed(code) => *code,
            _ => None,
        }
    }
}
