//! Echo loop
//!
//! One `Connection` per upgraded socket, driven until the first read or write failure.

mod connection;
mod error;

pub use connection::{Connection, Deadlines, MessageChannel};
pub use error::EchoError;
