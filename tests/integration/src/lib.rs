//! Integration test utilities for the echo gateway
//!
//! Spawns a real gateway on an ephemeral port and connects WebSocket clients to it.

pub mod helpers;

pub use helpers::*;
