//! # echo-gateway
//!
//! WebSocket echo gateway: every message a client sends is logged and sent back unchanged.

pub mod echo;
pub mod server;
pub mod upgrade;

pub use server::{create_app, create_router, run, run_server, GatewayState, WS_PATH};
