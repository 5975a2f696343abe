//! Upgrade preconditions
//!
//! The handshake itself belongs to axum; this module adds the origin check.

mod error;
mod origin;

pub use error::UpgradeError;
pub use origin::OriginPolicy;
