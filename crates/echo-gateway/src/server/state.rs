//! Gateway state
//!
//! Read-only state shared by every upgrade.

use crate::echo::Deadlines;
use crate::upgrade::OriginPolicy;
use echo_common::WebSocketConfig;
use std::sync::Arc;

/// Gateway application state
///
/// Constructed once at startup. Cloning only bumps reference counts.
#[derive(Debug, Clone)]
pub struct GatewayState {
    /// WebSocket settings (write buffer hint, deadlines)
    config: Arc<WebSocketConfig>,
    /// Origin check applied before every upgrade
    origin_policy: Arc<OriginPolicy>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(config: WebSocketConfig) -> Self {
        let origin_policy = OriginPolicy::new(config.allowed_origin.clone());
        Self {
            config: Arc::new(config),
            origin_policy: Arc::new(origin_policy),
        }
    }

    /// Get the WebSocket configuration
    pub fn config(&self) -> &WebSocketConfig {
        &self.config
    }

    /// Get the origin policy
    pub fn origin_policy(&self) -> &OriginPolicy {
        &self.origin_policy
    }

    /// Read/write deadlines for each echo loop
    pub fn deadlines(&self) -> Deadlines {
        Deadlines::from(self.config())
    }
}
