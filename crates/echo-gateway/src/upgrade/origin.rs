//! Origin policy

use super::UpgradeError;
use axum::http::{header, HeaderMap};

/// Exact-match check of the `Origin` header against a single allowed value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPolicy {
    allowed: String,
}

impl OriginPolicy {
    pub fn new(allowed: impl Into<String>) -> Self {
        Self {
            allowed: allowed.into(),
        }
    }

    pub fn allowed(&self) -> &str {
        &self.allowed
    }

    /// Byte-wise comparison, no normalization.
    pub fn is_allowed(&self, origin: &[u8]) -> bool {
        origin == self.allowed.as_bytes()
    }

    /// Check the request headers
    pub fn check(&self, headers: &HeaderMap) -> Result<(), UpgradeError> {
        let origin = headers
            .get(header::ORIGIN)
            .ok_or(UpgradeError::MissingOrigin)?;

        if self.is_allowed(origin.as_bytes()) {
            Ok(())
        } else {
            Err(UpgradeError::OriginMismatch(
                String::from_utf8_lossy(origin.as_bytes()).into_owned(),
            ))
        }
    }
}
