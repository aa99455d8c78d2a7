//! Data models for the Graph Lens SDK
//!
//! Graph payloads reuse the gateway's view model (`GraphView`, `NodeView`,
//! `EdgeView`); only the status body is SDK-specific.

use serde::{Deserialize, Serialize};

/// Gateway status information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Gateway version
    pub version: String,
}

impl ServerStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}
