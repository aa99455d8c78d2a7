//! GraphLensClient trait — the unified interface for embedded and remote modes

use async_trait::async_trait;

use crate::error::SdkResult;
use crate::models::ServerStatus;
use graph_lens::model::{GraphView, NodeView};

/// Unified client interface for the Graph Lens gateway.
///
/// Implemented by:
/// - `EmbeddedClient` — in-process, no network
/// - `RemoteClient` — connects to a running gateway via HTTP
#[async_trait]
pub trait GraphLensClient: Send + Sync {
    /// Distinct node labels known to the store
    async fn labels(&self) -> SdkResult<Vec<String>>;

    /// Every relationship triple in the store
    async fn full_graph(&self) -> SdkResult<GraphView>;

    /// Nodes carrying the given label
    async fn nodes_by_label(&self, label: &str) -> SdkResult<Vec<NodeView>>;

    /// Triples where either endpoint's name contains `query`, case-insensitively
    async fn search(&self, query: &str) -> SdkResult<GraphView>;

    /// Triples touching the node with the given store id
    async fn expand(&self, node_id: &str) -> SdkResult<GraphView>;

    /// Gateway liveness and version
    async fn status(&self) -> SdkResult<ServerStatus>;
}
