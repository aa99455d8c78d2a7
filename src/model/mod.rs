//! Flattened node/edge view model consumed by the visualization client
//!
//! Every value here is built fresh from one store response and dropped once the
//! response is serialized.

pub mod normalize;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::store::StoreNode;

pub use normalize::{normalize, Triple};

/// A node as the client sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    /// Stringified store identity
    pub id: String,
    pub labels: Vec<String>,
    pub properties: Map<String, Value>,
}

impl From<&StoreNode> for NodeView {
    fn from(node: &StoreNode) -> Self {
        Self {
            id: node.identity.to_string(),
            labels: node.labels.clone(),
            properties: node.properties.clone(),
        }
    }
}

/// A directed, typed edge between two node ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeView {
    pub from: String,
    pub to: String,
    /// Relationship type
    pub label: String,
}

/// Deduplicated nodes (first-seen order) plus every matched edge (encounter order)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
}

impl GraphView {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
