//! Graph Lens
//!
//! A gateway that answers a fixed set of pattern queries against a property-graph
//! store and returns a flattened node/edge view model for graph-visualization
//! clients.
//!
//! # Architecture
//!
//! - [`store`]: the narrow store contract (sessions running parameterized
//!   statements) with a Bolt client and a scripted in-process client
//! - [`model`]: the view model and the result normalizer
//! - [`protocol`]: the five operations, parameter validation, statements and
//!   response shapes
//! - [`dispatcher`]: method check, operation routing and scoped session use
//! - [`http`]: axum routes, error bodies and static client assets
//!
//! No state survives a request: each response is built from one store result
//! and dropped once serialized.
//!
//! ## Example Usage
//!
//! ```rust
//! use graph_lens::model::{normalize, Triple};
//! use graph_lens::store::{StoreNode, StoreRelationship};
//!
//! let alice = StoreNode::new(1, &["Person"]).with_property("name", "Alice");
//! let bob = StoreNode::new(2, &["Person"]).with_property("name", "Bob");
//! let knows = StoreRelationship::new(10, 1, 2, "KNOWS");
//!
//! let graph = normalize([Triple::new(&alice, &knows, &bob)]);
//! assert_eq!(graph.nodes.len(), 2);
//! assert_eq!(graph.edges[0].label, "KNOWS");
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod model;
pub mod protocol;
pub mod store;

// Re-export main types for convenience
pub use dispatcher::QueryDispatcher;
pub use error::GatewayError;
pub use model::{normalize, EdgeView, GraphView, NodeView, Triple};
pub use protocol::{Operation, OperationOutput, OperationParams, ValidatedOperation};
pub use store::{
    BoltConfig, BoltStore, GraphStoreClient, Record, ScriptedStore, Statement, StoreError,
    StoreResult, StoreSession,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
