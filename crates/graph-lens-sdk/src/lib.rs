//! Graph Lens SDK — client library for the Graph Lens gateway
//!
//! Provides two client implementations:
//!
//! - **`EmbeddedClient`** — In-process, no network. Drives a `QueryDispatcher`
//!   directly. Ideal for tests and tools that hold their own store handle.
//!
//! - **`RemoteClient`** — Connects to a running gateway via HTTP.
//!   For production client applications.
//!
//! Both implement the `GraphLensClient` trait for a unified API.
//!
//! # Quick Start
//!
//! ```rust
//! use graph_lens_sdk::{EmbeddedClient, GraphLensClient, ScriptedStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = EmbeddedClient::new(ScriptedStore::new());
//!
//!     let labels = client.labels().await.unwrap();
//!     assert!(labels.is_empty());
//! }
//! ```

pub mod client;
pub mod embedded;
pub mod error;
pub mod models;
pub mod remote;

pub use client::GraphLensClient;
pub use embedded::EmbeddedClient;
pub use error::{SdkError, SdkResult};
pub use models::ServerStatus;
pub use remote::RemoteClient;

// Re-exported from the gateway core
pub use graph_lens::model::{EdgeView, GraphView, NodeView};
pub use graph_lens::store::{GraphStoreClient, ScriptedStore};
pub use graph_lens::VERSION;
