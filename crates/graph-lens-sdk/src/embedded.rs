//! EmbeddedClient — in-process gateway client
//!
//! Drives a `QueryDispatcher` directly, no HTTP needed.

use async_trait::async_trait;
use std::sync::Arc;

use graph_lens::model::{GraphView, NodeView};
use graph_lens::protocol::{Operation, OperationOutput, OperationParams};
use graph_lens::store::GraphStoreClient;
use graph_lens::QueryDispatcher;

use crate::client::GraphLensClient;
use crate::error::{SdkError, SdkResult};
use crate::models::ServerStatus;

/// In-process client that wraps a dispatcher directly.
///
/// Queries run in the same process against whatever store client the
/// dispatcher was built with.
pub struct EmbeddedClient {
    dispatcher: Arc<QueryDispatcher>,
}

impl EmbeddedClient {
    /// Create an EmbeddedClient over a store client
    pub fn new(store: impl GraphStoreClient + 'static) -> Self {
        Self {
            dispatcher: Arc::new(QueryDispatcher::new(Arc::new(store))),
        }
    }

    /// Create an EmbeddedClient sharing an existing dispatcher
    pub fn with_dispatcher(dispatcher: Arc<QueryDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Get a reference to the underlying dispatcher
    pub fn dispatcher(&self) -> &Arc<QueryDispatcher> {
        &self.dispatcher
    }

    async fn run(&self, op: Operation, params: OperationParams) -> SdkResult<OperationOutput> {
        Ok(self.dispatcher.run(op, &params).await?)
    }

    async fn run_graph(&self, op: Operation, params: OperationParams) -> SdkResult<GraphView> {
        match self.run(op, params).await? {
            OperationOutput::Graph(graph) => Ok(graph),
            other => Err(unexpected(op, &other)),
        }
    }
}

fn unexpected(op: Operation, output: &OperationOutput) -> SdkError {
    let shape = match output {
        OperationOutput::Labels(_) => "labels",
        OperationOutput::Nodes(_) => "nodes",
        OperationOutput::Graph(_) => "graph",
    };
    SdkError::UnexpectedResponse(format!("{} produced a {} body", op, shape))
}

#[async_trait]
impl GraphLensClient for EmbeddedClient {
    async fn labels(&self) -> SdkResult<Vec<String>> {
        match self.run(Operation::ListLabels, OperationParams::default()).await? {
            OperationOutput::Labels(labels) => Ok(labels),
            other => Err(unexpected(Operation::ListLabels, &other)),
        }
    }

    async fn full_graph(&self) -> SdkResult<GraphView> {
        self.run_graph(Operation::LoadFullGraph, OperationParams::default())
            .await
    }

    async fn nodes_by_label(&self, label: &str) -> SdkResult<Vec<NodeView>> {
        match self
            .run(Operation::NodesByLabel, OperationParams::label(label))
            .await?
        {
            OperationOutput::Nodes(nodes) => Ok(nodes),
            other => Err(unexpected(Operation::NodesByLabel, &other)),
        }
    }

    async fn search(&self, query: &str) -> SdkResult<GraphView> {
        self.run_graph(Operation::Search, OperationParams::query(query))
            .await
    }

    async fn expand(&self, node_id: &str) -> SdkResult<GraphView> {
        self.run_graph(Operation::Expand, OperationParams::node_id(node_id))
            .await
    }

    async fn status(&self) -> SdkResult<ServerStatus> {
        Ok(ServerStatus {
            status: "healthy".to_string(),
            version: graph_lens::VERSION.to_string(),
        })
    }
}
