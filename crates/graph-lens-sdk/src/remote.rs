//! RemoteClient — network client for a running Graph Lens gateway
//!
//! Connects via HTTP to `/graph` and `/api/status`.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::client::GraphLensClient;
use crate::error::{SdkError, SdkResult};
use crate::models::ServerStatus;
use graph_lens::model::{GraphView, NodeView};

/// Network client that connects to a running gateway.
pub struct RemoteClient {
    http_base_url: String,
    http_client: Client,
}

impl RemoteClient {
    /// Create a new RemoteClient for the given HTTP base URL.
    ///
    /// # Example
    /// ```no_run
    /// # use graph_lens_sdk::RemoteClient;
    /// let client = RemoteClient::new("http://localhost:4000");
    /// ```
    pub fn new(http_base_url: &str) -> Self {
        Self {
            http_base_url: http_base_url.trim_end_matches('/').to_string(),
            http_client: Client::new(),
        }
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.http_base_url
    }

    /// URL of a `/graph` request for `op` with an optional parameter
    pub fn operation_url(&self, op: &str, param: Option<(&str, &str)>) -> SdkResult<Url> {
        let mut pairs = vec![("op", op)];
        pairs.extend(param);
        Url::parse_with_params(&format!("{}/graph", self.http_base_url), &pairs)
            .map_err(|e| SdkError::InvalidUrl(e.to_string()))
    }

    /// Execute a GET request for one operation
    async fn get_operation<T: DeserializeOwned>(
        &self,
        op: &str,
        param: Option<(&str, &str)>,
    ) -> SdkResult<T> {
        let url = self.operation_url(op, param)?;
        let response = self.http_client.get(url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> SdkResult<T> {
    let status = response.status();
    let body = response.bytes().await?;
    decode_body(status, &body)
}

/// Decode a gateway body: success bodies into `T`, error bodies into `SdkError::Api`
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> SdkResult<T> {
    if status.is_success() {
        return Ok(serde_json::from_slice(body)?);
    }

    let error_body: serde_json::Value =
        serde_json::from_slice(body).unwrap_or_else(|_| serde_json::json!({}));
    let field = |name: &str, default: &str| {
        error_body
            .get(name)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
            .to_string()
    };

    Err(SdkError::Api {
        status: status.as_u16(),
        kind: field("kind", "Unknown"),
        message: field("error", "Unknown error"),
    })
}

#[async_trait]
impl GraphLensClient for RemoteClient {
    async fn labels(&self) -> SdkResult<Vec<String>> {
        self.get_operation("labels", None).await
    }

    async fn full_graph(&self) -> SdkResult<GraphView> {
        self.get_operation("full", None).await
    }

    async fn nodes_by_label(&self, label: &str) -> SdkResult<Vec<NodeView>> {
        self.get_operation("byLabel", Some(("label", label))).await
    }

    async fn search(&self, query: &str) -> SdkResult<GraphView> {
        self.get_operation("search", Some(("query", query))).await
    }

    async fn expand(&self, node_id: &str) -> SdkResult<GraphView> {
        self.get_operation("expand", Some(("nodeId", node_id))).await
    }

    async fn status(&self) -> SdkResult<ServerStatus> {
        let url = format!("{}/api/status", self.http_base_url);
        let response = self.http_client.get(&url).send().await?;
        decode(response).await
    }
}
