//! HTTP server for the graph API and the visualization client

use axum::{
    routing::{any, get, get_service},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use super::handler::{
    graph_handler, graph_path_arg_handler, graph_path_handler, status_handler, AppState,
};
use crate::dispatcher::QueryDispatcher;

/// Listener and surface settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
    /// Directory of client assets served for unmatched paths
    pub static_dir: Option<PathBuf>,
    /// Include a short store diagnostic in 500 bodies
    pub expose_error_detail: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            address: "0.0.0.0".to_string(),
            port: 4000,
            static_dir: None,
            expose_error_detail: true,
        }
    }
}

/// HTTP server exposing the graph operations
pub struct HttpServer {
    config: HttpConfig,
    dispatcher: Arc<QueryDispatcher>,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: HttpConfig, dispatcher: Arc<QueryDispatcher>) -> Self {
        Self { config, dispatcher }
    }

    /// Build the router without binding a socket
    pub fn router(&self) -> Router {
        let state = AppState {
            dispatcher: Arc::clone(&self.dispatcher),
            expose_error_detail: self.config.expose_error_detail,
        };

        let app = Router::new()
            .route("/graph", any(graph_handler))
            .route("/api/graph", any(graph_handler))
            .route("/api/graph/:op", any(graph_path_handler))
            .route("/api/graph/:op/:arg", any(graph_path_arg_handler))
            .route("/api/status", get(status_handler))
            .layer(CorsLayer::permissive())
            .with_state(state);

        match &self.config.static_dir {
            Some(dir) => {
                info!("Serving client assets from {}", dir.display());
                app.fallback_service(get_service(ServeDir::new(dir)))
            }
            None => app,
        }
    }

    /// Start the HTTP server and run until Ctrl-C
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let addr = format!("{}:{}", self.config.address, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Graph API available at http://{}/graph", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
