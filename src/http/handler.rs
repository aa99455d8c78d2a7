//! HTTP handlers for the graph API

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, HeaderValue, Method},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::dispatcher::{check_method, QueryDispatcher};
use crate::error::GatewayError;
use crate::protocol::{Operation, OperationOutput, OperationParams};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<QueryDispatcher>,
    /// Include a short store diagnostic in 500 bodies
    pub expose_error_detail: bool,
}

/// Query string of `/graph` and `/api/graph`
#[derive(Debug, Default, Deserialize)]
pub struct GraphQuery {
    pub op: Option<String>,
    /// Alias of `op` used by the serverless handler shape
    pub action: Option<String>,
    pub label: Option<String>,
    pub query: Option<String>,
    #[serde(rename = "nodeId")]
    pub node_id: Option<String>,
}

impl GraphQuery {
    fn split(self) -> (Option<String>, OperationParams) {
        let params = OperationParams {
            label: self.label,
            query: self.query,
            node_id: self.node_id,
        };
        (self.op.or(self.action), params)
    }
}

/// `GET /graph?op=...` and `GET /api/graph?action=...`
pub async fn graph_handler(
    State(state): State<AppState>,
    method: Method,
    query: Result<Query<GraphQuery>, QueryRejection>,
) -> Response {
    let query = match accept_query(&method, query) {
        Ok(query) => query,
        Err(err) => return error_response(&err, state.expose_error_detail),
    };
    let (op, params) = query.split();
    let result = state
        .dispatcher
        .dispatch(&method, op.as_deref(), &params)
        .await;
    respond(&state, result)
}

/// `GET /api/graph/{op}`
pub async fn graph_path_handler(
    State(state): State<AppState>,
    method: Method,
    Path(op): Path<String>,
    query: Result<Query<GraphQuery>, QueryRejection>,
) -> Response {
    let query = match accept_query(&method, query) {
        Ok(query) => query,
        Err(err) => return error_response(&err, state.expose_error_detail),
    };
    let (_, params) = query.split();
    let result = state.dispatcher.dispatch(&method, Some(&op), &params).await;
    respond(&state, result)
}

/// `GET /api/graph/{op}/{arg}`: the segment fills the operation's required parameter
pub async fn graph_path_arg_handler(
    State(state): State<AppState>,
    method: Method,
    Path((op, arg)): Path<(String, String)>,
    query: Result<Query<GraphQuery>, QueryRejection>,
) -> Response {
    let query = match accept_query(&method, query) {
        Ok(query) => query,
        Err(err) => return error_response(&err, state.expose_error_detail),
    };
    let (_, mut params) = query.split();
    match op.parse::<Operation>() {
        Ok(Operation::NodesByLabel) => params.label = Some(arg),
        Ok(Operation::Search) => params.query = Some(arg),
        Ok(Operation::Expand) => params.node_id = Some(arg),
        _ => {}
    }

    let result = state.dispatcher.dispatch(&method, Some(&op), &params).await;
    respond(&state, result)
}

/// Liveness probe; does not touch the store
pub async fn status_handler() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
    }))
}

/// A query string axum could not decode is a client error, unless the method is
/// already wrong
fn accept_query(
    method: &Method,
    query: Result<Query<GraphQuery>, QueryRejection>,
) -> Result<GraphQuery, GatewayError> {
    check_method(method)?;
    match query {
        Ok(Query(query)) => Ok(query),
        Err(rejection) => Err(GatewayError::InvalidParameter {
            name: "query string",
            reason: rejection.body_text(),
        }),
    }
}

fn respond(state: &AppState, result: Result<OperationOutput, GatewayError>) -> Response {
    match result {
        Ok(output) => Json(output).into_response(),
        Err(err) => error_response(&err, state.expose_error_detail),
    }
}

/// Render a gateway error as a status code plus JSON body
pub fn error_response(err: &GatewayError, expose_detail: bool) -> Response {
    let mut response = (err.status_code(), Json(err.body(expose_detail))).into_response();
    if let GatewayError::MethodNotAllowed(_) = err {
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static("GET, HEAD"));
    }
    response
}
