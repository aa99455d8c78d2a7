//! Gateway error taxonomy
//!
//! Client errors are detected before the store is touched and map to 400/405.
//! Store errors map to 500; callers get a generic message and at most a short
//! diagnostic, never statement text or credentials.

use axum::http::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;

use crate::store::StoreError;

/// Message shown to callers in place of store failure details
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("method {0} not allowed, only GET is supported")]
    MethodNotAllowed(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::MissingParameter(_)
            | GatewayError::InvalidParameter { .. }
            | GatewayError::UnknownOperation(_) => StatusCode::BAD_REQUEST,
            GatewayError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable variant name reported in error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MissingParameter(_) => "MissingParameter",
            GatewayError::InvalidParameter { .. } => "InvalidParameter",
            GatewayError::UnknownOperation(_) => "UnknownOperation",
            GatewayError::MethodNotAllowed(_) => "MethodNotAllowed",
            GatewayError::Store(StoreError::ConnectionFailure(_)) => "ConnectionFailure",
            GatewayError::Store(StoreError::QueryFailure(_)) => "QueryFailure",
            GatewayError::Store(StoreError::UnexpectedRecord(_)) => "UnexpectedRecord",
        }
    }

    pub fn is_client_error(&self) -> bool {
        !matches!(self, GatewayError::Store(_))
    }

    /// JSON error body; `expose_detail` controls the store diagnostic
    pub fn body(&self, expose_detail: bool) -> Value {
        match self {
            GatewayError::Store(err) => {
                let mut body = json!({
                    "error": INTERNAL_ERROR_MESSAGE,
                    "kind": self.kind(),
                });
                if expose_detail {
                    body["detail"] = Value::String(short_detail(err));
                }
                body
            }
            client => json!({
                "error": client.to_string(),
                "kind": client.kind(),
            }),
        }
    }
}

const MAX_DETAIL_CHARS: usize = 200;

fn short_detail(err: &StoreError) -> String {
    let detail = match err {
        StoreError::ConnectionFailure(msg)
        | StoreError::QueryFailure(msg)
        | StoreError::UnexpectedRecord(msg) => msg,
    };
    let first_line = detail.lines().next().unwrap_or_default();
    first_line.chars().take(MAX_DETAIL_CHARS).collect()
}
