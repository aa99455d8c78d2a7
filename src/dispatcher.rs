//! Request dispatch: one operation, one session, one statement
//!
//! The dispatcher is independent of the hosting model. The HTTP server and the
//! one-shot `run` command both go through [`QueryDispatcher::dispatch`].

use axum::http::Method;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::error::GatewayError;
use crate::protocol::{Operation, OperationOutput, OperationParams, ValidatedOperation};
use crate::store::GraphStoreClient;

/// Routes requests to operations against an injected store client
pub struct QueryDispatcher {
    store: Arc<dyn GraphStoreClient>,
}

impl QueryDispatcher {
    pub fn new(store: Arc<dyn GraphStoreClient>) -> Self {
        Self { store }
    }

    /// Handle one request. Validation failures return before any store contact.
    pub async fn dispatch(
        &self,
        method: &Method,
        op: Option<&str>,
        params: &OperationParams,
    ) -> Result<OperationOutput, GatewayError> {
        let op_name = op.unwrap_or_default();
        let span = info_span!("dispatch", op = %op_name);

        let result = async {
            let validated = resolve(method, op, params)?;
            self.execute(&validated).await
        }
        .instrument(span.clone())
        .await;

        if let Err(err) = &result {
            let _enter = span.enter();
            if err.is_client_error() {
                warn!("Rejected request: {}", err);
            } else {
                error!("Store failure: {}", err);
            }
        }

        result
    }

    /// Validate and run an operation for in-process callers
    pub async fn run(
        &self,
        operation: Operation,
        params: &OperationParams,
    ) -> Result<OperationOutput, GatewayError> {
        let validated = operation.validate(params)?;
        self.execute(&validated).await
    }

    /// Run an already validated operation
    pub async fn execute(
        &self,
        operation: &ValidatedOperation,
    ) -> Result<OperationOutput, GatewayError> {
        let started = Instant::now();
        let statement = operation.statement();
        debug!("Statement: {}", statement.cypher);

        let records = {
            let mut session = self.store.session().await?;
            session.run(&statement).await?
        };

        let output = operation.shape(&records)?;
        info!(
            "{} returned {} records, {} elements in {:?}",
            operation.operation(),
            records.len(),
            output.size(),
            started.elapsed()
        );

        Ok(output)
    }
}

/// Only reads are served; HEAD is answered like GET
pub fn check_method(method: &Method) -> Result<(), GatewayError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(GatewayError::MethodNotAllowed(method.to_string()));
    }
    Ok(())
}

fn resolve(
    method: &Method,
    op: Option<&str>,
    params: &OperationParams,
) -> Result<ValidatedOperation, GatewayError> {
    check_method(method)?;

    let operation: Operation = match op {
        Some(name) if !name.is_empty() => name.parse()?,
        _ => return Err(GatewayError::MissingParameter("op")),
    };

    operation.validate(params)
}
