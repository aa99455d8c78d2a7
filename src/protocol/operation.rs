//! Statement construction and response shaping for validated operations

use serde_json::Value;

use super::{Operation, OperationOutput, ValidatedOperation};
use crate::model::{normalize, NodeView, Triple};
use crate::store::{ColumnKind, Record, Statement, StoreError, StoreResult};

const LIST_LABELS: &str = "CALL db.labels() YIELD label RETURN label";

const LOAD_FULL_GRAPH: &str = "MATCH (n)-[r]->(m) RETURN n, r, m";

const SEARCH: &str = "MATCH (n)-[r]-(m) \
     WHERE toLower(n.name) CONTAINS toLower($query) \
        OR toLower(m.name) CONTAINS toLower($query) \
     RETURN n, r, m";

const EXPAND: &str = "MATCH (n)-[r]-(m) \
     WHERE id(n) = toInteger($nodeId) OR id(m) = toInteger($nodeId) \
     RETURN n, r, m";

impl ValidatedOperation {
    pub fn operation(&self) -> Operation {
        match self {
            ValidatedOperation::ListLabels => Operation::ListLabels,
            ValidatedOperation::LoadFullGraph => Operation::LoadFullGraph,
            ValidatedOperation::NodesByLabel { .. } => Operation::NodesByLabel,
            ValidatedOperation::Search { .. } => Operation::Search,
            ValidatedOperation::Expand { .. } => Operation::Expand,
        }
    }

    /// The single statement this operation issues
    pub fn statement(&self) -> Statement {
        match self {
            ValidatedOperation::ListLabels => {
                Statement::new(LIST_LABELS).column("label", ColumnKind::Scalar)
            }
            ValidatedOperation::LoadFullGraph => triple_columns(Statement::new(LOAD_FULL_GRAPH)),
            ValidatedOperation::NodesByLabel { label } => {
                Statement::new(format!("MATCH (n:`{}`) RETURN n", label))
                    .column("n", ColumnKind::Node)
            }
            ValidatedOperation::Search { query } => {
                triple_columns(Statement::new(SEARCH).param("query", query.as_str()))
            }
            ValidatedOperation::Expand { node_id } => {
                triple_columns(Statement::new(EXPAND).param("nodeId", node_id.as_str()))
            }
        }
    }

    /// Turn the statement's records into the response body
    pub fn shape(&self, records: &[Record]) -> StoreResult<OperationOutput> {
        match self {
            ValidatedOperation::ListLabels => records
                .iter()
                .map(label_of)
                .collect::<StoreResult<Vec<_>>>()
                .map(OperationOutput::Labels),
            ValidatedOperation::NodesByLabel { .. } => records
                .iter()
                .map(|record| record.node("n").map(NodeView::from))
                .collect::<StoreResult<Vec<_>>>()
                .map(OperationOutput::Nodes),
            ValidatedOperation::LoadFullGraph
            | ValidatedOperation::Search { .. }
            | ValidatedOperation::Expand { .. } => {
                let triples = records
                    .iter()
                    .map(triple_of)
                    .collect::<StoreResult<Vec<_>>>()?;
                Ok(OperationOutput::Graph(normalize(triples)))
            }
        }
    }
}

fn triple_columns(statement: Statement) -> Statement {
    statement
        .column("n", ColumnKind::Node)
        .column("r", ColumnKind::Relationship)
        .column("m", ColumnKind::Node)
}

fn triple_of(record: &Record) -> StoreResult<Triple<'_>> {
    Ok(Triple::new(
        record.node("n")?,
        record.relationship("r")?,
        record.node("m")?,
    ))
}

fn label_of(record: &Record) -> StoreResult<String> {
    match record.scalar("label")? {
        Value::String(label) => Ok(label.clone()),
        other => Err(StoreError::UnexpectedRecord(format!(
            "label column holds {}, expected a string",
            other
        ))),
    }
}
