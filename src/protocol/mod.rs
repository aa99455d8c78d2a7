//! The fixed set of graph operations the gateway answers
//!
//! | Operation       | Wire name | Required | Output       |
//! |-----------------|-----------|----------|--------------|
//! | `ListLabels`    | `labels`  | -        | label list   |
//! | `LoadFullGraph` | `full`    | -        | graph        |
//! | `NodesByLabel`  | `byLabel` | `label`  | node list    |
//! | `Search`        | `search`  | `query`  | graph        |
//! | `Expand`        | `expand`  | `nodeId` | graph        |
//!
//! Parameters are validated before any statement is built, so a rejected request
//! never reaches the store.

pub mod label;
pub mod operation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GatewayError;
use crate::model::{GraphView, NodeView};

pub use label::LabelName;

/// Supported operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListLabels,
    LoadFullGraph,
    NodesByLabel,
    Search,
    Expand,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::ListLabels,
        Operation::LoadFullGraph,
        Operation::NodesByLabel,
        Operation::Search,
        Operation::Expand,
    ];

    /// Canonical wire name
    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListLabels => "labels",
            Operation::LoadFullGraph => "full",
            Operation::NodesByLabel => "byLabel",
            Operation::Search => "search",
            Operation::Expand => "expand",
        }
    }

    /// Check the parameters this operation requires
    pub fn validate(self, params: &OperationParams) -> Result<ValidatedOperation, GatewayError> {
        match self {
            Operation::ListLabels => Ok(ValidatedOperation::ListLabels),
            Operation::LoadFullGraph => Ok(ValidatedOperation::LoadFullGraph),
            Operation::NodesByLabel => {
                let label = required("label", params.label.as_deref())?;
                Ok(ValidatedOperation::NodesByLabel {
                    label: LabelName::parse(label)?,
                })
            }
            Operation::Search => {
                let query = required("query", params.query.as_deref())?;
                Ok(ValidatedOperation::Search {
                    query: query.to_string(),
                })
            }
            Operation::Expand => {
                let node_id = required("nodeId", params.node_id.as_deref())?;
                Ok(ValidatedOperation::Expand {
                    node_id: node_id.to_string(),
                })
            }
        }
    }
}

impl FromStr for Operation {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "labels" => Ok(Operation::ListLabels),
            "full" | "initial" => Ok(Operation::LoadFullGraph),
            "byLabel" | "nodesByLabel" => Ok(Operation::NodesByLabel),
            "search" => Ok(Operation::Search),
            "expand" => Ok(Operation::Expand),
            other => Err(GatewayError::UnknownOperation(other.to_string())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn required<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str, GatewayError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(GatewayError::MissingParameter(name)),
    }
}

/// Raw request parameters, any of which may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OperationParams {
    pub label: Option<String>,
    pub query: Option<String>,
    #[serde(rename = "nodeId")]
    pub node_id: Option<String>,
}

impl OperationParams {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn node_id(node_id: impl Into<String>) -> Self {
        Self {
            node_id: Some(node_id.into()),
            ..Self::default()
        }
    }
}

/// An operation whose parameters passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedOperation {
    ListLabels,
    LoadFullGraph,
    NodesByLabel { label: LabelName },
    Search { query: String },
    Expand { node_id: String },
}

/// Response body of an operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Labels(Vec<String>),
    Nodes(Vec<NodeView>),
    Graph(GraphView),
}

impl OperationOutput {
    /// Element count for logging: labels, nodes, or nodes + edges
    pub fn size(&self) -> usize {
        match self {
            OperationOutput::Labels(labels) => labels.len(),
            OperationOutput::Nodes(nodes) => nodes.len(),
            OperationOutput::Graph(graph) => graph.node_count() + graph.edge_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(op.name().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_legacy_aliases() {
        assert_eq!("initial".parse::<Operation>().unwrap(), Operation::LoadFullGraph);
        assert_eq!("nodesByLabel".parse::<Operation>().unwrap(), Operation::NodesByLabel);
    }

    #[test]
    fn test_unknown_operation() {
        let err = "drop".parse::<Operation>().unwrap_err();
        assert!(matches!(err, GatewayError::UnknownOperation(ref op) if op == "drop"));
    }

    #[test]
    fn test_missing_or_empty_parameters() {
        let cases = [
            (Operation::NodesByLabel, OperationParams::default(), "label"),
            (Operation::Search, OperationParams::default(), "query"),
            (Operation::Search, OperationParams::query(""), "query"),
            (Operation::Expand, OperationParams::node_id(""), "nodeId"),
        ];

        for (op, params, name) in cases {
            let err = op.validate(&params).unwrap_err();
            assert!(
                matches!(err, GatewayError::MissingParameter(n) if n == name),
                "{} with {:?} gave {:?}",
                op,
                params,
                err
            );
        }
    }

    #[test]
    fn test_parameterless_operations_ignore_extras() {
        let params = OperationParams::label("Person");
        assert_eq!(
            Operation::ListLabels.validate(&params).unwrap(),
            ValidatedOperation::ListLabels
        );
        assert_eq!(
            Operation::LoadFullGraph.validate(&params).unwrap(),
            ValidatedOperation::LoadFullGraph
        );
    }

    #[test]
    fn test_label_injection_is_rejected() {
        let params = OperationParams::label("Foo`) DETACH DELETE (n");
        let err = Operation::NodesByLabel.validate(&params).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidParameter { name: "label", .. }));
    }

    #[test]
    fn test_output_serializes_untagged() {
        let labels = OperationOutput::Labels(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(serde_json::to_string(&labels).unwrap(), r#"["A","B"]"#);

        let empty = OperationOutput::Graph(GraphView::default());
        assert_eq!(serde_json::to_string(&empty).unwrap(), r#"{"nodes":[],"edges":[]}"#);
    }
}
