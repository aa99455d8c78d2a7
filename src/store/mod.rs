//! Graph store contract consumed by the gateway
//!
//! The gateway issues exactly one parameterized statement per request through a
//! session acquired from a [`GraphStoreClient`]. Sessions release their resources
//! when dropped, so every exit path of a request gives the session back.
//!
//! Two clients are provided:
//! - [`BoltStore`]: pooled Bolt connection to a Neo4j-compatible server
//! - [`ScriptedStore`]: in-process canned responses, used by tests

pub mod bolt;
pub mod scripted;
pub mod types;

use async_trait::async_trait;
use indexmap::IndexMap;
use thiserror::Error;

pub use bolt::{BoltConfig, BoltStore};
pub use scripted::ScriptedStore;
pub use types::{Identity, Record, StoreNode, StoreRelationship, StoreValue};

/// Store-side failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Could not reach or authenticate against the store
    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    /// The store rejected or failed to execute a statement
    #[error("Query failure: {0}")]
    QueryFailure(String),

    /// A returned record did not have the declared shape
    #[error("Unexpected record: {0}")]
    UnexpectedRecord(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Bound statement parameter
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Integer(i64),
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::String(s)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Integer(i)
    }
}

/// Element kind a result column is expected to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Node,
    Relationship,
    Scalar,
}

/// A declared result column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Query text, bound parameters and the columns it returns
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub cypher: String,
    pub params: IndexMap<String, ParamValue>,
    pub columns: Vec<Column>,
}

impl Statement {
    pub fn new(cypher: impl Into<String>) -> Self {
        Self {
            cypher: cypher.into(),
            params: IndexMap::new(),
            columns: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn column(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.columns.push(Column::new(name, kind));
        self
    }
}

/// Source of store sessions; one handle is shared by all requests
#[async_trait]
pub trait GraphStoreClient: Send + Sync {
    /// Acquire a session for the duration of one request
    async fn session(&self) -> StoreResult<Box<dyn StoreSession>>;
}

/// A scoped unit of store access. Dropping it releases the session.
#[async_trait]
pub trait StoreSession: Send {
    /// Execute a statement and return its records in store order
    async fn run(&mut self, statement: &Statement) -> StoreResult<Vec<Record>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_builder() {
        let stmt = Statement::new("MATCH (n) WHERE id(n) = $id RETURN n")
            .param("id", 7i64)
            .column("n", ColumnKind::Node);

        assert_eq!(stmt.params.get("id"), Some(&ParamValue::Integer(7)));
        assert_eq!(stmt.columns, vec![Column::new("n", ColumnKind::Node)]);
    }
}
