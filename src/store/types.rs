//! Graph elements and records as returned by the store

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;

use super::{StoreError, StoreResult};

/// Store-assigned element identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(pub i64);

impl Identity {
    pub fn new(id: i64) -> Self {
        Identity(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Identity {
    fn from(id: i64) -> Self {
        Identity(id)
    }
}

/// A node as the store returned it
#[derive(Debug, Clone, PartialEq)]
pub struct StoreNode {
    pub identity: Identity,
    pub labels: Vec<String>,
    pub properties: Map<String, Value>,
}

impl StoreNode {
    pub fn new(identity: impl Into<Identity>, labels: &[&str]) -> Self {
        Self {
            identity: identity.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            properties: Map::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A directed, typed relationship as the store returned it
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRelationship {
    pub identity: Identity,
    pub start: Identity,
    pub end: Identity,
    pub rel_type: String,
    pub properties: Map<String, Value>,
}

impl StoreRelationship {
    pub fn new(
        identity: impl Into<Identity>,
        start: impl Into<Identity>,
        end: impl Into<Identity>,
        rel_type: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            start: start.into(),
            end: end.into(),
            rel_type: rel_type.into(),
            properties: Map::new(),
        }
    }
}

/// Value held by a single record field
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Node(StoreNode),
    Relationship(StoreRelationship),
    Scalar(Value),
}

impl StoreValue {
    fn kind(&self) -> &'static str {
        match self {
            StoreValue::Node(_) => "node",
            StoreValue::Relationship(_) => "relationship",
            StoreValue::Scalar(_) => "scalar",
        }
    }
}

/// One result row: named fields in column order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: IndexMap<String, StoreValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with(mut self, name: impl Into<String>, value: StoreValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: StoreValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&StoreValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn node(&self, name: &str) -> StoreResult<&StoreNode> {
        match self.field(name)? {
            StoreValue::Node(node) => Ok(node),
            other => Err(mistyped(name, "node", other)),
        }
    }

    pub fn relationship(&self, name: &str) -> StoreResult<&StoreRelationship> {
        match self.field(name)? {
            StoreValue::Relationship(rel) => Ok(rel),
            other => Err(mistyped(name, "relationship", other)),
        }
    }

    pub fn scalar(&self, name: &str) -> StoreResult<&Value> {
        match self.field(name)? {
            StoreValue::Scalar(value) => Ok(value),
            other => Err(mistyped(name, "scalar", other)),
        }
    }

    fn field(&self, name: &str) -> StoreResult<&StoreValue> {
        self.fields
            .get(name)
            .ok_or_else(|| StoreError::UnexpectedRecord(format!("missing field '{}'", name)))
    }
}

fn mistyped(name: &str, expected: &str, found: &StoreValue) -> StoreError {
    StoreError::UnexpectedRecord(format!(
        "field '{}' holds a {}, expected a {}",
        name,
        found.kind(),
        expected
    ))
}
