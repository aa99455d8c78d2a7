//! Bolt-protocol store client backed by a pooled `neo4rs` graph handle

use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph, Query};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{
    ColumnKind, GraphStoreClient, Identity, ParamValue, Record, Statement, StoreError,
    StoreNode, StoreRelationship, StoreResult, StoreSession, StoreValue,
};

/// Connection settings for a Bolt store
#[derive(Clone)]
pub struct BoltConfig {
    /// Bolt URI, e.g. `bolt://localhost:7687`
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Upper bound of pooled connections
    pub max_connections: usize,
}

impl fmt::Debug for BoltConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoltConfig")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"***")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Store client holding the process-wide connection pool
pub struct BoltStore {
    graph: Arc<Graph>,
}

impl BoltStore {
    /// Build the connection pool for the configured store
    pub async fn connect(config: &BoltConfig) -> StoreResult<Self> {
        let neo_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.user.as_str())
            .password(config.password.as_str())
            .max_connections(config.max_connections)
            .build()
            .map_err(|e| StoreError::ConnectionFailure(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| StoreError::ConnectionFailure(e.to_string()))?;

        info!(
            "Connected to graph store at {} (pool size {})",
            config.uri, config.max_connections
        );

        Ok(Self {
            graph: Arc::new(graph),
        })
    }
}

#[async_trait]
impl GraphStoreClient for BoltStore {
    async fn session(&self) -> StoreResult<Box<dyn StoreSession>> {
        Ok(Box::new(BoltSession {
            graph: Arc::clone(&self.graph),
            opened: Instant::now(),
        }))
    }
}

struct BoltSession {
    graph: Arc<Graph>,
    opened: Instant,
}

#[async_trait]
impl StoreSession for BoltSession {
    async fn run(&mut self, statement: &Statement) -> StoreResult<Vec<Record>> {
        debug!("Executing statement: {}", statement.cypher);

        let mut stream = self
            .graph
            .execute(to_query(statement))
            .await
            .map_err(|e| StoreError::QueryFailure(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(row) = stream
            .next()
            .await
            .map_err(|e| StoreError::QueryFailure(e.to_string()))?
        {
            records.push(decode_row(&row, statement)?);
        }

        Ok(records)
    }
}

impl Drop for BoltSession {
    fn drop(&mut self) {
        debug!("Session released after {:?}", self.opened.elapsed());
    }
}

fn to_query(statement: &Statement) -> Query {
    let mut q = query(&statement.cypher);
    for (name, value) in &statement.params {
        q = match value {
            ParamValue::String(s) => q.param(name, s.clone()),
            ParamValue::Integer(i) => q.param(name, *i),
        };
    }
    q
}

fn decode_row(row: &neo4rs::Row, statement: &Statement) -> StoreResult<Record> {
    let mut record = Record::new();

    for column in &statement.columns {
        let name = column.name.as_str();
        let value = match column.kind {
            ColumnKind::Node => {
                let node: neo4rs::Node = row.get(name).map_err(|e| decode_failure(name, e))?;
                StoreValue::Node(convert_node(&node))
            }
            ColumnKind::Relationship => {
                let rel: neo4rs::Relation = row.get(name).map_err(|e| decode_failure(name, e))?;
                StoreValue::Relationship(convert_relationship(&rel))
            }
            ColumnKind::Scalar => {
                let value: Value = row.get(name).map_err(|e| decode_failure(name, e))?;
                StoreValue::Scalar(value)
            }
        };
        record.insert(name, value);
    }

    Ok(record)
}

fn convert_node(node: &neo4rs::Node) -> StoreNode {
    let mut properties = Map::new();
    for key in node.keys() {
        properties.insert(key.to_string(), property_or_null(node.get::<Value>(key), key));
    }

    StoreNode {
        identity: Identity(node.id()),
        labels: node.labels().into_iter().map(String::from).collect(),
        properties,
    }
}

fn convert_relationship(rel: &neo4rs::Relation) -> StoreRelationship {
    let mut properties = Map::new();
    for key in rel.keys() {
        properties.insert(key.to_string(), property_or_null(rel.get::<Value>(key), key));
    }

    StoreRelationship {
        identity: Identity(rel.id()),
        start: Identity(rel.start_node_id()),
        end: Identity(rel.end_node_id()),
        rel_type: rel.typ().to_string(),
        properties,
    }
}

// Temporal and spatial values have no JSON form; they surface as null.
fn property_or_null<E: fmt::Display>(value: Result<Value, E>, key: &str) -> Value {
    value.unwrap_or_else(|e| {
        warn!("Property '{}' is not representable as JSON: {}", key, e);
        Value::Null
    })
}

fn decode_failure(name: &str, e: impl fmt::Display) -> StoreError {
    StoreError::UnexpectedRecord(format!("cannot decode field '{}': {}", name, e))
}
