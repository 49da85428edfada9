//! Neo4j connection client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use neo4rs::{ConfigBuilder, Graph, Query};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::store::{GraphStore, Row, Statement, StoreError};

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: usize,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "neo4j".to_string(),
            database: "neo4j".to_string(),
            max_connections: 8,
            fetch_size: 200,
        }
    }
}

/// Client for the console's Neo4j database.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// neo4rs builds its connection pool lazily, so a `RETURN 1` ping is sent
    /// right away to surface an unreachable server at startup instead of on
    /// the first request.
    pub async fn connect(config: &GraphConfig) -> Result<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db(config.database.as_str())
            .max_connections(config.max_connections)
            .fetch_size(config.fetch_size)
            .build()
            .context("Failed to build Neo4j config")?;

        let graph = Graph::connect(neo4j_config)
            .await
            .context("Failed to create Neo4j connection pool")?;

        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .with_context(|| format!("Neo4j at {} is not responding to queries", config.uri))?;

        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn run(&self, statement: Statement) -> Result<Vec<Row>, StoreError> {
        debug!(kind = ?statement.kind, params = statement.params.len(), "Running statement");

        let mut query = Query::new(statement.text);
        for (key, value) in statement.params {
            query = query.param(&key, value);
        }

        let mut result = self.graph.execute(query).await.map_err(|e| {
            warn!(kind = ?statement.kind, error = %e, "Neo4j query failed");
            StoreError::Execution(e.to_string())
        })?;

        let mut rows = Vec::new();
        while let Some(row) = result
            .next()
            .await
            .map_err(|e| StoreError::Execution(e.to_string()))?
        {
            rows.push(decode_row(&row, &statement.columns).map_err(|e| {
                warn!(kind = ?statement.kind, error = %e, "Neo4j row did not decode");
                e
            })?);
        }
        Ok(rows)
    }
}

/// Read the declared columns out of a neo4rs row.
///
/// Nulls decode to `Value::Null`; anything else that fails (a column the
/// statement never returned, an unsupported Bolt type) is a decode error.
fn decode_row(row: &neo4rs::Row, columns: &[&'static str]) -> Result<Row, StoreError> {
    columns
        .iter()
        .map(|column| {
            row.get::<Value>(column)
                .map(|value| (column.to_string(), value))
                .map_err(|e| StoreError::Decode {
                    column: column.to_string(),
                    message: e.to_string(),
                })
        })
        .collect()
}
