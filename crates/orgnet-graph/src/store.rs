//! The graph-store seam.
//!
//! Everything above this module talks to the database through
//! [`GraphStore::run`]: a parameterized statement in, rows of named columns
//! out. Values are always bound as parameters, never spliced into the text.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use orgnet_core::EntityKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by a graph store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store rejected or failed to run the statement.
    #[error("{0}")]
    Execution(String),

    #[error("Failed to decode column '{column}': {message}")]
    Decode { column: String, message: String },
}

/// What a statement asks for.
///
/// Carried next to the query text so logs and test stores can tell
/// statements apart without parsing Cypher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    ResolvePerson,
    OrganizationPath { first: EntityKind, second: EntityKind },
    PersonPath,
    ListEntities(EntityKind),
    CannedLookup(&'static str),
    AllRelations,
    Relations { from: EntityKind, to: EntityKind },
    CountNodes,
    CountRelations,
    NodeDetail(Option<EntityKind>),
    NodeIds,
    NodeRelations,
}

/// A parameterized statement plus its declared output columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub kind: QueryKind,
    pub text: String,
    pub params: BTreeMap<String, String>,
    pub columns: Vec<&'static str>,
}

impl Statement {
    pub fn new(kind: QueryKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            params: BTreeMap::new(),
            columns: Vec::new(),
        }
    }

    /// Bind a string parameter.
    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Declare the columns the statement projects.
    pub fn columns(mut self, columns: &[&'static str]) -> Self {
        self.columns = columns.to_vec();
        self
    }

    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// One result row: column name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row(BTreeMap<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.0.insert(column.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, column: &str, value: Value) {
        self.0.insert(column.to_string(), value);
    }

    /// Raw value of a column; missing columns read as null.
    pub fn value(&self, column: &str) -> &Value {
        self.0.get(column).unwrap_or(&Value::Null)
    }

    /// Non-null string value of a column.
    pub fn get_str(&self, column: &str) -> Option<&str> {
        self.0.get(column).and_then(Value::as_str)
    }

    /// Decode a column into `T`.
    pub fn get<T: DeserializeOwned>(&self, column: &str) -> Result<T, StoreError> {
        serde_json::from_value(self.value(column).clone()).map_err(|e| StoreError::Decode {
            column: column.to_string(),
            message: e.to_string(),
        })
    }

    /// Decode a column that may be null.
    pub fn get_opt<T: DeserializeOwned>(&self, column: &str) -> Result<Option<T>, StoreError> {
        match self.value(column) {
            Value::Null => Ok(None),
            _ => self.get(column).map(Some),
        }
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Row(iter.into_iter().collect())
    }
}

/// A parameterized graph query executor.
///
/// Each call acquires whatever session it needs and releases it before
/// returning, so implementations must be safe to share across tasks.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn run(&self, statement: Statement) -> Result<Vec<Row>, StoreError>;
}

#[async_trait]
impl<T: GraphStore + ?Sized> GraphStore for Arc<T> {
    async fn run(&self, statement: Statement) -> Result<Vec<Row>, StoreError> {
        (**self).run(statement).await
    }
}
