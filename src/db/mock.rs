//! Mock database clients for testing.
//!
//! Provides in-memory implementations that record what they were asked to
//! run, so translation and dispatch can be tested without a server.

use super::{ColumnInfo, DatabaseBackend, DatabaseClient, Query, QueryResult, Value};
use crate::error::{MygoError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// A mock database client that returns predefined results.
pub struct MockDatabaseClient {
    backend: DatabaseBackend,
    responses: Vec<(String, QueryResult)>,
    executed: Mutex<Vec<Query>>,
    closed: AtomicBool,
}

impl MockDatabaseClient {
    /// Creates a new mock client that reports the given backend.
    pub fn new(backend: DatabaseBackend) -> Self {
        Self {
            backend,
            responses: Vec::new(),
            executed: Mutex::new(Vec::new()),
            closed: AtomicBool::new(false),
        }
    }

    /// Returns `result` for any statement whose text contains `needle`.
    ///
    /// Responses are checked in the order they were added.
    pub fn with_response(mut self, needle: impl Into<String>, result: QueryResult) -> Self {
        self.responses.push((needle.into(), result));
        self
    }

    /// Returns every query executed so far, oldest first.
    pub fn executed(&self) -> Vec<Query> {
        self.executed
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    /// Returns true once `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    async fn execute_query(&self, query: &Query) -> Result<QueryResult> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(query.clone());
        }

        if let Some((_, result)) = self
            .responses
            .iter()
            .find(|(needle, _)| query.sql.contains(needle.as_str()))
        {
            return Ok(result.clone());
        }

        if query.sql.to_uppercase().starts_with("SELECT") {
            let columns = vec![ColumnInfo::new("result", "text")];
            let rows = vec![vec![Value::String(format!("Mock result for: {}", query.sql))]];
            Ok(QueryResult::with_data(columns, rows).with_execution_time(Duration::from_millis(1)))
        } else {
            Ok(QueryResult::new().with_execution_time(Duration::from_millis(1)))
        }
    }

    async fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// A client whose every statement fails with the same message.
pub struct FailingDatabaseClient {
    backend: DatabaseBackend,
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a client that fails every query with `message`.
    pub fn new(backend: DatabaseBackend, message: impl Into<String>) -> Self {
        Self {
            backend,
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    async fn execute_query(&self, _query: &Query) -> Result<QueryResult> {
        Err(MygoError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
