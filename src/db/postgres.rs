//! PostgreSQL database client implementation.
//!
//! Provides the `PostgresClient` struct that implements the `DatabaseClient` trait
//! for PostgreSQL databases using sqlx.

use super::{
    is_transient_error, MAX_RETRY_ATTEMPTS, MAX_ROWS, QUERY_TIMEOUT_SECS, RETRY_BASE_DELAY_MS,
};
use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, DatabaseBackend, DatabaseClient, Query, QueryResult, Row, Value};
use crate::error::{MygoError, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Column as SqlxColumn, Row as SqlxRow, TypeInfo};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// PostgreSQL database client.
#[derive(Debug)]
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Connects with bounded retries on transient failures.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let conn_str = config.to_connection_string()?;

        let mut last_error = None;
        let mut delay = Duration::from_millis(RETRY_BASE_DELAY_MS);

        for attempt in 1..=MAX_RETRY_ATTEMPTS {
            debug!("Connection attempt {} of {}", attempt, MAX_RETRY_ATTEMPTS);

            // One connection so session-level settings (SET, search_path) stick.
            let result = PgPoolOptions::new()
                .max_connections(1)
                .acquire_timeout(Duration::from_secs(10))
                .connect(&conn_str)
                .await;

            match result {
                Ok(pool) => {
                    debug!("Successfully connected to database");
                    return Ok(Self { pool });
                }
                Err(e) => {
                    let is_transient = is_transient_error(&e);
                    last_error = Some(e);

                    if attempt < MAX_RETRY_ATTEMPTS && is_transient {
                        warn!(
                            "Connection attempt {} failed (transient error), retrying in {:?}",
                            attempt, delay
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    } else {
                        break;
                    }
                }
            }
        }

        Err(match last_error {
            Some(e) => map_connection_error(e, config),
            None => MygoError::connection("No connection attempt was made"),
        })
    }
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::Postgres
    }

    async fn execute_query(&self, query: &Query) -> Result<QueryResult> {
        let start = Instant::now();

        let fetch = async {
            if query.is_parameterized() {
                let mut prepared = sqlx::query(&query.sql);
                for param in &query.params {
                    prepared = prepared.bind(param.as_str());
                }
                prepared.fetch_all(&self.pool).await
            } else {
                sqlx::raw_sql(&query.sql).fetch_all(&self.pool).await
            }
        };

        let result = tokio::time::timeout(Duration::from_secs(QUERY_TIMEOUT_SECS), fetch)
            .await
            .map_err(|_| {
                MygoError::query(format!(
                    "Query timed out after {QUERY_TIMEOUT_SECS} seconds"
                ))
            })?
            .map_err(|e| MygoError::query(format_query_error(e)))?;

        let execution_time = start.elapsed();

        let columns: Vec<ColumnInfo> = result
            .first()
            .map(|first_row| {
                first_row
                    .columns()
                    .iter()
                    .map(|col| ColumnInfo::new(col.name(), col.type_info().name()))
                    .collect()
            })
            .unwrap_or_default();

        let total_rows = result.len();
        let was_truncated = total_rows > MAX_ROWS;

        if was_truncated {
            warn!(
                "Query returned {} rows, truncating to {} rows",
                total_rows, MAX_ROWS
            );
        }

        // Simple-protocol rows arrive in text format, prepared ones in binary.
        let text_format = !query.is_parameterized();
        let rows: Vec<Row> = result
            .iter()
            .take(MAX_ROWS)
            .map(|row| convert_row(row, text_format))
            .collect();

        let row_count = rows.len();

        Ok(QueryResult {
            columns,
            rows,
            execution_time,
            row_count,
            total_rows: Some(total_rows),
            was_truncated,
        })
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Converts a sqlx PgRow to our Row type.
fn convert_row(row: &PgRow, text_format: bool) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name(), text_format))
        .collect()
}

/// Converts a single column value from a PgRow to our Value type.
fn convert_value(row: &PgRow, index: usize, type_name: &str, text_format: bool) -> Value {
    let typed = match type_name.to_uppercase().as_str() {
        "BOOL" | "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .map(|v| v.map(Value::Bool).unwrap_or(Value::Null)),

        "INT2" | "SMALLINT" => row
            .try_get::<Option<i16>, _>(index)
            .ok()
            .map(|v| v.map(|v| Value::Int(v as i64)).unwrap_or(Value::Null)),

        "INT4" | "INT" | "INTEGER" => row
            .try_get::<Option<i32>, _>(index)
            .ok()
            .map(|v| v.map(|v| Value::Int(v as i64)).unwrap_or(Value::Null)),

        "INT8" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .map(|v| v.map(Value::Int).unwrap_or(Value::Null)),

        "FLOAT4" | "REAL" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .map(|v| v.map(|v| Value::Float(v as f64)).unwrap_or(Value::Null)),

        "FLOAT8" | "DOUBLE PRECISION" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .map(|v| v.map(Value::Float).unwrap_or(Value::Null)),

        "BYTEA" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .map(|v| v.map(Value::Bytes).unwrap_or(Value::Null)),

        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .map(|v| v.map(Value::String).unwrap_or(Value::Null)),
    };

    match typed {
        Some(value) => value,
        // Text-format values of any type (timestamps, numerics, arrays) read as their literal.
        None if text_format => row
            .try_get_unchecked::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::String)
            .unwrap_or(Value::Null),
        None => Value::Null,
    }
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &ConnectionConfig) -> MygoError {
    let host = config.host.as_deref().unwrap_or("localhost");
    let port = config.effective_port();
    let user = config.user.as_deref().unwrap_or("unknown");
    let database = config.database.as_deref().unwrap_or("unknown");

    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") || error_str.contains("could not connect") {
        MygoError::connection(format!(
            "Cannot connect to {host}:{port}. Check that the server is running."
        ))
    } else if error_str.contains("password authentication failed")
        || error_str.contains("authentication failed")
    {
        MygoError::connection(format!(
            "Authentication failed for user '{user}'. Check your credentials."
        ))
    } else if error_str.contains("does not exist") && error_str.contains("database") {
        MygoError::connection(format!("Database '{database}' does not exist."))
    } else if error_str.contains("ssl") || error_str.contains("tls") {
        MygoError::connection(
            "Server requires SSL. Use '--sslmode require' or add '?sslmode=require' to the URL."
                .to_string(),
        )
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        MygoError::connection(format!(
            "Connection to {host}:{port} timed out. The server may be overloaded or unreachable."
        ))
    } else {
        MygoError::connection(error.to_string())
    }
}

/// Formats a query error with detail and hint lines if available.
fn format_query_error(error: sqlx::Error) -> String {
    let Some(db_error) = error.as_database_error() else {
        return error.to_string();
    };

    let mut result = String::from("ERROR: ");
    result.push_str(db_error.message());

    if let Some(pg_error) = db_error.try_downcast_ref::<sqlx::postgres::PgDatabaseError>() {
        if let Some(detail) = pg_error.detail() {
            result.push_str("\n  DETAIL: ");
            result.push_str(detail);
        }

        if let Some(hint) = pg_error.hint() {
            result.push_str("\n  HINT: ");
            result.push_str(hint);
        }
    }

    result
}
