//! MySQL database client implementation.
//!
//! MySQL is the native dialect, so statements reach this client exactly as
//! the user typed them.

use super::{
    is_transient_error, MAX_RETRY_ATTEMPTS, MAX_ROWS, QUERY_TIMEOUT_SECS, RETRY_BASE_DELAY_MS,
};
use crate::config::ConnectionConfig;
use crate::db::{ColumnInfo, DatabaseBackend, DatabaseClient, Query, QueryResult, Row, Value};
use crate::error::{MygoError, Result};
use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column as SqlxColumn, Row as SqlxRow, TypeInfo};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// MySQL database client.
#[derive(Debug)]
pub struct MySqlClient {
    pool: MySqlPool,
}

impl MySqlClient {
    /// Connects with bounded retries on transient failures.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        let conn_str = config.to_connection_string()?;

        let mut last_error = None;
        let mut delay = Duration::from_millis(RETRY_BASE_DELAY_MS);

        for attempt in 1..=MAX_RETRY_ATTEMPTS {
            debug!("Connection attempt {} of {}", attempt, MAX_RETRY_ATTEMPTS);

            // A pooled second connection would not see a typed `USE`.
            let result = MySqlPoolOptions::new()
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
impl DatabaseClient for MySqlClient {
    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::MySql
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

        let rows: Vec<Row> = result.iter().take(MAX_ROWS).map(convert_row).collect();
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

/// Converts a sqlx MySqlRow to our Row type.
fn convert_row(row: &MySqlRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| convert_value(row, i, col.type_info().name()))
        .collect()
}

/// Converts a single column value from a MySqlRow to our Value type.
fn convert_value(row: &MySqlRow, index: usize, type_name: &str) -> Value {
    let upper = type_name.to_uppercase();
    let typed = match upper.as_str() {
        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .map(|v| v.map(Value::Bool).unwrap_or(Value::Null)),

        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .map(|v| v.map(Value::Int).unwrap_or(Value::Null)),

        t if t.ends_with("UNSIGNED") => row
            .try_get::<Option<u64>, _>(index)
            .ok()
            .map(|v| v.map(Value::UInt).unwrap_or(Value::Null)),

        "FLOAT" | "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .map(|v| v.map(Value::Float).unwrap_or(Value::Null)),

        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => row
            .try_get::<Option<Vec<u8>>, _>(index)
            .ok()
            .map(|v| v.map(Value::Bytes).unwrap_or(Value::Null)),

        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .map(|v| v.map(Value::String).unwrap_or(Value::Null)),
    };

    // DECIMAL, DATETIME and friends have no typed arm; read their wire bytes.
    typed.unwrap_or_else(|| {
        row.try_get_unchecked::<Option<Vec<u8>>, _>(index)
            .ok()
            .flatten()
            .map(|bytes| match String::from_utf8(bytes) {
                Ok(text) => Value::String(text),
                Err(e) => Value::Bytes(e.into_bytes()),
            })
            .unwrap_or(Value::Null)
    })
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &ConnectionConfig) -> MygoError {
    let host = config.host.as_deref().unwrap_or("localhost");
    let port = config.effective_port();
    let user = config.user.as_deref().unwrap_or("unknown");
    let database = config.database.as_deref().unwrap_or("unknown");

    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused") {
        MygoError::connection(format!(
            "Cannot connect to {host}:{port}. Check that the server is running."
        ))
    } else if error_str.contains("access denied") {
        MygoError::connection(format!(
            "Access denied for user '{user}'. Check your credentials."
        ))
    } else if error_str.contains("unknown database") {
        MygoError::connection(format!("Database '{database}' does not exist."))
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        MygoError::connection(format!(
            "Connection to {host}:{port} timed out. The server may be overloaded or unreachable."
        ))
    } else {
        MygoError::connection(error.to_string())
    }
}

/// Formats a query error the way the mysql client prints them.
fn format_query_error(error: sqlx::Error) -> String {
    let Some(db_error) = error.as_database_error() else {
        return error.to_string();
    };

    match db_error.code() {
        Some(code) => format!("ERROR {}: {}", code, db_error.message()),
        None => format!("ERROR: {}", db_error.message()),
    }
}
