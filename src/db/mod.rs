//! Database abstraction layer for mygo.
//!
//! Provides a trait-based interface for database operations, allowing
//! the MySQL and PostgreSQL backends to be used interchangeably.

mod mock;
mod mysql;
mod postgres;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient};
pub use mysql::MySqlClient;
pub use postgres::PostgresClient;
pub use types::{ColumnInfo, Query, QueryResult, Row, Value};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// Query timeout in seconds.
pub(crate) const QUERY_TIMEOUT_SECS: u64 = 30;

/// Maximum rows to return from a query.
pub(crate) const MAX_ROWS: usize = 1000;

/// Maximum number of connection retry attempts.
pub(crate) const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay between retry attempts (doubles each retry).
pub(crate) const RETRY_BASE_DELAY_MS: u64 = 500;

/// Supported database backends.
///
/// MySQL is the native dialect of the command vocabulary; PostgreSQL
/// commands are rewritten before they are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    #[serde(alias = "mariadb")]
    MySql,
    #[serde(alias = "pg", alias = "postgresql")]
    Postgres,
}

impl DatabaseBackend {
    /// Parses a backend from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mysql" | "mariadb" => Some(Self::MySql),
            "pg" | "postgres" | "postgresql" => Some(Self::Postgres),
            _ => None,
        }
    }

    /// Returns the default port for this backend.
    pub fn default_port(&self) -> u16 {
        match self {
            Self::MySql => 3306,
            Self::Postgres => 5432,
        }
    }

    /// Returns the URL scheme for this backend.
    pub fn url_scheme(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
        }
    }

    /// Returns the product name shown to users.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MySql => "MySQL",
            Self::Postgres => "PostgreSQL",
        }
    }
}

impl fmt::Display for DatabaseBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Creates a database client for the given backend and configuration.
///
/// This is the central factory function for database connections.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    match config.backend {
        DatabaseBackend::MySql => {
            let client = MySqlClient::connect(config).await?;
            Ok(Box::new(client))
        }
        DatabaseBackend::Postgres => {
            let client = PostgresClient::connect(config).await?;
            Ok(Box::new(client))
        }
    }
}

/// Trait defining the interface for database clients.
///
/// All database operations are async and return Results with MygoError.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Returns which backend this client talks to.
    fn backend(&self) -> DatabaseBackend;

    /// Executes a query and returns the results.
    async fn execute_query(&self, query: &Query) -> Result<QueryResult>;

    /// Verifies the connection is usable.
    async fn ping(&self) -> Result<()> {
        self.execute_query(&Query::raw("SELECT 1")).await.map(|_| ())
    }

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}

/// Determines if a connection error is transient and worth retrying.
pub(crate) fn is_transient_error(error: &sqlx::Error) -> bool {
    let error_str = error.to_string().to_lowercase();

    // Authentication and database-not-found errors are never transient
    if error_str.contains("password authentication failed")
        || error_str.contains("access denied")
        || error_str.contains("authentication failed")
        || error_str.contains("does not exist")
        || error_str.contains("unknown database")
        || error_str.contains("ssl")
        || error_str.contains("tls")
    {
        return false;
    }

    error_str.contains("connection refused")
        || error_str.contains("timed out")
        || error_str.contains("timeout")
        || error_str.contains("temporarily unavailable")
        || error_str.contains("connection reset")
        || error_str.contains("broken pipe")
}
