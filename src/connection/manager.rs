//! Connection manager for database lifecycle and switching.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::ConnectionConfig;
use crate::db::{self, DatabaseBackend, DatabaseClient, Query, QueryResult};
use crate::dispatch::ActionTarget;
use crate::error::Result;

/// Opens database clients for a configuration.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Opens a new client for `config`.
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>>;
}

/// Connector backed by the real sqlx clients.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlxConnector;

#[async_trait]
impl Connector for SqlxConnector {
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
        db::connect(config).await
    }
}

/// Owns the live database client and the settings it was opened with.
pub struct ConnectionManager {
    config: ConnectionConfig,
    client: Box<dyn DatabaseClient>,
    connector: Box<dyn Connector>,
}

impl ConnectionManager {
    /// Connects using `config` and the sqlx clients.
    pub async fn connect(config: ConnectionConfig) -> Result<Self> {
        Self::connect_with(config, Box::new(SqlxConnector)).await
    }

    /// Connects using `config` and the given connector.
    pub async fn connect_with(config: ConnectionConfig, connector: Box<dyn Connector>) -> Result<Self> {
        let client = connector.connect(&config).await?;
        Ok(Self {
            config,
            client,
            connector,
        })
    }

    /// Wraps an already-open client.
    pub fn with_client(
        config: ConnectionConfig,
        client: Box<dyn DatabaseClient>,
        connector: Box<dyn Connector>,
    ) -> Self {
        Self {
            config,
            client,
            connector,
        }
    }

    /// Get the active database client.
    pub fn db(&self) -> &dyn DatabaseClient {
        self.client.as_ref()
    }

    /// Returns the settings of the active connection.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Returns the backend of the active connection.
    pub fn backend(&self) -> DatabaseBackend {
        self.client.backend()
    }

    /// Returns the database the active connection was opened on.
    pub fn current_database(&self) -> Option<&str> {
        self.config.database.as_deref()
    }

    /// Reopens the connection on another database.
    ///
    /// The replacement is opened and verified before the current client is
    /// released, so on failure the current client stays live and the
    /// configured database is unchanged.
    pub async fn switch_database(&mut self, name: &str) -> Result<()> {
        let next_config = self.config.with_database(name);

        let next = self.connector.connect(&next_config).await?;
        if let Err(e) = next.ping().await {
            let _ = next.close().await;
            return Err(e);
        }

        let previous = std::mem::replace(&mut self.client, next);
        self.config = next_config;

        if let Err(e) = previous.close().await {
            warn!("Failed to close previous connection: {}", e);
        }

        info!("Switched active database to {}", name);
        Ok(())
    }

    /// Close the active connection.
    pub async fn close(&self) -> Result<()> {
        self.client.close().await
    }
}

#[async_trait]
impl ActionTarget for ConnectionManager {
    fn backend(&self) -> DatabaseBackend {
        ConnectionManager::backend(self)
    }

    async fn execute(&mut self, query: &Query) -> Result<QueryResult> {
        self.client.execute_query(query).await
    }

    async fn set_active_database(&mut self, name: &str) -> Result<()> {
        self.switch_database(name).await
    }
}
