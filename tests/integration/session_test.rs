//! Session tests: translation, dispatch and rendering over a connection
//! manager backed by in-memory clients.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mygo::config::ConnectionConfig;
use mygo::connection::{ConnectionManager, Connector};
use mygo::db::{
    ColumnInfo, DatabaseBackend, DatabaseClient, MockDatabaseClient, Query, QueryResult, Value,
};
use mygo::error::{MygoError, Result};
use mygo::repl::{LineBuffer, Repl, Step};
use mygo::translate::catalog;
use pretty_assertions::assert_eq;

/// A client that shares its mock so tests can inspect it after handing it over.
struct SharedClient(Arc<MockDatabaseClient>);

#[async_trait]
impl DatabaseClient for SharedClient {
    fn backend(&self) -> DatabaseBackend {
        self.0.backend()
    }

    async fn execute_query(&self, query: &Query) -> Result<QueryResult> {
        self.0.execute_query(query).await
    }

    async fn close(&self) -> Result<()> {
        self.0.close().await
    }
}

/// Connector that opens fresh mocks and records the databases it was asked for.
#[derive(Clone)]
struct MockConnector {
    backend: DatabaseBackend,
    requested: Arc<Mutex<Vec<Option<String>>>>,
    missing: Option<String>,
}

impl MockConnector {
    fn new(backend: DatabaseBackend) -> Self {
        Self {
            backend,
            requested: Arc::new(Mutex::new(Vec::new())),
            missing: None,
        }
    }

    fn requested(&self) -> Vec<Option<String>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
        self.requested.lock().unwrap().push(config.database.clone());
        if config.database.is_some() && config.database == self.missing {
            return Err(MygoError::connection(format!(
                "Database '{}' does not exist.",
                config.database.clone().unwrap_or_default()
            )));
        }
        Ok(Box::new(MockDatabaseClient::new(self.backend)))
    }
}

fn manager_on(
    backend: DatabaseBackend,
    mock: MockDatabaseClient,
    connector: MockConnector,
) -> (ConnectionManager, Arc<MockDatabaseClient>) {
    let shared = Arc::new(mock);
    let mut config = ConnectionConfig::new(backend);
    config.database = Some("shop".to_string());
    let manager = ConnectionManager::with_client(
        config,
        Box::new(SharedClient(Arc::clone(&shared))),
        Box::new(connector),
    );
    (manager, shared)
}

fn continued(step: Step) -> String {
    match step {
        Step::Continue(text) => text,
        Step::Exit => panic!("session ended unexpectedly"),
    }
}

#[tokio::test]
async fn test_show_tables_runs_catalog_query_on_postgres() {
    let tables = QueryResult::with_data(
        vec![ColumnInfo::new("Tables_in_database", "name")],
        vec![vec![Value::from("orders")], vec![Value::from("users")]],
    );
    let mock = MockDatabaseClient::new(DatabaseBackend::Postgres).with_response("pg_tables", tables);
    let (manager, shared) = manager_on(
        DatabaseBackend::Postgres,
        mock,
        MockConnector::new(DatabaseBackend::Postgres),
    );
    let mut repl = Repl::new(manager, Some("shop".to_string()));

    let text = continued(repl.execute("SHOW TABLES;").await.unwrap());

    assert_eq!(shared.executed(), vec![Query::raw(catalog::TABLES)]);
    assert!(text.contains("| orders "));
    assert!(text.ends_with("2 row(s) in set\n"));
}

#[tokio::test]
async fn test_show_tables_passes_through_on_mysql() {
    let (manager, shared) = manager_on(
        DatabaseBackend::MySql,
        MockDatabaseClient::new(DatabaseBackend::MySql),
        MockConnector::new(DatabaseBackend::MySql),
    );
    let mut repl = Repl::new(manager, Some("shop".to_string()));

    repl.execute("SHOW TABLES;").await.unwrap();

    assert_eq!(shared.executed(), vec![Query::raw("SHOW TABLES;")]);
}

#[tokio::test]
async fn test_use_reconnects_and_updates_prompt() {
    let connector = MockConnector::new(DatabaseBackend::Postgres);
    let (manager, shared) = manager_on(
        DatabaseBackend::Postgres,
        MockDatabaseClient::new(DatabaseBackend::Postgres),
        connector.clone(),
    );
    let mut repl = Repl::new(manager, Some("shop".to_string()));
    assert_eq!(repl.prompt(), "mygo [shop]> ");

    let text = continued(repl.execute("USE analytics;").await.unwrap());

    assert_eq!(text, "Database changed to 'analytics'\n");
    assert_eq!(repl.prompt(), "mygo [analytics]> ");
    assert_eq!(connector.requested(), vec![Some("analytics".to_string())]);
    assert_eq!(repl.target().current_database(), Some("analytics"));
    assert!(shared.is_closed());
}

#[tokio::test]
async fn test_failed_use_keeps_current_connection() {
    let mut connector = MockConnector::new(DatabaseBackend::Postgres);
    connector.missing = Some("nope".to_string());
    let (manager, shared) = manager_on(
        DatabaseBackend::Postgres,
        MockDatabaseClient::new(DatabaseBackend::Postgres),
        connector,
    );
    let mut repl = Repl::new(manager, Some("shop".to_string()));

    let error = repl.execute("\\c nope").await.unwrap_err();

    assert!(matches!(error, MygoError::Connection(_)));
    assert_eq!(repl.prompt(), "mygo [shop]> ");
    assert_eq!(repl.target().current_database(), Some("shop"));
    assert!(!shared.is_closed());

    repl.execute("SELECT 1;").await.unwrap();
    assert_eq!(shared.executed().last(), Some(&Query::raw("SELECT 1;")));
}

#[tokio::test]
async fn test_show_create_table_on_postgres_has_title() {
    let ddl = QueryResult::with_data(
        vec![ColumnInfo::new("Create Table", "text")],
        vec![vec![Value::from("CREATE TABLE users (\n  id INTEGER NOT NULL\n);")]],
    );
    let mock = MockDatabaseClient::new(DatabaseBackend::Postgres).with_response("string_agg", ddl);
    let (manager, shared) = manager_on(
        DatabaseBackend::Postgres,
        mock,
        MockConnector::new(DatabaseBackend::Postgres),
    );
    let mut repl = Repl::new(manager, None);

    let text = continued(repl.execute("SHOW CREATE TABLE users;").await.unwrap());

    assert!(text.starts_with("Table: users\n+"));
    assert!(text.contains("| CREATE TABLE users ("));
    let executed = shared.executed();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].params, vec!["users".to_string()]);
}

#[tokio::test]
async fn test_expanded_toggle_changes_rendering() {
    let (manager, _shared) = manager_on(
        DatabaseBackend::Postgres,
        MockDatabaseClient::new(DatabaseBackend::Postgres),
        MockConnector::new(DatabaseBackend::Postgres),
    );
    let mut repl = Repl::new(manager, None);

    let text = continued(repl.execute("\\x").await.unwrap());
    assert_eq!(text, "Expanded display is on.\n");
    assert!(repl.session().expanded);

    let text = continued(repl.execute("SELECT 42;").await.unwrap());
    assert!(text.starts_with("*************************** 1. row ***************************\n"));
}

#[tokio::test]
async fn test_multi_line_command_and_quit() {
    let (manager, shared) = manager_on(
        DatabaseBackend::Postgres,
        MockDatabaseClient::new(DatabaseBackend::Postgres),
        MockConnector::new(DatabaseBackend::Postgres),
    );
    let mut repl = Repl::new(manager, None);
    let mut buffer = LineBuffer::new();

    assert!(repl.feed(&mut buffer, "SHOW").await.is_none());
    assert!(buffer.is_pending());
    let step = repl.feed(&mut buffer, "DATABASES;").await.unwrap().unwrap();
    assert!(matches!(step, Step::Continue(_)));
    assert_eq!(shared.executed(), vec![Query::raw(catalog::DATABASES)]);

    let step = repl.feed(&mut buffer, "\\q").await.unwrap().unwrap();
    assert_eq!(step, Step::Exit);
}

#[tokio::test]
async fn test_unknown_directive_reports_syntax_error() {
    let (manager, shared) = manager_on(
        DatabaseBackend::Postgres,
        MockDatabaseClient::new(DatabaseBackend::Postgres),
        MockConnector::new(DatabaseBackend::Postgres),
    );
    let mut repl = Repl::new(manager, None);

    let error = repl.execute("\\zz").await.unwrap_err();

    assert!(matches!(error, MygoError::Syntax(_)));
    assert!(shared.executed().is_empty());
}
