//! Live backend tests.
//!
//! PostgreSQL tests need DATABASE_URL; MySQL tests need MYSQL_URL.

use mygo::config::ConnectionConfig;
use mygo::connection::ConnectionManager;
use mygo::db::{DatabaseBackend, Value};
use mygo::error::MygoError;
use mygo::repl::{Repl, Step};
use mygo::translate::{catalog, translate, TranslationOutcome};

async fn manager_from_env(var: &str) -> Option<ConnectionManager> {
    let url = std::env::var(var).ok()?;
    let config = ConnectionConfig::from_connection_string(&url).ok()?;
    ConnectionManager::connect(config).await.ok()
}

fn continued(step: Step) -> String {
    match step {
        Step::Continue(text) => text,
        Step::Exit => panic!("session ended unexpectedly"),
    }
}

#[tokio::test]
async fn test_postgres_catalog_queries_execute() {
    let Some(manager) = manager_from_env("DATABASE_URL").await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    assert_eq!(manager.backend(), DatabaseBackend::Postgres);

    let commands = [
        "SHOW DATABASES;",
        "SHOW TABLES;",
        "SHOW FULL TABLES;",
        "SHOW STATUS;",
        "SHOW VARIABLES LIKE 'max%';",
        "SHOW PROCESSLIST;",
        "SHOW GRANTS;",
        "SHOW TABLE STATUS;",
        "SHOW SCHEMAS;",
        "SHOW TRIGGERS;",
        "SHOW FUNCTION STATUS;",
        "SHOW ENGINES;",
        "SHOW CHARSET;",
        "SHOW COLLATION;",
        "SELECT VERSION();",
        "SELECT USER();",
        "\\l",
        "\\dt+",
        "\\d",
        "\\du",
        "\\dn",
    ];
    for command in commands {
        let outcome = translate(command, DatabaseBackend::Postgres).unwrap();
        let TranslationOutcome::Query(query) = outcome else {
            panic!("expected a query for {command}");
        };
        if let Err(e) = manager.db().execute_query(&query).await {
            panic!("{command} failed: {e}");
        }
    }

    manager.close().await.unwrap();
}

#[tokio::test]
async fn test_postgres_describe_and_show_create() {
    let Some(manager) = manager_from_env("DATABASE_URL").await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let mut repl = Repl::new(manager, None);

    repl.execute("CREATE TEMP TABLE mygo_scratch (id INTEGER NOT NULL, name TEXT);")
        .await
        .unwrap();

    let described = continued(repl.execute("DESC mygo_scratch;").await.unwrap());
    assert!(described.contains("Empty set") || described.contains("| id"));

    let vars = repl.target().db();
    let result = vars
        .execute_query(
            translate("SHOW VARIABLES LIKE 'work_mem';", DatabaseBackend::Postgres)
                .unwrap()
                .as_query()
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0][0], Value::String("work_mem".to_string()));

    repl.target().close().await.unwrap();
}

#[tokio::test]
async fn test_postgres_use_missing_database_keeps_session() {
    let Some(manager) = manager_from_env("DATABASE_URL").await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let before = manager.current_database().map(str::to_string);
    let mut repl = Repl::new(manager, before.clone());

    let error = repl
        .execute("USE mygo_database_that_does_not_exist;")
        .await
        .unwrap_err();
    assert!(matches!(error, MygoError::Connection(_)));
    assert_eq!(repl.session().active_database, before);

    repl.execute("SELECT 1;").await.unwrap();
    repl.target().close().await.unwrap();
}

#[tokio::test]
async fn test_mysql_commands_pass_through() {
    let Some(manager) = manager_from_env("MYSQL_URL").await else {
        eprintln!("Skipping test: MYSQL_URL not set");
        return;
    };
    assert_eq!(manager.backend(), DatabaseBackend::MySql);
    let mut repl = Repl::new(manager, None);

    let text = continued(repl.execute("SHOW DATABASES;").await.unwrap());
    assert!(text.contains("information_schema"));

    let text = continued(repl.execute("USE information_schema;").await.unwrap());
    assert_eq!(text, "Database changed to 'information_schema'\n");
    assert_eq!(repl.prompt(), "mygo [information_schema]> ");

    let text = continued(repl.execute("SELECT DATABASE();").await.unwrap());
    assert!(text.contains("information_schema"));

    repl.target().close().await.unwrap();
}

#[tokio::test]
async fn test_postgres_create_table_keeps_unsized_columns() {
    let Some(manager) = manager_from_env("DATABASE_URL").await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let db = manager.db();

    for statement in [
        "DROP TABLE IF EXISTS mygo_ddl_mixed",
        "DROP TABLE IF EXISTS mygo_ddl_unsized",
        "CREATE TABLE mygo_ddl_mixed (id SERIAL PRIMARY KEY, amount NUMERIC, note VARCHAR, \
         code CHAR(3) NOT NULL DEFAULT 'abc', price NUMERIC(10,2))",
        "CREATE TABLE mygo_ddl_unsized (a NUMERIC, b VARCHAR)",
    ] {
        db.execute_query(&mygo::db::Query::raw(statement)).await.unwrap();
    }

    let mixed = db.execute_query(&catalog::create_table("mygo_ddl_mixed")).await;
    let unsized_cols = db.execute_query(&catalog::create_table("mygo_ddl_unsized")).await;

    for statement in [
        "DROP TABLE IF EXISTS mygo_ddl_mixed",
        "DROP TABLE IF EXISTS mygo_ddl_unsized",
    ] {
        db.execute_query(&mygo::db::Query::raw(statement)).await.unwrap();
    }

    let ddl = mixed.unwrap().rows[0][0].to_display_string();
    assert!(ddl.contains("  id INTEGER NOT NULL"), "{ddl}");
    assert!(ddl.contains("  amount NUMERIC,"), "{ddl}");
    assert!(ddl.contains("  note CHARACTER VARYING,"), "{ddl}");
    assert!(ddl.contains("  code CHAR(3) NOT NULL DEFAULT 'abc'"), "{ddl}");
    assert!(ddl.contains("  price NUMERIC(10,2)"), "{ddl}");

    let ddl = &unsized_cols.unwrap().rows[0][0];
    assert!(!ddl.is_null());
    assert_eq!(
        ddl.to_display_string(),
        "CREATE TABLE mygo_ddl_unsized (\n  a NUMERIC,\n  b CHARACTER VARYING\n);"
    );

    manager.close().await.unwrap();
}

#[tokio::test]
async fn test_postgres_variables_like_ignores_case() {
    let Some(manager) = manager_from_env("DATABASE_URL").await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let outcome = translate("SHOW VARIABLES LIKE 'WORK_MEM';", DatabaseBackend::Postgres).unwrap();
    let result = manager
        .db()
        .execute_query(outcome.as_query().unwrap())
        .await
        .unwrap();
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0][0], Value::String("work_mem".to_string()));

    manager.close().await.unwrap();
}
