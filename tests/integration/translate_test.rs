//! Translation tests through the public API.

use mygo::db::{DatabaseBackend, Query};
use mygo::error::MygoError;
use mygo::translate::{catalog, translate, ActionKind, HelpTopic, TranslationOutcome};
use pretty_assertions::assert_eq;

fn pg(input: &str) -> TranslationOutcome {
    translate(input, DatabaseBackend::Postgres).unwrap()
}

#[test]
fn test_mysql_input_is_never_rewritten() {
    let inputs = [
        "SHOW TABLES;",
        "  DESC users;  ",
        "\\dt",
        "\\zzz",
        "USE shop;",
        "SELECT * FROM t WHERE a = 'x;y';",
    ];
    for input in inputs {
        assert_eq!(
            translate(input, DatabaseBackend::MySql).unwrap(),
            TranslationOutcome::Query(Query::raw(input)),
            "input: {input:?}"
        );
    }
}

#[test]
fn test_show_vocabulary_on_postgres() {
    let cases = [
        ("SHOW DATABASES;", catalog::DATABASES),
        ("show tables", catalog::TABLES),
        ("SHOW   FULL\tTABLES;", catalog::FULL_TABLES),
        ("SHOW STATUS;", catalog::STATUS),
        ("SHOW PROCESSLIST;", catalog::PROCESSLIST),
        ("SHOW FULL PROCESSLIST;", catalog::PROCESSLIST),
        ("SHOW VARIABLES;", catalog::VARIABLES),
        ("show global variables", catalog::VARIABLES),
        ("SHOW TRIGGERS;", catalog::TRIGGERS),
        ("SHOW FUNCTION STATUS;", catalog::ROUTINES),
        ("SHOW PROCEDURE STATUS;", catalog::ROUTINES),
        ("SHOW WARNINGS;", catalog::WARNINGS),
        ("SHOW ERRORS;", catalog::WARNINGS),
        ("SHOW CHARSET;", catalog::CHARSET),
        ("SHOW CHARACTER SET;", catalog::CHARSET),
        ("SHOW SCHEMAS;", catalog::SCHEMAS),
        ("SELECT USER();", catalog::CURRENT_USER),
        ("SELECT CURRENT_USER();", catalog::CURRENT_USER),
        ("SELECT NOW();", catalog::NOW),
        ("SHOW GRANTS;", catalog::GRANTS),
        ("SHOW TABLE STATUS;", catalog::TABLE_STATUS),
        ("SHOW ENGINES;", catalog::ENGINES),
        ("SHOW COLLATION;", catalog::COLLATION),
        ("SELECT VERSION();", catalog::VERSION),
        ("select database()", catalog::CURRENT_DATABASE),
    ];
    for (input, sql) in cases {
        assert_eq!(pg(input), TranslationOutcome::Query(Query::raw(sql)), "input: {input:?}");
    }
}

#[test]
fn test_table_argument_is_bound_not_spliced() {
    let outcome = pg("DESCRIBE Orders;");
    let query = outcome.as_query().unwrap();
    assert_eq!(query.sql, catalog::COLUMNS);
    assert_eq!(query.params, vec!["Orders".to_string()]);
    assert!(!query.sql.contains("Orders"));
}

#[test]
fn test_variables_like_becomes_regex() {
    let outcome = pg("SHOW VARIABLES LIKE 'shared%';");
    let query = outcome.as_query().unwrap();
    assert_eq!(query.sql, catalog::VARIABLES_MATCHING);
    assert_eq!(query.params, vec!["^shared.*$".to_string()]);
}

#[test]
fn test_session_actions_on_postgres() {
    let use_db = pg("use analytics;");
    let action = use_db.as_special().unwrap();
    assert_eq!(action.kind, ActionKind::UseDatabase);
    assert_eq!(action.first_arg(), Some("analytics"));

    let connect = pg("\\c analytics");
    assert_eq!(connect, use_db);

    assert_eq!(pg("\\q").as_special().unwrap().kind, ActionKind::Quit);
    assert_eq!(pg("\\x").as_special().unwrap().kind, ActionKind::ToggleExpanded);
    assert_eq!(
        pg("SHOW CREATE --help;").as_special().unwrap().kind,
        ActionKind::Help(HelpTopic::ShowCreate)
    );

    let cross = pg("SHOW TABLES IN archive;");
    let action = cross.as_special().unwrap();
    assert_eq!(action.kind, ActionKind::CrossDatabase);
    assert_eq!(action.args, vec!["archive".to_string()]);
}

#[test]
fn test_directives_on_postgres() {
    assert_eq!(pg("\\l"), TranslationOutcome::Query(Query::raw(catalog::DATABASES)));
    assert_eq!(pg("\\dt;"), TranslationOutcome::Query(Query::raw(catalog::DIRECTIVE_TABLES)));

    let describe = pg("\\d users");
    assert_eq!(describe.as_query().unwrap().params, vec!["users".to_string()]);

    assert!(matches!(
        translate("\\unknown", DatabaseBackend::Postgres),
        Err(MygoError::Syntax(_))
    ));
    assert!(matches!(
        translate("\\c", DatabaseBackend::Postgres),
        Err(MygoError::MissingArgument(_))
    ));
}

#[test]
fn test_ordinary_sql_passes_through_trimmed() {
    assert_eq!(
        pg("  SELECT id FROM users WHERE name = 'SHOW TABLES';  "),
        TranslationOutcome::Query(Query::raw(
            "SELECT id FROM users WHERE name = 'SHOW TABLES';"
        ))
    );
    assert_eq!(
        pg("SHOW TABLES extra;"),
        TranslationOutcome::Query(Query::raw("SHOW TABLES extra;"))
    );
}

#[test]
fn test_translation_is_deterministic() {
    for input in ["SHOW TABLES;", "DESC t;", "\\dt+", "USE x;", "SELECT 1;"] {
        assert_eq!(
            translate(input, DatabaseBackend::Postgres).unwrap(),
            translate(input, DatabaseBackend::Postgres).unwrap()
        );
    }
}
