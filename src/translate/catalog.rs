//! PostgreSQL catalog queries standing in for MySQL `SHOW` commands.
//!
//! Output columns carry MySQL's column headings. Queries that take a
//! captured name bind it as `$1`; columns of those queries are cast to text
//! so they decode under the binary protocol.

use crate::db::Query;

pub const DATABASES: &str = r#"SELECT datname AS "Database"
FROM pg_database
WHERE datistemplate = false
ORDER BY datname"#;

pub const TABLES: &str = r#"SELECT tablename AS "Tables_in_database"
FROM pg_tables
WHERE schemaname = 'public'
ORDER BY tablename"#;

pub const FULL_TABLES: &str = r#"SELECT tablename AS "Tables_in_database",
       'BASE TABLE' AS "Table_type"
FROM pg_tables
WHERE schemaname = 'public'
ORDER BY tablename"#;

pub const COLUMNS: &str = r#"SELECT column_name::text AS "Field",
       data_type::text AS "Type",
       CASE WHEN is_nullable = 'YES' THEN 'YES' ELSE 'NO' END AS "Null",
       CASE WHEN column_default LIKE 'nextval%' THEN 'PRI' ELSE '' END AS "Key",
       column_default::text AS "Default",
       CASE WHEN column_default LIKE 'nextval%' THEN 'auto_increment' ELSE '' END AS "Extra"
FROM information_schema.columns
WHERE table_schema = 'public' AND table_name::text = $1
ORDER BY ordinal_position"#;

pub const FULL_COLUMNS: &str = r#"SELECT column_name::text AS "Field",
       data_type::text AS "Type",
       collation_name::text AS "Collation",
       CASE WHEN is_nullable = 'YES' THEN 'YES' ELSE 'NO' END AS "Null",
       '' AS "Key",
       column_default::text AS "Default",
       '' AS "Extra",
       'select,insert,update,references' AS "Privileges",
       '' AS "Comment"
FROM information_schema.columns
WHERE table_schema = 'public' AND table_name::text = $1
ORDER BY ordinal_position"#;

pub const INDEXES: &str = r#"SELECT tablename::text AS "Table",
       indexname::text AS "Key_name",
       indexdef AS "Index_definition"
FROM pg_indexes
WHERE schemaname = 'public' AND tablename::text = $1
ORDER BY indexname"#;

pub const STATUS: &str = r#"SELECT name AS "Variable_name", setting AS "Value"
FROM pg_settings
ORDER BY name
LIMIT 50"#;

pub const VARIABLES: &str = r#"SELECT name AS "Variable_name", setting AS "Value"
FROM pg_settings
ORDER BY name"#;

pub const VARIABLES_MATCHING: &str = r#"SELECT name AS "Variable_name", setting AS "Value"
FROM pg_settings
WHERE name ~* $1
ORDER BY name"#;

pub const PROCESSLIST: &str = r#"SELECT pid AS "Id",
       usename AS "User",
       client_addr AS "Host",
       datname AS "db",
       state AS "Command",
       EXTRACT(EPOCH FROM (now() - query_start))::int AS "Time",
       state AS "State",
       query AS "Info"
FROM pg_stat_activity
WHERE pid <> pg_backend_pid()"#;

pub const GRANTS: &str = r#"SELECT grantee AS "User",
       privilege_type AS "Privilege",
       table_schema || '.' || table_name AS "On"
FROM information_schema.role_table_grants
WHERE grantee = current_user"#;

pub const GRANTS_FOR: &str = r#"SELECT grantee::text AS "User",
       privilege_type::text AS "Privilege",
       (table_schema || '.' || table_name)::text AS "On"
FROM information_schema.role_table_grants
WHERE grantee::text = $1"#;

pub const TABLE_STATUS: &str = r#"SELECT s.relname AS "Name",
       CASE c.relkind WHEN 'r' THEN 'BASE TABLE' WHEN 'p' THEN 'PARTITIONED TABLE' END AS "Engine",
       pg_size_pretty(pg_total_relation_size(s.relid)) AS "Data_length",
       s.n_live_tup AS "Rows"
FROM pg_stat_user_tables s
JOIN pg_class c ON c.oid = s.relid
WHERE s.schemaname = 'public'
ORDER BY s.relname"#;

pub const SCHEMAS: &str = r#"SELECT schema_name AS "Database"
FROM information_schema.schemata
ORDER BY schema_name"#;

pub const TRIGGERS: &str = r#"SELECT trigger_name AS "Trigger",
       event_manipulation AS "Event",
       event_object_table AS "Table",
       action_statement AS "Statement",
       action_timing AS "Timing"
FROM information_schema.triggers
WHERE trigger_schema = 'public'"#;

pub const ROUTINES: &str = r#"SELECT routine_name AS "Name",
       routine_type AS "Type",
       routine_schema AS "Db",
       external_language AS "Language"
FROM information_schema.routines
WHERE routine_schema = 'public'"#;

pub const ENGINES: &str = r#"SELECT 'PostgreSQL' AS "Engine",
       'DEFAULT' AS "Support",
       'PostgreSQL native storage' AS "Comment""#;

pub const CHARSET: &str = r#"SELECT pg_encoding_to_char(encoding) AS "Charset",
       pg_encoding_to_char(encoding) AS "Description",
       datcollate AS "Default collation"
FROM pg_database
WHERE datname = current_database()"#;

pub const COLLATION: &str = r#"SELECT collname AS "Collation",
       pg_encoding_to_char(collencoding) AS "Charset"
FROM pg_collation
ORDER BY collname
LIMIT 50"#;

pub const WARNINGS: &str = r#"SELECT 'Note' AS "Level",
       0 AS "Code",
       'PostgreSQL does not store warnings/errors like MySQL' AS "Message""#;

pub const CURRENT_DATABASE: &str = r#"SELECT current_database() AS "database()""#;

pub const VERSION: &str = r#"SELECT version() AS "version()""#;

pub const CURRENT_USER: &str = r#"SELECT current_user AS "user()""#;

pub const NOW: &str = r#"SELECT now() AS "now()""#;

// Backslash directives, psql-style headings.

pub const DIRECTIVE_TABLES: &str = r#"SELECT tablename AS "Tables"
FROM pg_tables
WHERE schemaname = 'public'
ORDER BY tablename"#;

pub const DIRECTIVE_TABLES_WITH_SIZE: &str = r#"SELECT tablename AS "Name",
       pg_size_pretty(pg_total_relation_size((quote_ident(schemaname) || '.' || quote_ident(tablename))::regclass)) AS "Size"
FROM pg_tables
WHERE schemaname = 'public'
ORDER BY tablename"#;

pub const DIRECTIVE_DESCRIBE: &str = r#"SELECT column_name::text AS "Column",
       data_type::text AS "Type",
       CASE WHEN is_nullable = 'YES' THEN 'YES' ELSE 'NO' END AS "Nullable"
FROM information_schema.columns
WHERE table_schema = 'public' AND table_name::text = $1
ORDER BY ordinal_position"#;

pub const DIRECTIVE_RELATIONS: &str = r#"SELECT tablename AS "Name", 'table' AS "Type" FROM pg_tables WHERE schemaname = 'public'
UNION ALL
SELECT viewname AS "Name", 'view' AS "Type" FROM pg_views WHERE schemaname = 'public'
ORDER BY "Name""#;

pub const DIRECTIVE_INDEXES: &str = r#"SELECT indexname AS "Index", tablename AS "Table"
FROM pg_indexes
WHERE schemaname = 'public'
ORDER BY tablename, indexname"#;

pub const DIRECTIVE_VIEWS: &str = r#"SELECT viewname AS "View"
FROM pg_views
WHERE schemaname = 'public'
ORDER BY viewname"#;

pub const DIRECTIVE_FUNCTIONS: &str = r#"SELECT routine_name AS "Function", data_type AS "Return Type"
FROM information_schema.routines
WHERE routine_schema = 'public' AND routine_type = 'FUNCTION'"#;

pub const DIRECTIVE_ROLES: &str = r#"SELECT rolname AS "Role",
       CASE WHEN rolsuper THEN 'Superuser' ELSE '' END AS "Attributes"
FROM pg_roles
ORDER BY rolname"#;

pub const DIRECTIVE_SCHEMAS: &str = r#"SELECT schema_name AS "Schema"
FROM information_schema.schemata
ORDER BY schema_name"#;

const CREATE_TABLE: &str = r#"SELECT 'CREATE TABLE ' || $1::text || ' (' || E'\n' ||
       string_agg(
           '  ' || column_name || ' ' ||
           CASE
               WHEN data_type = 'character varying' AND character_maximum_length IS NOT NULL
                   THEN 'VARCHAR(' || character_maximum_length || ')'
               WHEN data_type = 'character' AND character_maximum_length IS NOT NULL
                   THEN 'CHAR(' || character_maximum_length || ')'
               WHEN data_type = 'numeric' AND numeric_precision IS NOT NULL
                   THEN 'NUMERIC(' || numeric_precision || ',' || COALESCE(numeric_scale, 0) || ')'
               ELSE UPPER(data_type)
           END ||
           CASE WHEN is_nullable = 'NO' THEN ' NOT NULL' ELSE '' END ||
           CASE WHEN column_default IS NOT NULL THEN ' DEFAULT ' || column_default ELSE '' END,
           ',' || E'\n'
           ORDER BY ordinal_position
       ) || E'\n);' AS "Create Table"
FROM information_schema.columns
WHERE table_schema = 'public' AND table_name::text = $1
GROUP BY table_name"#;

const CREATE_DATABASE: &str = r#"SELECT 'CREATE DATABASE ' || datname ||
       ' WITH OWNER = ' || pg_catalog.pg_get_userbyid(datdba) ||
       ' ENCODING = ''' || pg_encoding_to_char(encoding) || '''' ||
       CASE WHEN datcollate IS NOT NULL THEN ' LC_COLLATE = ''' || datcollate || '''' ELSE '' END ||
       CASE WHEN datctype IS NOT NULL THEN ' LC_CTYPE = ''' || datctype || '''' ELSE '' END ||
       ';' AS "Create Database"
FROM pg_database
WHERE datname::text = $1"#;

/// Quotes a PostgreSQL identifier, doubling embedded quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quotes a MySQL identifier with backticks, doubling embedded backticks.
pub fn quote_mysql_ident(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Lists public tables under a `Tables_in_<database>` heading.
///
/// The listing always comes from the connected database; `database` only
/// names the column.
pub fn tables_in(database: &str) -> Query {
    Query::raw(format!(
        "SELECT tablename AS {}\nFROM pg_tables\nWHERE schemaname = 'public'\nORDER BY tablename",
        quote_ident(&format!("Tables_in_{database}"))
    ))
}

/// Builds `CREATE TABLE` text for `table` from the column catalog.
pub fn create_table(table: &str) -> Query {
    Query::with_params(CREATE_TABLE, vec![table.to_string()])
}

/// Builds `CREATE DATABASE` text for `database` from `pg_database`.
pub fn create_database(database: &str) -> Query {
    Query::with_params(CREATE_DATABASE, vec![database.to_string()])
}

/// The server's own `SHOW CREATE TABLE`.
pub fn native_create_table(table: &str) -> Query {
    Query::raw(format!("SHOW CREATE TABLE {}", quote_mysql_ident(table)))
}

/// The server's own `SHOW CREATE DATABASE`.
pub fn native_create_database(database: &str) -> Query {
    Query::raw(format!(
        "SHOW CREATE DATABASE {}",
        quote_mysql_ident(database)
    ))
}
