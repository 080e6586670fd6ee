//! Help text constants for mygo commands.

use crate::translate::HelpTopic;

/// Help text displayed for `help`, `\?` and `\help`.
pub const HELP_TEXT: &str = r#"mygo - Unified MySQL-style Database Client
===========================================

General Commands:
  help, \?          Show this help message
  quit, exit, \q    Exit the client
  \x                Toggle expanded output mode

MySQL-style Commands (work on both MySQL and PostgreSQL):
  SHOW DATABASES;                   List all databases
  SHOW TABLES;                      List tables in current database
  SHOW TABLES FROM db;              List tables in specified database
  SHOW FULL TABLES;                 List tables with type
  SHOW COLUMNS FROM table;          Show table columns
  DESC table;                       Describe table structure
  DESCRIBE table;                   Same as DESC
  SHOW CREATE TABLE table;          Show CREATE TABLE statement
  SHOW CREATE DATABASE db;          Show CREATE DATABASE statement
  SHOW INDEX FROM table;            Show table indexes
  SHOW PROCESSLIST;                 Show active connections
  SHOW STATUS;                      Show server status
  SHOW VARIABLES;                   Show server variables
  SHOW VARIABLES LIKE 'pattern';    Show matching variables
  SHOW GRANTS;                      Show current user grants
  SHOW GRANTS FOR user;             Show grants for user
  SHOW TABLE STATUS;                Show table status info
  SHOW TRIGGERS;                    Show triggers
  SHOW FUNCTION STATUS;             Show functions
  SHOW ENGINES;                     Show storage engines
  SHOW CHARSET;                     Show character sets
  SHOW COLLATION;                   Show collations
  USE database;                     Switch to database

PostgreSQL Backslash Commands (also supported):
  \l, \list         List databases
  \dt               List tables
  \dt+              List tables with size
  \d                List all relations
  \d table          Describe table
  \di               List indexes
  \dv               List views
  \df               List functions
  \du               List users/roles
  \dn               List schemas
  \c database       Connect to database

Standard SQL:
  SELECT, INSERT, UPDATE, DELETE, CREATE, DROP, ALTER, etc.

Note: When connected to PostgreSQL, MySQL-style commands are
automatically translated to their PostgreSQL equivalents."#;

/// Help text for `SHOW --help`.
pub const SHOW_HELP_TEXT: &str = r#"SHOW Command Help
=================

Database and Schema:
  SHOW DATABASES;                   List all databases
  SHOW SCHEMAS;                     List all schemas

Tables and Structure:
  SHOW TABLES;                      List tables in current database
  SHOW TABLES FROM db;              List tables in specified database
  SHOW FULL TABLES;                 List tables with type
  SHOW TABLE STATUS;                Show table status info

Column and Index Information:
  SHOW COLUMNS FROM table;          Show table columns
  SHOW FULL COLUMNS FROM table;     Show detailed column info
  SHOW INDEX FROM table;            Show table indexes
  SHOW CREATE TABLE table;          Show CREATE TABLE statement

Server Information:
  SHOW STATUS;                      Show server status
  SHOW VARIABLES;                   Show server variables
  SHOW VARIABLES LIKE 'pattern';    Show matching variables
  SHOW PROCESSLIST;                 Show active connections

User and Security:
  SHOW GRANTS;                      Show current user grants
  SHOW GRANTS FOR user;             Show grants for user

Other:
  SHOW TRIGGERS;                    Show triggers
  SHOW FUNCTION STATUS;             Show functions
  SHOW ENGINES;                     Show storage engines
  SHOW CHARSET;                     Show character sets
  SHOW COLLATION;                   Show collations
  SHOW WARNINGS;                    Show warnings

Usage:
  SHOW <command> --help             Help for one command
  Example: SHOW CREATE --help, SHOW TABLES --help"#;

/// Help text for `SHOW CREATE --help`.
pub const SHOW_CREATE_HELP_TEXT: &str = r#"SHOW CREATE Command Help
========================

SHOW CREATE TABLE table_name;
SHOW CREATE DATABASE database_name;

Description:
  SHOW CREATE TABLE      Shows the CREATE TABLE statement for a table
  SHOW CREATE DATABASE   Shows the CREATE DATABASE statement for a database

Examples:
  SHOW CREATE TABLE users;
  SHOW CREATE DATABASE mydb;

Note:
  The table or database must exist. On PostgreSQL the statement is
  rebuilt from the system catalogs."#;

/// Help text for `SHOW TABLES --help`.
pub const SHOW_TABLES_HELP_TEXT: &str = r#"SHOW TABLES Command Help
========================

SHOW TABLES;                      List tables in current database
SHOW TABLES FROM database_name;   List tables in specified database
SHOW FULL TABLES;                 List tables with type information

Examples:
  SHOW TABLES;
  SHOW TABLES FROM mydb;
  SHOW FULL TABLES;

Note:
  On PostgreSQL, SHOW TABLES FROM lists the tables of the current
  database under the requested heading."#;

/// Help text for `SHOW COLUMNS --help`, `DESC --help` and `DESCRIBE --help`.
pub const SHOW_COLUMNS_HELP_TEXT: &str = r#"SHOW COLUMNS Command Help
=========================

SHOW COLUMNS FROM table_name;
SHOW FULL COLUMNS FROM table_name;
DESC table_name;
DESCRIBE table_name;

Examples:
  SHOW COLUMNS FROM users;
  SHOW FULL COLUMNS FROM products;
  DESC categories;

Description:
  SHOW COLUMNS FROM        Name, type, null, key, default and extra
  SHOW FULL COLUMNS FROM   Adds collation, privileges and comment
  DESC, DESCRIBE           Shorthand for SHOW COLUMNS FROM

Note:
  The table must exist in the current database."#;

/// Returns the help text for `topic`.
pub fn text(topic: HelpTopic) -> &'static str {
    match topic {
        HelpTopic::General => HELP_TEXT,
        HelpTopic::Show => SHOW_HELP_TEXT,
        HelpTopic::ShowCreate => SHOW_CREATE_HELP_TEXT,
        HelpTopic::ShowTables => SHOW_TABLES_HELP_TEXT,
        HelpTopic::ShowColumns => SHOW_COLUMNS_HELP_TEXT,
    }
}
