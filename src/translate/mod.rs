//! Command translation for mygo.
//!
//! Recognizes the MySQL-flavored command vocabulary and rewrites it for the
//! connected backend. Every input produces exactly one [`TranslationOutcome`]:
//! either a query to run or a [`SpecialAction`] the session must carry out.
//!
//! Translation is pure. It never touches the session or the network, so the
//! same input and backend always produce the same outcome.

mod backslash;
pub mod catalog;
pub mod pattern;
mod rules;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::db::{DatabaseBackend, Query};
use crate::error::{MygoError, Result};

/// Marker that introduces a one-line directive such as `\dt`.
pub const DIRECTIVE_MARKER: char = '\\';

/// Statement terminator.
pub const TERMINATOR: char = ';';

/// Which help overlay to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpTopic {
    /// Full command reference.
    General,
    /// `SHOW --help`.
    Show,
    /// `SHOW CREATE --help`.
    ShowCreate,
    /// `SHOW TABLES --help`.
    ShowTables,
    /// `SHOW COLUMNS --help`, `DESC --help`.
    ShowColumns,
}

/// Kinds of session-level actions produced by translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Reconnect to another database. Args: `[database]`.
    UseDatabase,
    /// Produce a `CREATE TABLE` statement. Args: `[table]`.
    ShowCreateTable,
    /// Produce a `CREATE DATABASE` statement. Args: `[database]`.
    ShowCreateDatabase,
    /// List the tables of a named database. Args: `[database]`.
    CrossDatabase,
    /// End the session.
    Quit,
    /// Print a static help text.
    Help(HelpTopic),
    /// Flip between tabular and expanded output.
    ToggleExpanded,
}

impl ActionKind {
    /// Every kind, in declaration order.
    pub const ALL: [ActionKind; 11] = [
        ActionKind::UseDatabase,
        ActionKind::ShowCreateTable,
        ActionKind::ShowCreateDatabase,
        ActionKind::CrossDatabase,
        ActionKind::Quit,
        ActionKind::Help(HelpTopic::General),
        ActionKind::Help(HelpTopic::Show),
        ActionKind::Help(HelpTopic::ShowCreate),
        ActionKind::Help(HelpTopic::ShowTables),
        ActionKind::Help(HelpTopic::ShowColumns),
        ActionKind::ToggleExpanded,
    ];

    /// Returns the stable tag for this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::UseDatabase => "use_database",
            Self::ShowCreateTable => "show_create_table",
            Self::ShowCreateDatabase => "show_create_database",
            Self::CrossDatabase => "cross_db_query",
            Self::Quit => "quit",
            Self::Help(HelpTopic::General) => "help",
            Self::Help(HelpTopic::Show) => "show_help",
            Self::Help(HelpTopic::ShowCreate) => "show_create_help",
            Self::Help(HelpTopic::ShowTables) => "show_tables_help",
            Self::Help(HelpTopic::ShowColumns) => "show_columns_help",
            Self::ToggleExpanded => "toggle_expanded",
        }
    }

    /// Returns how many arguments this kind requires.
    pub fn required_args(&self) -> usize {
        match self {
            Self::UseDatabase
            | Self::ShowCreateTable
            | Self::ShowCreateDatabase
            | Self::CrossDatabase => 1,
            Self::Quit | Self::Help(_) | Self::ToggleExpanded => 0,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ActionKind {
    type Err = MygoError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|kind| kind.tag() == s)
            .copied()
            .ok_or_else(|| MygoError::unknown_action(s))
    }
}

/// A session-level action plus the arguments captured from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialAction {
    /// What to do.
    pub kind: ActionKind,
    /// Captured arguments, original casing preserved.
    pub args: Vec<String>,
}

impl SpecialAction {
    /// Creates an action with no arguments.
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
        }
    }

    /// Creates an action with the given arguments.
    pub fn with_args(kind: ActionKind, args: Vec<String>) -> Self {
        Self { kind, args }
    }

    /// Returns the first argument, if any.
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

/// Result of translating one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// Run this query and render its rows.
    Query(Query),
    /// Hand this action to the dispatcher.
    Special(SpecialAction),
}

impl TranslationOutcome {
    /// Creates a passthrough outcome carrying `sql` unchanged.
    pub fn passthrough(sql: impl Into<String>) -> Self {
        Self::Query(Query::raw(sql))
    }

    /// Returns the query, if this outcome is one.
    pub fn as_query(&self) -> Option<&Query> {
        match self {
            Self::Query(query) => Some(query),
            Self::Special(_) => None,
        }
    }

    /// Returns the special action, if this outcome is one.
    pub fn as_special(&self) -> Option<&SpecialAction> {
        match self {
            Self::Query(_) => None,
            Self::Special(action) => Some(action),
        }
    }
}

/// Translates commands for one backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translator {
    backend: DatabaseBackend,
}

impl Translator {
    /// Creates a translator targeting `backend`.
    pub fn new(backend: DatabaseBackend) -> Self {
        Self { backend }
    }

    /// Returns the backend this translator targets.
    pub fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    /// Translates one complete command.
    pub fn translate(&self, raw: &str) -> Result<TranslationOutcome> {
        translate(raw, self.backend)
    }
}

/// Translates one complete command for `backend`.
///
/// MySQL input is returned untouched. For PostgreSQL, recognized forms are
/// rewritten, unknown backslash directives fail with [`MygoError::Syntax`],
/// and everything else passes through trimmed.
pub fn translate(raw: &str, backend: DatabaseBackend) -> Result<TranslationOutcome> {
    if backend == DatabaseBackend::MySql {
        return Ok(TranslationOutcome::passthrough(raw));
    }

    let input = raw.trim();
    let stripped = input.strip_suffix(TERMINATOR).unwrap_or(input).trim_end();
    let key = normalize(stripped);

    if let Some((rule, outcome)) = rules::apply(stripped, &key) {
        debug!("Matched rule '{}'", rule);
        return Ok(outcome);
    }

    if stripped.starts_with(DIRECTIVE_MARKER) {
        return backslash::translate(stripped);
    }

    Ok(TranslationOutcome::passthrough(input))
}

/// Upper-cases and collapses whitespace for literal matching.
fn normalize(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
