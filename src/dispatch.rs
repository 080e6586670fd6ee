//! Special action dispatcher.
//!
//! Carries out the session-level actions produced by translation. The
//! dispatcher keeps no state of its own; everything it changes lives in the
//! [`Session`] it is handed, and every query it needs goes through an
//! [`ActionTarget`].

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::{DatabaseBackend, Query, QueryResult};
use crate::error::{MygoError, Result};
use crate::help;
use crate::translate::{catalog, ActionKind, SpecialAction};

/// Per-session state changed by special actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Database the session is using, if any.
    pub active_database: Option<String>,
    /// Whether results are shown one field per line.
    pub expanded: bool,
}

impl Session {
    /// Creates a session on `database` with tabular output.
    pub fn new(database: Option<String>) -> Self {
        Self {
            active_database: database,
            expanded: false,
        }
    }
}

/// What the dispatcher needs from the live connection.
#[async_trait]
pub trait ActionTarget: Send {
    /// Backend of the live connection.
    fn backend(&self) -> DatabaseBackend;

    /// Runs a query on the live connection.
    async fn execute(&mut self, query: &Query) -> Result<QueryResult>;

    /// Makes `name` the active database, reconnecting if needed.
    async fn set_active_database(&mut self, name: &str) -> Result<()>;
}

/// Result of a dispatched action, for the caller to present.
#[derive(Debug, Clone)]
pub enum DispatchOutput {
    /// Rows to render, optionally preceded by a heading line.
    Rows {
        title: Option<String>,
        result: QueryResult,
    },
    /// A one-line status message.
    Message(String),
    /// Static help text.
    Help(&'static str),
    /// The session should end.
    Exit,
}

/// Performs `action` against `session` and `target`.
pub async fn dispatch(
    action: &SpecialAction,
    session: &mut Session,
    target: &mut dyn ActionTarget,
) -> Result<DispatchOutput> {
    debug!("Dispatching {} with {:?}", action.kind, action.args);

    match action.kind {
        ActionKind::UseDatabase => {
            let name = single_arg(action, "database name required")?;
            target.set_active_database(name).await?;
            session.active_database = Some(name.to_string());
            info!("Database changed to {}", name);
            Ok(DispatchOutput::Message(format!(
                "Database changed to '{name}'"
            )))
        }

        ActionKind::ShowCreateTable => {
            let table = single_arg(action, "table name required")?;
            if target.backend() == DatabaseBackend::MySql {
                let result = target.execute(&catalog::native_create_table(table)).await?;
                return Ok(DispatchOutput::Rows {
                    title: None,
                    result,
                });
            }
            let result = target.execute(&catalog::create_table(table)).await?;
            Ok(DispatchOutput::Rows {
                title: Some(format!("Table: {table}")),
                result,
            })
        }

        ActionKind::ShowCreateDatabase => {
            let database = single_arg(action, "database name required")?;
            if target.backend() == DatabaseBackend::MySql {
                let result = target
                    .execute(&catalog::native_create_database(database))
                    .await?;
                return Ok(DispatchOutput::Rows {
                    title: None,
                    result,
                });
            }
            let result = target.execute(&catalog::create_database(database)).await?;
            Ok(DispatchOutput::Rows {
                title: Some(format!("Database: {database}")),
                result,
            })
        }

        ActionKind::CrossDatabase => {
            let database = single_arg(action, "database name required")?;
            let query = if target.backend() == DatabaseBackend::MySql {
                Query::raw(format!(
                    "SHOW TABLES FROM {}",
                    catalog::quote_mysql_ident(database)
                ))
            } else {
                // PostgreSQL cannot read another database's catalog over this connection.
                debug!("Listing tables of the current database for '{}'", database);
                catalog::tables_in(database)
            };
            let result = target.execute(&query).await?;
            Ok(DispatchOutput::Rows {
                title: None,
                result,
            })
        }

        ActionKind::Quit => Ok(DispatchOutput::Exit),

        ActionKind::Help(topic) => Ok(DispatchOutput::Help(help::text(topic))),

        ActionKind::ToggleExpanded => {
            session.expanded = !session.expanded;
            let state = if session.expanded { "on" } else { "off" };
            Ok(DispatchOutput::Message(format!(
                "Expanded display is {state}."
            )))
        }
    }
}

/// Looks up the action for a tag and dispatches it.
///
/// Fails with [`MygoError::UnknownAction`] for a tag no action carries.
pub async fn dispatch_tag(
    tag: &str,
    args: Vec<String>,
    session: &mut Session,
    target: &mut dyn ActionTarget,
) -> Result<DispatchOutput> {
    let kind: ActionKind = tag.parse()?;
    dispatch(&SpecialAction::with_args(kind, args), session, target).await
}

fn single_arg<'a>(action: &'a SpecialAction, usage: &str) -> Result<&'a str> {
    match action.args.as_slice() {
        [arg] => Ok(arg.as_str()),
        _ => Err(MygoError::missing_argument(usage)),
    }
}
