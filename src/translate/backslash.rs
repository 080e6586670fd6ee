//! psql-style backslash directives.

use super::catalog;
use super::{ActionKind, HelpTopic, SpecialAction, TranslationOutcome};
use crate::db::Query;
use crate::error::{MygoError, Result};

/// Translates a directive such as `\dt` or `\c mydb`.
///
/// `input` is trimmed and has no terminator. Only the first two
/// whitespace-separated tokens are significant.
pub(super) fn translate(input: &str) -> Result<TranslationOutcome> {
    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let argument = parts.next();

    let query = |sql: &str| -> Result<TranslationOutcome> {
        Ok(TranslationOutcome::Query(Query::raw(sql)))
    };
    let action = |kind: ActionKind| -> Result<TranslationOutcome> {
        Ok(TranslationOutcome::Special(SpecialAction::new(kind)))
    };

    match command {
        "\\l" | "\\list" => query(catalog::DATABASES),
        "\\dt" => query(catalog::DIRECTIVE_TABLES),
        "\\dt+" => query(catalog::DIRECTIVE_TABLES_WITH_SIZE),
        "\\d" => match argument {
            Some(table) => Ok(TranslationOutcome::Query(Query::with_params(
                catalog::DIRECTIVE_DESCRIBE,
                vec![table.to_string()],
            ))),
            None => query(catalog::DIRECTIVE_RELATIONS),
        },
        "\\di" => query(catalog::DIRECTIVE_INDEXES),
        "\\dv" => query(catalog::DIRECTIVE_VIEWS),
        "\\df" => query(catalog::DIRECTIVE_FUNCTIONS),
        "\\du" => query(catalog::DIRECTIVE_ROLES),
        "\\dn" => query(catalog::DIRECTIVE_SCHEMAS),
        "\\c" | "\\connect" => match argument {
            Some(database) => Ok(TranslationOutcome::Special(SpecialAction::with_args(
                ActionKind::UseDatabase,
                vec![database.to_string()],
            ))),
            None => Err(MygoError::missing_argument("usage: \\c database_name")),
        },
        "\\q" | "\\quit" => action(ActionKind::Quit),
        "\\?" | "\\help" => action(ActionKind::Help(HelpTopic::General)),
        "\\x" => action(ActionKind::ToggleExpanded),
        other => Err(MygoError::syntax(other)),
    }
}
