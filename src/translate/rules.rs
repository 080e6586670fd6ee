//! Ordered rule table for MySQL forms rewritten to PostgreSQL.
//!
//! Rules are tried top to bottom and the first match wins, so a form must
//! come before any broader form that would also accept it.

use std::sync::LazyLock;

use regex::Regex;

use super::catalog;
use super::pattern::like_to_regex;
use super::{ActionKind, HelpTopic, SpecialAction, TranslationOutcome};
use crate::db::Query;

/// How a rule recognizes its input.
enum Shape {
    /// Any of these phrases, compared against the normalized input.
    Exact(&'static [&'static str]),
    /// A case-insensitive anchored pattern whose groups are the captures.
    Pattern(&'static LazyLock<Regex>),
}

/// What a matching rule produces.
enum Produce {
    /// A fixed query.
    Static(&'static str),
    /// A query with the captures bound as `$1`, `$2`, ...
    Bind(&'static str),
    /// A query built from the captures.
    Build(fn(&[String]) -> Query),
    /// A special action carrying the captures as arguments.
    Action(ActionKind),
}

struct Rule {
    name: &'static str,
    shape: Shape,
    produce: Produce,
}

impl Rule {
    fn captures(&self, stripped: &str, key: &str) -> Option<Vec<String>> {
        match self.shape {
            Shape::Exact(phrases) => phrases.contains(&key).then(Vec::new),
            Shape::Pattern(re) => re.captures(stripped).map(|caps| {
                caps.iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str().to_string())
                    .collect()
            }),
        }
    }

    fn outcome(&self, captures: Vec<String>) -> TranslationOutcome {
        match self.produce {
            Produce::Static(sql) => TranslationOutcome::Query(Query::raw(sql)),
            Produce::Bind(sql) => TranslationOutcome::Query(Query::with_params(sql, captures)),
            Produce::Build(build) => TranslationOutcome::Query(build(&captures)),
            Produce::Action(kind) => {
                TranslationOutcome::Special(SpecialAction::with_args(kind, captures))
            }
        }
    }
}

fn anchored(body: &str) -> Regex {
    Regex::new(&format!("(?i)^{body}$")).expect("rule pattern is a valid regex")
}

static TABLES_FROM_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"SHOW\s+TABLES\s+(?:FROM|IN)\s+(\w+)"));
static FULL_COLUMNS_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"SHOW\s+FULL\s+COLUMNS\s+FROM\s+(\w+)"));
static COLUMNS_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"(?:SHOW\s+COLUMNS\s+FROM|DESC|DESCRIBE)\s+(\w+)"));
static CREATE_TABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"SHOW\s+CREATE\s+TABLE\s+(\w+)"));
static CREATE_DATABASE_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"SHOW\s+CREATE\s+DATABASE\s+(\w+)"));
static INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"SHOW\s+(?:INDEX|INDEXES|KEYS)\s+FROM\s+(\w+)"));
static VARIABLES_LIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"SHOW\s+(?:GLOBAL\s+)?VARIABLES\s+LIKE\s+'([^']+)'"));
static GRANTS_FOR_RE: LazyLock<Regex> =
    LazyLock::new(|| anchored(r"SHOW\s+GRANTS\s+FOR\s+'?(\w+)'?(?:@'?[^']*'?)?"));
static USE_RE: LazyLock<Regex> = LazyLock::new(|| anchored(r"USE\s+(\w+)"));

fn variables_matching(captures: &[String]) -> Query {
    let pattern = captures.first().map(String::as_str).unwrap_or_default();
    Query::with_params(catalog::VARIABLES_MATCHING, vec![like_to_regex(pattern)])
}

static RULES: &[Rule] = &[
    Rule {
        name: "show-help",
        shape: Shape::Exact(&["SHOW --HELP"]),
        produce: Produce::Action(ActionKind::Help(HelpTopic::Show)),
    },
    Rule {
        name: "show-create-help",
        shape: Shape::Exact(&["SHOW CREATE --HELP"]),
        produce: Produce::Action(ActionKind::Help(HelpTopic::ShowCreate)),
    },
    Rule {
        name: "show-tables-help",
        shape: Shape::Exact(&["SHOW TABLES --HELP"]),
        produce: Produce::Action(ActionKind::Help(HelpTopic::ShowTables)),
    },
    Rule {
        name: "show-columns-help",
        shape: Shape::Exact(&["SHOW COLUMNS --HELP", "DESC --HELP", "DESCRIBE --HELP"]),
        produce: Produce::Action(ActionKind::Help(HelpTopic::ShowColumns)),
    },
    Rule {
        name: "databases",
        shape: Shape::Exact(&["SHOW DATABASES"]),
        produce: Produce::Static(catalog::DATABASES),
    },
    Rule {
        name: "tables",
        shape: Shape::Exact(&["SHOW TABLES"]),
        produce: Produce::Static(catalog::TABLES),
    },
    Rule {
        name: "full-tables",
        shape: Shape::Exact(&["SHOW FULL TABLES"]),
        produce: Produce::Static(catalog::FULL_TABLES),
    },
    Rule {
        name: "tables-from",
        shape: Shape::Pattern(&TABLES_FROM_RE),
        produce: Produce::Action(ActionKind::CrossDatabase),
    },
    Rule {
        name: "full-columns",
        shape: Shape::Pattern(&FULL_COLUMNS_RE),
        produce: Produce::Bind(catalog::FULL_COLUMNS),
    },
    Rule {
        name: "columns",
        shape: Shape::Pattern(&COLUMNS_RE),
        produce: Produce::Bind(catalog::COLUMNS),
    },
    Rule {
        name: "create-table",
        shape: Shape::Pattern(&CREATE_TABLE_RE),
        produce: Produce::Action(ActionKind::ShowCreateTable),
    },
    Rule {
        name: "create-database",
        shape: Shape::Pattern(&CREATE_DATABASE_RE),
        produce: Produce::Action(ActionKind::ShowCreateDatabase),
    },
    Rule {
        name: "index",
        shape: Shape::Pattern(&INDEX_RE),
        produce: Produce::Bind(catalog::INDEXES),
    },
    Rule {
        name: "status",
        shape: Shape::Exact(&["SHOW STATUS"]),
        produce: Produce::Static(catalog::STATUS),
    },
    Rule {
        name: "variables",
        shape: Shape::Exact(&["SHOW VARIABLES", "SHOW GLOBAL VARIABLES"]),
        produce: Produce::Static(catalog::VARIABLES),
    },
    Rule {
        name: "variables-like",
        shape: Shape::Pattern(&VARIABLES_LIKE_RE),
        produce: Produce::Build(variables_matching),
    },
    Rule {
        name: "processlist",
        shape: Shape::Exact(&["SHOW PROCESSLIST", "SHOW FULL PROCESSLIST"]),
        produce: Produce::Static(catalog::PROCESSLIST),
    },
    Rule {
        name: "grants",
        shape: Shape::Exact(&["SHOW GRANTS"]),
        produce: Produce::Static(catalog::GRANTS),
    },
    Rule {
        name: "grants-for",
        shape: Shape::Pattern(&GRANTS_FOR_RE),
        produce: Produce::Bind(catalog::GRANTS_FOR),
    },
    Rule {
        name: "table-status",
        shape: Shape::Exact(&["SHOW TABLE STATUS"]),
        produce: Produce::Static(catalog::TABLE_STATUS),
    },
    Rule {
        name: "schemas",
        shape: Shape::Exact(&["SHOW SCHEMAS"]),
        produce: Produce::Static(catalog::SCHEMAS),
    },
    Rule {
        name: "triggers",
        shape: Shape::Exact(&["SHOW TRIGGERS"]),
        produce: Produce::Static(catalog::TRIGGERS),
    },
    Rule {
        name: "routines",
        shape: Shape::Exact(&["SHOW FUNCTION STATUS", "SHOW PROCEDURE STATUS"]),
        produce: Produce::Static(catalog::ROUTINES),
    },
    Rule {
        name: "use",
        shape: Shape::Pattern(&USE_RE),
        produce: Produce::Action(ActionKind::UseDatabase),
    },
    Rule {
        name: "engines",
        shape: Shape::Exact(&["SHOW ENGINES"]),
        produce: Produce::Static(catalog::ENGINES),
    },
    Rule {
        name: "charset",
        shape: Shape::Exact(&["SHOW CHARSET", "SHOW CHARACTER SET"]),
        produce: Produce::Static(catalog::CHARSET),
    },
    Rule {
        name: "collation",
        shape: Shape::Exact(&["SHOW COLLATION"]),
        produce: Produce::Static(catalog::COLLATION),
    },
    Rule {
        name: "warnings",
        shape: Shape::Exact(&["SHOW WARNINGS", "SHOW ERRORS"]),
        produce: Produce::Static(catalog::WARNINGS),
    },
    Rule {
        name: "current-database",
        shape: Shape::Exact(&["SELECT DATABASE()"]),
        produce: Produce::Static(catalog::CURRENT_DATABASE),
    },
    Rule {
        name: "version",
        shape: Shape::Exact(&["SELECT VERSION()"]),
        produce: Produce::Static(catalog::VERSION),
    },
    Rule {
        name: "current-user",
        shape: Shape::Exact(&["SELECT USER()", "SELECT CURRENT_USER()"]),
        produce: Produce::Static(catalog::CURRENT_USER),
    },
    Rule {
        name: "now",
        shape: Shape::Exact(&["SELECT NOW()"]),
        produce: Produce::Static(catalog::NOW),
    },
];

/// Applies the first matching rule.
///
/// `stripped` is the trimmed input without its terminator; `key` is the same
/// text upper-cased with whitespace collapsed. Returns the rule name with the
/// outcome.
pub(super) fn apply(stripped: &str, key: &str) -> Option<(&'static str, TranslationOutcome)> {
    RULES.iter().find_map(|rule| {
        rule.captures(stripped, key)
            .map(|captures| (rule.name, rule.outcome(captures)))
    })
}
