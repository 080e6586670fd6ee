//! Query and result types for mygo.
//!
//! Defines the statement handed to a backend and the structures used to
//! represent what comes back.

use std::fmt;
use std::time::Duration;

/// A statement ready to run against a backend.
///
/// Values captured from user input travel in `params` and are bound
/// positionally (`$1`, `$2`, ...) instead of being spliced into `sql`.
/// A query with no params is sent over the simple-query protocol, so it may
/// be any statement the backend accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Statement text.
    pub sql: String,

    /// Positional parameter values.
    pub params: Vec<String>,
}

impl Query {
    /// Creates a query with no bound parameters.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a query with positional parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Returns true if the query carries bound parameters.
    pub fn is_parameterized(&self) -> bool {
        !self.params.is_empty()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql)
    }
}

/// Rows returned by a statement, with their column headings.
///
/// Statements that return no rows (DDL, `USE`, DML) produce a result with
/// no columns.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Headings, in select-list order.
    pub columns: Vec<ColumnInfo>,

    /// Decoded rows, each as long as `columns`.
    pub rows: Vec<Row>,

    /// Wall-clock time spent on the server round trip.
    pub execution_time: Duration,

    /// Rows kept in `rows` after the row cap.
    pub row_count: usize,

    /// Rows the server sent, when known.
    pub total_rows: Option<usize>,

    /// Set when rows past the cap were dropped.
    pub was_truncated: bool,
}

impl QueryResult {
    /// An empty result with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a complete, untruncated result.
    pub fn with_data(columns: Vec<ColumnInfo>, rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        Self {
            columns,
            rows,
            row_count,
            total_rows: Some(row_count),
            ..Self::default()
        }
    }

    pub fn with_execution_time(mut self, duration: Duration) -> Self {
        self.execution_time = duration;
        self
    }

    /// Column headings in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Line to print under a capped result.
    pub fn truncation_warning(&self) -> Option<String> {
        self.was_truncated.then(|| {
            format!(
                "Result truncated: showing {} of {} rows",
                self.row_count,
                self.total_rows.unwrap_or(self.row_count)
            )
        })
    }
}

/// Name and server-reported type of one result column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,

    /// Type name as the backend spells it (`int4`, `VARCHAR`, ...).
    pub data_type: String,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

pub type Row = Vec<Value>;

/// One decoded cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// MySQL `UNSIGNED` integers that may not fit an `i64`.
    UInt(u64),
    Float(f64),
    String(String),
    /// Raw bytes; rendered as text when they are valid UTF-8.
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Text shown for this cell in result tables.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::UInt(u) => u.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Bytes(b) => match std::str::from_utf8(b) {
                Ok(text) => text.to_string(),
                Err(_) => format!("<{} bytes>", b.len()),
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}
