//! Error types for mygo.
//!
//! Defines the main error enum used throughout the client.

use thiserror::Error;

/// Main error type for mygo operations.
#[derive(Error, Debug)]
pub enum MygoError {
    /// Database connection errors (host unreachable, auth failed, etc.)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution errors relayed from the backend.
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, bad connection URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A backslash directive that matches no known command.
    #[error("unknown command: {0}")]
    Syntax(String),

    /// A command or special action invoked without its required argument.
    #[error("{0}")]
    MissingArgument(String),

    /// A special action kind the dispatcher does not know.
    #[error("unknown special command: {0}")]
    UnknownAction(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MygoError {
    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a syntax error for an unrecognized directive.
    pub fn syntax(command: impl Into<String>) -> Self {
        Self::Syntax(command.into())
    }

    /// Creates a missing-argument error carrying a usage message.
    pub fn missing_argument(usage: impl Into<String>) -> Self {
        Self::MissingArgument(usage.into())
    }

    /// Creates an unknown-action error for the given kind tag.
    pub fn unknown_action(kind: impl Into<String>) -> Self {
        Self::UnknownAction(kind.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
            Self::Syntax(_) => "Syntax Error",
            Self::MissingArgument(_) => "Missing Argument",
            Self::UnknownAction(_) => "Unknown Action",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using MygoError.
pub type Result<T> = std::result::Result<T, MygoError>;
