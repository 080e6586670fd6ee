//! mygo - A unified MySQL-style client for MySQL and PostgreSQL.
//!
//! This library exposes the core modules for use in integration tests.

pub mod cli;
pub mod config;
pub mod connection;
pub mod db;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod logging;
pub mod render;
pub mod repl;
pub mod translate;
