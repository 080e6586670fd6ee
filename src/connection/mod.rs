//! Connection management for mygo.
//!
//! Owns the live client and reopens it when the active database changes.

pub mod manager;

pub use manager::{ConnectionManager, Connector, SqlxConnector};
