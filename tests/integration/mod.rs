//! Integration tests for mygo.

pub mod backend_test;
pub mod session_test;
pub mod translate_test;
