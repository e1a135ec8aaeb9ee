//! Shared fixtures for the row loading integration tests.
//!
//! Provides the student result set used throughout the tests and page sources
//! that replay it in configurable chunks.

pub mod source;
pub mod test_schema;
