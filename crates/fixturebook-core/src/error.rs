//! Error types for fixturebook-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fixturebook-core
#[derive(Debug, Error)]
pub enum Error {
    /// Declared columns do not share a common row count
    #[error("Schema mismatch: column '{column}' has {actual} values, expected {expected}")]
    SchemaMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Column name is not part of the test-case schema
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Column declared more than once
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Required column was never declared
    #[error("Missing column: {0}")]
    MissingColumn(String),
}
