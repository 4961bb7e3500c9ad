//! Schema error types.

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by the schema registry and its config loader.
///
/// All of these indicate misconfiguration, not user error; they are fatal to
/// the calling operation.
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    /// Entity name has no registered schema
    #[error("unknown entity '{0}'")]
    SchemaNotFound(String),

    /// Physical table is not mapped to any entity
    #[error("no entity mapped to table '{0}'")]
    TableNotMapped(String),

    /// Registry config could not be read or parsed
    #[error("invalid registry config: {0}")]
    InvalidConfig(String),

    /// Entity registered twice
    #[error("entity '{0}' already registered")]
    DuplicateEntity(String),

    /// Two entities mapped to the same physical table
    #[error("table '{table}' mapped by both '{first}' and '{second}'")]
    DuplicateTable {
        table: String,
        first: String,
        second: String,
    },
}
