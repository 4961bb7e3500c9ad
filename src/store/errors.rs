//! Row store error types.

use thiserror::Error;

/// Result type for row store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by row store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Physical table does not exist
    #[error("table '{0}' not found")]
    TableNotFound(String),

    /// Row index past the end of the table
    #[error("row {row} out of range in table '{table}'")]
    RowOutOfRange { table: String, row: usize },

    /// Column index past the end of the row
    #[error("column {col} out of range in table '{table}' row {row}")]
    ColumnOutOfRange { table: String, row: usize, col: usize },

    /// Underlying I/O failure; propagated, never retried at this layer
    #[error("store access failed: {0}")]
    Io(String),
}
